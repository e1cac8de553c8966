/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Error types and the diagnostic aggregator (§4.7 / §7).
//!
//! Individual failures are represented by `AssemblyError`; a stage never
//! stops at the first one, it appends to a `Diagnostics` collection and
//! keeps scanning (collect-all semantics), per §4.2/§4.3's "Records
//! diagnostics but continues scanning after each error."

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AssemblyError {
    #[error("{reason}")]
    StructuralError { line: usize, reason: String },

    #[error("{reason}")]
    SemanticError { line: usize, reason: String },

    #[error("{reason}")]
    Resource { reason: String },
}

impl AssemblyError {
    /// Source line this error is tagged with, or 0 for a resource-level
    /// diagnostic that has no associated position (§3 "Diagnostic").
    pub fn line(&self) -> usize {
        match self {
            AssemblyError::StructuralError { line, .. } => *line,
            AssemblyError::SemanticError { line, .. } => *line,
            AssemblyError::Resource { .. } => 0,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// A single (line, message) diagnostic record (§3, §4.7).
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Diagnostic {
            line,
            message: message.into(),
        }
    }
}

impl From<&AssemblyError> for Diagnostic {
    fn from(err: &AssemblyError) -> Self {
        Diagnostic::new(err.line(), err.message())
    }
}

impl From<AssemblyError> for Diagnostic {
    fn from(err: AssemblyError) -> Self {
        Diagnostic::new(err.line(), err.message())
    }
}

/// A grow-on-demand collection of diagnostics. Append is the only way
/// records enter the aggregator during assembly (§4.7: "Append operations
/// are constant-amortized").
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn push(&mut self, line: usize, message: impl Into<String>) {
        self.records.push(Diagnostic::new(line, message));
    }

    pub fn push_error(&mut self, err: impl Into<AssemblyError>) {
        self.records.push(err.into().into());
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter()
    }

    /// Append a copy of `other`'s records onto `self` (§4.7: "Two
    /// aggregators may be merged").
    pub fn merge(&mut self, other: &Diagnostics) {
        self.records.extend(other.records.iter().cloned());
    }

    /// Render every record, in insertion order, as `<filename>:<line>:
    /// <message>` (or `<filename>: <message>` for line 0, a resource-level
    /// diagnostic with no source position).
    pub fn report(&self, filename: &str) -> String {
        self.records
            .iter()
            .map(|d| {
                if d.line == 0 {
                    format!("{}: {}", filename, d.message)
                } else {
                    format!("{}:{}: {}", filename, d.line, d.message)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.report("<source>"))
    }
}
