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

//! The shared identifier namespace that macro names and label names draw
//! from (§3 "Identifier", §8 invariant 8).
//!
//! Design Note ("Shared global namespace"): the reference implementation
//! uses a process-wide set. This threads a per-assembly `Namespace` value
//! through the preassembler and Pass 1 as a constructor argument instead,
//! so a driver assembling several files never leaks names between them
//! (§5 "Per-file processing is independent").

use std::collections::HashSet;

#[derive(Debug, Default, Clone)]
pub struct Namespace {
    macros: HashSet<String>,
    labels: HashSet<String>,
}

impl Namespace {
    pub fn new() -> Self {
        Namespace::default()
    }

    pub fn register_macro(&mut self, name: &str) -> bool {
        if self.labels.contains(name) {
            return false;
        }
        self.macros.insert(name.to_string())
    }

    pub fn register_label(&mut self, name: &str) -> bool {
        if self.macros.contains(name) {
            return false;
        }
        self.labels.insert(name.to_string())
    }

    pub fn is_macro(&self, name: &str) -> bool {
        self.macros.contains(name)
    }

    pub fn is_label(&self, name: &str) -> bool {
        self.labels.contains(name)
    }
}
