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

//! The symbol table built by Pass 1 and consulted by Pass 2 (§4.4). A
//! label is one of three kinds rather than a bag of address+flag fields
//! (Design Note: "Symbol kind is a natural sum type, not a bitmask").

use crate::errors::AssemblyError;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SymbolKind {
    /// Defined by an instruction line; address is an IC value (§4.2).
    Code { address: u16 },
    /// Defined by `.data`/`.string`/`.mat`; address is DC-relative until
    /// `relocate_data` shifts it by ICF at the end of Pass 1.
    Data { address: u16 },
    /// Declared `.extern`; resolved by the linker, not this assembly unit.
    External,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub entry: bool,
    pub line: usize,
}

/// Labels in first-definition order, so `.ent`/`.ext` output files list
/// symbols the same way the reference implementation does (§6).
#[derive(Debug, Default)]
pub struct SymbolTable {
    order: Vec<String>,
    symbols: HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    pub fn define(&mut self, name: &str, kind: SymbolKind, line: usize) -> Result<(), AssemblyError> {
        if self.symbols.contains_key(name) {
            return Err(AssemblyError::SemanticError {
                line,
                reason: format!("label '{}' is already defined", name),
            });
        }
        self.order.push(name.to_string());
        self.symbols.insert(name.to_string(), Symbol { kind, entry: false, line });
        Ok(())
    }

    /// Record that `name` was named in a `.entry` directive (§9: validated
    /// once, here, after every label in the unit is known).
    pub fn mark_entry(&mut self, name: &str, line: usize) -> Result<(), AssemblyError> {
        let symbol = self.symbols.get_mut(name).ok_or_else(|| AssemblyError::SemanticError {
            line,
            reason: format!("'.entry' refers to undefined label '{}'", name),
        })?;
        if symbol.kind == SymbolKind::External {
            return Err(AssemblyError::SemanticError {
                line,
                reason: format!("'{}' cannot be declared both external and entry", name),
            });
        }
        symbol.entry = true;
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Shift every data symbol's address by `icf`, the final instruction
    /// counter (§4.2 "data addresses are relocated by + ICF").
    pub fn relocate_data(&mut self, icf: u16) {
        for symbol in self.symbols.values_mut() {
            if let SymbolKind::Data { address } = &mut symbol.kind {
                *address += icf;
            }
        }
    }

    pub fn foreach(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.order.iter().map(move |name| (name.as_str(), &self.symbols[name]))
    }

    /// Render the table as a pretty JSON object, in definition order, for
    /// the CLI's `--dump-symbols` debug flag (§1.1).
    pub fn to_json(&self) -> serde_json::Result<String> {
        let snapshot: Vec<(&str, &Symbol)> = self.foreach().collect();
        serde_json::to_string_pretty(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_definition() {
        let mut table = SymbolTable::new();
        table.define("LOOP", SymbolKind::Code { address: 100 }, 1).unwrap();
        assert!(table.define("LOOP", SymbolKind::Code { address: 101 }, 2).is_err());
    }

    #[test]
    fn entry_on_undefined_label_is_an_error() {
        let mut table = SymbolTable::new();
        assert!(table.mark_entry("MISSING", 3).is_err());
    }

    #[test]
    fn entry_on_external_label_is_an_error() {
        let mut table = SymbolTable::new();
        table.define("X", SymbolKind::External, 1).unwrap();
        assert!(table.mark_entry("X", 2).is_err());
    }

    #[test]
    fn relocate_data_shifts_only_data_symbols() {
        let mut table = SymbolTable::new();
        table.define("CODE", SymbolKind::Code { address: 100 }, 1).unwrap();
        table.define("VAR", SymbolKind::Data { address: 3 }, 2).unwrap();
        table.relocate_data(205);
        assert_eq!(table.lookup("CODE").unwrap().kind, SymbolKind::Code { address: 100 });
        assert_eq!(table.lookup("VAR").unwrap().kind, SymbolKind::Data { address: 208 });
    }
}
