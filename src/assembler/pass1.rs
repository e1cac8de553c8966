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

//! Pass 1, the analyzer (§4.2): walks the expanded source once, builds the
//! symbol table, sizes every instruction and directive, and relocates
//! data-segment addresses once ICF is known. Emits no code; Pass 2 does
//! that with this pass's symbol table in hand.

use super::symbol_table::{SymbolKind, SymbolTable};
use crate::ast::{Directive, Line, LineKind};
use crate::errors::{AssemblyError, Diagnostics};
use crate::namespace::Namespace;
use crate::opcodes;
use crate::parser;
use super::IC_START;

pub struct Pass1Output {
    pub symbols: SymbolTable,
    /// The data image, in DC order, as parsed integer values (not yet
    /// masked to 10 bits -- that's an emission-time concern for Pass 2).
    pub data_image: Vec<i64>,
    pub icf: u16,
    pub diagnostics: Diagnostics,
    pub ok: bool,
}

pub fn analyze(expanded_source: &[String], namespace: &mut Namespace) -> Pass1Output {
    let mut diagnostics = Diagnostics::new();
    let mut symbols = SymbolTable::new();
    let mut data_image: Vec<i64> = Vec::new();
    let mut entry_requests: Vec<(String, usize)> = Vec::new();
    let mut ic = IC_START;
    let mut dc: u16 = 0;

    for (idx, raw_line) in expanded_source.iter().enumerate() {
        let line_number = idx + 1;
        let line = match parser::parse_line(raw_line, line_number) {
            Ok(Some(line)) => line,
            Ok(None) => continue,
            Err(err) => {
                diagnostics.push_error(err);
                continue;
            }
        };

        match &line.kind {
            LineKind::Directive(Directive::Entry(name)) => {
                entry_requests.push((name.clone(), line_number));
            }
            LineKind::Directive(Directive::Extern(name)) => {
                // A repeated `.extern` of the same name is benign (§4.2);
                // only a duplicate of another kind is an error.
                let already_extern = matches!(
                    symbols.lookup(name).map(|s| s.kind),
                    Some(SymbolKind::External)
                );
                if !already_extern {
                    define_label(&mut symbols, namespace, name, SymbolKind::External, line_number, &mut diagnostics);
                }
            }
            LineKind::Directive(directive) => {
                let values = directive_words(directive);
                if let Some(label) = &line.label {
                    define_label(
                        &mut symbols,
                        namespace,
                        label,
                        SymbolKind::Data { address: dc },
                        line_number,
                        &mut diagnostics,
                    );
                }
                dc += values.len() as u16;
                data_image.extend(values);
            }
            LineKind::Instruction(instr) => {
                if let Some(label) = &line.label {
                    define_label(
                        &mut symbols,
                        namespace,
                        label,
                        SymbolKind::Code { address: ic },
                        line_number,
                        &mut diagnostics,
                    );
                }
                let info = opcodes::lookup_by_opcode(instr.opcode)
                    .expect("parser only produces opcodes from the table");
                ic += opcodes::word_count(info, &instr.source, &instr.destination) as u16;
            }
        }
    }

    let icf = ic;
    symbols.relocate_data(icf);

    for (name, line) in entry_requests {
        if let Err(err) = symbols.mark_entry(&name, line) {
            diagnostics.push_error(err);
        }
    }

    let ok = diagnostics.is_empty();
    Pass1Output { symbols, data_image, icf, diagnostics, ok }
}

fn define_label(
    symbols: &mut SymbolTable,
    namespace: &mut Namespace,
    name: &str,
    kind: SymbolKind,
    line: usize,
    diagnostics: &mut Diagnostics,
) {
    if !namespace.register_label(name) {
        diagnostics.push(line, format!("'{}' collides with an existing macro or label name", name));
        return;
    }
    if let Err(err) = symbols.define(name, kind, line) {
        diagnostics.push_error(err);
    }
}

/// Flatten a data-producing directive into its words, in emission order
/// (§4.2: `.string` is null-terminated, `.mat` is zero-padded up front by
/// the parser already).
fn directive_words(directive: &Directive) -> Vec<i64> {
    match directive {
        Directive::Data(values) => values.clone(),
        Directive::Str(text) => {
            let mut words: Vec<i64> = text.chars().map(|c| c as i64).collect();
            words.push(0);
            words
        }
        Directive::Mat { initializers, .. } => initializers.clone(),
        Directive::Extern(_) | Directive::Entry(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &str) -> Vec<String> {
        src.lines().map(str::to_string).collect()
    }

    #[test]
    fn sizes_a_simple_unit_and_computes_icf() {
        let mut ns = Namespace::new();
        let out = analyze(&lines("LOOP: inc r1\nbne LOOP\nstop\n"), &mut ns);
        assert!(out.ok, "{:?}", out.diagnostics);
        assert_eq!(out.symbols.lookup("LOOP").unwrap().kind, SymbolKind::Code { address: 100 });
        assert_eq!(out.icf, 103);
    }

    #[test]
    fn relocates_data_addresses_by_icf() {
        let mut ns = Namespace::new();
        let out = analyze(&lines("stop\nX: .data 1, 2\n"), &mut ns);
        assert!(out.ok, "{:?}", out.diagnostics);
        assert_eq!(out.icf, 101);
        assert_eq!(out.symbols.lookup("X").unwrap().kind, SymbolKind::Data { address: 101 });
    }

    #[test]
    fn string_directive_is_null_terminated() {
        let mut ns = Namespace::new();
        let out = analyze(&lines(".string \"hi\"\nstop\n"), &mut ns);
        assert!(out.ok, "{:?}", out.diagnostics);
        assert_eq!(out.data_image, vec!['h' as i64, 'i' as i64, 0]);
    }

    #[test]
    fn entry_on_undefined_label_is_a_diagnostic() {
        let mut ns = Namespace::new();
        let out = analyze(&lines(".entry MISSING\nstop\n"), &mut ns);
        assert!(!out.ok);
    }

    #[test]
    fn duplicate_label_is_a_diagnostic() {
        let mut ns = Namespace::new();
        let out = analyze(&lines("A: stop\nA: rts\n"), &mut ns);
        assert!(!out.ok);
    }

    #[test]
    fn label_colliding_with_macro_name_is_a_diagnostic() {
        let mut ns = Namespace::new();
        ns.register_macro("GREET");
        let out = analyze(&lines("GREET: stop\n"), &mut ns);
        assert!(!out.ok);
    }

    #[test]
    fn repeating_the_same_extern_declaration_is_not_a_diagnostic() {
        let mut ns = Namespace::new();
        let out = analyze(&lines(".extern K\n.extern K\njmp K\n"), &mut ns);
        assert!(out.ok, "{:?}", out.diagnostics);
        assert_eq!(out.symbols.lookup("K").unwrap().kind, SymbolKind::External);
    }

    #[test]
    fn redeclaring_an_extern_name_as_a_label_is_still_a_diagnostic() {
        let mut ns = Namespace::new();
        let out = analyze(&lines(".extern K\nK: stop\n"), &mut ns);
        assert!(!out.ok);
    }
}
