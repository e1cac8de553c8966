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

//! Pass 2, the emitter (§4.3): re-reads the expanded source, resolves
//! every operand against Pass 1's symbol table, and produces the bit-exact
//! code image plus the extern-use and entry side lists.

pub mod encoder;

use super::symbol_table::{SymbolKind, SymbolTable};
use crate::ast::{AddressingMode, Line, LineKind, ParsedInstruction};
use crate::errors::Diagnostics;
use crate::opcodes;
use crate::parser;
use encoder::{mask10, mask8, pack_first_word, pack_payload_word, pack_register_word, ABSOLUTE, EXTERNAL, RELOCATABLE};
use super::IC_START;

/// One word of the final code image, tagged with the source line that
/// produced it (§3 "Code word ... with a source-line tag retained for
/// diagnostics").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodeWord {
    pub value: u16,
    pub line: usize,
}

pub struct Pass2Output {
    pub code_image: Vec<CodeWord>,
    pub externs: Vec<(String, u16)>,
    pub entries: Vec<(String, u16)>,
    pub diagnostics: Diagnostics,
    pub ok: bool,
}

pub fn emit(expanded_source: &[String], symbols: &SymbolTable) -> Pass2Output {
    let mut diagnostics = Diagnostics::new();
    let mut code_image: Vec<CodeWord> = Vec::new();
    let mut externs: Vec<(String, u16)> = Vec::new();
    let mut ic = IC_START;

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
        let Line { kind: LineKind::Instruction(instr), .. } = line else {
            continue;
        };
        emit_instruction(&instr, line_number, symbols, &mut code_image, &mut ic, &mut externs, &mut diagnostics);
    }

    let entries = collect_entries(symbols);
    let ok = diagnostics.is_empty();
    Pass2Output { code_image, externs, entries, diagnostics, ok }
}

fn emit_instruction(
    instr: &ParsedInstruction,
    line: usize,
    symbols: &SymbolTable,
    code_image: &mut Vec<CodeWord>,
    ic: &mut u16,
    externs: &mut Vec<(String, u16)>,
    diagnostics: &mut Diagnostics,
) {
    let info = opcodes::lookup_by_opcode(instr.opcode).expect("parser only produces opcodes from the table");
    let src_mode_code = instr.source.as_ref().map(AddressingMode::mode_code).unwrap_or(0);
    let dst_mode_code = instr.destination.as_ref().map(AddressingMode::mode_code).unwrap_or(0);
    push_word(code_image, ic, pack_first_word(info.opcode, src_mode_code, dst_mode_code, ABSOLUTE), line);

    if let (Some(AddressingMode::Register(src)), Some(AddressingMode::Register(dst))) =
        (&instr.source, &instr.destination)
    {
        push_word(code_image, ic, pack_register_word(Some(*src), Some(*dst), ABSOLUTE), line);
        return;
    }

    if let Some(mode) = &instr.source {
        emit_operand(mode, true, line, symbols, code_image, ic, externs, diagnostics);
    }
    if let Some(mode) = &instr.destination {
        emit_operand(mode, false, line, symbols, code_image, ic, externs, diagnostics);
    }
}

fn emit_operand(
    mode: &AddressingMode,
    is_source: bool,
    line: usize,
    symbols: &SymbolTable,
    code_image: &mut Vec<CodeWord>,
    ic: &mut u16,
    externs: &mut Vec<(String, u16)>,
    diagnostics: &mut Diagnostics,
) {
    match mode {
        AddressingMode::Immediate(value) => {
            let (payload, overflowed) = mask8(*value);
            if overflowed {
                diagnostics.push(line, format!("immediate value {} is outside the representable range and was masked", value));
            }
            push_word(code_image, ic, pack_payload_word(payload, ABSOLUTE), line);
        }
        AddressingMode::Register(reg) => {
            let (source, destination) = if is_source { (Some(*reg), None) } else { (None, Some(*reg)) };
            push_word(code_image, ic, pack_register_word(source, destination, ABSOLUTE), line);
        }
        AddressingMode::Direct(name) => {
            emit_label_word(name, line, symbols, code_image, ic, externs, diagnostics);
        }
        AddressingMode::Matrix(name, row, col) => {
            emit_label_word(name, line, symbols, code_image, ic, externs, diagnostics);
            push_word(code_image, ic, pack_register_word(Some(*row), Some(*col), ABSOLUTE), line);
        }
    }
}

fn emit_label_word(
    name: &str,
    line: usize,
    symbols: &SymbolTable,
    code_image: &mut Vec<CodeWord>,
    ic: &mut u16,
    externs: &mut Vec<(String, u16)>,
    diagnostics: &mut Diagnostics,
) {
    let (address, are, is_extern) = match symbols.lookup(name) {
        Some(symbol) => match symbol.kind {
            SymbolKind::Code { address } | SymbolKind::Data { address } => (address, RELOCATABLE, false),
            SymbolKind::External => (0, EXTERNAL, true),
        },
        None => {
            diagnostics.push(line, format!("undefined symbol '{}'", name));
            (0, EXTERNAL, false)
        }
    };

    let (payload, overflowed) = mask8(address as i64);
    if overflowed {
        diagnostics.push(line, format!("address of '{}' is outside the representable range and was masked", name));
    }
    let addr = push_word(code_image, ic, pack_payload_word(payload, are), line);

    if is_extern {
        externs.push((name.to_string(), addr));
    }
}

/// Append `value` to the code image and advance `ic` in the same
/// operation, returning the address the word was placed at (§9 "IC/extern
/// use lock-step").
fn push_word(code_image: &mut Vec<CodeWord>, ic: &mut u16, value: u16, line: usize) -> u16 {
    let addr = *ic;
    code_image.push(CodeWord { value: mask10(value), line });
    *ic += 1;
    addr
}

fn collect_entries(symbols: &SymbolTable) -> Vec<(String, u16)> {
    symbols
        .foreach()
        .filter(|(_, symbol)| symbol.entry)
        .map(|(name, symbol)| {
            let address = match symbol.kind {
                SymbolKind::Code { address } | SymbolKind::Data { address } => address,
                SymbolKind::External => unreachable!("mark_entry refuses external symbols"),
            };
            (name.to_string(), address)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::pass1;
    use crate::namespace::Namespace;

    fn lines(src: &str) -> Vec<String> {
        src.lines().map(str::to_string).collect()
    }

    #[test]
    fn emits_s1_mov_register_register() {
        let src = lines("mov r3, r4\n");
        let pass1 = pass1::analyze(&src, &mut Namespace::new());
        let out = emit(&src, &pass1.symbols);
        assert!(out.ok, "{:?}", out.diagnostics);
        assert_eq!(out.code_image[0], CodeWord { value: 0b0000111100, line: 1 });
        assert_eq!(out.code_image[1], CodeWord { value: 0b0011010000, line: 1 });
    }

    #[test]
    fn emits_s2_stop() {
        let src = lines("stop\n");
        let pass1 = pass1::analyze(&src, &mut Namespace::new());
        let out = emit(&src, &pass1.symbols);
        assert_eq!(out.code_image, vec![CodeWord { value: 0b1111000000, line: 1 }]);
    }

    #[test]
    fn emits_s3_negative_immediate() {
        let src = lines("prn #-1\n");
        let pass1 = pass1::analyze(&src, &mut Namespace::new());
        let out = emit(&src, &pass1.symbols);
        assert_eq!(out.code_image[1], CodeWord { value: 0b1111111100, line: 1 });
    }

    #[test]
    fn emits_s4_extern_use_site() {
        let src = lines(".extern K\njmp K\n");
        let mut ns = Namespace::new();
        let pass1 = pass1::analyze(&src, &mut ns);
        assert!(pass1.ok, "{:?}", pass1.diagnostics);
        let out = emit(&src, &pass1.symbols);
        assert!(out.ok, "{:?}", out.diagnostics);
        assert_eq!(out.externs, vec![("K".to_string(), 101)]);
    }

    #[test]
    fn undefined_symbol_emits_external_standin_and_diagnostic() {
        let src = lines("jmp GHOST\n");
        let pass1 = pass1::analyze(&src, &mut Namespace::new());
        let out = emit(&src, &pass1.symbols);
        assert!(!out.ok);
        assert_eq!(out.code_image[1].value & 0b11, EXTERNAL);
        assert!(out.externs.is_empty());
    }

    #[test]
    fn entry_on_local_code_symbol_is_collected() {
        let src = lines("LOOP: inc r1\n.entry LOOP\n");
        let mut ns = Namespace::new();
        let pass1 = pass1::analyze(&src, &mut ns);
        assert!(pass1.ok, "{:?}", pass1.diagnostics);
        let out = emit(&src, &pass1.symbols);
        assert_eq!(out.entries, vec![("LOOP".to_string(), 100)]);
    }
}
