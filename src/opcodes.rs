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

//! The fixed 16-entry opcode table (§4.5): mnemonic, arity, and which
//! addressing modes each operand slot permits. Shared by the parser
//! (arity/mode validation, word-count sizing for Pass 1) and by the
//! emitter (opcode bits for the first word).

use crate::ast::AddressingMode;

pub const IMM: u8 = 0b0001;
pub const DIRECT: u8 = 0b0010;
pub const MATRIX: u8 = 0b0100;
pub const REG: u8 = 0b1000;
pub const NONE: u8 = 0;

pub const ALL_BUT_IMM: u8 = DIRECT | MATRIX | REG;
pub const ALL: u8 = IMM | DIRECT | MATRIX | REG;
pub const LABEL_ONLY: u8 = DIRECT | MATRIX;

#[derive(Debug, Clone, Copy)]
pub struct OpcodeInfo {
    pub mnemonic: &'static str,
    pub opcode: u8,
    pub arity: u8,
    pub source_modes: u8,
    pub dest_modes: u8,
}

/// Does `modes` (a bitset built from `IMM`/`DIRECT`/`MATRIX`/`REG`) permit
/// `mode`?
pub fn mode_allowed(modes: u8, mode: &AddressingMode) -> bool {
    let bit = match mode {
        AddressingMode::Immediate(_) => IMM,
        AddressingMode::Direct(_) => DIRECT,
        AddressingMode::Matrix(..) => MATRIX,
        AddressingMode::Register(_) => REG,
    };
    modes & bit != 0
}

pub const OPCODES: [OpcodeInfo; 16] = [
    OpcodeInfo { mnemonic: "mov", opcode: 0, arity: 2, source_modes: ALL, dest_modes: ALL_BUT_IMM },
    OpcodeInfo { mnemonic: "cmp", opcode: 1, arity: 2, source_modes: ALL, dest_modes: ALL },
    OpcodeInfo { mnemonic: "add", opcode: 2, arity: 2, source_modes: ALL, dest_modes: ALL_BUT_IMM },
    OpcodeInfo { mnemonic: "sub", opcode: 3, arity: 2, source_modes: ALL, dest_modes: ALL_BUT_IMM },
    OpcodeInfo { mnemonic: "lea", opcode: 4, arity: 2, source_modes: LABEL_ONLY, dest_modes: ALL_BUT_IMM },
    OpcodeInfo { mnemonic: "clr", opcode: 5, arity: 1, source_modes: NONE, dest_modes: ALL_BUT_IMM },
    OpcodeInfo { mnemonic: "not", opcode: 6, arity: 1, source_modes: NONE, dest_modes: ALL_BUT_IMM },
    OpcodeInfo { mnemonic: "inc", opcode: 7, arity: 1, source_modes: NONE, dest_modes: ALL_BUT_IMM },
    OpcodeInfo { mnemonic: "dec", opcode: 8, arity: 1, source_modes: NONE, dest_modes: ALL_BUT_IMM },
    OpcodeInfo { mnemonic: "jmp", opcode: 9, arity: 1, source_modes: NONE, dest_modes: LABEL_ONLY },
    OpcodeInfo { mnemonic: "bne", opcode: 10, arity: 1, source_modes: NONE, dest_modes: LABEL_ONLY },
    OpcodeInfo { mnemonic: "red", opcode: 11, arity: 1, source_modes: NONE, dest_modes: ALL_BUT_IMM },
    OpcodeInfo { mnemonic: "prn", opcode: 12, arity: 1, source_modes: NONE, dest_modes: ALL },
    OpcodeInfo { mnemonic: "jsr", opcode: 13, arity: 1, source_modes: NONE, dest_modes: LABEL_ONLY },
    OpcodeInfo { mnemonic: "rts", opcode: 14, arity: 0, source_modes: NONE, dest_modes: NONE },
    OpcodeInfo { mnemonic: "stop", opcode: 15, arity: 0, source_modes: NONE, dest_modes: NONE },
];

pub fn lookup(mnemonic: &str) -> Option<&'static OpcodeInfo> {
    let lower = mnemonic.to_ascii_lowercase();
    OPCODES.iter().find(|op| op.mnemonic == lower)
}

pub fn lookup_by_opcode(opcode: u8) -> Option<&'static OpcodeInfo> {
    OPCODES.iter().find(|op| op.opcode == opcode)
}

/// Number of words an instruction with this opcode and these operands
/// occupies (§4.5 "Size rule").
pub fn word_count(info: &OpcodeInfo, source: &Option<AddressingMode>, dest: &Option<AddressingMode>) -> u32 {
    let mut count = 1;
    if info.arity == 2 {
        if let (Some(AddressingMode::Register(_)), Some(AddressingMode::Register(_))) = (source, dest) {
            return 2;
        }
    }
    if let Some(mode) = source {
        count += mode.word_count();
    }
    if let Some(mode) = dest {
        count += mode.word_count();
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_known_mnemonics() {
        assert_eq!(lookup("mov").unwrap().opcode, 0);
        assert_eq!(lookup("STOP").unwrap().opcode, 15);
    }

    #[test]
    fn rejects_unknown_mnemonic() {
        assert!(lookup("frobnicate").is_none());
    }

    #[test]
    fn both_registers_collapse_to_two_words() {
        let info = lookup("mov").unwrap();
        let n = word_count(
            info,
            &Some(AddressingMode::Register(crate::ast::Register::R1)),
            &Some(AddressingMode::Register(crate::ast::Register::R2)),
        );
        assert_eq!(n, 2);
    }

    #[test]
    fn matrix_operand_counts_two_words() {
        let info = lookup("jmp").unwrap();
        let n = word_count(
            info,
            &None,
            &Some(AddressingMode::Matrix(
                "L".to_string(),
                crate::ast::Register::R0,
                crate::ast::Register::R1,
            )),
        );
        assert_eq!(n, 2);
    }
}
