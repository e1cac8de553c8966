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

//! The assembler's in-memory data model: registers, addressing modes,
//! directives, and the per-line AST produced by the parser.

use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Register {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
}

impl Register {
    pub fn index(self) -> u8 {
        match self {
            Register::R0 => 0,
            Register::R1 => 1,
            Register::R2 => 2,
            Register::R3 => 3,
            Register::R4 => 4,
            Register::R5 => 5,
            Register::R6 => 6,
            Register::R7 => 7,
        }
    }

    pub fn from_index(idx: u8) -> Option<Register> {
        match idx {
            0 => Some(Register::R0),
            1 => Some(Register::R1),
            2 => Some(Register::R2),
            3 => Some(Register::R3),
            4 => Some(Register::R4),
            5 => Some(Register::R5),
            6 => Some(Register::R6),
            7 => Some(Register::R7),
            _ => None,
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.index())
    }
}

/// Addressing mode of a single operand. Exhaustively matched by the emitter
/// in `assembler::pass2::encoder` rather than dispatched through if-chains
/// (Design Note: "Addressing mode is a natural sum type with payloads").
#[derive(Debug, Clone, PartialEq)]
pub enum AddressingMode {
    Immediate(i64),
    Direct(String),
    Matrix(String, Register, Register),
    Register(Register),
}

impl AddressingMode {
    /// The 2-bit mode code used in the instruction's first word (§4.6).
    pub fn mode_code(&self) -> u16 {
        match self {
            AddressingMode::Immediate(_) => 0,
            AddressingMode::Direct(_) => 1,
            AddressingMode::Matrix(..) => 2,
            AddressingMode::Register(_) => 3,
        }
    }

    pub fn word_count(&self) -> u32 {
        match self {
            AddressingMode::Matrix(..) => 2,
            _ => 1,
        }
    }
}

/// A parsed instruction: opcode index plus up to two operands, in
/// source-then-destination order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInstruction {
    pub opcode: u8,
    pub source: Option<AddressingMode>,
    pub destination: Option<AddressingMode>,
}

/// Assembler directives (§4.2 of the language spec). `.entry`/`.extern`
/// carry a bare name; `.data`/`.string`/`.mat` carry the data they append
/// to the data image.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Data(Vec<i64>),
    Str(String),
    Mat {
        rows: u32,
        cols: u32,
        initializers: Vec<i64>,
    },
    Extern(String),
    Entry(String),
}

/// A single line of the expanded source, after comment-stripping and label
/// extraction. Blank/comment-only lines never produce a `Line`.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub line_number: usize,
    pub label: Option<String>,
    pub kind: LineKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    Directive(Directive),
    Instruction(ParsedInstruction),
}
