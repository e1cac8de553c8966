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

//! Builds a `ParsedInstruction` from the `instruction_body` rule (§4.5).
//! The mnemonic has already been matched and looked up by the caller; this
//! module only sees the operand text and the matching `OpcodeInfo`.

use super::utility_functions::parse_integer;
use super::validators::{check_arity, check_dest_mode, check_source_mode};
use crate::ast::{AddressingMode, ParsedInstruction, Register};
use crate::errors::AssemblyError;
use crate::opcodes::OpcodeInfo;
use crate::parser::{Rule, StatementParser};
use pest::iterators::Pair;
use pest::Parser;

pub fn build_instruction(
    info: &OpcodeInfo,
    text: &str,
    line: usize,
) -> Result<ParsedInstruction, AssemblyError> {
    let pairs = StatementParser::parse(Rule::instruction_body, text)
        .map_err(|e| AssemblyError::StructuralError { line, reason: e.to_string() })?;
    let mut operands: Vec<AddressingMode> = Vec::new();
    for pair in pairs.into_iter().next().unwrap().into_inner() {
        if pair.as_rule() == Rule::operand {
            operands.push(build_operand(pair, line)?);
        }
    }

    check_arity(info, operands.len(), line)?;

    let (source, destination) = match info.arity {
        0 => (None, None),
        1 => (None, Some(operands.remove(0))),
        2 => {
            let destination = operands.remove(1);
            let source = operands.remove(0);
            (Some(source), Some(destination))
        }
        other => unreachable!("opcode table arity is always 0, 1, or 2, found {}", other),
    };

    if let Some(mode) = &source {
        check_source_mode(info, mode, line)?;
    }
    if let Some(mode) = &destination {
        check_dest_mode(info, mode, line)?;
    }

    Ok(ParsedInstruction { opcode: info.opcode, source, destination })
}

fn build_operand(pair: Pair<Rule>, line: usize) -> Result<AddressingMode, AssemblyError> {
    let inner = pair.into_inner().next().expect("operand always wraps exactly one alternative");
    Ok(match inner.as_rule() {
        Rule::immediate => {
            let digits = &inner.as_str()[1..];
            AddressingMode::Immediate(parse_integer(digits, line)?)
        }
        Rule::register => AddressingMode::Register(parse_register(&inner)),
        Rule::matrix => {
            let mut children = inner.into_inner();
            let label = children.next().expect("matrix always has a label").as_str().to_string();
            let row = parse_register(&children.next().expect("matrix always has a row register"));
            let col = parse_register(&children.next().expect("matrix always has a column register"));
            AddressingMode::Matrix(label, row, col)
        }
        Rule::direct => AddressingMode::Direct(inner.as_str().to_string()),
        other => unreachable!("operand grammar only produces four alternatives, found {:?}", other),
    })
}

fn parse_register(pair: &Pair<Rule>) -> Register {
    let idx: u8 = pair.as_str()[1..].parse().expect("register rule only matches r0-r7");
    Register::from_index(idx).expect("register rule only matches r0-r7")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcodes::lookup;

    #[test]
    fn builds_two_operand_instruction() {
        let info = lookup("mov").unwrap();
        let parsed = build_instruction(info, "#5, r2", 1).unwrap();
        assert_eq!(parsed.source, Some(AddressingMode::Immediate(5)));
        assert_eq!(parsed.destination, Some(AddressingMode::Register(Register::R2)));
    }

    #[test]
    fn builds_matrix_operand() {
        let info = lookup("jmp").unwrap();
        let parsed = build_instruction(info, "M[r1][r2]", 1).unwrap();
        assert_eq!(
            parsed.destination,
            Some(AddressingMode::Matrix("M".to_string(), Register::R1, Register::R2))
        );
    }

    #[test]
    fn rejects_immediate_destination() {
        let info = lookup("mov").unwrap();
        assert!(build_instruction(info, "r1, #5", 1).is_err());
    }

    #[test]
    fn rejects_wrong_operand_count() {
        let info = lookup("rts").unwrap();
        assert!(build_instruction(info, "r1", 1).is_err());
    }

    #[test]
    fn an_immediate_too_large_for_i64_is_a_diagnostic_not_a_panic() {
        let info = lookup("prn").unwrap();
        assert!(build_instruction(info, "#99999999999999999999", 1).is_err());
    }
}
