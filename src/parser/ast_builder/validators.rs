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

//! Arity and addressing-mode legality checks against the opcode table
//! (§4.5), split out from operand construction so the rules read as a
//! checklist rather than being interleaved with pest tree-walking.

use crate::ast::AddressingMode;
use crate::errors::AssemblyError;
use crate::opcodes::{self, OpcodeInfo};

pub fn check_arity(info: &OpcodeInfo, operand_count: usize, line: usize) -> Result<(), AssemblyError> {
    if operand_count as u8 != info.arity {
        return Err(AssemblyError::StructuralError {
            line,
            reason: format!(
                "'{}' requires {} operand(s), found {}",
                info.mnemonic, info.arity, operand_count
            ),
        });
    }
    Ok(())
}

pub fn check_source_mode(info: &OpcodeInfo, mode: &AddressingMode, line: usize) -> Result<(), AssemblyError> {
    if !opcodes::mode_allowed(info.source_modes, mode) {
        return Err(AssemblyError::StructuralError {
            line,
            reason: format!(
                "'{}' does not accept this addressing mode as a source operand",
                info.mnemonic
            ),
        });
    }
    Ok(())
}

pub fn check_dest_mode(info: &OpcodeInfo, mode: &AddressingMode, line: usize) -> Result<(), AssemblyError> {
    if !opcodes::mode_allowed(info.dest_modes, mode) {
        return Err(AssemblyError::StructuralError {
            line,
            reason: format!(
                "'{}' does not accept this addressing mode as a destination operand",
                info.mnemonic
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Register;
    use crate::opcodes::lookup;

    #[test]
    fn rejects_wrong_arity() {
        let info = lookup("stop").unwrap();
        assert!(check_arity(info, 1, 1).is_err());
    }

    #[test]
    fn rejects_immediate_destination() {
        let info = lookup("mov").unwrap();
        assert!(check_dest_mode(info, &AddressingMode::Immediate(1), 1).is_err());
    }

    #[test]
    fn accepts_register_destination() {
        let info = lookup("mov").unwrap();
        assert!(check_dest_mode(info, &AddressingMode::Register(Register::R0), 1).is_ok());
    }
}
