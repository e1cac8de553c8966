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

//! Identifier rules shared by the preassembler (macro names) and the
//! parser (label names) — §3 "Identifier".

pub const MAX_IDENTIFIER_LEN: usize = 31;

const MNEMONICS: &[&str] = &[
    "mov", "cmp", "add", "sub", "lea", "clr", "not", "inc", "dec", "jmp", "bne", "red", "prn",
    "jsr", "rts", "stop",
];

const DIRECTIVES: &[&str] = &[".data", ".string", ".mat", ".entry", ".extern"];

/// An identifier is reserved if it matches a mnemonic or a directive name
/// (directive names are matched without their leading dot, since neither a
/// label nor a macro name can carry one).
pub fn is_reserved(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    MNEMONICS.contains(&lower.as_str()) || DIRECTIVES.iter().any(|d| &d[1..] == lower)
}

fn starts_with_letter(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

/// Validate a macro name: letters/digits, underscores allowed after the
/// first letter, length <= 31, not reserved.
pub fn validate_macro_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("macro name must not be empty".to_string());
    }
    if !starts_with_letter(name) {
        return Err(format!("macro name '{}' must start with a letter", name));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(format!(
            "macro name '{}' contains an invalid character",
            name
        ));
    }
    if name.len() > MAX_IDENTIFIER_LEN {
        return Err(format!(
            "macro name '{}' exceeds the {}-character limit",
            name, MAX_IDENTIFIER_LEN
        ));
    }
    if is_reserved(name) {
        return Err(format!("'{}' is a reserved word and cannot name a macro", name));
    }
    Ok(())
}

/// Validate a label name: letters/digits only (no underscores), length
/// <= 31, not reserved. Stricter than a macro name (§3: "Labels forbid
/// underscores").
pub fn validate_label_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("label name must not be empty".to_string());
    }
    if !starts_with_letter(name) {
        return Err(format!("label '{}' must start with a letter", name));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!(
            "label '{}' may only contain letters and digits",
            name
        ));
    }
    if name.len() > MAX_IDENTIFIER_LEN {
        return Err(format!(
            "label '{}' exceeds the {}-character limit",
            name, MAX_IDENTIFIER_LEN
        ));
    }
    if is_reserved(name) {
        return Err(format!("'{}' is a reserved word and cannot be a label", name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_underscore_in_labels() {
        assert!(validate_label_name("my_label").is_err());
    }

    #[test]
    fn accepts_underscore_in_macros() {
        assert!(validate_macro_name("my_macro").is_ok());
    }

    #[test]
    fn rejects_reserved_mnemonic() {
        assert!(validate_label_name("mov").is_err());
        assert!(validate_macro_name("stop").is_err());
    }

    #[test]
    fn rejects_reserved_directive() {
        assert!(validate_label_name("data").is_err());
    }

    #[test]
    fn rejects_leading_digit() {
        assert!(validate_label_name("1abc").is_err());
    }

    #[test]
    fn rejects_overlong_identifier() {
        let name = "a".repeat(32);
        assert!(validate_label_name(&name).is_err());
    }

    #[test]
    fn accepts_well_formed_label() {
        assert!(validate_label_name("LOOP1").is_ok());
    }
}
