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

//! Small conversions shared by the directive and operand builders.

use crate::errors::AssemblyError;

pub fn parse_integer(text: &str, line: usize) -> Result<i64, AssemblyError> {
    text.parse::<i64>().map_err(|_| AssemblyError::StructuralError {
        line,
        reason: format!("'{}' is not a valid integer", text),
    })
}

/// Undo the grammar's two escapes (`\"`, `\\`) inside a `.string` literal's
/// body. A trailing lone backslash is passed through unchanged.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescapes_quote_and_backslash() {
        assert_eq!(unescape(r#"a\"b\\c"#), "a\"b\\c");
    }

    #[test]
    fn parses_signed_integer() {
        assert_eq!(parse_integer("-7", 1).unwrap(), -7);
    }

    #[test]
    fn rejects_malformed_integer() {
        assert!(parse_integer("12x", 1).is_err());
    }
}
