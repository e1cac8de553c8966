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

//! Tiny text helpers shared by the preassembler and the parser, so both
//! stages agree on where a line ends (§4.1/§4.2 both strip comments before
//! doing anything else with a line).

/// Strip a `;`-led comment that starts outside a string literal.
pub fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            ';' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_comment() {
        assert_eq!(strip_comment("mov r1, r2 ; move it"), "mov r1, r2 ");
    }

    #[test]
    fn ignores_semicolon_inside_string() {
        assert_eq!(strip_comment(".string \"a;b\" ; real comment"), ".string \"a;b\" ");
    }

    #[test]
    fn passes_through_line_without_comment() {
        assert_eq!(strip_comment("stop"), "stop");
    }
}
