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

//! Macro expansion (§4.1). Produces the expanded-source artifact consumed
//! by both passes: a sequence of lines with every macro definition removed
//! and every invocation replaced by its body.

use crate::errors::Diagnostics;
use crate::identifiers::validate_macro_name;
use crate::namespace::Namespace;
use crate::text::strip_comment;
use std::collections::HashMap;

const MAX_LINE_LEN: usize = 80;

/// Per-line state of the `mcro`/`mcroend` state machine described in §4.1.
enum State {
    Outside,
    Recording {
        name: String,
        body: Vec<String>,
        start_line: usize,
    },
}

pub struct PreassemblerOutput {
    pub lines: Vec<String>,
    pub diagnostics: Diagnostics,
    pub ok: bool,
}

/// Expand `source`, registering every macro name in `namespace` so Pass 1
/// can reject a label that collides with one (§8 invariant 8).
pub fn expand(source: &str, namespace: &mut Namespace) -> PreassemblerOutput {
    let mut diagnostics = Diagnostics::new();
    let mut macros: HashMap<String, Vec<String>> = HashMap::new();
    let mut state = State::Outside;
    let mut output = Vec::new();

    for (idx, raw_line) in source.lines().enumerate() {
        let line_number = idx + 1;
        let stripped = strip_comment(raw_line);
        if stripped.chars().count() > MAX_LINE_LEN {
            diagnostics.push(
                line_number,
                format!("line exceeds the {}-character limit", MAX_LINE_LEN),
            );
            continue;
        }
        let trimmed = stripped.trim();

        match &mut state {
            State::Outside => {
                if let Some(header) = mcro_header(trimmed) {
                    match header {
                        Ok(name) => {
                            if macros.contains_key(name) {
                                diagnostics.push(
                                    line_number,
                                    format!("macro '{}' is already defined", name),
                                );
                            } else if let Err(reason) = validate_macro_name(name) {
                                diagnostics.push(line_number, reason);
                            } else if !namespace.register_macro(name) {
                                diagnostics.push(
                                    line_number,
                                    format!(
                                        "'{}' collides with an existing label or macro name",
                                        name
                                    ),
                                );
                            } else {
                                state = State::Recording {
                                    name: name.to_string(),
                                    body: Vec::new(),
                                    start_line: line_number,
                                };
                            }
                        }
                        Err(reason) => diagnostics.push(line_number, reason),
                    }
                } else if trimmed == "mcroend" {
                    diagnostics.push(line_number, "'mcroend' without a matching 'mcro'");
                } else if let Some(body) = macros.get(trimmed) {
                    output.extend(body.iter().cloned());
                } else {
                    output.push(raw_line.to_string());
                }
            }
            State::Recording { name, body, .. } => {
                if trimmed == "mcroend" {
                    let name = name.clone();
                    let body = std::mem::take(body);
                    macros.insert(name, body);
                    state = State::Outside;
                } else if mcro_header(trimmed).is_some() {
                    diagnostics.push(line_number, "nested macro definitions are not allowed");
                } else {
                    body.push(stripped.to_string());
                }
            }
        }
    }

    if let State::Recording { start_line, .. } = state {
        diagnostics.push(
            start_line,
            "macro definition is not closed before end of input",
        );
    }

    let ok = diagnostics.is_empty();
    PreassemblerOutput {
        lines: if ok { output } else { Vec::new() },
        diagnostics,
        ok,
    }
}

/// If `trimmed` is a `mcro` header line, returns `Some(Ok(name))` with the
/// name text, or `Some(Err(reason))` if the header is malformed. Returns
/// `None` if the line isn't a `mcro` header at all.
fn mcro_header(trimmed: &str) -> Option<Result<&str, String>> {
    let rest = trimmed.strip_prefix("mcro")?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        // e.g. "mcroend" or an identifier that merely starts with "mcro"
        return None;
    }
    let rest = rest.trim();
    if rest.is_empty() {
        return Some(Err("macro header is missing a name".to_string()));
    }
    if rest.split_whitespace().count() > 1 {
        return Some(Err(format!(
            "unexpected trailing text after macro name '{}'",
            rest.split_whitespace().next().unwrap_or_default()
        )));
    }
    Some(Ok(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_plain_source() {
        let mut ns = Namespace::new();
        let out = expand("mov r1, r2\nstop\n", &mut ns);
        assert!(out.ok);
        assert_eq!(out.lines, vec!["mov r1, r2", "stop"]);
    }

    #[test]
    fn expands_a_macro_invocation() {
        let mut ns = Namespace::new();
        let src = "mcro GREET\nclr r1\ninc r1\nmcroend\nGREET\nstop\n";
        let out = expand(src, &mut ns);
        assert!(out.ok, "{:?}", out.diagnostics);
        assert_eq!(out.lines, vec!["clr r1", "inc r1", "stop"]);
    }

    #[test]
    fn preserves_blank_and_comment_lines() {
        let mut ns = Namespace::new();
        let src = "stop\n\n; a comment\nrts\n";
        let out = expand(src, &mut ns);
        assert!(out.ok);
        assert_eq!(out.lines, vec!["stop", "", "; a comment", "rts"]);
    }

    #[test]
    fn rejects_duplicate_macro_definitions() {
        let mut ns = Namespace::new();
        let src = "mcro A\nstop\nmcroend\nmcro A\nrts\nmcroend\n";
        let out = expand(src, &mut ns);
        assert!(!out.ok);
        assert!(out.diagnostics.len() >= 1);
    }

    #[test]
    fn rejects_nested_macro_definitions() {
        let mut ns = Namespace::new();
        let src = "mcro A\nmcro B\nstop\nmcroend\nmcroend\n";
        let out = expand(src, &mut ns);
        assert!(!out.ok);
    }

    #[test]
    fn rejects_unclosed_macro_definition() {
        let mut ns = Namespace::new();
        let src = "mcro A\nstop\n";
        let out = expand(src, &mut ns);
        assert!(!out.ok);
    }

    #[test]
    fn rejects_overlong_lines() {
        let mut ns = Namespace::new();
        let long_line = "a".repeat(90);
        let out = expand(&long_line, &mut ns);
        assert!(!out.ok);
    }

    #[test]
    fn rejects_reserved_macro_name() {
        let mut ns = Namespace::new();
        let src = "mcro mov\nstop\nmcroend\n";
        let out = expand(src, &mut ns);
        assert!(!out.ok);
    }
}
