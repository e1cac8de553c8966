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

//! Builds `ast::Directive` values from the directive body rules in
//! `grammar.pest` (§4.2). The caller has already matched the directive
//! keyword in plain Rust; these functions only see the text that follows.

use super::utility_functions::{parse_integer, unescape};
use crate::ast::Directive;
use crate::errors::AssemblyError;
use crate::identifiers::validate_label_name;
use crate::parser::{Rule, StatementParser};
use pest::Parser;

pub fn build_data(text: &str, line: usize) -> Result<Directive, AssemblyError> {
    let pairs = StatementParser::parse(Rule::data_body, text)
        .map_err(|e| AssemblyError::StructuralError { line, reason: e.to_string() })?;
    let mut values = Vec::new();
    for pair in pairs.into_iter().next().unwrap().into_inner() {
        if pair.as_rule() == Rule::integer {
            values.push(parse_integer(pair.as_str(), line)?);
        }
    }
    Ok(Directive::Data(values))
}

pub fn build_string(text: &str, line: usize) -> Result<Directive, AssemblyError> {
    let pairs = StatementParser::parse(Rule::string_body, text)
        .map_err(|e| AssemblyError::StructuralError { line, reason: e.to_string() })?;
    let body = pairs.into_iter().next().expect("string_body always matches once on success");
    let string_lit = body
        .into_inner()
        .find(|p| p.as_rule() == Rule::string_lit)
        .expect("string_body requires a string_lit");
    let raw = string_lit
        .into_inner()
        .find(|p| p.as_rule() == Rule::string_inner)
        .map(|p| p.as_str())
        .unwrap_or("");
    Ok(Directive::Str(unescape(raw)))
}

pub fn build_mat(text: &str, line: usize) -> Result<Directive, AssemblyError> {
    let pairs = StatementParser::parse(Rule::mat_body, text)
        .map_err(|e| AssemblyError::StructuralError { line, reason: e.to_string() })?;
    let mut dims = Vec::new();
    let mut initializers = Vec::new();
    for pair in pairs.into_iter().next().unwrap().into_inner() {
        match pair.as_rule() {
            Rule::pos_integer => {
                let value = pair.as_str().parse::<u32>().map_err(|_| AssemblyError::StructuralError {
                    line,
                    reason: format!("'{}' is not a valid matrix dimension", pair.as_str()),
                })?;
                dims.push(value);
            }
            Rule::integer => initializers.push(parse_integer(pair.as_str(), line)?),
            _ => {}
        }
    }
    let rows = dims.first().copied().unwrap_or(0);
    let cols = dims.get(1).copied().unwrap_or(0);
    if rows == 0 || cols == 0 {
        return Err(AssemblyError::StructuralError {
            line,
            reason: ".mat dimensions must be positive".to_string(),
        });
    }
    let capacity = (rows * cols) as usize;
    if initializers.len() > capacity {
        return Err(AssemblyError::StructuralError {
            line,
            reason: format!(
                ".mat[{}][{}] has room for {} initializer(s), found {}",
                rows,
                cols,
                capacity,
                initializers.len()
            ),
        });
    }
    initializers.resize(capacity, 0);
    Ok(Directive::Mat { rows, cols, initializers })
}

pub fn build_extern(text: &str, line: usize) -> Result<Directive, AssemblyError> {
    parse_bare_label(Rule::extern_body, text, line, ".extern").map(Directive::Extern)
}

pub fn build_entry(text: &str, line: usize) -> Result<Directive, AssemblyError> {
    parse_bare_label(Rule::entry_body, text, line, ".entry").map(Directive::Entry)
}

fn parse_bare_label(rule: Rule, text: &str, line: usize, directive: &str) -> Result<String, AssemblyError> {
    let pairs = StatementParser::parse(rule, text)
        .map_err(|e| AssemblyError::StructuralError { line, reason: e.to_string() })?;
    let ident = pairs
        .into_iter()
        .next()
        .expect("body rule always matches once on success")
        .into_inner()
        .find(|p| p.as_rule() == Rule::identifier)
        .ok_or_else(|| AssemblyError::StructuralError {
            line,
            reason: format!("{} requires a label name", directive),
        })?;
    let name = ident.as_str().to_string();
    validate_label_name(&name).map_err(|reason| AssemblyError::StructuralError { line, reason })?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_data_directive() {
        assert_eq!(build_data("1, -2, 3", 1).unwrap(), Directive::Data(vec![1, -2, 3]));
    }

    #[test]
    fn builds_string_directive_with_escapes() {
        assert_eq!(
            build_string(r#""hi \"there\"""#, 1).unwrap(),
            Directive::Str("hi \"there\"".to_string())
        );
    }

    #[test]
    fn pads_mat_initializers_with_zero() {
        let d = build_mat("[2][2] 1, 2", 1).unwrap();
        assert_eq!(d, Directive::Mat { rows: 2, cols: 2, initializers: vec![1, 2, 0, 0] });
    }

    #[test]
    fn rejects_mat_with_too_many_initializers() {
        assert!(build_mat("[1][1] 1, 2", 1).is_err());
    }

    #[test]
    fn builds_extern_directive() {
        assert_eq!(build_extern("FOO", 1).unwrap(), Directive::Extern("FOO".to_string()));
    }

    #[test]
    fn rejects_extern_with_invalid_label() {
        assert!(build_extern("my_thing", 1).is_err());
    }
}
