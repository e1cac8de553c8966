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

//! File path construction and the three output writers (§6). None of this
//! is read by the core -- the core hands over a finished code image, data
//! image, and the two side lists, and this module turns them into text.

use super::base4;
use crate::assembler::pass2::encoder::{mask8, pack_payload_word, ABSOLUTE};
use crate::assembler::pass2::CodeWord;
use crate::assembler::IC_START;
use crate::file_reader::FileReader;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub struct Paths {
    pub source: PathBuf,
    pub expanded: PathBuf,
    pub object: PathBuf,
    pub entries: PathBuf,
    pub externs: PathBuf,
}

/// Build the five well-known paths for `base` (with or without a trailing
/// `.as`, per the CLI surface in §6).
pub fn paths_for(base: &str) -> Paths {
    let base = base.strip_suffix(".as").unwrap_or(base);
    Paths {
        source: PathBuf::from(format!("{}.as", base)),
        expanded: PathBuf::from(format!("{}.am", base)),
        object: PathBuf::from(format!("{}.ob", base)),
        entries: PathBuf::from(format!("{}.ent", base)),
        externs: PathBuf::from(format!("{}.ext", base)),
    }
}

pub fn write_expanded<F: FileReader>(reader: &F, path: &Path, lines: &[String]) -> Result<()> {
    reader.write_string(path, &lines.join("\n"))
}

/// `<code-length> <data-length>` header, then `<address> <word>` per line,
/// code words first, then data words continuing the same address run.
pub fn write_object<F: FileReader>(
    reader: &F,
    path: &Path,
    code_image: &[CodeWord],
    data_image: &[i64],
) -> Result<()> {
    let mut out = String::new();
    out.push_str(&base4::trimmed(code_image.len() as u32));
    out.push(' ');
    out.push_str(&base4::trimmed(data_image.len() as u32));
    out.push('\n');

    let mut addr = IC_START as u32;
    for word in code_image {
        out.push_str(&format!("{} {}\n", base4::trimmed(addr), base4::word(word.value)));
        addr += 1;
    }
    for value in data_image {
        let (payload, _) = mask8(*value);
        let word = pack_payload_word(payload, ABSOLUTE);
        out.push_str(&format!("{} {}\n", base4::trimmed(addr), base4::word(word)));
        addr += 1;
    }

    reader.write_string(path, &out)
}

/// One `<name> <address>` line per record; the file is only written (and
/// only needs to exist) when the list is non-empty.
pub fn write_records<F: FileReader>(reader: &F, path: &Path, records: &[(String, u16)]) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }
    let mut out = String::new();
    for (name, addr) in records {
        out.push_str(&format!("{} {}\n", name, base4::trimmed(*addr as u32)));
    }
    reader.write_string(path, &out)
}

/// Remove every artifact this unit could have produced, so a failed
/// assembly never leaves a stale output file from an earlier successful
/// run (§7 "no output artifact file is left on disk for that translation
/// unit").
pub fn remove_artifacts<F: FileReader>(reader: &F, paths: &Paths) -> Result<()> {
    reader.remove_file(&paths.object)?;
    reader.remove_file(&paths.entries)?;
    reader.remove_file(&paths.externs)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_reader::MockFileReader;

    #[test]
    fn builds_paths_from_a_bare_base() {
        let paths = paths_for("prog");
        assert_eq!(paths.source, PathBuf::from("prog.as"));
        assert_eq!(paths.object, PathBuf::from("prog.ob"));
        assert_eq!(paths.entries, PathBuf::from("prog.ent"));
    }

    #[test]
    fn strips_an_as_suffix_if_given() {
        let paths = paths_for("prog.as");
        assert_eq!(paths.expanded, PathBuf::from("prog.am"));
    }

    #[test]
    fn writes_object_header_with_trimmed_lengths() {
        let reader = MockFileReader::default();
        let code = vec![CodeWord { value: 60, line: 1 }];
        let data = vec![5i64];
        write_object(&reader, Path::new("prog.ob"), &code, &data).unwrap();
        let contents = reader.written("prog.ob").unwrap();
        assert!(contents.starts_with("b b\n"));
    }

    #[test]
    fn skips_writing_an_empty_record_list() {
        let reader = MockFileReader::default();
        write_records(&reader, Path::new("prog.ext"), &[]).unwrap();
        assert!(!reader.exists("prog.ext"));
    }
}
