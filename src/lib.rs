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

pub mod assembler;
pub mod ast;
pub mod errors;
pub mod file_reader;
pub mod identifiers;
pub mod namespace;
pub mod opcodes;
pub mod output;
pub mod parser;
pub mod preassembler;
pub mod text;

extern crate pest;
extern crate pest_derive;

use anyhow::{Context, Result};
use assembler::symbol_table::SymbolTable;
use errors::Diagnostics;
use file_reader::FileReader;
use namespace::Namespace;

/// Result of assembling a single translation unit (§5 "per-file processing
/// is independent"). `diagnostics` holds whichever stage's report stopped
/// the pipeline; it is empty when `ok` is true. `symbols` is only populated
/// on success, for the CLI's `--dump-symbols` debug flag (§1.1).
pub struct AssemblyOutcome {
    pub ok: bool,
    pub diagnostics: Diagnostics,
    pub symbols: Option<SymbolTable>,
}

/// Run the full pipeline for one base path (§2): preassemble, Pass 1,
/// Pass 2, then write the `.am`/`.ob`/`.ent`/`.ext` artifacts. On any stage
/// failure, no output artifact is left behind and the stage's diagnostics
/// are returned for the caller to print.
pub fn assemble<F: FileReader>(base: &str, reader: &F) -> Result<AssemblyOutcome> {
    let paths = output::paths_for(base);
    let mut namespace = Namespace::new();

    let source = reader
        .read_to_string(&paths.source)
        .with_context(|| format!("failed to read source file {}", paths.source.display()))?;

    let expanded = preassembler::expand(&source, &mut namespace);
    if !expanded.ok {
        output::remove_artifacts(reader, &paths).context("failed cleaning up a failed unit's artifacts")?;
        return Ok(AssemblyOutcome { ok: false, diagnostics: expanded.diagnostics, symbols: None });
    }

    output::write_expanded(reader, &paths.expanded, &expanded.lines)
        .context("failed writing the expanded source file")?;

    let pass1 = assembler::pass1::analyze(&expanded.lines, &mut namespace);
    if !pass1.ok {
        output::remove_artifacts(reader, &paths).context("failed cleaning up a failed unit's artifacts")?;
        return Ok(AssemblyOutcome { ok: false, diagnostics: pass1.diagnostics, symbols: None });
    }

    let pass2 = assembler::pass2::emit(&expanded.lines, &pass1.symbols);
    if !pass2.ok {
        output::remove_artifacts(reader, &paths).context("failed cleaning up a failed unit's artifacts")?;
        return Ok(AssemblyOutcome { ok: false, diagnostics: pass2.diagnostics, symbols: None });
    }

    output::write_object(reader, &paths.object, &pass2.code_image, &pass1.data_image)
        .context("failed writing the object file")?;
    output::write_records(reader, &paths.entries, &pass2.entries).context("failed writing the entry file")?;
    output::write_records(reader, &paths.externs, &pass2.externs).context("failed writing the extern file")?;

    Ok(AssemblyOutcome { ok: true, diagnostics: Diagnostics::new(), symbols: Some(pass1.symbols) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use file_reader::MockFileReader;

    #[test]
    fn assembles_a_well_formed_unit_and_writes_all_artifacts() {
        let mut reader = MockFileReader::default();
        reader.add_file("prog.as", "L: .data 5, -3\nmov L, r2\n");
        let outcome = assemble("prog", &reader).unwrap();
        assert!(outcome.ok, "{:?}", outcome.diagnostics);
        assert!(reader.exists("prog.am"));
        assert!(reader.exists("prog.ob"));
    }

    #[test]
    fn leaves_no_artifacts_behind_on_failure() {
        let mut reader = MockFileReader::default();
        reader.add_file("prog.as", "mov ,r1\n");
        let outcome = assemble("prog", &reader).unwrap();
        assert!(!outcome.ok);
        assert!(!reader.exists("prog.ob"));
    }

    #[test]
    fn removes_stale_artifacts_from_a_previous_successful_run() {
        let mut reader = MockFileReader::default();
        reader.add_file("prog.as", ".bogus 1\n");
        reader.add_file("prog.ob", "stale");
        let outcome = assemble("prog", &reader).unwrap();
        assert!(!outcome.ok);
        assert!(!reader.exists("prog.ob"));
    }
}
