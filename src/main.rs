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

use anyhow::Result;
use asmcore::assemble;
use asmcore::file_reader::AsmFileReader;
use clap::Parser as clap_parser;
use std::process::ExitCode;

#[derive(clap_parser)]
#[clap(version = "0.1.0", author = "Connor Nolan")]
struct Opts {
    /// Base names of the translation units to assemble, with or without a
    /// trailing `.as`.
    bases: Vec<String>,

    /// Print the final symbol table as JSON after a successful assembly.
    #[clap(long)]
    dump_symbols: bool,
}

fn main() -> Result<ExitCode> {
    let opts: Opts = Opts::parse();
    let reader = AsmFileReader;
    let mut failed = false;

    for base in &opts.bases {
        let outcome = match assemble(base, &reader) {
            Ok(outcome) => outcome,
            Err(err) => {
                eprintln!("{}: {:#}", base, err);
                failed = true;
                continue;
            }
        };

        if !outcome.ok {
            eprintln!("{}", outcome.diagnostics.report(base));
            failed = true;
            continue;
        }

        println!("assembled {}", base);
        if opts.dump_symbols {
            if let Some(symbols) = &outcome.symbols {
                match symbols.to_json() {
                    Ok(json) => println!("{}", json),
                    Err(err) => eprintln!("{}: failed to serialize symbol table: {}", base, err),
                }
            }
        }
    }

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
