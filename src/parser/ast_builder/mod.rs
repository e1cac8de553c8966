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

//! Turns pest parse trees from `grammar.pest` into `ast` values. Split by
//! what's being built: directives, instruction operands, and the small
//! utilities and arity/mode checks both of those lean on.

mod directive_builders;
mod operand_builders;
mod utility_functions;
mod validators;

pub use directive_builders::{build_data, build_entry, build_extern, build_mat, build_string};
pub use operand_builders::build_instruction;
