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

//! The output adapter (§1, §6): an external collaborator that turns the
//! core's finished artifacts into the `.am`/`.ob`/`.ent`/`.ext` files.
//! Nothing under `assembler::*` imports this module.

pub mod base4;
pub mod writer;

pub use writer::{paths_for, remove_artifacts, write_expanded, write_object, write_records, Paths};
