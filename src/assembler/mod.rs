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

//! The two-pass core (§4.2-§4.4): Pass 1 builds the symbol table and sizes
//! the program; Pass 2 resolves every operand against it and emits the
//! bit-exact code image.

pub mod pass1;
pub mod pass2;
pub mod symbol_table;

/// Address of the first code word (§3 "IC starts at 100").
pub const IC_START: u16 = 100;
