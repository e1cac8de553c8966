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

//! The object file's base-4 pretty-printer (§6, §9 "Base-4 writer"):
//! alphabet `a=0,b=1,c=2,d=3`. Kept out of the core's data model entirely
//! -- everything upstream of this module deals only in integers.

const ALPHABET: [char; 4] = ['a', 'b', 'c', 'd'];

fn digits(mut value: u32, min_width: usize) -> String {
    let mut out = Vec::new();
    if value == 0 {
        out.push(0usize);
    }
    while value > 0 {
        out.push((value % 4) as usize);
        value /= 4;
    }
    while out.len() < min_width {
        out.push(0);
    }
    out.iter().rev().map(|&d| ALPHABET[d]).collect()
}

/// A full 10-bit word, always rendered as exactly 5 base-4 characters.
pub fn word(value: u16) -> String {
    digits(value as u32, 5)
}

/// An address or length, trimmed (no leading padding).
pub fn trimmed(value: u32) -> String {
    digits(value, 1)
}
