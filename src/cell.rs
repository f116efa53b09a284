// Copyright (c) 2026 Opcode-Table-Gen Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Grammar for the text of a single opcode cell.
//!
//! A cell reads, line by line:
//!
//! ```text
//! LD A,B        <- mnemonic
//! 1 4t          <- length in bytes, then T-cycles
//! - - - -       <- flags and anything else, ignored
//! ```
//!
//! Only the mnemonic is required. Parsing a cell never fails: a missing or
//! unreadable annotation is reported as such and left to the caller.

use std::sync::OnceLock;

use regex::Regex;

use crate::table::InstructionRecord;

/// Length used when a cell carries no usable annotation.
pub const DEFAULT_LENGTH: u8 = 1;
/// Cycle count used when a cell carries no usable annotation.
pub const DEFAULT_CYCLES: u32 = 0;

/// The second line of a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// No second line, or a blank one.
    Missing,
    /// A second line that is present but does not read as `<length> <cycles>t`.
    Malformed(String),
    Timing { length: u8, cycles: u32 },
}

impl Annotation {
    /// `(length, cycles)` with the defaults applied for anything but `Timing`.
    pub fn length_and_cycles(&self) -> (u8, u32) {
        match self {
            Annotation::Timing { length, cycles } => (*length, *cycles),
            Annotation::Missing | Annotation::Malformed(_) => (DEFAULT_LENGTH, DEFAULT_CYCLES),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    /// Nothing at this slot.
    Empty,
    Instruction {
        mnemonic: String,
        annotation: Annotation,
    },
}

impl CellContent {
    /// Build the record for this cell at `index`, or `None` for an empty cell.
    pub fn record(&self, index: u8) -> Option<InstructionRecord> {
        match self {
            CellContent::Empty => None,
            CellContent::Instruction {
                mnemonic,
                annotation,
            } => {
                let (length, cycles) = annotation.length_and_cycles();
                Some(InstructionRecord {
                    index,
                    mnemonic: mnemonic.clone(),
                    length,
                    cycles,
                })
            }
        }
    }
}

fn timing_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([0-9]+)\s+([0-9]+)t").expect("timing pattern is a valid regex"))
}

/// Parse the text of one cell.
pub fn parse_cell(text: &str) -> CellContent {
    let mut lines = text.trim().split('\n');

    let mnemonic = match lines.next().map(str::trim) {
        Some(first) if !first.is_empty() => first.to_string(),
        _ => return CellContent::Empty,
    };

    let annotation = match lines.next().map(str::trim) {
        None => Annotation::Missing,
        Some(second) if second.is_empty() => Annotation::Missing,
        Some(second) => parse_annotation(second),
    };

    CellContent::Instruction {
        mnemonic,
        annotation,
    }
}

/// Parse a non-blank annotation line.
pub fn parse_annotation(line: &str) -> Annotation {
    let malformed = || Annotation::Malformed(line.to_string());

    let Some(caps) = timing_pattern().captures(line) else {
        return malformed();
    };
    let length = caps[1].parse::<u8>().ok().filter(|len| *len >= 1);
    let cycles = caps[2].parse::<u32>().ok();

    match (length, cycles) {
        (Some(length), Some(cycles)) => Annotation::Timing { length, cycles },
        _ => malformed(),
    }
}
