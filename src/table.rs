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

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{GenError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionRecord {
    pub index: u8,
    pub mnemonic: String,
    /// Encoding length in bytes, opcode byte included.
    pub length: u8,
    /// Nominal T-cycles.
    pub cycles: u32,
}

/// The two opcode address spaces of the reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpcodeSpace {
    Primary,
    /// Opcodes reached through the `0xCB` prefix.
    Extended,
}

impl OpcodeSpace {
    pub fn default_table_id(self) -> &'static str {
        match self {
            OpcodeSpace::Primary => "unprefixed-16-t",
            OpcodeSpace::Extended => "cbprefixed-16-t",
        }
    }

    /// Label used in the console report.
    pub fn label(self) -> &'static str {
        match self {
            OpcodeSpace::Primary => "Unprefixed",
            OpcodeSpace::Extended => "CB-prefixed",
        }
    }

    /// Prefix put in front of the hex index in generated comments.
    pub fn comment_prefix(self) -> &'static str {
        match self {
            OpcodeSpace::Primary => "",
            OpcodeSpace::Extended => "CB ",
        }
    }
}

impl fmt::Display for OpcodeSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A cell whose annotation could not be read; its record got the default timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedCell {
    pub index: u8,
    pub raw: String,
}

/// Records of one address space, keyed and ordered by opcode.
#[derive(Debug, Clone)]
pub struct OpcodeTable {
    pub space: OpcodeSpace,
    /// `id` of the table the records came from, for diagnostics.
    pub source_id: String,
    entries: BTreeMap<u8, InstructionRecord>,
    malformed: Vec<MalformedCell>,
}

impl OpcodeTable {
    pub fn new(space: OpcodeSpace, source_id: impl Into<String>) -> Self {
        Self {
            space,
            source_id: source_id.into(),
            entries: BTreeMap::new(),
            malformed: Vec::new(),
        }
    }

    /// Add a record. A second record for an opcode already present is an error.
    pub fn insert(&mut self, record: InstructionRecord) -> Result<()> {
        match self.entries.entry(record.index) {
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
            Entry::Occupied(existing) => Err(GenError::DuplicateIndex {
                table: self.source_id.clone(),
                index: record.index,
                first: existing.get().mnemonic.clone(),
                second: record.mnemonic,
            }),
        }
    }

    pub fn note_malformed(&mut self, index: u8, raw: impl Into<String>) {
        self.malformed.push(MalformedCell {
            index,
            raw: raw.into(),
        });
    }

    pub fn get(&self, index: u8) -> Option<&InstructionRecord> {
        self.entries.get(&index)
    }

    /// Records in ascending opcode order.
    pub fn records(&self) -> impl Iterator<Item = &InstructionRecord> {
        self.entries.values()
    }

    pub fn malformed(&self) -> &[MalformedCell] {
        &self.malformed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Both address spaces extracted from one document.
#[derive(Debug, Clone)]
pub struct InstructionSet {
    pub primary: OpcodeTable,
    pub extended: OpcodeTable,
}

impl InstructionSet {
    pub fn table(&self, space: OpcodeSpace) -> &OpcodeTable {
        match space {
            OpcodeSpace::Primary => &self.primary,
            OpcodeSpace::Extended => &self.extended,
        }
    }

    pub fn total(&self) -> usize {
        self.primary.len() + self.extended.len()
    }

    pub fn malformed_count(&self) -> usize {
        self.primary.malformed().len() + self.extended.malformed().len()
    }
}
