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

//! Walks the opcode tables of a [`Document`] and collects their records.

use clap::ValueEnum;
use log::{debug, warn};

use crate::cell::{parse_cell, Annotation, CellContent};
use crate::document::Document;
use crate::error::{GenError, Result};
use crate::table::{InstructionSet, OpcodeSpace, OpcodeTable};

/// What to do with a cell whose timing annotation cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MalformedPolicy {
    /// Use the default timing without a word.
    Ignore,
    /// Use the default timing and log a warning.
    #[default]
    Warn,
    /// Abort the run.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub primary_table: String,
    pub extended_table: String,
    pub malformed: MalformedPolicy,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            primary_table: OpcodeSpace::Primary.default_table_id().to_string(),
            extended_table: OpcodeSpace::Extended.default_table_id().to_string(),
            malformed: MalformedPolicy::default(),
        }
    }
}

impl ExtractOptions {
    pub fn table_id(&self, space: OpcodeSpace) -> &str {
        match space {
            OpcodeSpace::Primary => &self.primary_table,
            OpcodeSpace::Extended => &self.extended_table,
        }
    }
}

/// Extract both address spaces.
pub fn extract_instruction_set(doc: &Document, options: &ExtractOptions) -> Result<InstructionSet> {
    let primary = extract_space(
        doc,
        options.table_id(OpcodeSpace::Primary),
        OpcodeSpace::Primary,
        options.malformed,
    )?;
    let extended = extract_space(
        doc,
        options.table_id(OpcodeSpace::Extended),
        OpcodeSpace::Extended,
        options.malformed,
    )?;
    Ok(InstructionSet { primary, extended })
}

/// Extract the records of the table `table_id` as address space `space`.
///
/// Cells without a `data-index` are layout (row/column headers, legends) and
/// are skipped whatever they contain. Empty opcode cells are skipped too.
pub fn extract_space(
    doc: &Document,
    table_id: &str,
    space: OpcodeSpace,
    policy: MalformedPolicy,
) -> Result<OpcodeTable> {
    let table = doc
        .table(table_id)
        .ok_or_else(|| GenError::TableNotFound(table_id.to_string()))?;

    let mut out = OpcodeTable::new(space, table_id);
    let mut skipped = 0usize;

    for cell in table.cells() {
        let Some(raw_index) = cell.index.as_deref().filter(|s| !s.is_empty()) else {
            skipped += 1;
            continue;
        };
        let index = parse_index(table_id, raw_index)?;

        let content = parse_cell(&cell.text);
        if let CellContent::Instruction {
            annotation: Annotation::Malformed(raw),
            ..
        } = &content
        {
            match policy {
                MalformedPolicy::Error => {
                    return Err(GenError::MalformedAnnotation {
                        table: table_id.to_string(),
                        index,
                        raw: raw.clone(),
                    });
                }
                MalformedPolicy::Warn => warn!(
                    "{}: opcode 0x{:02X} has unreadable timing {:?}, using length 1 and 0 cycles",
                    table_id, index, raw
                ),
                MalformedPolicy::Ignore => {}
            }
            out.note_malformed(index, raw.as_str());
        }

        match content.record(index) {
            Some(record) => out.insert(record)?,
            None => debug!("{}: opcode 0x{:02X} is empty", table_id, index),
        }
    }

    debug!(
        "{}: {} {} opcodes, {} layout cells skipped",
        table_id,
        out.len(),
        space,
        skipped
    );
    Ok(out)
}

fn parse_index(table_id: &str, raw: &str) -> Result<u8> {
    raw.trim()
        .parse::<u8>()
        .map_err(|_| GenError::InvalidIndex {
            table: table_id.to_string(),
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(primary: &str, extended: &str) -> Document {
        Document::parse(&format!(
            r#"<html><body>
<table id="unprefixed-16-t"><tr>{primary}</tr></table>
<table id="cbprefixed-16-t"><tr>{extended}</tr></table>
</body></html>"#
        ))
    }

    #[test]
    fn extracts_both_spaces() {
        let doc = page(
            r#"<td data-index="1">LD BC,d16<br>3 12t</td><td data-index="0">NOP<br>1 4t</td>"#,
            r#"<td data-index="0">RLC B<br>2 8t</td>"#,
        );
        let set = extract_instruction_set(&doc, &ExtractOptions::default()).unwrap();

        let primary: Vec<(u8, &str, u8, u32)> = set
            .primary
            .records()
            .map(|r| (r.index, r.mnemonic.as_str(), r.length, r.cycles))
            .collect();
        assert_eq!(primary, vec![(0, "NOP", 1, 4), (1, "LD BC,d16", 3, 12)]);

        let cb = set.extended.get(0).unwrap();
        assert_eq!((cb.mnemonic.as_str(), cb.length, cb.cycles), ("RLC B", 2, 8));
        assert_eq!(set.extended.space, OpcodeSpace::Extended);
    }

    #[test]
    fn cells_without_index_never_count() {
        let doc = page(
            r#"<td>0x</td><td data-index="">EMPTY ATTR</td><td>LD A,B<br>1 4t</td><td data-index="5">DEC B<br>1 4t</td>"#,
            "",
        );
        let table = extract_space(
            &doc,
            "unprefixed-16-t",
            OpcodeSpace::Primary,
            MalformedPolicy::Warn,
        )
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(5).unwrap().mnemonic, "DEC B");
    }

    #[test]
    fn empty_cells_are_skipped() {
        let doc = page(
            r#"<td data-index="0">NOP</td><td data-index="1"></td><td data-index="2">  </td>"#,
            "",
        );
        let set = extract_instruction_set(&doc, &ExtractOptions::default()).unwrap();
        assert_eq!(set.primary.len(), 1);
        assert!(set.extended.is_empty());
    }

    #[test]
    fn missing_table_is_fatal() {
        let doc = Document::parse(r#"<table id="unprefixed-16-t"></table>"#);
        let err = extract_instruction_set(&doc, &ExtractOptions::default()).unwrap_err();
        assert!(matches!(&err, GenError::TableNotFound(id) if id == "cbprefixed-16-t"));
        assert!(err.to_string().contains("cbprefixed-16-t"));
    }

    #[test]
    fn out_of_range_index_is_fatal() {
        for bad in ["256", "-1", "0x10", "abc"] {
            let doc = page(&format!(r#"<td data-index="{bad}">NOP</td>"#), "");
            let err = extract_instruction_set(&doc, &ExtractOptions::default()).unwrap_err();
            assert!(
                matches!(&err, GenError::InvalidIndex { value, .. } if value == bad),
                "{bad}: {err:?}"
            );
        }
    }

    #[test]
    fn duplicate_index_is_fatal() {
        let doc = page(
            r#"<td data-index="3">INC BC</td><td data-index="3">INC DE</td>"#,
            "",
        );
        let err = extract_instruction_set(&doc, &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, GenError::DuplicateIndex { index: 3, .. }));
    }

    #[test]
    fn malformed_policy() {
        let doc = page(r#"<td data-index="16">STOP<br>two 4 cycles</td>"#, "");

        for policy in [MalformedPolicy::Ignore, MalformedPolicy::Warn] {
            let table = extract_space(&doc, "unprefixed-16-t", OpcodeSpace::Primary, policy)
                .unwrap();
            let rec = table.get(16).unwrap();
            assert_eq!((rec.length, rec.cycles), (1, 0));
            assert_eq!(table.malformed().len(), 1);
            assert_eq!(table.malformed()[0].raw, "two 4 cycles");
        }

        let err = extract_space(
            &doc,
            "unprefixed-16-t",
            OpcodeSpace::Primary,
            MalformedPolicy::Error,
        )
        .unwrap_err();
        assert!(matches!(err, GenError::MalformedAnnotation { index: 16, .. }));
    }

    #[test]
    fn custom_table_ids() {
        let doc = Document::parse(
            r#"<table id="main"><tr><td data-index="0">NOP</td></tr></table>
               <table id="ext"></table>"#,
        );
        let options = ExtractOptions {
            primary_table: "main".to_string(),
            extended_table: "ext".to_string(),
            ..Default::default()
        };
        let set = extract_instruction_set(&doc, &options).unwrap();
        assert_eq!(set.total(), 1);
        assert_eq!(set.primary.source_id, "main");
    }
}
