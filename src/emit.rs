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

use crate::table::{InstructionSet, OpcodeTable};

/// Names used in the generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    pub struct_name: String,
    pub primary_const: String,
    pub extended_const: String,
    /// Type of the first argument of `operation`.
    pub cpu_type: String,
    /// Type of the second argument of `operation`.
    pub bus_type: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            struct_name: "Instruction".to_string(),
            primary_const: "INSTRUCTION_TABLE".to_string(),
            extended_const: "CB_INSTRUCTION_TABLE".to_string(),
            cpu_type: "super::Cpu".to_string(),
            bus_type: "super::Bus".to_string(),
        }
    }
}

/// Render the instruction set as a Rust module.
///
/// Layout:
/// ```text
/// pub struct Instruction { name, operation, length, cycles }
///
/// pub const INSTRUCTION_TABLE: [Instruction; N] = [ ... ];
///
/// pub const CB_INSTRUCTION_TABLE: [Instruction; M] = [ ... ];
/// ```
/// Each entry's `operation` is a stub returning the entry's cycle count.
/// N and M are the record counts, not 256. The output only depends on the
/// records and the options.
pub fn render_module(set: &InstructionSet, options: &EmitOptions) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("pub struct {} {{", options.struct_name));
    lines.push("    pub name: &'static str,".to_string());
    lines.push(format!(
        "    pub operation: fn(&mut {}, &mut {}) -> u32,",
        options.cpu_type, options.bus_type
    ));
    lines.push("    pub length: u8,".to_string());
    lines.push("    pub cycles: u32,".to_string());
    lines.push("}\n".to_string());

    push_table(&mut lines, &options.primary_const, &set.primary, options);
    push_table(&mut lines, &options.extended_const, &set.extended, options);

    lines.join("\n")
}

fn push_table(lines: &mut Vec<String>, const_name: &str, table: &OpcodeTable, options: &EmitOptions) {
    let prefix = table.space.comment_prefix();
    let ty = &options.struct_name;

    lines.push(format!(
        "pub const {}: [{}; {}] = [",
        const_name,
        ty,
        table.len()
    ));
    for rec in table.records() {
        lines.push(format!("    // {}0x{:02X} - {}", prefix, rec.index, rec.mnemonic));
        lines.push(format!("    {} {{", ty));
        lines.push(format!("        name: \"{}\",", rec.mnemonic.escape_debug()));
        lines.push(format!("        operation: |_cpu, _bus| {},", rec.cycles));
        lines.push(format!("        length: {},", rec.length));
        lines.push(format!("        cycles: {},", rec.cycles));
        lines.push("    },".to_string());
    }
    lines.push("];\n".to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{InstructionRecord, OpcodeSpace};

    fn rec(index: u8, mnemonic: &str, length: u8, cycles: u32) -> InstructionRecord {
        InstructionRecord {
            index,
            mnemonic: mnemonic.to_string(),
            length,
            cycles,
        }
    }

    fn set(primary: &[InstructionRecord], extended: &[InstructionRecord]) -> InstructionSet {
        let mut p = OpcodeTable::new(OpcodeSpace::Primary, "p");
        for r in primary {
            p.insert(r.clone()).unwrap();
        }
        let mut e = OpcodeTable::new(OpcodeSpace::Extended, "e");
        for r in extended {
            e.insert(r.clone()).unwrap();
        }
        InstructionSet {
            primary: p,
            extended: e,
        }
    }

    #[test]
    fn renders_exact_layout() {
        let out = render_module(
            &set(&[rec(0, "NOP", 1, 4)], &[rec(0x37, "SWAP A", 2, 8)]),
            &EmitOptions::default(),
        );
        let expected = r#"pub struct Instruction {
    pub name: &'static str,
    pub operation: fn(&mut super::Cpu, &mut super::Bus) -> u32,
    pub length: u8,
    pub cycles: u32,
}

pub const INSTRUCTION_TABLE: [Instruction; 1] = [
    // 0x00 - NOP
    Instruction {
        name: "NOP",
        operation: |_cpu, _bus| 4,
        length: 1,
        cycles: 4,
    },
];

pub const CB_INSTRUCTION_TABLE: [Instruction; 1] = [
    // CB 0x37 - SWAP A
    Instruction {
        name: "SWAP A",
        operation: |_cpu, _bus| 8,
        length: 2,
        cycles: 8,
    },
];
"#;
        assert_eq!(out, expected);
    }

    #[test]
    fn empty_space_gives_zero_sized_array() {
        let out = render_module(&set(&[rec(0, "NOP", 1, 4)], &[]), &EmitOptions::default());
        assert!(out.ends_with("pub const CB_INSTRUCTION_TABLE: [Instruction; 0] = [\n];\n"));
    }

    #[test]
    fn holes_are_not_padded() {
        let out = render_module(
            &set(
                &[rec(5, "DEC B", 1, 4), rec(0, "NOP", 1, 4), rec(1, "LD BC,d16", 3, 12)],
                &[],
            ),
            &EmitOptions::default(),
        );
        assert!(out.contains("pub const INSTRUCTION_TABLE: [Instruction; 3] = ["));

        let comments: Vec<&str> = out
            .lines()
            .filter(|l| l.trim_start().starts_with("// 0x"))
            .map(str::trim)
            .collect();
        assert_eq!(
            comments,
            vec!["// 0x00 - NOP", "// 0x01 - LD BC,d16", "// 0x05 - DEC B"]
        );
    }

    #[test]
    fn custom_names() {
        let options = EmitOptions {
            struct_name: "OpInfo".to_string(),
            primary_const: "BASE".to_string(),
            extended_const: "PREFIXED".to_string(),
            cpu_type: "crate::cpu::Cpu".to_string(),
            bus_type: "crate::memory::MemoryBus".to_string(),
        };
        let out = render_module(&set(&[rec(0, "NOP", 1, 4)], &[]), &options);
        assert!(out.starts_with("pub struct OpInfo {"));
        assert!(out.contains("fn(&mut crate::cpu::Cpu, &mut crate::memory::MemoryBus) -> u32"));
        assert!(out.contains("pub const BASE: [OpInfo; 1] = ["));
        assert!(out.contains("    OpInfo {\n"));
        assert!(out.contains("pub const PREFIXED: [OpInfo; 0] = ["));
    }

    #[test]
    fn names_are_escaped() {
        let out = render_module(
            &set(&[rec(0xE2, r#"LD ("C"),A\"#, 1, 8)], &[]),
            &EmitOptions::default(),
        );
        assert!(out.contains(r#"name: "LD (\"C\"),A\\","#));
    }

    #[test]
    fn rendering_is_deterministic() {
        let s = set(&[rec(0, "NOP", 1, 4), rec(0x76, "HALT", 1, 4)], &[rec(0, "RLC B", 2, 8)]);
        assert_eq!(
            render_module(&s, &EmitOptions::default()),
            render_module(&s, &EmitOptions::default())
        );
    }
}
