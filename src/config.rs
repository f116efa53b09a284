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

//! Generator settings and the command-line arguments that produce them.

use std::path::PathBuf;

use clap::Args;

use crate::emit::EmitOptions;
use crate::extract::{ExtractOptions, MalformedPolicy};
use crate::utils::resolve_path;

pub const DEFAULT_INPUT: &str = "opcode_table.html";
pub const DEFAULT_OUTPUT: &str = "opcodes.rs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub extract: ExtractOptions,
    pub emit: EmitOptions,
    /// Compare with the existing output instead of writing it.
    pub check: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            extract: ExtractOptions::default(),
            emit: EmitOptions::default(),
            check: false,
        }
    }
}

#[derive(Args, Debug)]
pub struct GenArgs {
    /// HTML opcode reference to read (path or file:// URI)
    #[arg(short = 'i', long = "input", default_value = DEFAULT_INPUT)]
    pub input: String,

    /// Rust file to generate
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// id of the table holding the unprefixed opcodes
    #[arg(long = "primary-table", default_value = "unprefixed-16-t")]
    pub primary_table: String,

    /// id of the table holding the CB-prefixed opcodes
    #[arg(long = "extended-table", default_value = "cbprefixed-16-t")]
    pub extended_table: String,

    /// What to do with a cell whose timing line cannot be read
    #[arg(long = "malformed", value_enum, default_value_t = MalformedPolicy::Warn)]
    pub malformed: MalformedPolicy,

    /// Name of the generated descriptor struct
    #[arg(long = "struct-name", default_value = "Instruction")]
    pub struct_name: String,

    /// Name of the unprefixed opcode array
    #[arg(long = "primary-const", default_value = "INSTRUCTION_TABLE")]
    pub primary_const: String,

    /// Name of the CB-prefixed opcode array
    #[arg(long = "extended-const", default_value = "CB_INSTRUCTION_TABLE")]
    pub extended_const: String,

    /// Type of the CPU argument of `operation`
    #[arg(long = "cpu-type", default_value = "super::Cpu")]
    pub cpu_type: String,

    /// Type of the bus argument of `operation`
    #[arg(long = "bus-type", default_value = "super::Bus")]
    pub bus_type: String,

    /// Only check that the output file is up to date (exit code 1 if not)
    #[arg(long = "check", default_value_t = false)]
    pub check: bool,
}

impl GenArgs {
    pub fn into_config(self) -> GeneratorConfig {
        GeneratorConfig {
            input: resolve_path(&self.input),
            output: resolve_path(&self.output),
            extract: ExtractOptions {
                primary_table: self.primary_table,
                extended_table: self.extended_table,
                malformed: self.malformed,
            },
            emit: EmitOptions {
                struct_name: self.struct_name,
                primary_const: self.primary_const,
                extended_const: self.extended_const,
                cpu_type: self.cpu_type,
                bus_type: self.bus_type,
            },
            check: self.check,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: GenArgs,
    }

    #[test]
    fn defaults_match_config_default() {
        let cli = TestCli::parse_from(["opcode-table-gen"]);
        assert_eq!(cli.args.into_config(), GeneratorConfig::default());
    }

    #[test]
    fn flags_reach_the_config() {
        let cli = TestCli::parse_from([
            "opcode-table-gen",
            "-i",
            "file:///tmp/ref.html",
            "-o",
            "out/ops.rs",
            "--extended-table",
            "cb",
            "--malformed",
            "error",
            "--struct-name",
            "Op",
            "--check",
        ]);
        let config = cli.args.into_config();
        #[cfg(not(windows))]
        assert_eq!(config.input, PathBuf::from("/tmp/ref.html"));
        assert_eq!(config.output, PathBuf::from("out/ops.rs"));
        assert_eq!(config.extract.extended_table, "cb");
        assert_eq!(config.extract.primary_table, "unprefixed-16-t");
        assert_eq!(config.extract.malformed, MalformedPolicy::Error);
        assert_eq!(config.emit.struct_name, "Op");
        assert!(config.check);
    }
}
