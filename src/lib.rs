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

// Crate root: declare modules and control visibility
pub mod cell;
pub mod config;
pub mod document;
pub mod emit;
pub mod error;
pub mod extract;
pub mod logging;
pub mod pipeline;
pub mod table;
pub mod utils;

// Re-export commonly used API from the library for binaries/tests
pub use cell::{parse_cell, Annotation, CellContent};
pub use config::GeneratorConfig;
pub use document::Document;
pub use emit::{render_module, EmitOptions};
pub use error::GenError;
pub use extract::{extract_instruction_set, extract_space, ExtractOptions, MalformedPolicy};
pub use pipeline::{generate, run, Generated, Outcome, Summary};
pub use table::{InstructionRecord, InstructionSet, OpcodeSpace, OpcodeTable};
