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

//! Error type shared by every stage of the generator.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    /// The input document does not contain a table with this `id`.
    #[error("table `{0}` not found in input document")]
    TableNotFound(String),

    #[error("table `{table}`: invalid opcode index {value:?} (expected a decimal value 0-255)")]
    InvalidIndex { table: String, value: String },

    #[error("table `{table}`: opcode 0x{index:02X} appears twice ({first:?} and {second:?})")]
    DuplicateIndex {
        table: String,
        index: u8,
        first: String,
        second: String,
    },

    #[error("table `{table}`: opcode 0x{index:02X} has a malformed timing annotation {raw:?}")]
    MalformedAnnotation { table: String, index: u8, raw: String },

    #[error("failed to read {path}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GenError>;
