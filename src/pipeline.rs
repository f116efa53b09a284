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

//! One generator run: read the reference, extract, render, write.
//!
//! Nothing here runs on its own; callers go through [`generate`] for an
//! in-memory document or [`run`] for the file-to-file flow.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use log::{debug, info};
use serde::Serialize;
use tempfile::Builder;

use crate::config::GeneratorConfig;
use crate::document::Document;
use crate::emit::render_module;
use crate::error::{GenError, Result};
use crate::extract::extract_instruction_set;
use crate::table::{InstructionSet, OpcodeSpace};
use crate::utils::display_path;

/// Counts reported at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub primary: usize,
    pub extended: usize,
    pub total: usize,
    /// Cells whose timing line could not be read.
    pub malformed: usize,
    pub output: String,
}

impl Summary {
    fn new(set: &InstructionSet, output: &Path) -> Self {
        Self {
            primary: set.primary.len(),
            extended: set.extended.len(),
            total: set.total(),
            malformed: set.malformed_count(),
            output: output.display().to_string(),
        }
    }

    /// The three console lines: one count per space, then the total.
    pub fn report_lines(&self) -> [String; 3] {
        [
            format!("{} opcodes found: {}", OpcodeSpace::Primary.label(), self.primary),
            format!("{} opcodes found: {}", OpcodeSpace::Extended.label(), self.extended),
            format!("Total: {}", self.total),
        ]
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone)]
pub struct Generated {
    pub set: InstructionSet,
    /// The rendered Rust module.
    pub text: String,
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written(Summary),
    /// Check mode: the output file matches.
    UpToDate(Summary),
    /// Check mode: the output file is missing or differs.
    Stale(Summary),
}

impl Outcome {
    pub fn summary(&self) -> &Summary {
        match self {
            Outcome::Written(s) | Outcome::UpToDate(s) | Outcome::Stale(s) => s,
        }
    }
}

/// Extract and render an already loaded document.
pub fn generate(doc: &Document, config: &GeneratorConfig) -> Result<Generated> {
    let set = extract_instruction_set(doc, &config.extract)?;
    let text = render_module(&set, &config.emit);
    let summary = Summary::new(&set, &config.output);
    Ok(Generated { set, text, summary })
}

/// Run the generator from `config.input` to `config.output`.
///
/// The output is only replaced once the whole module has been rendered and
/// written to a temporary file next to it; any error leaves it untouched.
pub fn run(config: &GeneratorConfig) -> Result<Outcome> {
    info!("Reading opcode tables from {}", display_path(&config.input));
    let doc = Document::load(&config.input)?;
    let generated = generate(&doc, config)?;
    let summary = generated.summary;

    if config.check {
        let current = match fs::read_to_string(&config.output) {
            Ok(text) => Some(text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(source) => {
                return Err(GenError::Read {
                    path: config.output.display().to_string(),
                    source,
                })
            }
        };
        return Ok(if current.as_deref() == Some(generated.text.as_str()) {
            info!("{} is up to date", display_path(&config.output));
            Outcome::UpToDate(summary)
        } else {
            info!("{} is out of date", display_path(&config.output));
            Outcome::Stale(summary)
        });
    }

    write_atomic(&config.output, &generated.text)?;
    info!("Rust opcode file generated as {}", display_path(&config.output));
    Ok(Outcome::Written(summary))
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let write_err = |source: io::Error| GenError::Write {
        path: path.display().to_string(),
        source,
    };

    // Write through a symlinked output instead of replacing the link.
    let target = match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(path).map_err(write_err)?,
        _ => path.to_path_buf(),
    };
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    // Temp files default to 0600; a new output gets the umask default like any other file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(write_err)?;
    debug!("Staging output in {}", tmp.path().display());
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;

    if let Ok(existing) = fs::metadata(&target) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(write_err)?;
    }
    tmp.persist(&target).map_err(|e| write_err(e.error))?;
    Ok(())
}
