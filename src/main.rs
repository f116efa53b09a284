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

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use opcode_table_gen::config::GenArgs;
use opcode_table_gen::{logging, run, Outcome};

/// Generate a Rust opcode table from an HTML instruction-set reference.
#[derive(Parser, Debug)]
#[command(name = "opcode-table-gen", version, about)]
struct Cli {
    #[command(flatten)]
    args: GenArgs,

    /// Print the summary as JSON instead of the three report lines
    #[arg(long = "json", default_value_t = false)]
    json: bool,

    /// Enable debug output
    #[arg(short = 'd', long = "debug", default_value_t = false)]
    debug: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _logger = logging::init(cli.debug).context("failed to start logger")?;

    let config = cli.args.into_config();
    debug!("{:?}", config);

    let outcome = run(&config).with_context(|| {
        format!(
            "failed to generate {} from {}",
            config.output.display(),
            config.input.display()
        )
    })?;

    let summary = outcome.summary();
    if cli.json {
        println!("{}", summary.to_json()?);
    } else {
        for line in summary.report_lines() {
            println!("{}", line);
        }
    }

    Ok(match outcome {
        Outcome::Stale(_) => ExitCode::FAILURE,
        Outcome::Written(_) | Outcome::UpToDate(_) => ExitCode::SUCCESS,
    })
}
