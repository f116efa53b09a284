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

//! Logger setup for the binary. The library only talks to the `log` facade.

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

/// Start logging to stderr. `RUST_LOG` overrides the level picked here.
///
/// The returned handle must stay alive for as long as logging is wanted.
pub fn init(debug: bool) -> Result<LoggerHandle, FlexiLoggerError> {
    let level = if debug { "debug" } else { "info" };
    Logger::try_with_env_or_str(level)?
        .format(flexi_logger::default_format)
        .start()
}
