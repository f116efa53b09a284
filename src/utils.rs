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

use std::env;
use std::path::{Path, PathBuf};

use urlencoding::decode;

/// Turn a command-line path into a filesystem path. `file://` URIs are
/// percent-decoded; anything else is taken as is.
pub fn resolve_path(source_path: &str) -> PathBuf {
    let Some(rest) = source_path.strip_prefix("file://") else {
        return PathBuf::from(source_path);
    };
    let mut path_str = decode(rest)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| rest.to_string());

    // On Windows, file:///C:/... becomes /C:/... so we need to strip the leading /
    if cfg!(windows) && path_str.starts_with('/') && path_str.chars().nth(2) == Some(':') {
        path_str.remove(0);
    }
    PathBuf::from(path_str)
}

/// Absolute, forward-slash form of `path` for messages. Falls back to the
/// joined path when it does not exist yet.
pub fn display_path(path: &Path) -> String {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().unwrap_or_default().join(path)
    };
    // dunce keeps Windows paths free of the \\?\ prefix
    let canonical = dunce::canonicalize(&absolute).unwrap_or(absolute);
    canonical.to_string_lossy().replace('\\', "/")
}
