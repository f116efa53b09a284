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

//! HTML side of the generator: parse the reference page and find opcode cells.

use std::fs;
use std::path::Path;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use log::debug;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::{GenError, Result};

/// Attribute holding the opcode a cell describes.
pub const INDEX_ATTR: &str = "data-index";

pub struct Document {
    dom: RcDom,
}

/// A `<table>` element of a [`Document`].
pub struct Table {
    id: String,
    handle: Handle,
}

/// One `<td>` of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    /// Raw value of `data-index`, if the cell has one.
    pub index: Option<String>,
    /// Text nodes of the cell joined by newlines.
    pub text: String,
}

impl Document {
    /// Parse an HTML string. The HTML parser recovers from any markup error.
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        Self { dom }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let html = fs::read_to_string(path).map_err(|source| GenError::Read {
            path: path.display().to_string(),
            source,
        })?;
        debug!("Read {} bytes from {}", html.len(), path.display());
        Ok(Self::parse(&html))
    }

    /// First `<table>` whose `id` is `id`.
    pub fn table(&self, id: &str) -> Option<Table> {
        find_first(&self.dom.document, &|node: &Handle| {
            element_name(node) == Some("table") && attribute(node, "id").as_deref() == Some(id)
        })
        .map(|handle| Table {
            id: id.to_string(),
            handle,
        })
    }
}

impl Table {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Every `<td>` under this table, in document order. The inside of a cell
    /// is not searched: a table nested in a cell only adds to that cell's text.
    pub fn cells(&self) -> Vec<TableCell> {
        let mut cells = Vec::new();
        collect_cells(&self.handle, &mut cells);
        cells
    }
}

fn collect_cells(node: &Handle, cells: &mut Vec<TableCell>) {
    for child in node.children.borrow().iter() {
        if element_name(child) == Some("td") {
            cells.push(TableCell {
                index: attribute(child, INDEX_ATTR),
                text: cell_text(child),
            });
        } else {
            collect_cells(child, cells);
        }
    }
}

/// Text nodes under `node` joined with `\n`. Whitespace-only nodes are left
/// out so that `<div>`-per-line markup gives one line per `<div>`.
fn cell_text(node: &Handle) -> String {
    let mut parts = Vec::new();
    collect_text(node, &mut parts);
    parts.join("\n")
}

fn collect_text(node: &Handle, parts: &mut Vec<String>) {
    if let NodeData::Text { contents } = &node.data {
        let text = contents.borrow().to_string();
        if !text.trim().is_empty() {
            parts.push(text);
        }
    }
    for child in node.children.borrow().iter() {
        collect_text(child, parts);
    }
}

fn find_first(node: &Handle, pred: &dyn Fn(&Handle) -> bool) -> Option<Handle> {
    if pred(node) {
        return Some(node.clone());
    }
    node.children
        .borrow()
        .iter()
        .find_map(|child| find_first(child, pred))
}

fn element_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

fn attribute(node: &Handle, attr: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == attr)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}
