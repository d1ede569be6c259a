//! Markdown-table extraction of business contacts from model output.
//!
//! The model is asked for a table but free-text generation is noisy: rows can
//! be truncated, prose can surround the table, and the header may repeat.
//! Rows that do not carry enough cells are dropped without error.

use std::sync::LazyLock;

use leadminer_core::{BusinessContact, DEFAULT_KIND, NOT_AVAILABLE};
use regex::Regex;
use uuid::Uuid;

/// Minimum number of cells for a row to be read as a contact
/// (name, phone, email, address, website).
const MIN_CELLS: usize = 5;

/// First-cell values that mark a header row.
const HEADER_TOKENS: &[&str] = &[
    "business",
    "company",
    "empresa",
];

/// Words that mark a header row wherever they appear in the first cell,
/// e.g. "Nome da Empresa" or "Name of Business".
const HEADER_WORDS: &[&str] = &["name", "nome"];

/// One cell of a `|---|:---:|--|` style row: only dashes, colons and plus
/// signs, with at least one dash.
static SEPARATOR_CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[:+-]*-[:+-]*$").expect("valid regex"));

/// Parses every table row in `text` into a [`BusinessContact`].
///
/// Each call assigns fresh ids, so parsing the same text twice gives
/// value-equal contacts with different ids.
#[must_use]
pub fn parse_contacts(text: &str) -> Vec<BusinessContact> {
    let mut contacts = Vec::new();
    let mut body_started = false;

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        if !line.contains('|') {
            continue;
        }

        if is_separator_row(line) {
            body_started = true;
            continue;
        }

        let cells = split_cells(line);

        if !body_started && cells.first().is_some_and(|c| is_header_token(c)) {
            continue;
        }

        if let Some(contact) = contact_from_cells(&cells) {
            contacts.push(contact);
        }
    }

    contacts
}

fn is_separator_row(line: &str) -> bool {
    let cells = split_cells(line);
    !cells.is_empty() && cells.iter().all(|c| SEPARATOR_CELL_RE.is_match(c))
}

fn is_header_token(cell: &str) -> bool {
    let normalized = cell.trim_matches('*').trim().to_lowercase();
    HEADER_TOKENS.contains(&normalized.as_str())
        || normalized
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| HEADER_WORDS.contains(&word))
}

/// Splits a row on `|`, trimming each cell. The empty cells produced by a
/// leading or trailing pipe are dropped; empty cells in between are kept.
fn split_cells(line: &str) -> Vec<&str> {
    let mut cells: Vec<&str> = line.split('|').map(str::trim).collect();
    if cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    if cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    cells
}

fn contact_from_cells(cells: &[&str]) -> Option<BusinessContact> {
    if cells.len() < MIN_CELLS {
        return None;
    }

    let cell = |idx: usize, default: &str| -> String {
        cells
            .get(idx)
            .filter(|c| !c.is_empty())
            .map_or_else(|| default.to_string(), |c| (*c).to_string())
    };

    Some(BusinessContact {
        id: Uuid::new_v4(),
        name: cell(0, NOT_AVAILABLE),
        phone: cell(1, NOT_AVAILABLE),
        email: cell(2, NOT_AVAILABLE),
        address: cell(3, NOT_AVAILABLE),
        website: cell(4, NOT_AVAILABLE),
        rating: cell(5, NOT_AVAILABLE),
        kind: cell(6, DEFAULT_KIND),
    })
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
