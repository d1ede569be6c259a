use std::path::{Path, PathBuf};

use leadminer_core::BusinessContact;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::error::ExportError;

pub const SHEET_NAME: &str = "Leads";

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A sheet column: header text and display width in characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub header: &'static str,
    pub width: f64,
}

/// Columns in sheet order: name, phone, email, address, website, rating, type.
pub const COLUMNS: [Column; 7] = [
    Column { header: "Name", width: 35.0 },
    Column { header: "Phone", width: 18.0 },
    Column { header: "Email", width: 30.0 },
    Column { header: "Address", width: 50.0 },
    Column { header: "Website", width: 30.0 },
    Column { header: "Rating", width: 10.0 },
    Column { header: "Type", width: 20.0 },
];

fn row_cells(contact: &BusinessContact) -> [&str; 7] {
    [
        contact.name.as_str(),
        contact.phone.as_str(),
        contact.email.as_str(),
        contact.address.as_str(),
        contact.website.as_str(),
        contact.rating.as_str(),
        contact.kind.as_str(),
    ]
}

/// Download name for a query: `leads_{query}_complete.xlsx`, with each run of
/// whitespace and each character that is unsafe in file names replaced by `_`.
#[must_use]
pub fn export_filename(query: &str) -> String {
    let mut stem = String::with_capacity(query.len());
    let mut in_space = false;
    for ch in query.chars() {
        if ch.is_whitespace() {
            if !in_space {
                stem.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if matches!(ch, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || ch.is_control() {
            stem.push('_');
        } else {
            stem.push(ch);
        }
    }
    format!("leads_{stem}_complete.xlsx")
}

/// Encodes `contacts` as a single-sheet XLSX document, one row per contact
/// under a bold, frozen header row.
///
/// # Errors
///
/// Returns [`ExportError::Xlsx`] if the workbook cannot be assembled.
pub fn workbook_bytes(contacts: &[BusinessContact]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    fill_sheet(sheet, contacts)?;
    Ok(workbook.save_to_buffer()?)
}

/// Writes the workbook for `query` into `dir` and returns the file path.
///
/// # Errors
///
/// Returns [`ExportError::Xlsx`] if the workbook cannot be assembled, or
/// [`ExportError::Io`] if `dir` cannot be created or the file written.
pub fn write_workbook(
    contacts: &[BusinessContact],
    dir: &Path,
    query: &str,
) -> Result<PathBuf, ExportError> {
    let bytes = workbook_bytes(contacts)?;

    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(export_filename(query));
    std::fs::write(&path, &bytes).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        contacts = contacts.len(),
        bytes = bytes.len(),
        "workbook exported"
    );
    Ok(path)
}

fn fill_sheet(sheet: &mut Worksheet, contacts: &[BusinessContact]) -> Result<(), ExportError> {
    let header = Format::new().set_bold();
    sheet.set_name(SHEET_NAME)?;

    for (col, column) in (0u16..).zip(COLUMNS.iter()) {
        sheet.set_column_width(col, column.width)?;
        sheet.write_string_with_format(0, col, column.header, &header)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    for (row, contact) in (1u32..).zip(contacts) {
        for (col, value) in (0u16..).zip(row_cells(contact)) {
            sheet.write_string(row, col, value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "workbook_test.rs"]
mod tests;
