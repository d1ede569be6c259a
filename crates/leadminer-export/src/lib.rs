//! Spreadsheet export of an aggregated lead list.

pub mod error;
pub mod workbook;

pub use error::ExportError;
pub use workbook::{
    export_filename, workbook_bytes, write_workbook, Column, COLUMNS, SHEET_NAME,
    XLSX_CONTENT_TYPE,
};
