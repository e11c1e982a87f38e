//! xlsxfeed - Pure-Rust product spreadsheet to XML feed converter
//!
//! This crate reads the first worksheet of an XLSX workbook, builds a product
//! catalog table and a product code table from it, joins the two by product
//! name and writes the result as an XML (or JSON) product feed.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxfeed::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a converter with default settings
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     let input = File::open("products.xlsx")?;
//!     let output = File::create("feed.xml")?;
//!
//!     // Convert the spreadsheet to an XML feed
//!     converter.convert(input, output)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxfeed::{ConverterBuilder, OutputFormat};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new()
//!         .with_code_trim_columns(["F", "G"]) // strip spaces from UPC and GTIN
//!         .with_output_format(OutputFormat::Json)
//!         .build()?;
//!
//!     let json = converter.convert_to_string(File::open("products.xlsx")?)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Working with the pipeline stages
//!
//! Each stage is also available on its own:
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxfeed::{build_table, extract_catalog, read_first_sheet, RowLayout};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sheet = read_first_sheet(File::open("products.xlsx")?)?;
//!     let table = build_table("Products", &sheet.rows, &sheet.shared_strings, &RowLayout::default())?;
//!     for record in extract_catalog(&table)? {
//!         println!("{}", record.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! The crate reports progress through the [`log`](https://docs.rs/log) facade
//! (`debug!` for stage summaries, `warn!` for dropped or misplaced values).
//! No logger is installed by the library.

mod api;
mod builder;
mod error;
mod feed;
mod output;
mod parser;
mod records;
mod security;
mod table;
mod types;

// 公開API
pub use api::OutputFormat;
pub use builder::{Converter, ConverterBuilder};
pub use error::XlsxToXmlError;
pub use feed::{join_products, Feed, JoinedProduct};
pub use output::{JsonFormatter, XmlFormatter, XSI_NAMESPACE};
pub use parser::read_first_sheet;
pub use records::{
    extract_catalog, extract_codes, CatalogRecord, CodeRecord, CATALOG_TABLE, CODES_TABLE,
    CODE_TRIM_COLUMN,
};
pub use table::{
    build_table, column_index, column_label, column_name, materialize_row, resolve_cell,
    RowLayout, MAX_COLUMNS,
};
pub use types::{Cell, CellValue, Row, SharedStrings, SheetData, Table};
