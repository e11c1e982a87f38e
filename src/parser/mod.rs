//! Parser Module
//!
//! quick-xmlとzipを使用したXLSXパッケージの直接解析。
//! 先頭シートの疎な行と共有文字列テーブルを1回の読み込みで取り出します。

mod package;
mod shared_strings;
mod worksheet;

use log::debug;
use std::io::{Read, Seek};

use crate::error::XlsxToXmlError;
use crate::security::SecurityConfig;
use crate::types::{SharedStrings, SheetData};

pub(crate) use package::XlsxPackage;
pub(crate) use shared_strings::parse_shared_strings;
pub(crate) use worksheet::parse_worksheet;

const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// ワークブックの先頭シートを読み込む
///
/// 先頭シート以外は読み込みません。ワークブックにシートが1つもない場合は
/// 行を持たない`SheetData`を返します。
///
/// # 戻り値
///
/// * `Ok(SheetData)` - 行と共有文字列テーブル
/// * `Err(XlsxToXmlError)` - パッケージを開けない、または解析できない場合
///
/// # 使用例
///
/// ```rust,no_run
/// use std::fs::File;
/// use xlsxfeed::read_first_sheet;
///
/// # fn main() -> Result<(), xlsxfeed::XlsxToXmlError> {
/// let sheet = read_first_sheet(File::open("products.xlsx")?)?;
/// println!("{} rows", sheet.rows.len());
/// # Ok(())
/// # }
/// ```
pub fn read_first_sheet<R: Read + Seek>(reader: R) -> Result<SheetData, XlsxToXmlError> {
    read_first_sheet_with(reader, &SecurityConfig::default())
}

pub(crate) fn read_first_sheet_with<R: Read + Seek>(
    reader: R,
    security: &SecurityConfig,
) -> Result<SheetData, XlsxToXmlError> {
    let mut package = XlsxPackage::open(reader, security)?;

    let Some(entry) = package.first_sheet()? else {
        debug!("workbook has no sheets");
        return Ok(SheetData::default());
    };

    let shared_strings = match package.read_part(SHARED_STRINGS_PART)? {
        Some(xml) => parse_shared_strings(&xml)?,
        None => SharedStrings::new(),
    };

    let sheet_xml = package.require_part(&entry.path)?;
    let rows = parse_worksheet(&sheet_xml)?;

    debug!(
        "sheet '{}': {} rows, {} shared strings",
        entry.name,
        rows.len(),
        shared_strings.len()
    );

    Ok(SheetData {
        name: Some(entry.name),
        rows,
        shared_strings,
    })
}
