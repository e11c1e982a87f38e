//! Records Module
//!
//! テーブルから製品カタログとコード対応表のレコードを抽出するモジュール。
//! 列は位置ではなく列名で参照し、全フィールドが一致するレコードは1つにまとめます。

use log::debug;
use std::collections::HashSet;
use std::hash::Hash;

use crate::error::XlsxToXmlError;
use crate::types::Table;

/// カタログテーブル名
pub const CATALOG_TABLE: &str = "Products";
/// コードテーブル名
pub const CODES_TABLE: &str = "UPCs";

/// コードテーブルで空白除去を行う列（GTIN列）
pub const CODE_TRIM_COLUMN: &str = "G";

const COLUMN_PRODUCT_NAME: &str = "ProductName";
const COLUMN_PRODUCT_URL: &str = "ProductURL";
const COLUMN_IMAGE_URL: &str = "ImageURL";
const COLUMN_DESCRIPTION: &str = "Description";
const COLUMN_UPC: &str = "UPC";
const COLUMN_GTIN: &str = "GTIN";

/// 製品カタログの1レコード
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogRecord {
    pub name: String,
    pub product_url: String,
    pub image_url: String,
    pub description: String,
}

/// 製品とコード（UPC / GTIN）の対応1レコード
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeRecord {
    pub product_name: String,
    pub primary_code: String,
    pub secondary_code: String,
}

/// 列名から列位置を取得し、見つからない場合はエラー
fn require_column(table: &Table, column: &str) -> Result<usize, XlsxToXmlError> {
    table
        .column_position(column)
        .ok_or_else(|| XlsxToXmlError::MissingColumn {
            table: table.name.clone(),
            column: column.to_string(),
        })
}

/// 行の値を取得する。列が足りない行は空文字列として扱う
fn field(row: &[String], position: usize) -> String {
    row.get(position).cloned().unwrap_or_default()
}

/// 初出順を保ったまま重複を取り除く
fn dedup_in_order<T: Eq + Hash + Clone>(records: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for record in records {
        if seen.insert(record.clone()) {
            unique.push(record);
        }
    }
    unique
}

/// カタログテーブルからレコードを抽出する
///
/// 列: `ProductName`, `ProductURL`, `ImageURL`, `Description`。
/// 列を持たないテーブル（空シート）からは空のリストを返します。
pub fn extract_catalog(table: &Table) -> Result<Vec<CatalogRecord>, XlsxToXmlError> {
    if table.is_empty() {
        return Ok(Vec::new());
    }

    let name = require_column(table, COLUMN_PRODUCT_NAME)?;
    let product_url = require_column(table, COLUMN_PRODUCT_URL)?;
    let image_url = require_column(table, COLUMN_IMAGE_URL)?;
    let description = require_column(table, COLUMN_DESCRIPTION)?;

    let records = dedup_in_order(table.rows.iter().map(|row| CatalogRecord {
        name: field(row, name),
        product_url: field(row, product_url),
        image_url: field(row, image_url),
        description: field(row, description),
    }));

    debug!(
        "catalog: {} rows -> {} distinct records",
        table.rows.len(),
        records.len()
    );
    Ok(records)
}

/// コードテーブルからレコードを抽出する
///
/// 列: `ProductName`, `UPC`, `GTIN`。
/// GTIN列の空白除去はテーブル構築時（`RowLayout`）に行われます。
pub fn extract_codes(table: &Table) -> Result<Vec<CodeRecord>, XlsxToXmlError> {
    if table.is_empty() {
        return Ok(Vec::new());
    }

    let product_name = require_column(table, COLUMN_PRODUCT_NAME)?;
    let primary_code = require_column(table, COLUMN_UPC)?;
    let secondary_code = require_column(table, COLUMN_GTIN)?;

    let records = dedup_in_order(table.rows.iter().map(|row| CodeRecord {
        product_name: field(row, product_name),
        primary_code: field(row, primary_code),
        secondary_code: field(row, secondary_code),
    }));

    debug!(
        "codes: {} rows -> {} distinct records",
        table.rows.len(),
        records.len()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, columns: &[&str], rows: &[&[&str]]) -> Table {
        Table {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|v| v.to_string()).collect())
                .collect(),
        }
    }

    const CATALOG_COLUMNS: &[&str] = &["ProductName", "ProductURL", "ImageURL", "Description"];

    #[test]
    fn test_extract_catalog_dedups_identical_rows() {
        let table = table(
            CATALOG_TABLE,
            CATALOG_COLUMNS,
            &[
                &["Widget", "u1", "i1", "d1"],
                &["Gadget", "u2", "i2", "d2"],
                &["Widget", "u1", "i1", "d1"],
            ],
        );
        let catalog = extract_catalog(&table).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].name, "Widget");
        assert_eq!(catalog[1].name, "Gadget");
    }

    #[test]
    fn test_extract_catalog_keeps_rows_differing_in_one_field() {
        let table = table(
            CATALOG_TABLE,
            CATALOG_COLUMNS,
            &[&["Widget", "u1", "i1", "d1"], &["Widget", "u1", "i1", "d2"]],
        );
        assert_eq!(extract_catalog(&table).unwrap().len(), 2);
    }

    #[test]
    fn test_extract_catalog_by_column_name() {
        let table = table(
            CATALOG_TABLE,
            &["Description", "ImageURL", "ProductURL", "ProductName"],
            &[&["d1", "i1", "u1", "Widget"]],
        );
        let catalog = extract_catalog(&table).unwrap();
        assert_eq!(
            catalog[0],
            CatalogRecord {
                name: "Widget".to_string(),
                product_url: "u1".to_string(),
                image_url: "i1".to_string(),
                description: "d1".to_string(),
            }
        );
    }

    #[test]
    fn test_extract_catalog_empty_table() {
        assert!(extract_catalog(&Table::new(CATALOG_TABLE)).unwrap().is_empty());
    }

    #[test]
    fn test_extract_catalog_missing_column() {
        let table = table(CATALOG_TABLE, &["ProductName", "ProductURL"], &[]);
        match extract_catalog(&table) {
            Err(XlsxToXmlError::MissingColumn { table, column }) => {
                assert_eq!(table, "Products");
                assert_eq!(column, "ImageURL");
            }
            other => panic!("Expected MissingColumn error, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_codes() {
        let table = table(
            CODES_TABLE,
            &["ProductName", "ProductURL", "ImageURL", "Description", "", "UPC", "GTIN"],
            &[
                &["Widget", "", "", "", "", "111", "AAA"],
                &["Widget", "", "", "", "", "111", "AAA"],
                &["Widget", "", "", "", "", "222", "BBB"],
            ],
        );
        let codes = extract_codes(&table).unwrap();
        assert_eq!(codes.len(), 2);
        assert_eq!(codes[0].primary_code, "111");
        assert_eq!(codes[1].secondary_code, "BBB");
    }

    #[test]
    fn test_extract_codes_missing_gtin() {
        let table = table(CODES_TABLE, &["ProductName", "UPC"], &[&["Widget", "111"]]);
        assert!(matches!(
            extract_codes(&table),
            Err(XlsxToXmlError::MissingColumn { .. })
        ));
    }
}
