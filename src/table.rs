//! Table Module
//!
//! 疎なセル列から密なテーブルを構築するモジュール。
//!
//! - セル値の解決（共有文字列 / リテラル）
//! - 列ラベルと列インデックスの相互変換
//! - 1行の実体化（欠落列の補完、列数上限、空白除去）
//! - ヘッダー行を列名とするテーブルの構築

use log::{debug, warn};

use crate::error::XlsxToXmlError;
use crate::types::{Cell, CellValue, Row, SharedStrings, Table};

/// 1行から取り出す値の既定の上限
pub const MAX_COLUMNS: usize = 7;

/// セルの文字列値を解決する
///
/// * 値を持たないセルは空文字列
/// * 共有文字列参照はインデックスを10進数として解釈し、テーブルから取得
/// * それ以外は生の値をそのまま返す（型変換・書式適用なし）
///
/// # 戻り値
///
/// * `Err(XlsxToXmlError::ParseInt)` - インデックスが数値でない場合
/// * `Err(XlsxToXmlError::SharedStringIndex)` - インデックスが範囲外の場合
pub fn resolve_cell<'a>(
    cell: &'a Cell,
    strings: &'a SharedStrings,
) -> Result<&'a str, XlsxToXmlError> {
    match &cell.value {
        CellValue::Empty => Ok(""),
        CellValue::Literal(text) => Ok(text),
        CellValue::Shared(raw) => {
            let index = raw.trim().parse::<usize>()?;
            strings.get(index)
        }
    }
}

/// セル参照から先頭のアルファベット部分を取り出す（例: "C7" -> "C"）
///
/// アルファベットが見つからない場合は空文字列を返します。
pub fn column_label(reference: &str) -> &str {
    let Some(start) = reference.find(|c: char| c.is_ascii_alphabetic()) else {
        return "";
    };
    let rest = &reference[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(rest.len());
    &rest[..end]
}

/// 列ラベルを0始まりの列インデックスに変換する（A=0, Z=25, AA=26）
///
/// 全単射26進数として右から左へ評価します。大文字小文字は区別しません。
/// 空のラベル、アルファベット以外を含むラベル、桁あふれは`None`。
pub fn column_index(label: &str) -> Option<usize> {
    if label.is_empty() {
        return None;
    }

    let mut index = 0usize;
    let mut factor = 1usize;
    for ch in label.chars().rev() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as usize) - ('A' as usize) + 1;
        index = index.checked_add(digit.checked_mul(factor)?)?;
        factor = factor.saturating_mul(26);
    }

    Some(index - 1)
}

/// 0始まりの列インデックスを列ラベルに変換する（0 -> "A", 26 -> "AA"）
pub fn column_name(mut index: usize) -> String {
    let mut result = Vec::new();
    loop {
        result.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    result.iter().rev().map(|&b| b as char).collect()
}

/// 行を実体化する際の規則
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    max_columns: usize,
    trim_columns: Vec<usize>,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self {
            max_columns: MAX_COLUMNS,
            trim_columns: Vec::new(),
        }
    }
}

impl RowLayout {
    /// 列数上限を指定して生成
    pub fn new(max_columns: usize) -> Self {
        Self {
            max_columns,
            trim_columns: Vec::new(),
        }
    }

    /// 空白を除去する列をラベルで追加する（例: "G"）
    ///
    /// 列ラベルとして解釈できないものは無視されます。
    pub fn with_trim_columns<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for label in labels {
            match column_index(label.as_ref()) {
                Some(index) => self.trim_columns.push(index),
                None => warn!("ignoring invalid trim column label '{}'", label.as_ref()),
            }
        }
        self
    }

    /// 1行の値の上限
    pub fn max_columns(&self) -> usize {
        self.max_columns
    }

    fn trims(&self, column: usize) -> bool {
        self.trim_columns.contains(&column)
    }
}

/// セルに実効列位置を割り当て、列順に安定ソートする
///
/// 参照を持たないセルは直前のセルの次の列に置かれます。
fn positioned_cells(row: &Row) -> Vec<(usize, &Cell)> {
    let mut next = 0usize;
    let mut cells: Vec<(usize, &Cell)> = row
        .cells
        .iter()
        .map(|cell| {
            let column = match cell.column_index() {
                Some(column) => column,
                None => {
                    if let Some(reference) = &cell.reference {
                        warn!(
                            "cell reference '{}' has no usable column; placing it at column {}",
                            reference, next
                        );
                    }
                    next
                }
            };
            next = column.saturating_add(1);
            (column, cell)
        })
        .collect();
    cells.sort_by_key(|(column, _)| *column);
    cells
}

/// 疎な1行を密な値の列に変換する
///
/// 列の欠落は空文字列で補完し、`layout.max_columns()`個に達した時点で打ち切ります。
/// 空白除去列に指定された列の値は、すべての半角スペースを取り除きます。
pub fn materialize_row(
    row: &Row,
    strings: &SharedStrings,
    layout: &RowLayout,
) -> Result<Vec<String>, XlsxToXmlError> {
    let max = layout.max_columns;
    let mut values: Vec<String> = Vec::with_capacity(max);

    for (column, cell) in positioned_cells(row) {
        while values.len() < column && values.len() < max {
            values.push(String::new());
        }
        if values.len() >= max {
            break;
        }

        let text = resolve_cell(cell, strings)?;
        if layout.trims(column) {
            values.push(text.replace(' ', ""));
        } else {
            values.push(text.to_string());
        }

        if values.len() >= max {
            break;
        }
    }

    Ok(values)
}

/// 行の集合からテーブルを構築する
///
/// ヘッダー行も他の行と同じ規則で実体化し、その後データから取り除いて列名とします。
/// 行が1つもない場合は列も行も持たないテーブルを返します（エラーではありません）。
pub fn build_table(
    name: &str,
    rows: &[Row],
    strings: &SharedStrings,
    layout: &RowLayout,
) -> Result<Table, XlsxToXmlError> {
    let mut table = Table::new(name);
    if rows.is_empty() {
        debug!("table '{}': sheet has no rows", name);
        return Ok(table);
    }

    let mut data = rows
        .iter()
        .map(|row| materialize_row(row, strings, layout))
        .collect::<Result<Vec<_>, _>>()?;

    // ヘッダー行をデータから除去
    table.columns = data.remove(0);
    let width = table.columns.len();

    for (offset, mut values) in data.into_iter().enumerate() {
        if values.len() > width {
            warn!(
                "table '{}': data row {} has {} values but only {} columns; extra values dropped",
                name,
                offset + 1,
                values.len(),
                width
            );
        }
        values.resize(width, String::new());
        table.rows.push(values);
    }

    debug!(
        "table '{}': {} columns, {} data rows",
        name,
        width,
        table.rows.len()
    );
    Ok(table)
}
