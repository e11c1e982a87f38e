//! Types Module
//!
//! シート解析からテーブル構築までで使用する共通データ型を定義するモジュール。
//! XLSX固有のオブジェクトグラフには依存せず、プレーンなデータ構造として表現します。

use crate::error::XlsxToXmlError;
use crate::table::{column_index, column_label};

/// セルの生の値
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// 値なし（`<v>`要素が存在しない）
    Empty,

    /// リテラル値（型変換・書式適用なし）
    Literal(String),

    /// 共有文字列テーブルへの参照
    ///
    /// 値は10進数のインデックス文字列のまま保持し、解決時に解釈します。
    Shared(String),
}

/// シート上の1セル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// セル参照（例: "C7"）。省略されたセルは直前のセルの次の列に位置する
    pub reference: Option<String>,

    /// セルの値
    pub value: CellValue,
}

impl Cell {
    /// 参照と値からセルを生成
    pub fn new(reference: impl Into<String>, value: CellValue) -> Self {
        Self {
            reference: Some(reference.into()),
            value,
        }
    }

    /// リテラル値を持つセルを生成
    pub fn literal(reference: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(reference, CellValue::Literal(text.into()))
    }

    /// 共有文字列を参照するセルを生成
    pub fn shared(reference: impl Into<String>, index: usize) -> Self {
        Self::new(reference, CellValue::Shared(index.to_string()))
    }

    /// 値を持たないセルを生成
    pub fn empty(reference: impl Into<String>) -> Self {
        Self::new(reference, CellValue::Empty)
    }

    /// セル参照から列ラベルを取得（例: "C7" -> "C"）
    pub fn column_label(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .map(column_label)
            .filter(|label| !label.is_empty())
    }

    /// セル参照から0始まりの列インデックスを取得
    pub fn column_index(&self) -> Option<usize> {
        self.column_label().and_then(column_index)
    }
}

/// シート上の1行（疎なセル列）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// 行番号（1始まり、`<row r="...">`）
    pub number: Option<u32>,

    /// 出現順のセル。列の欠落があり得る
    pub cells: Vec<Cell>,
}

impl Row {
    /// セル列から行を生成
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            number: None,
            cells,
        }
    }
}

/// 共有文字列テーブル
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedStrings {
    entries: Vec<String>,
}

impl SharedStrings {
    /// 空のテーブルを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// インデックスの文字列を取得する
    ///
    /// # 戻り値
    ///
    /// * `Err(XlsxToXmlError::SharedStringIndex)` - インデックスが範囲外の場合
    pub fn get(&self, index: usize) -> Result<&str, XlsxToXmlError> {
        self.entries
            .get(index)
            .map(String::as_str)
            .ok_or(XlsxToXmlError::SharedStringIndex {
                index,
                len: self.entries.len(),
            })
    }

    /// エントリ数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// エントリが存在しないかどうか
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn push(&mut self, entry: String) {
        self.entries.push(entry);
    }
}

impl From<Vec<String>> for SharedStrings {
    fn from(entries: Vec<String>) -> Self {
        Self { entries }
    }
}

impl<S: Into<String>> FromIterator<S> for SharedStrings {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// ワークブックの先頭シートから読み取った生データ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetData {
    /// シート名（ワークブックにシートが存在しない場合は`None`）
    pub name: Option<String>,

    /// 文書順の行
    pub rows: Vec<Row>,

    /// 共有文字列テーブル
    pub shared_strings: SharedStrings,
}

/// 名前付きの列と密な行からなるテーブル
///
/// データ行は常に`columns.len()`個の値を持ちます。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// テーブル名（例: "Products"）
    pub name: String,

    /// ヘッダー行から得た列名（重複を許容）
    pub columns: Vec<String>,

    /// データ行（ヘッダー行を含まない）
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// 空のテーブルを生成
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// 列名から列位置を取得する。同名の列が複数ある場合は最初の列
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// 列を持たない（ヘッダー行のないシートから構築された）かどうか
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
