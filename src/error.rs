//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// xlsxfeedクレート全体で使用するエラー型
///
/// XLSXパッケージの読み込み、シートの解析、レコード抽出、フィード出力の
/// すべての段階で発生するエラーを統一的に扱います。
///
/// # エラーの種類
///
/// - `Io` / `Zip` / `MissingPart` / `Xml` / `Utf8`: ドキュメントを開けない、または読めない
/// - `ParseInt` / `SharedStringIndex`: セルの共有文字列参照が不正
/// - `MissingColumn`: 必須の列名がヘッダー行に存在しない
/// - `Config`: ビルダー設定の検証に失敗
/// - `SecurityViolation`: アーカイブがセキュリティ制限に違反
///
/// # 使用例
///
/// ```rust,no_run
/// use std::fs::File;
/// use xlsxfeed::{ConverterBuilder, XlsxToXmlError};
///
/// fn run(path: &str) -> Result<String, XlsxToXmlError> {
///     let converter = ConverterBuilder::new().build()?;
///     let input = File::open(path)?; // Ioエラーが自動的に変換される
///     converter.convert_to_string(input)
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxToXmlError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIPアーカイブの解析エラー
    ///
    /// XLSXファイル（ZIPアーカイブ）として開けない場合に発生します。
    #[error("ZIP archive error: {0}")]
    Zip(String),

    /// パッケージ内に必須のパートが存在しない
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// XMLパートの解析エラー
    #[error("XML parse error: {0}")]
    Xml(String),

    /// UTF-8文字列の変換エラー
    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// 数値の解析エラー
    ///
    /// 共有文字列インデックスが10進数として解釈できない場合などに発生します。
    #[error("Number parse error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    /// 共有文字列インデックスが範囲外
    #[error("Shared string index {index} is out of range (table size: {len})")]
    SharedStringIndex {
        /// セルが参照したインデックス
        index: usize,
        /// 共有文字列テーブルのエントリ数
        len: usize,
    },

    /// 必須の列がテーブルに存在しない
    #[error("Column '{column}' not found in table '{table}'")]
    MissingColumn {
        /// テーブル名（例: "Products"）
        table: String,
        /// 見つからなかった列名（例: "ProductURL"）
        column: String,
    },

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に無効な設定が検出された場合に発生します。
    ///
    /// ```rust,no_run
    /// use xlsxfeed::{ConverterBuilder, XlsxToXmlError};
    ///
    /// match ConverterBuilder::new().with_max_columns(0).build() {
    ///     Err(XlsxToXmlError::Config(msg)) => println!("設定エラー: {}", msg),
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// ZIP bomb攻撃、パストラバーサル攻撃、ファイルサイズ制限などの
    /// セキュリティ制限に違反した場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

impl XlsxToXmlError {
    /// ドキュメント自体を開けない・読めないことによるエラーかどうか
    ///
    /// シート内容の不整合（範囲外の共有文字列参照、列の欠落など）とは区別されます。
    pub fn is_document_failure(&self) -> bool {
        matches!(
            self,
            XlsxToXmlError::Io(_)
                | XlsxToXmlError::Zip(_)
                | XlsxToXmlError::MissingPart(_)
                | XlsxToXmlError::Xml(_)
                | XlsxToXmlError::Utf8(_)
        )
    }
}

impl From<zip::result::ZipError> for XlsxToXmlError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => XlsxToXmlError::Io(e),
            other => XlsxToXmlError::Zip(other.to_string()),
        }
    }
}

impl From<quick_xml::Error> for XlsxToXmlError {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(e) => {
                XlsxToXmlError::Io(std::io::Error::new(e.kind(), e.to_string()))
            }
            other => XlsxToXmlError::Xml(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: XlsxToXmlError = io_err.into();

        match error {
            XlsxToXmlError::Io(ref e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
        assert!(error.is_document_failure());
    }

    #[test]
    fn test_zip_error_conversion() {
        let error: XlsxToXmlError = zip::result::ZipError::InvalidArchive("bad magic").into();
        match error {
            XlsxToXmlError::Zip(ref msg) => assert!(msg.contains("bad magic")),
            _ => panic!("Expected Zip error"),
        }
        assert!(error.is_document_failure());
    }

    #[test]
    fn test_zip_io_error_becomes_io() {
        let inner = io::Error::new(io::ErrorKind::UnexpectedEof, "truncated");
        let error: XlsxToXmlError = zip::result::ZipError::Io(inner).into();
        assert!(matches!(error, XlsxToXmlError::Io(_)));
    }

    #[test]
    fn test_shared_string_index_display() {
        let error = XlsxToXmlError::SharedStringIndex { index: 12, len: 3 };
        let msg = error.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains("3"));
        assert!(!error.is_document_failure());
    }

    #[test]
    fn test_missing_column_display() {
        let error = XlsxToXmlError::MissingColumn {
            table: "UPCs".to_string(),
            column: "GTIN".to_string(),
        };
        assert_eq!(error.to_string(), "Column 'GTIN' not found in table 'UPCs'");
    }

    #[test]
    fn test_parse_int_error_conversion() {
        fn parse(text: &str) -> Result<usize, XlsxToXmlError> {
            Ok(text.parse::<usize>()?)
        }

        match parse("abc") {
            Err(XlsxToXmlError::ParseInt(_)) => {}
            other => panic!("Expected ParseInt error, got {:?}", other),
        }
    }

    #[test]
    fn test_all_error_formats() {
        let io_err: XlsxToXmlError = io::Error::other("test io").into();
        assert!(io_err.to_string().starts_with("IO error"));

        let config_err = XlsxToXmlError::Config("test config".to_string());
        assert!(config_err.to_string().starts_with("Configuration error"));

        let part_err = XlsxToXmlError::MissingPart("xl/workbook.xml".to_string());
        assert!(part_err.to_string().starts_with("Missing package part"));

        let security_err = XlsxToXmlError::SecurityViolation("too many files".to_string());
        assert!(security_err.to_string().starts_with("Security violation"));
        assert!(!security_err.is_document_failure());
    }
}
