//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use crate::api::OutputFormat;
use crate::error::XlsxToXmlError;
use crate::feed::Feed;
use crate::output::OutputFormatter;
use crate::records::{extract_catalog, extract_codes, CATALOG_TABLE, CODES_TABLE, CODE_TRIM_COLUMN};
use crate::security::SecurityConfig;
use crate::table::{build_table, column_index, RowLayout, MAX_COLUMNS};
use log::debug;
use std::io::{BufWriter, Cursor, Read, Write};

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// 1行から取り出す値の上限
    pub max_columns: usize,

    /// カタログテーブルで空白を除去する列ラベル
    pub catalog_trim_columns: Vec<String>,

    /// コードテーブルで空白を除去する列ラベル
    pub code_trim_columns: Vec<String>,

    /// 出力フォーマット
    pub output_format: OutputFormat,

    /// XML出力のインデント幅（0で改行なし）
    pub indent: usize,

    /// XML宣言を出力するか
    pub xml_declaration: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_columns: MAX_COLUMNS,
            catalog_trim_columns: Vec::new(),
            code_trim_columns: vec![CODE_TRIM_COLUMN.to_string()],
            output_format: OutputFormat::Xml,
            indent: 2,
            xml_declaration: false,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxfeed::{ConverterBuilder, OutputFormat};
///
/// # fn main() -> Result<(), xlsxfeed::XlsxToXmlError> {
/// let converter = ConverterBuilder::new()
///     .with_output_format(OutputFormat::Json)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 列数上限: 7
    /// - 空白除去列: カタログなし、コードテーブルは`G`列
    /// - 出力フォーマット: XML（インデント2、XML宣言なし）
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// 1行から取り出す値の上限を指定する
    ///
    /// # 制約
    ///
    /// * 1以上でなければならない。0の場合は`build()`時に`XlsxToXmlError::Config`を返す
    pub fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.config.max_columns = max_columns;
        self
    }

    /// カタログテーブルで空白を除去する列を指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxfeed::ConverterBuilder;
    ///
    /// let builder = ConverterBuilder::new()
    ///     .with_catalog_trim_columns(["A"]);
    /// ```
    pub fn with_catalog_trim_columns<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.catalog_trim_columns = labels.into_iter().map(Into::into).collect();
        self
    }

    /// コードテーブルで空白を除去する列を指定する（デフォルト: `["G"]`）
    ///
    /// 指定した列でデフォルトを置き換えます。
    pub fn with_code_trim_columns<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.code_trim_columns = labels.into_iter().map(Into::into).collect();
        self
    }

    /// 出力フォーマットを指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxfeed::{ConverterBuilder, OutputFormat};
    ///
    /// let builder = ConverterBuilder::new()
    ///     .with_output_format(OutputFormat::Json);
    /// ```
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// XML出力のインデント幅を指定する（0で1行に出力）
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.config.indent = indent;
        self
    }

    /// XML宣言（`<?xml version="1.0" encoding="utf-8"?>`）を出力するかを指定する
    pub fn with_xml_declaration(mut self, declaration: bool) -> Self {
        self.config.xml_declaration = declaration;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Converter)`: 設定が有効な場合
    /// * `Err(XlsxToXmlError::Config)`: 設定が無効な場合
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxToXmlError::Config(String)`
    ///   * 列数上限が0
    ///   * 空白除去列のラベルが列として解釈できない（空、英字以外を含む、桁あふれ）
    pub fn build(mut self) -> Result<Converter, XlsxToXmlError> {
        // 1. 列数上限の検証
        if self.config.max_columns == 0 {
            return Err(XlsxToXmlError::Config(
                "max_columns must be at least 1".to_string(),
            ));
        }

        // 2. 空白除去列の検証と正規化
        self.config.catalog_trim_columns = normalize_labels(&self.config.catalog_trim_columns)?;
        self.config.code_trim_columns = normalize_labels(&self.config.code_trim_columns)?;

        // 3. Converterインスタンス生成
        Ok(Converter::new(self.config))
    }
}

fn normalize_labels(labels: &[String]) -> Result<Vec<String>, XlsxToXmlError> {
    labels
        .iter()
        .map(|label| {
            if column_index(label).is_none() {
                Err(XlsxToXmlError::Config(format!(
                    "Invalid trim column label: '{}'",
                    label
                )))
            } else {
                Ok(label.to_ascii_uppercase())
            }
        })
        .collect()
}

/// 変換処理のファサード
///
/// 製品スプレッドシート（XLSX）を製品フィードに変換するためのメインエントリーポイントです。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxfeed::ConverterBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), xlsxfeed::XlsxToXmlError> {
/// let converter = ConverterBuilder::new().build()?;
/// let input = File::open("products.xlsx")?;
/// let mut output = Vec::new();
/// converter.convert(input, &mut output)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    config: ConversionConfig,
    catalog_layout: RowLayout,
    code_layout: RowLayout,
    security: SecurityConfig,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        let catalog_layout =
            RowLayout::new(config.max_columns).with_trim_columns(&config.catalog_trim_columns);
        let code_layout =
            RowLayout::new(config.max_columns).with_trim_columns(&config.code_trim_columns);
        Self {
            config,
            catalog_layout,
            code_layout,
            security: SecurityConfig::default(),
        }
    }

    /// ワークブックの先頭シートからカタログとコードを抽出する
    ///
    /// シートは1回だけ解析し、その行から2つのテーブルを構築します。
    /// カタログテーブルとコードテーブルの違いは空白除去列のみです。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Feed)` - 重複除去済みのカタログとコード
    /// * `Err(XlsxToXmlError)` - 読み込み、解析、列解決に失敗した場合
    pub fn extract<R: Read>(&self, mut input: R) -> Result<Feed, XlsxToXmlError> {
        // 1. 入力データをメモリに読み込む
        let mut buffer = Vec::new();
        let bytes_read = input.read_to_end(&mut buffer)?;
        self.security.check_input_size(bytes_read)?;

        // 2. 先頭シートの解析
        let sheet = crate::parser::read_first_sheet_with(Cursor::new(buffer), &self.security)?;

        // 3. テーブル構築
        let catalog_table = build_table(
            CATALOG_TABLE,
            &sheet.rows,
            &sheet.shared_strings,
            &self.catalog_layout,
        )?;
        let code_table = build_table(
            CODES_TABLE,
            &sheet.rows,
            &sheet.shared_strings,
            &self.code_layout,
        )?;

        // 4. レコード抽出
        let feed = Feed {
            catalog: extract_catalog(&catalog_table)?,
            codes: extract_codes(&code_table)?,
        };

        debug!(
            "extracted {} catalog records and {} code records",
            feed.catalog.len(),
            feed.codes.len()
        );
        Ok(feed)
    }

    /// 製品スプレッドシートをフィードに変換して書き出す
    ///
    /// # 引数
    ///
    /// * `input` - XLSXファイルを読み込むためのリーダー
    /// * `output` - 出力先のライター
    ///
    /// # 処理フロー
    ///
    /// 1. 先頭シートの解析とレコード抽出（`extract`）
    /// 2. 製品名による結合
    /// 3. 出力フォーマッターによる書き出し
    /// 4. 出力バッファをフラッシュ
    ///
    /// 失敗した場合、`output`には何も書き込まれません。
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxfeed::ConverterBuilder;
    /// use std::fs::File;
    ///
    /// # fn main() -> Result<(), xlsxfeed::XlsxToXmlError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let input = File::open("products.xlsx")?;
    /// let output = File::create("feed.xml")?;
    /// converter.convert(input, output)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert<R: Read, W: Write>(&self, input: R, mut output: W) -> Result<(), XlsxToXmlError> {
        let products = self.extract(input)?.products();

        let formatter = OutputFormatter::from_format(
            self.config.output_format,
            self.config.indent,
            self.config.xml_declaration,
        );

        let mut writer = BufWriter::new(&mut output);
        formatter.render(&products, &mut writer)?;
        writer.flush()?;

        Ok(())
    }

    /// 製品スプレッドシートをフィード文字列に変換
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use std::fs::File;
    /// use xlsxfeed::ConverterBuilder;
    ///
    /// # fn main() -> Result<(), xlsxfeed::XlsxToXmlError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let xml = converter.convert_to_string(File::open("products.xlsx")?)?;
    /// println!("{}", xml);
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert_to_string<R: Read>(&self, input: R) -> Result<String, XlsxToXmlError> {
        let mut buffer = Vec::new();
        self.convert(input, &mut buffer)?;

        let result = String::from_utf8(buffer).map_err(|e| {
            XlsxToXmlError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok(result)
    }
}
