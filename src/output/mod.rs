//! Output Format Module
//!
//! Strategy Patternによる出力フォーマットの抽象化を提供するモジュール。

mod formatters;

use crate::error::XlsxToXmlError;
use crate::feed::JoinedProduct;
use std::io::Write;

pub use formatters::*;

/// 出力フォーマッター（Strategy Pattern）
#[derive(Debug, Clone, Copy)]
pub enum OutputFormatter {
    Xml(XmlFormatter),
    Json,
}

impl OutputFormatter {
    /// 出力フォーマットとXML書式設定からフォーマッターを生成
    pub fn from_format(
        format: crate::api::OutputFormat,
        indent: usize,
        declaration: bool,
    ) -> Self {
        match format {
            crate::api::OutputFormat::Xml => OutputFormatter::Xml(XmlFormatter {
                indent,
                declaration,
            }),
            crate::api::OutputFormat::Json => OutputFormatter::Json,
        }
    }

    /// 製品リストを指定されたフォーマットで出力する
    pub fn render<W: Write>(
        &self,
        products: &[JoinedProduct],
        writer: &mut W,
    ) -> Result<(), XlsxToXmlError> {
        match self {
            OutputFormatter::Xml(formatter) => formatter.render(products, writer),
            OutputFormatter::Json => JsonFormatter.render(products, writer),
        }
    }
}
