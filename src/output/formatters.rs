//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;
use std::io::Write;

use crate::error::XlsxToXmlError;
use crate::feed::JoinedProduct;

/// `Feed`要素に付与する属性値
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// XMLフィードのフォーマッター
#[derive(Debug, Clone, Copy)]
pub struct XmlFormatter {
    /// インデント幅（0の場合は改行・インデントなし）
    pub indent: usize,
    /// XML宣言を出力するか
    pub declaration: bool,
}

impl XmlFormatter {
    pub fn render<W: Write>(
        &self,
        products: &[JoinedProduct],
        writer: &mut W,
    ) -> Result<(), XlsxToXmlError> {
        let mut xml = if self.indent > 0 {
            Writer::new_with_indent(&mut *writer, b' ', self.indent)
        } else {
            Writer::new(&mut *writer)
        };

        if self.declaration {
            xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        }

        let mut feed = BytesStart::new("Feed");
        feed.push_attribute(("xmlnsxsi", XSI_NAMESPACE));
        xml.write_event(Event::Start(feed))?;

        if products.is_empty() {
            xml.write_event(Event::Empty(BytesStart::new("Products")))?;
        } else {
            xml.write_event(Event::Start(BytesStart::new("Products")))?;
            for product in products {
                write_product(&mut xml, product)?;
            }
            xml.write_event(Event::End(BytesEnd::new("Products")))?;
        }

        xml.write_event(Event::End(BytesEnd::new("Feed")))?;

        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

fn write_product<W: Write>(
    xml: &mut Writer<W>,
    product: &JoinedProduct,
) -> Result<(), XlsxToXmlError> {
    xml.write_event(Event::Start(BytesStart::new("Product")))?;

    write_text_element(xml, "ProductUniqueID", &product.product_unique_id.to_string())?;
    write_text_element(xml, "Name", &product.name)?;
    write_text_element(xml, "ProductUrl", &product.product_url)?;
    write_text_element(xml, "ImageUrl", &product.image_url)?;
    write_text_element(xml, "Description", &product.description)?;

    if product.upcs.is_empty() {
        xml.write_event(Event::Empty(BytesStart::new("UPCs")))?;
    } else {
        xml.write_event(Event::Start(BytesStart::new("UPCs")))?;
        for upc in &product.upcs {
            write_text_element(xml, "UPC", upc)?;
        }
        xml.write_event(Event::End(BytesEnd::new("UPCs")))?;
    }

    xml.write_event(Event::End(BytesEnd::new("Product")))?;
    Ok(())
}

/// `<name>text</name>`を1行で書き出す
///
/// テキストは`<`、`>`、`&`のみエスケープし、引用符はそのまま出力します。
fn write_text_element<W: Write>(
    xml: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), XlsxToXmlError> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    xml.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// JSON形式のフォーマッター
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonFeed<'a> {
    products: &'a [JoinedProduct],
}

impl JsonFormatter {
    pub fn render<W: Write>(
        &self,
        products: &[JoinedProduct],
        writer: &mut W,
    ) -> Result<(), XlsxToXmlError> {
        serde_json::to_writer_pretty(&mut *writer, &JsonFeed { products })
            .map_err(|e| XlsxToXmlError::Io(e.into()))?;
        writeln!(writer)?;
        writer.flush()?;

        Ok(())
    }
}
