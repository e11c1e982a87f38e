//! Worksheet Parser
//!
//! ワークシートXMLの`<sheetData>`から、行とセルを疎なまま取り出します。

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::XlsxToXmlError;
use crate::types::{Cell, CellValue, Row};

/// 解析中のセル
#[derive(Debug, Default)]
struct PendingCell {
    reference: Option<String>,
    cell_type: Option<String>,
    value: Option<String>,
    inline: Option<String>,
}

impl PendingCell {
    fn from_start(e: &BytesStart<'_>) -> Result<Self, XlsxToXmlError> {
        let mut cell = PendingCell::default();
        for attr in e.attributes() {
            let attr =
                attr.map_err(|e| XlsxToXmlError::Xml(format!("XML attribute error: {}", e)))?;
            match attr.key.as_ref() {
                b"r" => cell.reference = Some(attr.unescape_value()?.into_owned()),
                b"t" => cell.cell_type = Some(attr.unescape_value()?.into_owned()),
                _ => {}
            }
        }
        Ok(cell)
    }

    /// セル型に応じて値を確定する
    ///
    /// * `t="s"`: `<v>`は共有文字列インデックス
    /// * `t="inlineStr"`: `<is>`のテキストをリテラルとして扱う
    /// * その他: `<v>`のテキストをそのままリテラルとして扱う
    fn finish(self) -> Cell {
        let value = match (self.cell_type.as_deref(), self.value, self.inline) {
            (Some("s"), Some(index), _) => CellValue::Shared(index),
            (Some("inlineStr"), _, Some(text)) => CellValue::Literal(text),
            (_, Some(text), _) => CellValue::Literal(text),
            _ => CellValue::Empty,
        };
        Cell {
            reference: self.reference,
            value,
        }
    }
}

fn row_from_start(e: &BytesStart<'_>) -> Result<Row, XlsxToXmlError> {
    let mut row = Row::default();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| XlsxToXmlError::Xml(format!("XML attribute error: {}", e)))?;
        if attr.key.as_ref() == b"r" {
            row.number = Some(std::str::from_utf8(&attr.value)?.trim().parse()?);
        }
    }
    Ok(row)
}

/// ワークシートXMLを解析し、文書順の行を返す
///
/// 数式（`<f>`）は無視し、キャッシュ値`<v>`のみを読み取ります。
pub(crate) fn parse_worksheet(xml: &[u8]) -> Result<Vec<Row>, XlsxToXmlError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(false);

    let mut buf = Vec::new();
    let mut rows = Vec::new();
    let mut row: Option<Row> = None;
    let mut cell: Option<PendingCell> = None;
    let mut in_v = false;
    let mut in_is = false;
    let mut in_phonetic = false;
    let mut in_t = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => row = Some(row_from_start(&e)?),
                b"c" if row.is_some() => cell = Some(PendingCell::from_start(&e)?),
                b"v" => {
                    if let Some(cell) = cell.as_mut() {
                        in_v = true;
                        cell.value = Some(String::new());
                    }
                }
                b"is" => {
                    if let Some(cell) = cell.as_mut() {
                        in_is = true;
                        cell.inline = Some(String::new());
                    }
                }
                b"rPh" if in_is => in_phonetic = true,
                b"t" if in_is && !in_phonetic => in_t = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => rows.push(row_from_start(&e)?),
                b"c" => {
                    if let Some(row) = row.as_mut() {
                        row.cells.push(PendingCell::from_start(&e)?.finish());
                    }
                }
                b"v" => {
                    if let Some(cell) = cell.as_mut() {
                        cell.value = Some(String::new());
                    }
                }
                _ => {}
            },
            Event::Text(e) if in_v || in_t => {
                let text = e.unescape()?;
                let target = if in_v {
                    cell.as_mut().and_then(|c| c.value.as_mut())
                } else {
                    cell.as_mut().and_then(|c| c.inline.as_mut())
                };
                if let Some(target) = target {
                    target.push_str(&text);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"row" => {
                    if let Some(row) = row.take() {
                        rows.push(row);
                    }
                }
                b"c" => {
                    if let (Some(row), Some(cell)) = (row.as_mut(), cell.take()) {
                        row.cells.push(cell.finish());
                    }
                }
                b"v" => in_v = false,
                b"is" => in_is = false,
                b"rPh" => in_phonetic = false,
                b"t" => in_t = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rows)
}
