//! Shared Strings Parser
//!
//! `xl/sharedStrings.xml`の`<sst>`要素を解析し、共有文字列テーブルを構築します。

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::XlsxToXmlError;
use crate::types::SharedStrings;

/// 共有文字列パートを解析する
///
/// 各`<si>`が1エントリとなり、リッチテキストの`<r>`内の`<t>`も連結されます。
/// ふりがな（`<rPh>`）のテキストは含めません。`<t>`内の空白はそのまま保持します。
pub(crate) fn parse_shared_strings(xml: &[u8]) -> Result<SharedStrings, XlsxToXmlError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(false);

    let mut buf = Vec::new();
    let mut strings = SharedStrings::new();
    let mut in_si = false;
    let mut in_phonetic = false;
    let mut in_t = false;
    let mut current = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => {
                    in_si = true;
                    current.clear();
                }
                b"rPh" if in_si => in_phonetic = true,
                b"t" if in_si && !in_phonetic => in_t = true,
                _ => {}
            },
            Event::Empty(e) => {
                // <si/> は空文字列のエントリ
                if e.local_name().as_ref() == b"si" {
                    strings.push(String::new());
                }
            }
            Event::Text(e) if in_t => {
                current.push_str(&e.unescape()?);
            }
            Event::CData(e) if in_t => {
                current.push_str(std::str::from_utf8(&e)?);
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"si" => {
                    strings.push(std::mem::take(&mut current));
                    in_si = false;
                }
                b"rPh" => in_phonetic = false,
                b"t" => in_t = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}
