//! XLSX Package Module
//!
//! OOXMLパッケージ（ZIPアーカイブ）を開き、パートの読み込みと
//! 先頭シートのパス解決を行うモジュール。

use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Read, Seek};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::XlsxToXmlError;
use crate::security::SecurityConfig;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const DEFAULT_SHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// ワークブック内のシートエントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SheetEntry {
    /// シート名
    pub name: String,
    /// アーカイブ内のワークシートパート（例: "xl/worksheets/sheet1.xml"）
    pub path: String,
}

/// セキュリティ検証済みのXLSXパッケージ
pub(crate) struct XlsxPackage<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> XlsxPackage<R> {
    /// パッケージを開き、アーカイブ全体をセキュリティ検証する
    ///
    /// # 戻り値
    ///
    /// * `Err(XlsxToXmlError::Zip)` - ZIPアーカイブとして読めない場合
    /// * `Err(XlsxToXmlError::SecurityViolation)` - 制限に違反した場合
    pub fn open(reader: R, security: &SecurityConfig) -> Result<Self, XlsxToXmlError> {
        let mut archive = ZipArchive::new(reader)?;
        security.check_archive(&mut archive)?;
        debug!("opened package with {} parts", archive.len());
        Ok(Self { archive })
    }

    /// パートを読み込む。存在しない場合は`None`
    pub fn read_part(&mut self, name: &str) -> Result<Option<Vec<u8>>, XlsxToXmlError> {
        let mut file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut content = Vec::new();
        file.read_to_end(&mut content)?;
        Ok(Some(content))
    }

    /// 必須パートを読み込む
    pub fn require_part(&mut self, name: &str) -> Result<Vec<u8>, XlsxToXmlError> {
        self.read_part(name)?
            .ok_or_else(|| XlsxToXmlError::MissingPart(name.to_string()))
    }

    /// ワークブックの先頭シートを解決する
    ///
    /// `xl/workbook.xml`の最初の`<sheet>`の`r:id`を
    /// `xl/_rels/workbook.xml.rels`で解決します。リレーションシップパートが
    /// 存在しない場合は`xl/worksheets/sheet1.xml`を使用します。
    ///
    /// # 戻り値
    ///
    /// * `Ok(None)` - ワークブックにシートが存在しない場合
    pub fn first_sheet(&mut self) -> Result<Option<SheetEntry>, XlsxToXmlError> {
        let workbook = self.require_part(WORKBOOK_PART)?;
        let Some((name, relationship_id)) = parse_first_sheet(&workbook)? else {
            return Ok(None);
        };

        let path = match self.read_part(WORKBOOK_RELS_PART)? {
            Some(rels) => {
                let relationships = parse_relationships(&rels)?;
                let target = relationship_id
                    .as_ref()
                    .and_then(|id| relationships.get(id))
                    .ok_or_else(|| {
                        XlsxToXmlError::MissingPart(format!(
                            "relationship {:?} for sheet '{}'",
                            relationship_id.as_deref().unwrap_or_default(),
                            name
                        ))
                    })?;
                resolve_target("xl", target)
            }
            None => DEFAULT_SHEET_PART.to_string(),
        };

        debug!("first sheet '{}' is stored at {}", name, path);
        Ok(Some(SheetEntry { name, path }))
    }
}

/// workbook.xmlから最初の`<sheet>`の名前とリレーションシップIDを取得
fn parse_first_sheet(xml: &[u8]) -> Result<Option<(String, Option<String>)>, XlsxToXmlError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                let mut name = String::new();
                let mut relationship_id = None;
                for attr in e.attributes() {
                    let attr = attr
                        .map_err(|e| XlsxToXmlError::Xml(format!("XML attribute error: {}", e)))?;
                    match (attr.key.prefix().is_some(), attr.key.local_name().as_ref()) {
                        (false, b"name") => name = attr.unescape_value()?.into_owned(),
                        (true, b"id") => relationship_id = Some(attr.unescape_value()?.into_owned()),
                        _ => {}
                    }
                }
                return Ok(Some((name, relationship_id)));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}

/// リレーションシップパートを解析（Id -> Target）
fn parse_relationships(xml: &[u8]) -> Result<HashMap<String, String>, XlsxToXmlError> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut relationships = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut target = None;
                for attr in e.attributes() {
                    let attr = attr
                        .map_err(|e| XlsxToXmlError::Xml(format!("XML attribute error: {}", e)))?;
                    match attr.key.as_ref() {
                        b"Id" => id = Some(attr.unescape_value()?.into_owned()),
                        b"Target" => target = Some(attr.unescape_value()?.into_owned()),
                        _ => {}
                    }
                }
                if let (Some(id), Some(target)) = (id, target) {
                    relationships.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(relationships)
}

/// リレーションシップのターゲットをアーカイブ内パスに解決する
///
/// 先頭が`/`のターゲットはパッケージルートからの絶対パス、
/// それ以外は`base`ディレクトリからの相対パスとして扱います。
fn resolve_target(base: &str, target: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    let relative = match target.strip_prefix('/') {
        Some(absolute) => absolute,
        None => {
            segments.extend(base.split('/').filter(|s| !s.is_empty()));
            target
        }
    };

    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments.join("/")
}
