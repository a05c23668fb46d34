//! Определение формата (SGML или XML) и приведение SGML к XML.

use crate::{error::Result, header, traits::Normalizer};

/// Тип документа, который передаётся нормализатору.
pub const DOC_TYPE: &str = "OFX";

/// Документ считается XML, если в заголовке нет `OFXHEADER:100`.
pub fn is_xml(text: &str) -> bool {
    let head = text.find('<').map_or(text, |idx| &text[..idx]);
    !head.contains(header::LEGACY_MARKER)
}

/// Возвращает текст, готовый к загрузке в дерево: XML как есть, SGML — через нормализатор.
pub fn to_xml<N: Normalizer>(text: &str, normalizer: &N) -> Result<String> {
    if is_xml(text) {
        tracing::debug!("document is already XML");
        return Ok(text.to_string());
    }

    tracing::debug!("legacy SGML document, normalizing");
    let body = header::strip(text)?;
    let xml = normalizer.normalize(body, DOC_TYPE)?;
    Ok(collapse_lines(&xml))
}

/// Склеивает многострочный вывод нормализатора в одну строку.
pub fn collapse_lines(xml: &str) -> String {
    xml.trim_start()
        .split(['\n', '\r'])
        .filter(|l| !l.is_empty())
        .collect()
}
