//! Заголовок OFX 1.x (SGML): всё, что стоит до первого `<`.
//!
//! Принимаются две формы:
//! - одна «склеенная» строка без разделителей (встречается у старых банков);
//! - набор строк `KEY:VALUE` в любом порядке, ключи и значения без учёта регистра.

use crate::error::{OfxError, Result};

/// Маркер, по которому документ считается SGML-версией.
pub const LEGACY_MARKER: &str = "OFXHEADER:100";

pub const SQUASHED_HEADER: &str = "OFXHEADER:100DATA:OFXSGMLVERSION:102SECURITY:NONEENCODING:USASCIICHARSET:1252COMPRESSION:NONEOLDFILEUID:NONENEWFILEUID:NONE";

/// Обязательные пары, проверяются в этом порядке.
pub const REQUIRED: [(&str, &str); 8] = [
    ("OFXHEADER", "100"),
    ("DATA", "OFXSGML"),
    ("VERSION", "102"),
    ("SECURITY", "NONE"),
    ("ENCODING", "USASCII"),
    ("CHARSET", "1252"),
    ("COMPRESSION", "NONE"),
    ("OLDFILEUID", "NONE"),
];

/// Делит текст на (заголовок, тело). Тело начинается с первого `<`.
pub fn split(text: &str) -> Result<(&str, &str)> {
    let idx = text.find('<').ok_or(OfxError::MissingBody)?;
    Ok(text.split_at(idx))
}

/// Непустые строки заголовка без пробелов по краям.
pub fn entries(header: &str) -> Vec<&str> {
    header
        .split(['\n', '\r'])
        .map(|l| l.trim().trim_start_matches('\u{feff}'))
        .filter(|l| !l.is_empty())
        .collect()
}

pub fn check(entries: &[&str]) -> Result<()> {
    if entries.first() == Some(&SQUASHED_HEADER) {
        tracing::debug!("squashed legacy header accepted");
        return Ok(());
    }

    let mut pairs = Vec::with_capacity(entries.len());
    for e in entries {
        let (k, v) = e
            .split_once(':')
            .ok_or_else(|| OfxError::MalformedHeaderEntry(e.to_string()))?;
        pairs.push((k.trim().to_ascii_uppercase(), v.trim().to_ascii_uppercase()));
    }

    for (key, expected) in REQUIRED {
        if !pairs.iter().any(|(k, v)| k == key && v == expected) {
            let found = pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone());
            return Err(OfxError::HeaderMismatch {
                key,
                expected,
                found,
            });
        }
    }
    Ok(())
}

/// Проверяет заголовок и возвращает тело без него, обрезанное по краям.
pub fn strip(text: &str) -> Result<&str> {
    let (head, body) = split(text)?;
    check(&entries(head))?;
    Ok(body.trim())
}
