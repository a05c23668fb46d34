//! Даты OFX: `YYYYMMDD[HHMMSS[.XXX]][[-5:EST]]`. Учитываются только первые 8 символов.

use crate::error::{OfxError, Result};
use chrono::NaiveDate;

/// `None` — «нулевая» дата: токен короче 8 символов (в том числе пустой).
pub fn parse_ofx_date(token: &str) -> Result<Option<NaiveDate>> {
    let token = token.trim();
    if token.chars().count() < 8 {
        return Ok(None);
    }

    let end = token.char_indices().nth(8).map_or(token.len(), |(idx, _)| idx);
    let head = Some(&token[..end])
        .filter(|h| h.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| OfxError::DateFormat(token.to_string()))?;

    // цифры уже проверены, разбор сегментов не может упасть
    let year: i32 = head[..4].parse().map_err(|_| OfxError::DateFormat(token.to_string()))?;
    let month: u32 = head[4..6].parse().map_err(|_| OfxError::DateFormat(token.to_string()))?;
    let day: u32 = head[6..8].parse().map_err(|_| OfxError::DateFormat(token.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .map(Some)
        .ok_or_else(|| OfxError::DateFormat(token.to_string()))
}
