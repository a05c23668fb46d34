//! Трэйты на стыках: чтение формата и внешний нормализатор SGML -> XML.

use crate::{error::Result, model::StatementDocument};
use std::io::BufRead;

pub trait ReadFormat {
    fn read<R: BufRead>(r: R) -> Result<StatementDocument>;
}

/// Превращает тело SGML без заголовка в один well-formed XML документ.
///
/// `doc_type` — имя ожидаемого корневого элемента (для OFX это `"OFX"`).
/// Любой сбой возвращается как `OfxError::Normalization`.
pub trait Normalizer {
    fn normalize(&self, body: &str, doc_type: &str) -> Result<String>;
}

impl<N: Normalizer + ?Sized> Normalizer for &N {
    fn normalize(&self, body: &str, doc_type: &str) -> Result<String> {
        (**self).normalize(body, doc_type)
    }
}
