//! Единый тип ошибок публичного API.

use std::fmt;
use thiserror::Error;

/// Обязательные секции документа, отсутствие которых прерывает разбор.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Currency,
    SignOn,
    AccountInfo,
    LedgerBalance,
    BankAccountType,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Section::Currency => "currency (CURDEF)",
            Section::SignOn => "sign-on (SONRS)",
            Section::AccountInfo => "account info",
            Section::LedgerBalance => "ledger balance (LEDGERBAL)",
            Section::BankAccountType => "bank account type (ACCTTYPE)",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum OfxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Header error: no '<' found, document has no markup body")]
    MissingBody,

    #[error("Header error: malformed entry {0:?}, expected KEY:VALUE")]
    MalformedHeaderEntry(String),

    #[error("Header error: {key} must be {expected}, found {}", .found.as_deref().unwrap_or("nothing"))]
    HeaderMismatch {
        key: &'static str,
        expected: &'static str,
        found: Option<String>,
    },

    #[error("Unsupported account type: {0}")]
    UnsupportedAccountType(String),

    #[error("Missing section: {0}")]
    MissingSection(Section),

    #[error("Date error: cannot parse {0:?} as YYYYMMDD")]
    DateFormat(String),

    #[error("Amount error: {field} {value:?}: {source}")]
    AmountFormat {
        field: &'static str,
        value: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("Unknown {kind} {token:?}")]
    EnumMapping { kind: &'static str, token: String },

    #[error("Normalization error: {0}")]
    Normalization(String),

    #[error("XML error: {0}")]
    Xml(String),
}

pub type Result<T> = std::result::Result<T, OfxError>;
