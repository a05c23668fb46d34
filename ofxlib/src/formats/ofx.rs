//! Выписка OFX (банковская или по кредитной карте), SGML 1.x или XML 2.x.
//!
//! Конвейер: нормализация -> дерево -> тип счёта -> пути секций ->
//! валюта, sign-on, счёт, транзакции, баланс. Любая ошибка прерывает разбор целиком.

use crate::{
    date::parse_ofx_date,
    error::{OfxError, Result, Section},
    extract::{self, own_text, value},
    formats::sgml::SgmlRepair,
    mapping,
    model::{AccountIdentity, AccountType, BalanceSnapshot, SignOnInfo, StatementDocument, Transaction},
    normalize,
    traits::{Normalizer, ReadFormat},
};
use roxmltree::Document;
use std::{
    borrow::Cow,
    io::{BufRead, Read},
};

pub const SIGN_ON_PATH: &str = "/OFX/SIGNONMSGSRSV1/SONRS";
pub const BANK_STATEMENT_PATH: &str = "/OFX/BANKMSGSRSV1/STMTTRNRS/STMTRS";
pub const CC_STATEMENT_PATH: &str = "/OFX/CREDITCARDMSGSRSV1/CCSTMTTRNRS/CCSTMTRS";

/// Маркеры в тексте документа и токен типа счёта; порядок важен.
const ACCOUNT_MARKERS: [(&str, &str); 2] = [("<CREDITCARDMSGSRSV1>", "CC"), ("<BANKMSGSRSV1>", "BANK")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementPart {
    Currency,
    SignOn,
    AccountInfo,
    Transactions,
    Balance,
}

/// Пути к секциям для конкретного типа счёта.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementPaths {
    prefix: &'static str,
    account_info: &'static str,
}

impl StatementPaths {
    /// Маршрутизируются только BANK и CC, остальные типы — ошибка.
    pub fn for_account(account_type: AccountType) -> Result<Self> {
        match account_type {
            AccountType::Bank => Ok(Self {
                prefix: BANK_STATEMENT_PATH,
                account_info: "BANKACCTFROM",
            }),
            AccountType::CreditCard => Ok(Self {
                prefix: CC_STATEMENT_PATH,
                account_info: "CCACCTFROM",
            }),
            AccountType::AccountsPayable
            | AccountType::AccountsReceivable
            | AccountType::NotApplicable => Err(OfxError::UnsupportedAccountType(
                account_type.description().to_string(),
            )),
        }
    }

    pub fn path(&self, part: StatementPart) -> String {
        match part {
            StatementPart::Currency => format!("{}/CURDEF", self.prefix),
            StatementPart::SignOn => SIGN_ON_PATH.to_string(),
            StatementPart::AccountInfo => format!("{}/{}", self.prefix, self.account_info),
            StatementPart::Transactions => format!("{}/BANKTRANLIST", self.prefix),
            StatementPart::Balance => self.prefix.to_string(),
        }
    }
}

pub fn detect_account_type(text: &str) -> Result<AccountType> {
    ACCOUNT_MARKERS
        .iter()
        .find(|(marker, _)| text.contains(marker))
        .and_then(|(_, token)| mapping::account_type(token))
        .ok_or_else(|| {
            OfxError::UnsupportedAccountType("no BANKMSGSRSV1 or CREDITCARDMSGSRSV1 section".into())
        })
}

/// Разборщик с подключаемым нормализатором SGML.
#[derive(Debug, Default, Clone)]
pub struct OfxParser<N = SgmlRepair> {
    normalizer: N,
}

impl OfxParser<SgmlRepair> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: Normalizer> OfxParser<N> {
    pub fn with_normalizer(normalizer: N) -> Self {
        Self { normalizer }
    }

    /// Читает поток целиком; `r` освобождается при выходе по любой ветке.
    pub fn parse_reader<R: Read>(&self, mut r: R) -> Result<StatementDocument> {
        let mut bytes = Vec::new();
        r.read_to_end(&mut bytes)?;
        self.parse_bytes(&bytes)
    }

    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<StatementDocument> {
        self.parse_str(&decode(bytes))
    }

    pub fn parse_str(&self, text: &str) -> Result<StatementDocument> {
        let text = text.trim_start_matches('\u{feff}');
        let xml = normalize::to_xml(text, &self.normalizer)?;
        let doc = Document::parse(&xml).map_err(|e| OfxError::Xml(e.to_string()))?;
        let root = doc.root();

        let account_type = detect_account_type(&xml)?;
        let paths = StatementPaths::for_account(account_type)?;
        tracing::debug!(account_type = ?account_type, "statement routed");

        let currency = extract::select_single(root, &paths.path(StatementPart::Currency))
            .and_then(own_text)
            .filter(|c| !c.is_empty())
            .ok_or(OfxError::MissingSection(Section::Currency))?;

        let sign_on = extract::select_single(root, &paths.path(StatementPart::SignOn))
            .ok_or(OfxError::MissingSection(Section::SignOn))
            .and_then(SignOnInfo::from_node)?;

        let account = extract::select_single(root, &paths.path(StatementPart::AccountInfo))
            .ok_or(OfxError::MissingSection(Section::AccountInfo))
            .and_then(|n| AccountIdentity::from_node(n, account_type))?;

        let tran_list = paths.path(StatementPart::Transactions);
        let statement_start = parse_ofx_date(&value(root, &format!("{tran_list}//DTSTART")))?;
        let statement_end = parse_ofx_date(&value(root, &format!("{tran_list}//DTEND")))?;
        let transactions = extract::select_nodes(root, &format!("{tran_list}//STMTTRN"))
            .into_iter()
            .map(|n| Transaction::from_node(n, &currency))
            .collect::<Result<Vec<_>>>()?;

        let balance_path = paths.path(StatementPart::Balance);
        let balance = BalanceSnapshot::from_nodes(
            extract::select_single(root, &format!("{balance_path}/LEDGERBAL")),
            extract::select_single(root, &format!("{balance_path}/AVAILBAL")),
        )?;

        tracing::debug!(
            account_id = %account.account_id,
            transactions = transactions.len(),
            "statement parsed"
        );

        Ok(StatementDocument {
            statement_start,
            statement_end,
            account_type,
            currency,
            sign_on,
            account,
            balance,
            transactions,
        })
    }
}

/// UTF-8, а если не получилось — Windows-1252 (CHARSET:1252 из заголовка).
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => {
            tracing::warn!("input is not valid UTF-8, decoding as Windows-1252");
            let (text, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes);
            text
        }
    }
}

pub struct Ofx;

impl ReadFormat for Ofx {
    fn read<R: BufRead>(r: R) -> Result<StatementDocument> {
        OfxParser::new().parse_reader(r)
    }
}
