//! Построение моделей из узлов XML-дерева: счёт, баланс, sign-on, транзакция.

use crate::{
    date::parse_ofx_date,
    error::{OfxError, Result, Section},
    extract::{self, optional, own_text, value},
    mapping,
    model::{
        AccountIdentity, AccountType, Balance, BalanceSnapshot, BankAccountType, CorrectionType,
        SignOnInfo, Transaction,
    },
};
use roxmltree::Node;
use rust_decimal::Decimal;
use std::str::FromStr;

impl AccountIdentity {
    /// Поля ищутся только внутри `node`, поэтому счёт контрагента
    /// не подхватывает идентификаторы основного счёта.
    pub fn from_node(node: Node<'_, '_>, account_type: AccountType) -> Result<Self> {
        let mut acct = AccountIdentity {
            account_id: value(node, ".//ACCTID"),
            account_key: value(node, ".//ACCTKEY"),
            account_type,
            bank_id: None,
            branch_id: None,
            bank_account_type: BankAccountType::NotApplicable,
        };

        match account_type {
            AccountType::Bank => {
                acct.bank_id = optional(node, ".//BANKID");
                acct.branch_id = optional(node, ".//BRANCHID");

                let raw = value(node, ".//ACCTTYPE");
                if raw.is_empty() {
                    return Err(OfxError::MissingSection(Section::BankAccountType));
                }
                acct.bank_account_type = mapping::bank_account_type(&raw);
            }
            AccountType::AccountsPayable | AccountType::AccountsReceivable => {
                return Err(OfxError::UnsupportedAccountType(
                    account_type.description().to_string(),
                ));
            }
            AccountType::CreditCard | AccountType::NotApplicable => {}
        }

        Ok(acct)
    }
}

impl Balance {
    pub fn from_node(node: Node<'_, '_>) -> Result<Self> {
        Ok(Balance {
            amount: decimal(node, "BALAMT", "BALAMT")?,
            as_of: parse_ofx_date(&value(node, "DTASOF"))?,
        })
    }
}

impl BalanceSnapshot {
    /// LEDGERBAL обязателен, AVAILBAL — нет.
    pub fn from_nodes(ledger: Option<Node<'_, '_>>, available: Option<Node<'_, '_>>) -> Result<Self> {
        let ledger = ledger.ok_or(OfxError::MissingSection(Section::LedgerBalance))?;
        Ok(BalanceSnapshot {
            ledger: Balance::from_node(ledger)?,
            available: available.map(Balance::from_node).transpose()?,
        })
    }
}

impl SignOnInfo {
    pub fn from_node(node: Node<'_, '_>) -> Result<Self> {
        Ok(SignOnInfo {
            status_code: value(node, "STATUS/CODE"),
            severity: value(node, "STATUS/SEVERITY"),
            message: optional(node, "STATUS/MESSAGE"),
            server_date: parse_ofx_date(&value(node, "DTSERVER"))?,
            language: value(node, "LANGUAGE"),
            fi_org: optional(node, "FI/ORG"),
            fi_id: optional(node, "FI/FID"),
        })
    }
}

impl Transaction {
    /// `default_currency` — CURDEF документа, если у транзакции нет своей валюты.
    pub fn from_node(node: Node<'_, '_>, default_currency: &str) -> Result<Self> {
        let transaction_type = mapping::transaction_type(&value(node, ".//TRNTYPE"))?;
        let posted = parse_ofx_date(&value(node, ".//DTPOSTED"))?;
        let user_initiated = parse_ofx_date(&value(node, ".//DTUSER"))?;
        let funds_available = parse_ofx_date(&value(node, ".//DTAVAIL"))?;
        let amount = decimal(node, ".//TRNAMT", "TRNAMT")?;
        let transaction_id = value(node, ".//FITID");

        let correction_action = match optional(node, ".//CORRECTACTION") {
            Some(token) => mapping::correction_type(&token)?,
            None => CorrectionType::NotApplicable,
        };

        let counterparty = if let Some(n) = extract::select_single(node, ".//BANKACCTTO") {
            Some(AccountIdentity::from_node(n, AccountType::Bank)?)
        } else if let Some(n) = extract::select_single(node, ".//CCACCTTO") {
            Some(AccountIdentity::from_node(n, AccountType::CreditCard)?)
        } else {
            None
        };

        tracing::trace!(fitid = %transaction_id, amount = %amount, "transaction");

        Ok(Transaction {
            transaction_type,
            posted,
            user_initiated,
            funds_available,
            amount,
            transaction_id,
            name: optional(node, ".//NAME"),
            memo: optional(node, ".//MEMO"),
            correction_id: optional(node, ".//CORRECTFITID"),
            correction_action,
            server_transaction_id: optional(node, ".//SRVRTID"),
            check_number: optional(node, ".//CHECKNUM"),
            reference_number: optional(node, ".//REFNUM"),
            sic: optional(node, ".//SIC"),
            payee_id: optional(node, ".//PAYEEID"),
            counterparty,
            currency: currency(node, default_currency),
        })
    }
}

/// CURRENCY, затем ORIGCURRENCY, затем валюта документа.
/// В OFX это агрегаты, код валюты лежит в CURSYM.
fn currency(node: Node<'_, '_>, default_currency: &str) -> String {
    for path in [".//CURRENCY", ".//ORIGCURRENCY"] {
        if let Some(cur) = extract::select_single(node, path) {
            return optional(cur, "CURSYM")
                .or_else(|| own_text(cur).filter(|t| !t.is_empty()))
                .unwrap_or_else(|| default_currency.to_string());
        }
    }
    default_currency.to_string()
}

/// Десятичное число с точкой, независимо от локали.
fn decimal(node: Node<'_, '_>, path: &str, field: &'static str) -> Result<Decimal> {
    let raw = value(node, path);
    Decimal::from_str(&raw).map_err(|source| OfxError::AmountFormat {
        field,
        value: raw.clone(),
        source,
    })
}
