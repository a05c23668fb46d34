//! Токены OFX -> перечисления модели.
//!
//! Политики намеренно различаются и сохраняются ради совместимости:
//! подтип банковского счёта молча откатывается к NA, а тип транзакции
//! и тип исправления при неизвестном токене валят разбор.

use crate::{
    error::{OfxError, Result},
    model::{AccountType, BankAccountType, CorrectionType, TransactionType},
};

/// Точное совпадение; маркеры секций в `formats::ofx` ссылаются на эти токены.
pub fn account_type(token: &str) -> Option<AccountType> {
    match token {
        "BANK" => Some(AccountType::Bank),
        "CC" => Some(AccountType::CreditCard),
        "AP" => Some(AccountType::AccountsPayable),
        "AR" => Some(AccountType::AccountsReceivable),
        "NA" => Some(AccountType::NotApplicable),
        _ => None,
    }
}

/// Без учёта регистра; неизвестное значение -> `NotApplicable`.
pub fn bank_account_type(token: &str) -> BankAccountType {
    match token.trim().to_ascii_uppercase().as_str() {
        "CHECKING" => BankAccountType::Checking,
        "SAVINGS" => BankAccountType::Savings,
        "MONEYMRKT" => BankAccountType::MoneyMarket,
        "CREDITLINE" => BankAccountType::CreditLine,
        "HOMELOAN" => BankAccountType::HomeLoan,
        "NA" => BankAccountType::NotApplicable,
        other => {
            tracing::warn!(token = other, "unknown bank account type, falling back to NA");
            BankAccountType::NotApplicable
        }
    }
}

/// С учётом регистра, без отката.
pub fn transaction_type(token: &str) -> Result<TransactionType> {
    let t = match token {
        "CREDIT" => TransactionType::Credit,
        "DEBIT" => TransactionType::Debit,
        "INT" => TransactionType::Int,
        "DIV" => TransactionType::Div,
        "FEE" => TransactionType::Fee,
        "SRVCHG" => TransactionType::ServiceCharge,
        "DEP" => TransactionType::Dep,
        "ATM" => TransactionType::Atm,
        "POS" => TransactionType::Pos,
        "XFER" => TransactionType::Xfer,
        "CHECK" => TransactionType::Check,
        "PAYMENT" => TransactionType::Payment,
        "CASH" => TransactionType::Cash,
        "DIRECTDEP" => TransactionType::DirectDeposit,
        "DIRECTDEBIT" => TransactionType::DirectDebit,
        "REPEATPMT" => TransactionType::RepeatPayment,
        "HOLD" => TransactionType::Hold,
        "OTHER" => TransactionType::Other,
        other => {
            return Err(OfxError::EnumMapping {
                kind: "transaction type",
                token: other.to_string(),
            })
        }
    };
    Ok(t)
}

/// С учётом регистра, без отката. Вызывается только для непустого CORRECTACTION.
pub fn correction_type(token: &str) -> Result<CorrectionType> {
    match token {
        "DELETE" => Ok(CorrectionType::Delete),
        "REPLACE" => Ok(CorrectionType::Replace),
        "NA" => Ok(CorrectionType::NotApplicable),
        other => Err(OfxError::EnumMapping {
            kind: "correction type",
            token: other.to_string(),
        }),
    }
}
