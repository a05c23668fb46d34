//! Доменные модели выписки OFX. Строятся один раз при разборе и дальше не меняются.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum AccountType {
    #[serde(rename = "BANK")]
    Bank,
    #[serde(rename = "CC")]
    CreditCard,
    #[serde(rename = "AP")]
    AccountsPayable,
    #[serde(rename = "AR")]
    AccountsReceivable,
    #[serde(rename = "NA")]
    NotApplicable,
}

impl AccountType {
    pub fn description(&self) -> &'static str {
        match self {
            AccountType::Bank => "Bank Account",
            AccountType::CreditCard => "Credit Card",
            AccountType::AccountsPayable => "Accounts Payable",
            AccountType::AccountsReceivable => "Accounts Receivable",
            AccountType::NotApplicable => "Not Applicable",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum BankAccountType {
    Checking,
    Savings,
    #[serde(rename = "MONEYMRKT")]
    MoneyMarket,
    #[serde(rename = "CREDITLINE")]
    CreditLine,
    #[serde(rename = "HOMELOAN")]
    HomeLoan,
    #[default]
    #[serde(rename = "NA")]
    NotApplicable,
}

impl BankAccountType {
    pub fn description(&self) -> &'static str {
        match self {
            BankAccountType::Checking => "Checking Account",
            BankAccountType::Savings => "Savings Account",
            BankAccountType::MoneyMarket => "Money Market Account",
            BankAccountType::CreditLine => "Line of Credit",
            BankAccountType::HomeLoan => "Home Loan",
            BankAccountType::NotApplicable => "Not Applicable",
        }
    }
}

/// Значения TRNTYPE из стандарта OFX 1.x.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Credit,
    Debit,
    Int,
    Div,
    Fee,
    #[serde(rename = "SRVCHG")]
    ServiceCharge,
    Dep,
    Atm,
    Pos,
    Xfer,
    Check,
    Payment,
    Cash,
    #[serde(rename = "DIRECTDEP")]
    DirectDeposit,
    #[serde(rename = "DIRECTDEBIT")]
    DirectDebit,
    #[serde(rename = "REPEATPMT")]
    RepeatPayment,
    Hold,
    Other,
}

impl TransactionType {
    pub fn description(&self) -> &'static str {
        match self {
            TransactionType::Credit => "Generic credit",
            TransactionType::Debit => "Generic debit",
            TransactionType::Int => "Interest earned or paid",
            TransactionType::Div => "Dividend",
            TransactionType::Fee => "FI fee",
            TransactionType::ServiceCharge => "Service charge",
            TransactionType::Dep => "Deposit",
            TransactionType::Atm => "ATM debit or credit",
            TransactionType::Pos => "Point of sale debit or credit",
            TransactionType::Xfer => "Transfer",
            TransactionType::Check => "Check",
            TransactionType::Payment => "Electronic payment",
            TransactionType::Cash => "Cash withdrawal",
            TransactionType::DirectDeposit => "Direct deposit",
            TransactionType::DirectDebit => "Merchant initiated debit",
            TransactionType::RepeatPayment => "Repeating payment/standing order",
            TransactionType::Hold => "Hold on funds",
            TransactionType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum CorrectionType {
    Delete,
    Replace,
    #[default]
    #[serde(rename = "NA")]
    NotApplicable,
}

impl CorrectionType {
    pub fn description(&self) -> &'static str {
        match self {
            CorrectionType::Delete => "Delete the referenced transaction",
            CorrectionType::Replace => "Replace the referenced transaction",
            CorrectionType::NotApplicable => "Not Applicable",
        }
    }
}

/// Идентификация счёта. Банковские поля заполнены только для `AccountType::Bank`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccountIdentity {
    pub account_id: String,
    pub account_key: String,
    pub account_type: AccountType,
    pub bank_id: Option<String>,
    pub branch_id: Option<String>,
    pub bank_account_type: BankAccountType,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Balance {
    pub amount: Decimal,
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BalanceSnapshot {
    pub ledger: Balance,
    pub available: Option<Balance>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SignOnInfo {
    pub status_code: String,
    pub severity: String,
    pub message: Option<String>,
    pub server_date: Option<NaiveDate>,
    pub language: String,
    pub fi_org: Option<String>,
    pub fi_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Transaction {
    pub transaction_type: TransactionType,
    pub posted: Option<NaiveDate>,
    pub user_initiated: Option<NaiveDate>,
    pub funds_available: Option<NaiveDate>,
    pub amount: Decimal,
    pub transaction_id: String,
    pub name: Option<String>,
    pub memo: Option<String>,
    pub correction_id: Option<String>,
    pub correction_action: CorrectionType,
    pub server_transaction_id: Option<String>,
    pub check_number: Option<String>,
    pub reference_number: Option<String>,
    pub sic: Option<String>,
    pub payee_id: Option<String>,
    pub counterparty: Option<AccountIdentity>,
    pub currency: String,
}

/// Корневой агрегат: ровно одна выписка по одному счёту.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatementDocument {
    pub statement_start: Option<NaiveDate>,
    pub statement_end: Option<NaiveDate>,
    pub account_type: AccountType,
    pub currency: String,
    pub sign_on: SignOnInfo,
    pub account: AccountIdentity,
    pub balance: BalanceSnapshot,
    pub transactions: Vec<Transaction>,
}
