use chrono::NaiveDate;
use ofxlib::{
    formats::ofx::{Ofx, OfxParser},
    model::{AccountType, BankAccountType, CorrectionType, TransactionType},
    traits::ReadFormat,
};
use rust_decimal::Decimal;
use std::io::Cursor;

const SGML: &str = "OFXHEADER:100
DATA:OFXSGML
VERSION:102
SECURITY:NONE
ENCODING:USASCII
CHARSET:1252
COMPRESSION:NONE
OLDFILEUID:NONE
NEWFILEUID:NONE

<OFX>
<SIGNONMSGSRSV1>
<SONRS>
<STATUS>
<CODE>0
<SEVERITY>INFO
</STATUS>
<DTSERVER>20200105120000[-5:EST]
<LANGUAGE>ENG
<FI>
<ORG>DEMO
<FID>1234
</FI>
</SONRS>
</SIGNONMSGSRSV1>
<BANKMSGSRSV1>
<STMTTRNRS>
<TRNUID>1
<STATUS>
<CODE>0
<SEVERITY>INFO
</STATUS>
<STMTRS>
<CURDEF>USD
<BANKACCTFROM>
<BANKID>121000248
<BRANCHID>001
<ACCTID>123456789
<ACCTTYPE>CHECKING
</BANKACCTFROM>
<BANKTRANLIST>
<DTSTART>20200101
<DTEND>20200131
<STMTTRN>
<TRNTYPE>CREDIT
<DTPOSTED>20200102
<TRNAMT>12.34
<FITID>T1
<NAME>Salary
<MEMO>January
</STMTTRN>
<STMTTRN>
<TRNTYPE>DEBIT
<DTPOSTED>20200103120000
<DTUSER>20200102
<TRNAMT>-5.00
<FITID>T2
<NAME>AT&T
<CHECKNUM>101
<CURRENCY>
<CURRATE>1.1
<CURSYM>EUR
</CURRENCY>
<BANKACCTTO>
<BANKID>999
<ACCTID>555
<ACCTTYPE>savings
</BANKACCTTO>
</STMTTRN>
</BANKTRANLIST>
<LEDGERBAL>
<BALAMT>1000.50
<DTASOF>20200131
</LEDGERBAL>
<AVAILBAL>
<BALAMT>900.00
<DTASOF>20200131
</AVAILBAL>
</STMTRS>
</STMTTRNRS>
</BANKMSGSRSV1>
</OFX>
";

fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

#[test]
fn sgml_bank_statement() {
    let st = OfxParser::new().parse_str(SGML).expect("parse sgml");

    assert_eq!(st.account_type, AccountType::Bank);
    assert_eq!(st.currency, "USD");
    assert_eq!(st.statement_start, ymd(2020, 1, 1));
    assert_eq!(st.statement_end, ymd(2020, 1, 31));

    assert_eq!(st.sign_on.status_code, "0");
    assert_eq!(st.sign_on.severity, "INFO");
    assert_eq!(st.sign_on.server_date, ymd(2020, 1, 5));
    assert_eq!(st.sign_on.language, "ENG");
    assert_eq!(st.sign_on.fi_org.as_deref(), Some("DEMO"));
    assert_eq!(st.sign_on.fi_id.as_deref(), Some("1234"));

    let a = &st.account;
    assert_eq!(a.account_id, "123456789");
    assert_eq!(a.account_key, "");
    assert_eq!(a.bank_id.as_deref(), Some("121000248"));
    assert_eq!(a.branch_id.as_deref(), Some("001"));
    assert_eq!(a.bank_account_type, BankAccountType::Checking);

    assert_eq!(st.balance.ledger.amount, Decimal::new(100050, 2));
    assert_eq!(st.balance.ledger.as_of, ymd(2020, 1, 31));
    let avail = st.balance.available.as_ref().expect("available balance");
    assert_eq!(avail.amount, Decimal::new(900, 0));

    assert_eq!(st.transactions.len(), 2);

    let t = &st.transactions[0];
    assert_eq!(t.transaction_type, TransactionType::Credit);
    assert_eq!(t.posted, ymd(2020, 1, 2));
    assert_eq!(t.user_initiated, None);
    assert_eq!(t.amount, Decimal::new(1234, 2));
    assert_eq!(t.transaction_id, "T1");
    assert_eq!(t.name.as_deref(), Some("Salary"));
    assert_eq!(t.memo.as_deref(), Some("January"));
    assert_eq!(t.correction_action, CorrectionType::NotApplicable);
    assert_eq!(t.currency, "USD");
    assert!(t.counterparty.is_none());

    let t = &st.transactions[1];
    assert_eq!(t.transaction_type, TransactionType::Debit);
    assert_eq!(t.posted, ymd(2020, 1, 3));
    assert_eq!(t.user_initiated, ymd(2020, 1, 2));
    assert_eq!(t.amount, Decimal::new(-500, 2));
    assert_eq!(t.name.as_deref(), Some("AT&T"));
    assert_eq!(t.check_number.as_deref(), Some("101"));
    assert_eq!(t.currency, "EUR");

    // контрагент со своими реквизитами, а не основного счёта
    let cp = t.counterparty.as_ref().expect("counterparty");
    assert_eq!(cp.account_type, AccountType::Bank);
    assert_eq!(cp.account_id, "555");
    assert_eq!(cp.bank_id.as_deref(), Some("999"));
    assert_eq!(cp.branch_id, None);
    assert_eq!(cp.bank_account_type, BankAccountType::Savings);
}

#[test]
fn sgml_header_with_closed_xml_body() {
    let text = "OFXHEADER:100
DATA:OFXSGML
VERSION:102
SECURITY:NONE
ENCODING:USASCII
CHARSET:1252
COMPRESSION:NONE
OLDFILEUID:NONE
NEWFILEUID:NONE

<OFX>
  <SIGNONMSGSRSV1><SONRS>
    <STATUS><CODE>0</CODE><SEVERITY>INFO</SEVERITY></STATUS>
    <DTSERVER>20200102</DTSERVER><LANGUAGE>ENG</LANGUAGE>
  </SONRS></SIGNONMSGSRSV1>
  <BANKMSGSRSV1><STMTTRNRS><STMTRS>
    <CURDEF>CAD</CURDEF>
    <BANKACCTFROM><BANKID>1</BANKID><ACCTID>2</ACCTID><ACCTTYPE>SAVINGS</ACCTTYPE></BANKACCTFROM>
    <BANKTRANLIST>
      <STMTTRN>
        <TRNTYPE>CREDIT</TRNTYPE>
        <DTPOSTED>20200102</DTPOSTED>
        <TRNAMT>12.34</TRNAMT>
        <FITID>X</FITID>
      </STMTTRN>
    </BANKTRANLIST>
    <LEDGERBAL><BALAMT>0</BALAMT><DTASOF>20200102</DTASOF></LEDGERBAL>
  </STMTRS></STMTTRNRS></BANKMSGSRSV1>
</OFX>";

    let st = OfxParser::new().parse_str(text).expect("parse");
    assert_eq!(st.currency, "CAD");
    assert_eq!(st.transactions.len(), 1);
    let t = &st.transactions[0];
    assert_eq!(t.amount, Decimal::new(1234, 2));
    assert_eq!(t.posted, ymd(2020, 1, 2));
    assert_eq!(t.transaction_type, TransactionType::Credit);
    assert_eq!(t.currency, "CAD");
    // DTSTART/DTEND отсутствуют -> нулевые даты
    assert_eq!(st.statement_start, None);
    assert!(st.balance.available.is_none());
}

#[test]
fn xml_v2_bank_statement() {
    let text = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<?OFX OFXHEADER="200" VERSION="211" SECURITY="NONE" OLDFILEUID="NONE" NEWFILEUID="NONE"?>
<OFX>
  <SIGNONMSGSRSV1>
    <SONRS>
      <STATUS><CODE>0</CODE><SEVERITY>INFO</SEVERITY><MESSAGE>Success</MESSAGE></STATUS>
      <DTSERVER>20230615</DTSERVER>
      <LANGUAGE>ENG</LANGUAGE>
    </SONRS>
  </SIGNONMSGSRSV1>
  <BANKMSGSRSV1>
    <STMTTRNRS>
      <STMTRS>
        <CURDEF>EUR</CURDEF>
        <BANKACCTFROM>
          <BANKID>DE01</BANKID>
          <ACCTID>DE0012345678</ACCTID>
          <ACCTTYPE>Brokerage</ACCTTYPE>
        </BANKACCTFROM>
        <BANKTRANLIST>
          <DTSTART>20230601</DTSTART>
          <DTEND>20230630</DTEND>
        </BANKTRANLIST>
        <LEDGERBAL><BALAMT>1.5</BALAMT><DTASOF>20230630</DTASOF></LEDGERBAL>
      </STMTRS>
    </STMTTRNRS>
  </BANKMSGSRSV1>
</OFX>"#;

    let st = OfxParser::new().parse_str(text).expect("parse xml");
    assert_eq!(st.sign_on.message.as_deref(), Some("Success"));
    assert_eq!(st.account.account_id, "DE0012345678");
    assert_eq!(st.account.branch_id, None);
    // неизвестный подтип -> NA, без ошибки
    assert_eq!(st.account.bank_account_type, BankAccountType::NotApplicable);
    // пустой список транзакций допустим
    assert!(st.transactions.is_empty());
    assert_eq!(st.statement_end, ymd(2023, 6, 30));
}

#[test]
fn read_format_from_stream() {
    let st = Ofx::read(Cursor::new(SGML)).expect("read via ReadFormat");
    assert_eq!(st.transactions.len(), 2);
}

#[test]
fn windows_1252_bytes_decoded() {
    let (head, tail) = SGML.split_once("Salary").expect("fixture");
    let mut bytes = head.as_bytes().to_vec();
    bytes.extend_from_slice(b"Caf\xe9");
    bytes.extend_from_slice(tail.as_bytes());

    let st = OfxParser::new().parse_reader(Cursor::new(bytes)).expect("parse cp1252");
    assert_eq!(st.transactions[0].name.as_deref(), Some("Café"));
}
