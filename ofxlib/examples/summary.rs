use ofxlib::{formats::ofx::Ofx, traits::ReadFormat};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: читаем OFX из stdin и печатаем короткую сводку
    let st = Ofx::read(std::io::BufReader::new(std::io::stdin()))?;
    println!(
        "{} {} ({}), ledger {} {}",
        st.account.account_type.description(),
        st.account.account_id,
        st.currency,
        st.balance.ledger.amount,
        st.currency
    );
    for t in &st.transactions {
        let date = t.posted.map(|d| d.to_string()).unwrap_or_default();
        println!("{date} {:>12} {}", t.amount, t.name.as_deref().unwrap_or(""));
    }
    Ok(())
}
