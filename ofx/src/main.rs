use clap::Parser;
use ofxlib::formats::ofx::OfxParser;
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ofx", version, about = "Разбор выписки OFX в JSON")]
struct Cli {
    /// Входной файл (по умолчанию stdin)
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Выходной файл (по умолчанию stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// JSON в одну строку
    #[arg(long)]
    compact: bool,

    /// Отладочный лог в stderr (если не задан RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // reader
    let reader: Box<dyn io::Read> = match &cli.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let statement = OfxParser::new().parse_reader(BufReader::new(reader))?;
    tracing::info!(
        account_id = %statement.account.account_id,
        transactions = statement.transactions.len(),
        "statement parsed"
    );

    // writer
    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    if cli.compact {
        serde_json::to_writer(&mut writer, &statement)?;
    } else {
        serde_json::to_writer_pretty(&mut writer, &statement)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
