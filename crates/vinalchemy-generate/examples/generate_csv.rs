use std::env;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use vinalchemy_generate::output::csv::write_records_csv;
use vinalchemy_generate::{GenerateOptions, GenerationEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut options = GenerateOptions::default();
    let mut out = PathBuf::from("wines.csv");

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--rows" => options.rows = args.next().ok_or("missing --rows value")?.parse()?,
            "--seed" => options.seed = args.next().ok_or("missing --seed value")?.parse()?,
            "--out" => out = args.next().map(PathBuf::from).ok_or("missing --out path")?,
            _ => return Err(format!("unexpected argument: {arg}").into()),
        }
    }

    let result = GenerationEngine::new(options).run()?;
    let bytes = write_records_csv(&out, &result.records)?;

    println!("rows={} bytes={bytes} out={}", result.records.len(), out.display());
    Ok(())
}
