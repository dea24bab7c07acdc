use std::process;

use ranger_tools::cli::{ConvertCli, ConvertConfig};
use ranger_tools::convert::ConversionEngine;
use ranger_tools::output::Output;

#[tokio::main]
async fn main() {
    let cli = ConvertCli::parse_args();

    if let Err(message) = cli.validate() {
        eprintln!("{message}");
        process::exit(1);
    }

    let config = ConvertConfig::from_cli(&cli);
    let output = Output::new(config.verbosity());
    let engine = ConversionEngine::new(config.clone());

    match engine.convert_path(&config.path).await {
        Ok(results) => {
            let formatted = output.format_results(&results);
            if !formatted.is_empty() {
                print!("{formatted}");
            }
        }
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}
