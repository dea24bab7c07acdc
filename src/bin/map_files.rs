use std::process;

use anyhow::Context;

use ranger_tools::cli::InventoryCli;
use ranger_tools::inventory;
use ranger_tools::report::ReportWriter;

fn main() {
    let cli = InventoryCli::parse_args();

    if let Err(message) = cli.validate() {
        eprintln!("{message}");
        process::exit(1);
    }

    if let Err(e) = run(&cli) {
        eprintln!("{e:#}");
        process::exit(1);
    }
}

fn run(cli: &InventoryCli) -> anyhow::Result<()> {
    let entries = inventory::scan(&cli.path, cli.file_extension.as_deref())?;
    let summaries = inventory::summarize_extensions(&entries);

    ReportWriter::new(cli.output.clone())
        .write(&cli.path, &entries, &summaries)
        .with_context(|| format!("failed to write report to {}", cli.output.display()))?;

    println!(
        "Mapped {} file{}; report written to {}",
        entries.len(),
        if entries.len() == 1 { "" } else { "s" },
        cli.output.display()
    );

    Ok(())
}
