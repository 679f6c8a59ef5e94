use clap::Parser;
use facyas_storefront::{
    cli::{run, CliArgs},
    logging::{init_logging, LoggingConfig},
};

fn main() -> anyhow::Result<()> {
    let cli = CliArgs::parse();

    let mut logging_config = LoggingConfig::from_env();
    if cli.verbose {
        logging_config = logging_config.verbose();
    }
    init_logging(&logging_config)?;

    let stdout = std::io::stdout();
    run(&cli, &mut stdout.lock())
}
