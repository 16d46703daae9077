use clap::Parser;
use finsim::{Cli, commands, init_logging};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_file.as_deref())?;

    let output = commands::execute(&cli.command)?;
    println!("{output}");

    Ok(())
}
