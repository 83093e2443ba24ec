// src/bin/cli.rs
use cpi_watch::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cpi_watch::log::init();
    cli::run()
}
