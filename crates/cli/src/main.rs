//! `storefront` command-line entry point.

use std::sync::Arc;

use clap::Parser;

use storefront_session::{ComparisonNotice, NotificationSink, TracingSink};

mod cli;
mod commands;

fn main() -> anyhow::Result<()> {
    storefront_observability::init_pretty();

    let cli = cli::Cli::parse();
    let sink = Arc::new(|notice: ComparisonNotice| {
        eprintln!("{}", notice.message());
        TracingSink.notify(notice);
    });

    let output = commands::run(cli, sink)?;
    println!("{output}");
    Ok(())
}
