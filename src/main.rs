use clap::Parser;

use engravekit::cli::Cli;
use engravekit::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    engravekit::pipeline::run(&cli)
}
