use clap::Parser;
use ig_publish::{logging, run, Cli};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    run(Cli::parse())
}
