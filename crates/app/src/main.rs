use clap::Parser;
use engine::Engine;

use crate::{cli::Command, error::Result, settings::Settings};

mod cli;
mod error;
mod render;
mod settings;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let settings = Settings::load(cli.config.as_deref(), cli.ledger.as_deref())?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(format!(
            "imprest={level},engine={level}",
            level = settings.level
        ))
        .init();

    let engine = Engine::builder()
        .ledger_path(&settings.ledger_path)
        .build()?;

    match cli.command {
        Command::Preview(args) => {
            let today = chrono::Local::now().date_naive();
            let input = args.into_input(today);
            print!("{}", render::preview(&engine.preview(&input)?));
        }
        Command::Save(args) => {
            let today = chrono::Local::now().date_naive();
            let input = args.into_input(today);
            print!("{}", render::preview(&engine.preview(&input)?));

            let notice = engine.save(input)?;
            print!("{}", render::notice(&notice));
            print!("{}", render::history(&engine.history()?));
        }
        Command::List => {
            print!("{}", render::history(&engine.history()?));
        }
        Command::Reset => {
            let notice = engine.reset()?;
            tracing::debug!("reset outcome: {notice:?}");
            print!("{}", render::notice(&notice));
        }
    }

    Ok(())
}
