use std::io;

use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod game;
mod turn_log;

use config::PlayConfig;
use game::{prompt_name, Game, Turn};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = PlayConfig::from_env()?;

    let mut input = io::stdin().lock();
    let mut output = io::stdout();
    let name = match config.name.clone() {
        Some(name) => name,
        None => prompt_name(&mut input, &mut output)?,
    };

    let first = if rand::rng().random_bool(0.5) {
        Turn::Human
    } else {
        Turn::Ai
    };
    info!(depth = config.depth, ?first, "starting game");
    let outcome = Game::new(config, name, input, output).play(first)?;
    info!(?outcome, "game finished");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
