mod config;
mod effects;
mod headless;
mod platform;

use anyhow::Result;
use clap::Parser;

use config::Config;

fn main() -> Result<()> {
    // A missing .env is normal; variables may come from the shell instead.
    dotenvy::dotenv().ok();
    let config = Config::parse();

    match config.url.clone() {
        Some(url) => headless::run(&config, &url),
        None => platform::run_app(&config),
    }
}
