mod app;
mod config;
mod device;
mod error;
mod events;
mod logger;
mod state;
mod ui;
mod utils;

use anyhow::Result;
use app::App;
use clap::{crate_version, App as Cli, Arg};
use config::Config;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Cli::new("todo-tui")
        .version(crate_version!())
        .about("A terminal to-do list with due dates and photo attachments")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("gallery")
                .short("g")
                .long("gallery")
                .value_name("DIR")
                .help("Image gallery directory, overriding the configured one")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(gallery) = matches.value_of("gallery") {
        config.gallery_path = PathBuf::from(gallery);
        config.validate()?;
    }

    App::start(config).await?;
    Ok(())
}
