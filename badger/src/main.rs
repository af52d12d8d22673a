use std::{path::Path, sync::Arc};

use badger::{
    console::{self, ConsoleAction},
    server::Server,
};
use badger_config::{logging::LoggingConfig, BasicConfiguration, LoadTomlConfiguration};
use badger_core::{
    text::{color::NamedColor, TextComponent},
    PermissionTable,
};
use tokio::io::{AsyncBufReadExt, BufReader};

const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

const CONFIG_FILE: &str = "configuration.toml";

fn init_logger(config: &LoggingConfig) {
    if config.enabled {
        let mut logger = simple_logger::SimpleLogger::new();
        logger = logger.with_timestamp_format(time::macros::format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ));

        if !config.timestamp {
            logger = logger.without_timestamps();
        }

        if config.env {
            logger = logger.env();
        }

        logger = logger.with_level(config.level.into());

        logger = logger.with_colors(config.color);
        logger = logger.with_threads(config.threads);
        if let Err(err) = logger.init() {
            eprintln!("Failed to initialise logging: {err}");
        }
    }
}

#[tokio::main]
async fn main() {
    let config = match BasicConfiguration::load(Path::new(CONFIG_FILE)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    init_logger(&config.logging);

    log::info!("Starting badger {CARGO_PKG_VERSION}");
    log::debug!(
        "Build info: OS: \"{}\", ARCH: \"{}\", BUILD: \"{}\"",
        std::env::consts::OS,
        std::env::consts::ARCH,
        if cfg!(debug_assertions) {
            "Debug"
        } else {
            "Release"
        }
    );

    let permissions = Arc::new(PermissionTable::new());
    let mut server = Server::with_default_modules(config, permissions.clone());
    server.enable_modules();
    log::info!("Ready, type 'help' for a list of commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if console::handle_line(&mut server, &permissions, &line) == ConsoleAction::Stop {
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    log::error!("Failed to read console line: {err}");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                log::warn!(
                    "{}",
                    TextComponent::text("Received interrupt signal; stopping...")
                        .color_named(NamedColor::Red)
                        .to_pretty_console()
                );
                break;
            }
        }
    }

    server.disable_modules();
    log::info!("Stopped");
}
