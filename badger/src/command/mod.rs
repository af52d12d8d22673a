use std::{fmt, sync::Arc};

use badger_core::{text::TextComponent, PermissionOracle};
use badger_inventory::InventoryError;
use thiserror::Error;

use crate::entity::player::Player;

pub mod config_command;
pub mod dispatcher;

pub use config_command::{ConfigCommand, ConfigCommandHandler};
pub use dispatcher::CommandDispatcher;

pub enum CommandSender {
    Console,
    Player(Arc<Player>),
}

impl fmt::Display for CommandSender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CommandSender::Console => "Server",
                CommandSender::Player(p) => &p.name,
            }
        )
    }
}

impl CommandSender {
    pub fn send_message(&self, text: TextComponent<'static>) {
        match self {
            CommandSender::Console => log::info!("{}", text.to_pretty_console()),
            CommandSender::Player(p) => p.send_message(text),
        }
    }

    #[must_use]
    pub fn as_player(&self) -> Option<Arc<Player>> {
        match self {
            CommandSender::Player(player) => Some(player.clone()),
            CommandSender::Console => None,
        }
    }

    /// The console may do anything.
    #[must_use]
    pub fn has_permission(&self, permissions: &dyn PermissionOracle, node: &str) -> bool {
        match self {
            CommandSender::Console => true,
            CommandSender::Player(p) => permissions.has(&p.id, node),
        }
    }
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
    #[error("Usage: {0}")]
    InvalidUsage(String),
    #[error("You do not have permission to do that")]
    PermissionDenied,
    #[error("Only players can use this command")]
    PlayerOnly,
    /// The command's configuration never finished loading.
    #[error("Command '{0}' is not loaded")]
    NotReady(String),
    #[error("{0}")]
    GeneralCommandIssue(String),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// A command a module adds to the host.
pub trait ModuleCommand: Send {
    /// The primary name, without a leading `/`.
    fn label(&self) -> &str;

    fn aliases(&self) -> &[&'static str] {
        &[]
    }

    fn usage(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    fn execute(
        &mut self,
        sender: &CommandSender,
        label: &str,
        args: &[&str],
    ) -> Result<(), CommandError>;
}
