use std::fmt::Display;

use badger_config::ConfigError;
use badger_inventory::InventoryError;
use log::log;

use crate::{
    command::CommandError, module::ModuleError, modules::info_books::catalog::CatalogError,
};

pub trait BadgerError: Send + std::error::Error + Display {
    fn log(&self) {
        log!(self.severity(), "{}", self);
    }

    fn severity(&self) -> log::Level;
}

impl BadgerError for InventoryError {
    fn severity(&self) -> log::Level {
        match self {
            Self::InvalidSlot(_) => log::Level::Error,
            Self::Full => log::Level::Debug,
        }
    }
}

impl BadgerError for ConfigError {
    fn severity(&self) -> log::Level {
        match self {
            Self::Io { .. } | Self::Serialize(_) => log::Level::Error,
            Self::Parse { .. } | Self::Invalid(_) => log::Level::Warn,
        }
    }
}

impl BadgerError for CatalogError {
    fn severity(&self) -> log::Level {
        match self {
            Self::Io { .. } | Self::Encode(_) => log::Level::Error,
            Self::Decode { .. } => log::Level::Warn,
        }
    }
}

impl BadgerError for CommandError {
    fn severity(&self) -> log::Level {
        match self {
            Self::NotReady(_) => log::Level::Warn,
            Self::Inventory(err) => err.severity(),
            Self::UnknownCommand(_)
            | Self::InvalidUsage(_)
            | Self::PermissionDenied
            | Self::PlayerOnly
            | Self::GeneralCommandIssue(_) => log::Level::Debug,
        }
    }
}

impl BadgerError for ModuleError {
    fn severity(&self) -> log::Level {
        log::Level::Error
    }
}
