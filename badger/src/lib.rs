pub mod command;
pub mod console;
pub mod entity;
pub mod error;
pub mod event;
pub mod module;
pub mod modules;
pub mod server;
