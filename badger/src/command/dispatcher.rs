use std::collections::HashMap;

use badger_core::text::{color::NamedColor, TextComponent};

use super::{CommandError, CommandSender, ModuleCommand};
use crate::error::BadgerError;

struct RegisteredCommand {
    owner: String,
    command: Box<dyn ModuleCommand>,
}

/// Stores the commands modules registered and dispatches console or chat
/// lines to them.
#[derive(Default)]
pub struct CommandDispatcher {
    commands: HashMap<String, RegisteredCommand>,
    /// alias -> label
    aliases: HashMap<String, String>,
}

impl CommandDispatcher {
    /// Registers `command` for `owner`. A label or alias that is already
    /// taken is kept by its first owner; returns false when the label was.
    pub fn register(&mut self, owner: &str, command: Box<dyn ModuleCommand>) -> bool {
        let label = command.label().to_lowercase();
        if self.commands.contains_key(&label) || self.aliases.contains_key(&label) {
            log::warn!("[{owner}] Command '/{label}' is already registered, skipping it");
            return false;
        }
        for alias in command.aliases() {
            let alias = alias.to_lowercase();
            if self.commands.contains_key(&alias) || self.aliases.contains_key(&alias) {
                log::warn!("[{owner}] Alias '/{alias}' of '/{label}' is already taken");
                continue;
            }
            self.aliases.insert(alias, label.clone());
        }
        self.commands.insert(
            label,
            RegisteredCommand {
                owner: owner.to_string(),
                command,
            },
        );
        true
    }

    /// Removes every command `owner` registered. Returns how many.
    pub fn unregister_owner(&mut self, owner: &str) -> usize {
        let before = self.commands.len();
        self.commands.retain(|_, registered| registered.owner != owner);
        let commands = &self.commands;
        self.aliases.retain(|_, label| commands.contains_key(label));
        before - self.commands.len()
    }

    #[must_use]
    pub fn is_registered(&self, label: &str) -> bool {
        self.resolve(label).is_some()
    }

    /// Labels of the commands `owner` registered, sorted.
    #[must_use]
    pub fn commands_of(&self, owner: &str) -> Vec<&str> {
        let mut labels: Vec<&str> = self
            .commands
            .iter()
            .filter(|(_, registered)| registered.owner == owner)
            .map(|(label, _)| label.as_str())
            .collect();
        labels.sort_unstable();
        labels
    }

    /// `(label, usage, description)` of every command, sorted by label.
    #[must_use]
    pub fn help(&self) -> Vec<(&str, &str, &str)> {
        let mut entries: Vec<_> = self
            .commands
            .iter()
            .map(|(label, registered)| {
                (
                    label.as_str(),
                    registered.command.usage(),
                    registered.command.description(),
                )
            })
            .collect();
        entries.sort_unstable_by_key(|(label, _, _)| *label);
        entries
    }

    fn resolve(&self, label: &str) -> Option<&str> {
        let label = label.to_lowercase();
        if let Some((label, _)) = self.commands.get_key_value(&label) {
            return Some(label);
        }
        self.aliases.get(&label).map(String::as_str)
    }

    /// Runs `line` and reports a failure to the sender in red.
    pub fn handle_command(&mut self, sender: &CommandSender, line: &str) {
        if let Err(err) = self.dispatch(sender, line) {
            err.log();
            sender.send_message(TextComponent::text_string(err.to_string()).color_named(NamedColor::Red));
        }
    }

    pub fn dispatch(&mut self, sender: &CommandSender, line: &str) -> Result<(), CommandError> {
        let line = line.trim();
        let line = line.strip_prefix('/').unwrap_or(line);
        let mut parts = line.split_whitespace();
        let Some(typed) = parts.next() else {
            return Err(CommandError::UnknownCommand(String::new()));
        };
        let args: Vec<&str> = parts.collect();

        let label = self
            .resolve(typed)
            .ok_or_else(|| CommandError::UnknownCommand(typed.to_string()))?
            .to_string();
        let registered = self
            .commands
            .get_mut(&label)
            .ok_or_else(|| CommandError::UnknownCommand(typed.to_string()))?;

        log::debug!("{sender} issued command: /{line}");
        registered.command.execute(sender, typed, &args)
    }
}
