use std::{fs, io, path::Path};

use badger_core::text::TextComponent;

use crate::command::{CommandError, CommandSender, ConfigCommandHandler};

/// Prints the lines of its config file. Lines starting with `#` and blank
/// lines are skipped, `&` colour codes are rendered.
#[derive(Debug, Default)]
pub struct TextCommand {
    lines: Vec<String>,
}

impl TextCommand {
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl ConfigCommandHandler for TextCommand {
    fn load_config(&mut self, file: Option<&Path>) -> io::Result<()> {
        let Some(file) = file else {
            return Ok(());
        };
        self.lines = fs::read_to_string(file)?
            .lines()
            .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
            .map(ToString::to_string)
            .collect();
        Ok(())
    }

    fn handle_command(
        &mut self,
        sender: &CommandSender,
        _label: &str,
        _args: &[&str],
    ) -> Result<(), CommandError> {
        for line in &self.lines {
            sender.send_message(TextComponent::from_ampersand(line));
        }
        Ok(())
    }
}
