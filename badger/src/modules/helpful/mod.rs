use crate::{
    command::ConfigCommand,
    module::{Module, ModuleContext, ModuleError, ModuleMetadata},
};

mod cmd_text;

pub use cmd_text::TextCommand;

pub const NAME: &str = "bHelpful";

static METADATA: ModuleMetadata = ModuleMetadata {
    name: NAME,
    version: env!("CARGO_PKG_VERSION"),
    authors: "TheCodingBadgers",
    description: "Server rules and news, kept in editable text files.",
};

/// label, description, bundled template
const TEXT_COMMANDS: [(&str, &str, &str); 2] = [
    (
        "rules",
        "Show the server rules.",
        include_str!("templates/rules.cfg"),
    ),
    (
        "news",
        "Show the latest server news.",
        include_str!("templates/news.cfg"),
    ),
];

#[derive(Default)]
pub struct HelpfulModule;

impl Module for HelpfulModule {
    fn metadata(&self) -> &ModuleMetadata {
        &METADATA
    }

    fn on_enable(&mut self, ctx: &mut ModuleContext<'_>) -> Result<(), ModuleError> {
        ctx.ensure_data_folder()?;
        let server_name = ctx.services.config.server_name.clone();
        for (label, description, template) in TEXT_COMMANDS {
            let mut command =
                ConfigCommand::new(label, ctx.data_folder(), &server_name, TextCommand::default())
                    .description(description)
                    .template(template);
            // a failure is logged and retried on first use
            command.load_command();
            ctx.register_command(Box::new(command));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Write, path::Path};

    use crate::{
        command::{CommandSender, ConfigCommandHandler},
        entity::player::Player,
    };
    use badger_core::GameMode;
    use std::sync::Arc;

    use super::TextCommand;

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "#rules.cfg generated on 1/1/2024 1:1:1\n&6Rules\n\n# note\n&e1. &fBe nice\n").unwrap();

        let mut command = TextCommand::default();
        command.load_config(Some(file.path())).unwrap();
        assert_eq!(command.lines(), ["&6Rules", "&e1. &fBe nice"]);

        let player = Arc::new(Player::new("Steve", "world", GameMode::Survival));
        command
            .handle_command(&CommandSender::Player(player.clone()), "rules", &[])
            .unwrap();
        let messages: Vec<String> = player.take_messages().iter().map(|m| m.plain()).collect();
        assert_eq!(messages, ["Rules", "1. Be nice"]);
    }

    #[test]
    fn missing_file_fails_to_load() {
        let mut command = TextCommand::default();
        assert!(command
            .load_config(Some(Path::new("/nonexistent/rules.cfg")))
            .is_err());
        assert!(command.load_config(None).is_ok());
    }
}
