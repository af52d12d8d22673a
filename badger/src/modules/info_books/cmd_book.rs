use std::sync::Arc;

use badger_core::PermissionOracle;
use badger_inventory::InventoryError;
use parking_lot::RwLock;

use super::{catalog::BookCatalog, NAME};
use crate::{
    command::{CommandError, CommandSender, ModuleCommand},
    module::{chat_message, ModuleLogger},
};

const NAMES: [&str; 1] = ["book"];

const ALIASES: [&str; 1] = ["books"];

const DESCRIPTION: &str = "List the info books or get a copy of one.";

const USAGE: &str = "/book [name|reload]";

const PERMISSION_RELOAD: &str = "binfobooks.reload";

pub struct BookCommand {
    catalog: Arc<RwLock<BookCatalog>>,
    permissions: Arc<dyn PermissionOracle>,
    logger: ModuleLogger,
}

impl BookCommand {
    pub fn new(
        catalog: Arc<RwLock<BookCatalog>>,
        permissions: Arc<dyn PermissionOracle>,
        logger: ModuleLogger,
    ) -> Self {
        Self {
            catalog,
            permissions,
            logger,
        }
    }

    fn list(&self, sender: &CommandSender) {
        let catalog = self.catalog.read();
        if catalog.is_empty() {
            sender.send_message(chat_message(NAME, "There are no books to hand out."));
            return;
        }
        sender.send_message(chat_message(NAME, "The following books are available:"));
        for line in catalog.list() {
            sender.send_message(chat_message(NAME, line));
        }
    }

    fn reload(&self, sender: &CommandSender) -> Result<(), CommandError> {
        if !sender.has_permission(self.permissions.as_ref(), PERMISSION_RELOAD) {
            return Err(CommandError::PermissionDenied);
        }
        let count = self
            .catalog
            .write()
            .load(&self.logger)
            .map_err(|err| CommandError::GeneralCommandIssue(err.to_string()))?;
        sender.send_message(chat_message(NAME, format!("Loaded {count} books.")));
        Ok(())
    }

    fn give(&self, sender: &CommandSender, name: &str) -> Result<(), CommandError> {
        let Some(player) = sender.as_player() else {
            return Err(CommandError::PlayerOnly);
        };

        let catalog = self.catalog.read();
        let Some(book) = catalog.lookup(name) else {
            sender.send_message(chat_message(
                NAME,
                format!("Could not find a book called '{name}'"),
            ));
            return Ok(());
        };

        if BookCatalog::already_holds(&player.inventory(), book) {
            sender.send_message(chat_message(
                NAME,
                format!("You already have a copy of '{}'", book.name),
            ));
            return Ok(());
        }

        match BookCatalog::grant(&player, book) {
            Ok(()) => {
                sender.send_message(chat_message(
                    NAME,
                    format!("Enjoy reading '{}'", book.name),
                ));
                Ok(())
            }
            Err(InventoryError::Full) => Err(CommandError::GeneralCommandIssue(
                "Your inventory is full".to_string(),
            )),
            Err(err) => Err(err.into()),
        }
    }
}

impl ModuleCommand for BookCommand {
    fn label(&self) -> &str {
        NAMES[0]
    }

    fn aliases(&self) -> &[&'static str] {
        &ALIASES
    }

    fn usage(&self) -> &str {
        USAGE
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn execute(
        &mut self,
        sender: &CommandSender,
        _label: &str,
        args: &[&str],
    ) -> Result<(), CommandError> {
        match args {
            [] => {
                self.list(sender);
                Ok(())
            }
            [single] if single.eq_ignore_ascii_case("reload") => self.reload(sender),
            _ => self.give(sender, &args.join(" ")),
        }
    }
}
