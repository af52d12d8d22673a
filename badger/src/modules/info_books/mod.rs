use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    event::EventPriority,
    module::{Module, ModuleContext, ModuleError, ModuleMetadata},
};

pub mod catalog;
mod cmd_book;
mod listener;

use catalog::BookCatalog;
use cmd_book::BookCommand;
use listener::InfoBookListener;

pub const NAME: &str = "bInfoBooks";

static METADATA: ModuleMetadata = ModuleMetadata {
    name: NAME,
    version: env!("CARGO_PKG_VERSION"),
    authors: "TheCodingBadgers",
    description: "Hands out server info books that can't be stored away.",
};

#[derive(Default)]
pub struct InfoBooksModule {
    catalog: Option<Arc<RwLock<BookCatalog>>>,
}

impl Module for InfoBooksModule {
    fn metadata(&self) -> &ModuleMetadata {
        &METADATA
    }

    fn on_enable(&mut self, ctx: &mut ModuleContext<'_>) -> Result<(), ModuleError> {
        ctx.ensure_data_folder()?;
        let mut catalog = BookCatalog::new(ctx.data_folder().join("books"));
        let count = catalog.load(ctx.logger())?;
        ctx.logger().info(&format!("Loaded {count} books"));

        let catalog = Arc::new(RwLock::new(catalog));
        let listener = Arc::new(InfoBookListener::new(catalog.clone()));
        let command = BookCommand::new(
            catalog.clone(),
            ctx.services.permissions.clone(),
            ctx.logger().clone(),
        );

        let mut registrar = ctx.listeners();
        let l = listener.clone();
        registrar.register_inventory_click(EventPriority::Normal, move |event| {
            l.on_inventory_click(event)
        });
        registrar.register_player_drop_item(EventPriority::Normal, move |event| {
            listener.on_drop(event)
        });
        ctx.register_command(Box::new(command));

        self.catalog = Some(catalog);
        Ok(())
    }

    fn on_disable(&mut self) {
        if let Some(catalog) = self.catalog.take() {
            catalog.write().clear();
        }
    }
}
