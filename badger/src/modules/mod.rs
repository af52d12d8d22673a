pub mod creative;
pub mod helpful;
pub mod info_books;

use crate::module::Module;

/// The modules the host ships with, in enable order.
#[must_use]
pub fn default_modules() -> Vec<Box<dyn Module>> {
    vec![
        Box::new(creative::CreativeModule::default()),
        Box::new(info_books::InfoBooksModule::default()),
        Box::new(helpful::HelpfulModule::default()),
    ]
}
