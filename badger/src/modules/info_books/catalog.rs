use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use badger_core::names_match;
use badger_inventory::{BookMeta, InventoryError, ItemStack, Material, PlayerInventory};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{entity::player::Player, error::BadgerError, module::ModuleLogger};

pub const EXAMPLE_FILE: &str = "examplebook.json";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Couldn't access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Couldn't read book {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Couldn't write book: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A book as stored in `books/<file>.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InfoBook {
    pub name: String,
    pub author: String,
    pub pages: Vec<String>,
    /// Shown as the item's lore.
    pub taglines: Vec<String>,
}

impl InfoBook {
    #[must_use]
    pub fn example() -> Self {
        Self {
            name: "Example Book".to_string(),
            author: "McBadgerCraft".to_string(),
            pages: vec![
                "This is an example book".to_string(),
                "Using bInfoBooks created by".to_string(),
                "TheCodingBadgers".to_string(),
            ],
            taglines: vec!["bInfoBooks".to_string(), "By TheCodingBadgers".to_string()],
        }
    }

    /// The pages with `%player%` replaced by the reader's name.
    #[must_use]
    pub fn pages_for(&self, viewer: &str) -> Vec<String> {
        self.pages
            .iter()
            .map(|page| page.replace("%player%", viewer))
            .collect()
    }

    #[must_use]
    pub fn to_item(&self, viewer: &str) -> ItemStack {
        ItemStack::written_book(BookMeta {
            title: self.name.clone(),
            author: self.author.clone(),
            pages: self.pages_for(viewer),
            lore: self.taglines.clone(),
            display_name: Some(self.name.clone()),
        })
    }

    /// Whether `stack` is a copy of this book, judged by title and author.
    #[must_use]
    pub fn is_copy(&self, stack: &ItemStack) -> bool {
        if stack.material != Material::WrittenBook {
            return false;
        }
        stack.book.as_ref().is_some_and(|meta| {
            names_match(&meta.author, &self.author) && names_match(&meta.title, &self.name)
        })
    }
}

/// The loaded info books, in load order.
#[derive(Debug)]
pub struct BookCatalog {
    folder: PathBuf,
    books: Vec<InfoBook>,
    /// lower-cased name -> index into `books`
    index: HashMap<String, usize>,
}

impl BookCatalog {
    #[must_use]
    pub fn new(folder: PathBuf) -> Self {
        Self {
            folder,
            books: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Reloads every `.json` file of the folder, in file name order. A file
    /// that fails to decode is logged and skipped. The folder is created,
    /// with an example book in it, when it has no books at all.
    ///
    /// Only fails when the folder itself can't be created or listed.
    pub fn load(&mut self, logger: &ModuleLogger) -> Result<usize, CatalogError> {
        self.clear();

        if !self.folder.exists() {
            fs::create_dir_all(&self.folder).map_err(|source| CatalogError::Io {
                path: self.folder.clone(),
                source,
            })?;
        }

        let mut files = self.book_files()?;
        if files.is_empty() {
            match self.write_example() {
                Ok(path) => files.push(path),
                Err(err) => err.log(),
            }
        }

        for path in files {
            let file_name = path.file_name().unwrap_or_default().to_string_lossy();
            logger.info(&format!("Loading Book: {file_name}"));
            match read_book(&path) {
                Ok(book) => self.insert(book),
                Err(err) => err.log(),
            }
        }
        Ok(self.books.len())
    }

    fn book_files(&self) -> Result<Vec<PathBuf>, CatalogError> {
        let io_err = |source| CatalogError::Io {
            path: self.folder.clone(),
            source,
        };
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.folder).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            let is_json = path
                .extension()
                .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
            if is_json && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn write_example(&self) -> Result<PathBuf, CatalogError> {
        let path = self.folder.join(EXAMPLE_FILE);
        let contents = serde_json::to_string_pretty(&InfoBook::example())?;
        fs::write(&path, contents).map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Adds a book. One with the same name (ignoring case) is replaced where
    /// it stands.
    pub fn insert(&mut self, book: InfoBook) {
        let key = book.name.to_lowercase();
        match self.index.get(&key) {
            Some(&position) => self.books[position] = book,
            None => {
                self.index.insert(key, self.books.len());
                self.books.push(book);
            }
        }
    }

    pub fn clear(&mut self) {
        self.books.clear();
        self.index.clear();
    }

    /// The book called `name`, else the first book whose name starts with it.
    /// Case is ignored.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&InfoBook> {
        let query = name.to_lowercase();
        if let Some(&position) = self.index.get(&query) {
            return self.books.get(position);
        }
        self.books
            .iter()
            .find(|book| book.name.to_lowercase().starts_with(&query))
    }

    /// Whether `stack` is a written book named after one of the catalog's
    /// books.
    #[must_use]
    pub fn is_info_book(&self, stack: Option<&ItemStack>) -> bool {
        let Some(stack) = stack else {
            return false;
        };
        if stack.material != Material::WrittenBook {
            return false;
        }
        stack
            .display_name()
            .is_some_and(|name| self.index.contains_key(&name.to_lowercase()))
    }

    #[must_use]
    pub fn already_holds(inventory: &PlayerInventory, book: &InfoBook) -> bool {
        inventory.contents().any(|stack| book.is_copy(stack))
    }

    /// Puts a fresh copy of `book` into the player's inventory.
    pub fn grant(player: &Player, book: &InfoBook) -> Result<(), InventoryError> {
        player.inventory().add_item(book.to_item(&player.name))
    }

    /// One ` - <name> by <author>` line per book.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        self.books
            .iter()
            .map(|book| format!(" - {} by {}", book.name, book.author))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InfoBook> {
        self.books.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

fn read_book(path: &Path) -> Result<InfoBook, CatalogError> {
    let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CatalogError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
