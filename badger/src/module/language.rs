use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use super::ModuleLogger;

/// Message strings of a module, read from `<module>_<language>.lang`.
///
/// A line starting with `#` selects the key (the rest of the line); the
/// lines after it are its value, a later line replacing an earlier one.
/// Blank lines are skipped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LanguageTable {
    values: HashMap<String, String>,
}

impl LanguageTable {
    /// Never fails: a missing file leaves the table empty and a read error
    /// keeps what was parsed up to that point. Both are logged.
    pub fn load(path: &Path, logger: &ModuleLogger) -> Self {
        let mut table = Self::default();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(_) => {
                logger.error(&format!("Missing language file '{}'!", path.display()));
                return table;
            }
        };

        let file_name = path.file_name().unwrap_or_default().to_string_lossy();
        logger.info(&format!("Loading Language File: {file_name}"));
        table.read(BufReader::new(file), logger);
        table
    }

    pub fn read<R: BufRead>(&mut self, reader: R, logger: &ModuleLogger) {
        let mut key: Option<String> = None;
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    logger.error(&format!("Failed to read language file: {err}"));
                    return;
                }
            };

            if line.is_empty() {
                continue;
            }

            if let Some(new_key) = line.strip_prefix('#') {
                key = Some(new_key.to_string());
                continue;
            }

            let Some(key) = &key else {
                logger.warn("Trying to parse a language value, with no key set!");
                continue;
            };
            self.values.insert(key.clone(), line);
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
