use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use time::{macros::format_description, OffsetDateTime};

use super::{CommandError, CommandSender, ModuleCommand};

/// The part of a config-backed command that differs per command.
pub trait ConfigCommandHandler: Send {
    /// Reads the command's config file, `None` for commands without one.
    fn load_config(&mut self, file: Option<&Path>) -> io::Result<()>;

    fn handle_command(
        &mut self,
        sender: &CommandSender,
        label: &str,
        args: &[&str],
    ) -> Result<(), CommandError>;
}

/// A command that keeps what it shows in a config file next to the module.
///
/// The first time the command loads, a missing `<label>.cfg` is generated
/// from the bundled template. The command refuses to run until loading
/// succeeded.
pub struct ConfigCommand<H> {
    label: String,
    usage: String,
    description: String,
    file: Option<PathBuf>,
    template: Option<&'static str>,
    server_name: String,
    loaded: bool,
    handler: H,
}

impl<H: ConfigCommandHandler> ConfigCommand<H> {
    /// A command backed by `<data_folder>/<label>.cfg`.
    pub fn new(label: &str, data_folder: &Path, server_name: &str, handler: H) -> Self {
        Self {
            label: label.to_string(),
            usage: format!("/{label}"),
            description: String::new(),
            file: Some(data_folder.join(format!("{label}.cfg"))),
            template: None,
            server_name: server_name.to_string(),
            loaded: false,
            handler,
        }
    }

    /// A command without a config file.
    pub fn without_config(label: &str, handler: H) -> Self {
        Self {
            label: label.to_string(),
            usage: format!("/{label}"),
            description: String::new(),
            file: None,
            template: None,
            server_name: String::new(),
            loaded: false,
            handler,
        }
    }

    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// The text copied into the config file when it does not exist yet.
    #[must_use]
    pub fn template(mut self, template: &'static str) -> Self {
        self.template = Some(template);
        self
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Creates the default config if the file doesn't exist and loads it.
    /// Returns whether the command is loaded afterwards.
    pub fn load_command(&mut self) -> bool {
        if self.loaded {
            return true;
        }

        if let Err(err) = self.try_load() {
            let file_name = self
                .file
                .as_deref()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            log::warn!(
                "Exception loading {}'s config file ({}): {}",
                self.label,
                file_name,
                err
            );
            self.loaded = false;
            return false;
        }

        self.loaded = true;
        true
    }

    fn try_load(&mut self) -> io::Result<()> {
        if let Some(file) = &self.file {
            if !file.exists() {
                self.write_default(file)?;
            }
        }
        self.handler.load_config(self.file.as_deref())
    }

    fn write_default(&self, file: &Path) -> io::Result<()> {
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = Vec::new();
        if let Some(template) = self.template {
            self.render_template(&mut out, file, template)?;
        }
        write_whole(file, &out)
    }

    fn render_template(&self, out: &mut Vec<u8>, file: &Path, template: &str) -> io::Result<()> {
        let now = now();
        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stamp = now
            .format(format_description!(
                "[day padding:none]/[month padding:none]/[year] [hour repr:12 padding:none]:[minute padding:none]:[second padding:none]"
            ))
            .map_err(io::Error::other)?;
        writeln!(out, "#{file_name} generated on {stamp}")?;
        for line in template.lines() {
            writeln!(out, "{}", replace_file_macros(line, &self.server_name, now))?;
        }
        Ok(())
    }
}

/// Writes `contents` to a `.part` sibling and renames it over `file`, so a
/// failed write never leaves a truncated `file` behind.
fn write_whole(file: &Path, contents: &[u8]) -> io::Result<()> {
    let mut partial = file.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    let result = fs::write(&partial, contents).and_then(|()| fs::rename(&partial, file));
    if result.is_err() && partial.is_file() {
        let _ = fs::remove_file(&partial);
    }
    result
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Expands `%server%`, `%d`, `%min`, `%m`, `%y`, `%h` and `%s` to the server
/// name, day, minute, month, year, hour and second.
#[must_use]
pub fn replace_file_macros(line: &str, server_name: &str, at: OffsetDateTime) -> String {
    line.replace("%server%", server_name)
        .replace("%d", &at.day().to_string())
        .replace("%min", &at.minute().to_string())
        .replace("%m", &u8::from(at.month()).to_string())
        .replace("%y", &at.year().to_string())
        .replace("%h", &at.hour().to_string())
        .replace("%s", &at.second().to_string())
}

impl<H: ConfigCommandHandler> ModuleCommand for ConfigCommand<H> {
    fn label(&self) -> &str {
        &self.label
    }

    fn usage(&self) -> &str {
        &self.usage
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn execute(
        &mut self,
        sender: &CommandSender,
        label: &str,
        args: &[&str],
    ) -> Result<(), CommandError> {
        if !self.load_command() {
            return Err(CommandError::NotReady(self.label.clone()));
        }
        self.handler.handle_command(sender, label, args)
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, io, path::Path};

    use time::macros::datetime;

    use crate::command::{CommandError, CommandSender, ModuleCommand};

    use super::{replace_file_macros, write_whole, ConfigCommand, ConfigCommandHandler};

    #[derive(Default)]
    struct Recorder {
        loads: usize,
        content: String,
        runs: usize,
    }

    impl ConfigCommandHandler for Recorder {
        fn load_config(&mut self, file: Option<&Path>) -> io::Result<()> {
            self.loads += 1;
            if let Some(file) = file {
                self.content = fs::read_to_string(file)?;
            }
            Ok(())
        }

        fn handle_command(
            &mut self,
            _sender: &CommandSender,
            _label: &str,
            _args: &[&str],
        ) -> Result<(), CommandError> {
            self.runs += 1;
            Ok(())
        }
    }

    #[test]
    fn macros_are_expanded() {
        let at = datetime!(2013-07-04 09:05:03 UTC);
        assert_eq!(
            replace_file_macros("Welcome to %server% (%d/%m/%y %h:%min:%s)", "Badgers", at),
            "Welcome to Badgers (4/7/2013 9:5:3)"
        );
    }

    #[test]
    fn first_load_writes_the_template() {
        let dir = tempfile::tempdir().unwrap();
        let mut command = ConfigCommand::new("rules", dir.path(), "Badgers", Recorder::default())
            .template("Rules of %server%\n1. Be nice\n");

        assert!(command.load_command());
        assert!(command.load_command());
        assert_eq!(command.handler.loads, 1);

        let written = fs::read_to_string(dir.path().join("rules.cfg")).unwrap();
        let mut lines = written.lines();
        assert!(lines.next().unwrap().starts_with("#rules.cfg generated on "));
        assert_eq!(lines.next(), Some("Rules of Badgers"));
        assert_eq!(lines.next(), Some("1. Be nice"));
        assert_eq!(command.handler.content, written);
    }

    #[test]
    fn existing_file_is_not_replaced() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("news.cfg"), "custom\n").unwrap();
        let mut command = ConfigCommand::new("news", dir.path(), "Badgers", Recorder::default())
            .template("default news");

        assert!(command.load_command());
        assert_eq!(command.handler.content, "custom\n");
    }

    #[test]
    fn unloadable_command_is_not_ready() {
        let dir = tempfile::tempdir().unwrap();
        // a plain file where the data folder should be
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, "").unwrap();
        let mut command = ConfigCommand::new("rules", &blocker, "Badgers", Recorder::default())
            .template("rules");

        let result = command.execute(&CommandSender::Console, "rules", &[]);
        assert!(matches!(result, Err(CommandError::NotReady(label)) if label == "rules"));
        assert!(!command.is_loaded());
        assert_eq!(command.handler.runs, 0);
    }

    #[test]
    fn failed_template_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let partial = dir.path().join("rules.cfg.part");
        fs::create_dir(&partial).unwrap();
        let mut command = ConfigCommand::new("rules", dir.path(), "Badgers", Recorder::default())
            .template("Rules of %server%\n");

        assert!(!command.load_command());
        assert!(!dir.path().join("rules.cfg").exists());
        assert_eq!(command.handler.loads, 0);

        fs::remove_dir(&partial).unwrap();
        assert!(command.load_command());
        assert!(command.handler.content.contains("Rules of Badgers"));
        assert!(!partial.exists());
    }

    #[test]
    fn failed_rename_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("news.cfg");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "").unwrap();

        assert!(write_whole(&target, b"news").is_err());
        assert!(!dir.path().join("news.cfg.part").exists());
        assert!(target.join("keep").is_file());
    }

    #[test]
    fn command_without_config_loads() {
        let mut command = ConfigCommand::without_config("ping", Recorder::default());
        command.execute(&CommandSender::Console, "ping", &[]).unwrap();
        assert_eq!(command.handler.runs, 1);
        assert!(command.file().is_none());
    }
}
