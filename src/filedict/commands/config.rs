use crate::commands::{CmdMessage, CmdResult};
use crate::config::FiledictConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Reads or writes `config.json` in `dir`. Changes apply from the next run.
pub fn run(dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = FiledictConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = FiledictConfig::load(dir)?;
            let message = match config.get(&key) {
                Some(val) => CmdMessage::info(val),
                None => CmdMessage::error(format!("Unknown config key: {}", key)),
            };
            Ok(CmdResult::default().with_message(message))
        }
        ConfigAction::Set(key, value) => {
            let mut config = FiledictConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                return Ok(CmdResult::default().with_message(CmdMessage::error(e)));
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            Ok(CmdResult::default()
                .with_config(config)
                .with_message(CmdMessage::success(format!("{} set to {}", key, display_val))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::TempDir;

    #[test]
    fn set_persists_and_show_key_reads_back() {
        let dir = TempDir::new().unwrap();
        let set = run(
            dir.path(),
            ConfigAction::Set("file-ext".into(), "ndjson".into()),
        )
        .unwrap();
        assert_eq!(set.messages[0].content, "file-ext set to .ndjson");

        let shown = run(dir.path(), ConfigAction::ShowKey("file-ext".into())).unwrap();
        assert_eq!(shown.messages[0].content, ".ndjson");
    }

    #[test]
    fn unknown_key_is_reported_not_raised() {
        let dir = TempDir::new().unwrap();
        let result = run(dir.path(), ConfigAction::Set("color".into(), "red".into())).unwrap();

        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!dir.path().join(crate::config::CONFIG_FILENAME).exists());
    }

    #[test]
    fn show_all_returns_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let result = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(FiledictConfig::default()));
    }
}
