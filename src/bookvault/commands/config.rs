use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::settings::Settings;
use crate::store::backend::StorageBackend;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run<B: StorageBackend>(backend: &B, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_settings(Settings::load(backend))),
        ConfigAction::ShowKey(key) => {
            let settings = Settings::load(backend);
            let mut result = CmdResult::default();
            match settings.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let update = match Settings::parse_update(&key, &value) {
                Ok(update) => update,
                Err(e) => {
                    let mut res = CmdResult::default();
                    res.add_message(CmdMessage::error(e));
                    return Ok(res);
                }
            };
            let settings = Settings::update(backend, update)?;
            let display_val = settings.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_settings(settings);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::settings::Theme;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn shows_defaults() {
        let backend = MemBackend::new();
        let result = run(&backend, ConfigAction::ShowAll).unwrap();
        assert_eq!(result.settings.unwrap(), Settings::default());
    }

    #[test]
    fn sets_and_reads_back() {
        let backend = MemBackend::new();
        let result = run(
            &backend,
            ConfigAction::Set("theme".into(), "DARK".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "theme set to dark");
        assert_eq!(Settings::load(&backend).theme, Theme::Dark);

        let shown = run(&backend, ConfigAction::ShowKey("theme".into())).unwrap();
        assert_eq!(shown.messages[0].content, "dark");
    }

    #[test]
    fn rejects_unknown_key_and_bad_value() {
        let backend = MemBackend::new();
        let unknown = run(&backend, ConfigAction::ShowKey("font".into())).unwrap();
        assert!(unknown.has_level(MessageLevel::Error));

        let bad = run(&backend, ConfigAction::Set("goal".into(), "-5".into())).unwrap();
        assert!(bad.has_level(MessageLevel::Error));
        assert_eq!(Settings::load(&backend).goal, 1000);
    }
}
