use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::qif::{is_valid_date_format, DEFAULT_DATE_FORMAT};
use crate::template::StatementTemplate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_account_type: String,
    /// strftime format of the QIF `D` line.
    pub date_format: String,
    pub template: StatementTemplate,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_account_type: "Bank".to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            template: StatementTemplate::default(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("frontacc-conv")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Settings from the user's config file, or defaults when there is none.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(&settings_path())
}

pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)?;
    let settings: Settings = serde_json::from_str(&content)
        .map_err(|e| AppError::Settings(format!("{}: {e}", path.display())))?;
    if !is_valid_date_format(&settings.date_format) {
        return Err(AppError::Settings(format!(
            "{}: invalid date_format {:?}",
            path.display(),
            settings.date_format
        )));
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Column;

    #[test]
    fn test_load_returns_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings_from(&dir.path().join("settings.json")).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.default_account_type, "Bank");
        assert_eq!(s.date_format, "%m/%d/%Y");
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"default_account_type": "CCard", "template": {"balance_debit": "L"}}"#,
        )
        .unwrap();
        let s = load_settings_from(&path).unwrap();
        assert_eq!(s.default_account_type, "CCard");
        assert_eq!(s.date_format, DEFAULT_DATE_FORMAT);
        assert_eq!(s.template.balance_debit, Column(11));
        assert_eq!(s.template.header_label, "TYPE");
    }

    #[test]
    fn test_malformed_settings_are_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_settings_from(&path).unwrap_err();
        assert!(matches!(err, AppError::Settings(_)));
    }

    #[test]
    fn test_invalid_date_format_is_a_settings_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"date_format": "%Q"}"#).unwrap();
        let err = load_settings_from(&path).unwrap_err();
        assert!(matches!(err, AppError::Settings(ref m) if m.contains("%Q")));
    }
}
