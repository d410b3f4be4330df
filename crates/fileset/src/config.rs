//! Settings and format-agnostic configuration loading and saving

use crate::{Error, NormalizedPath, Result, Verbosity, io};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Line separator inserted by `append(.., new_line = true)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\r\n` on Windows, `\n` elsewhere
    #[default]
    Native,
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Native if cfg!(windows) => "\r\n",
            Self::Native | Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// Serializable form of [`Verbosity`]: `true`/`false` or a numeric threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerboseSetting {
    Enabled(bool),
    Threshold(u8),
}

impl Default for VerboseSetting {
    fn default() -> Self {
        Self::Enabled(false)
    }
}

impl From<VerboseSetting> for Verbosity {
    fn from(setting: VerboseSetting) -> Self {
        match setting {
            VerboseSetting::Enabled(enabled) => enabled.into(),
            VerboseSetting::Threshold(min) => min.into(),
        }
    }
}

/// Settings for a [`Context`](crate::Context).
///
/// ```toml
/// verbose = 1
/// line_ending = "lf"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub verbose: VerboseSetting,
    pub line_ending: LineEnding,
}

/// Format-agnostic configuration store.
///
/// Detects the format from the file extension and handles
/// serialization/deserialization transparently.
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a file.
    ///
    /// Format is detected from file extension:
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let extension = path.extension().unwrap_or("").to_lowercase();
        if !matches!(extension.as_str(), "toml" | "json" | "yaml" | "yml") {
            return Err(Error::UnsupportedFormat { extension });
        }

        let content = io::read_text(path)?;
        let parse_error = |format: &str, message: String| Error::ConfigParse {
            path: path.to_native(),
            format: format.into(),
            message,
        };

        match extension.as_str() {
            "toml" => toml::from_str(&content).map_err(|e| parse_error("TOML", e.to_string())),
            "json" => {
                serde_json::from_str(&content).map_err(|e| parse_error("JSON", e.to_string()))
            }
            _ => serde_yaml::from_str(&content).map_err(|e| parse_error("YAML", e.to_string())),
        }
    }

    /// Save configuration to a file.
    ///
    /// Format is determined from file extension.
    /// Uses atomic write to prevent corruption.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let extension = path.extension().unwrap_or("").to_lowercase();
        let serialize_error = |format: &str, message: String| Error::ConfigSerialize {
            path: path.to_native(),
            format: format.into(),
            message,
        };

        let content = match extension.as_str() {
            "toml" => toml::to_string_pretty(value)
                .map_err(|e| serialize_error("TOML", e.to_string()))?,
            "json" => serde_json::to_string_pretty(value)
                .map_err(|e| serialize_error("JSON", e.to_string()))?,
            "yaml" | "yml" => {
                serde_yaml::to_string(value).map_err(|e| serialize_error("YAML", e.to_string()))?
            }
            _ => return Err(Error::UnsupportedFormat { extension }),
        };

        io::write_atomic(path, content.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_line_ending_matches_platform() {
        let expected = if cfg!(windows) { "\r\n" } else { "\n" };
        assert_eq!(LineEnding::Native.as_str(), expected);
        assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
    }

    #[test]
    fn verbose_setting_accepts_bool_or_number() {
        let settings: Settings = toml::from_str("verbose = true").unwrap();
        assert_eq!(settings.verbose, VerboseSetting::Enabled(true));

        let settings: Settings = toml::from_str("verbose = 2\nline_ending = \"crlf\"").unwrap();
        assert_eq!(settings.verbose, VerboseSetting::Threshold(2));
        assert_eq!(settings.line_ending, LineEnding::CrLf);
    }

    #[test]
    fn empty_settings_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
