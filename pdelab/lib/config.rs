//! Application configuration, read once at startup from a YAML file.
//!
//! Every field has a default, so a partial (or missing) file is fine:
//! ```yaml
//! chat:
//!   source: deepseek
//!   deepseek_key: sk-...
//! display:
//!   output_dir: frames
//! ```

use std::path::{ Path, PathBuf };
use serde::{ Deserialize, Serialize };
use crate::{ chat::ModelSource, error::ConfigError };

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "pdelab.yaml";

/// Default ChatGPT-compatible endpoint.
pub const DEFAULT_CHATGPT_BASE_URL: &str = "https://free.v36.cm/v1/";

/// Default ChatGPT-compatible model.
pub const DEFAULT_CHATGPT_MODEL: &str = "gpt-4o-mini";

/// Default DeepSeek endpoint.
pub const DEFAULT_DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";

/// Default DeepSeek model.
pub const DEFAULT_DEEPSEEK_MODEL: &str = "deepseek-chat";

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LabConfig {
    pub chat: ChatSettings,
    pub display: DisplaySettings,
}

/// Settings for the Q&A chat.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChatSettings {
    pub source: ModelSource,
    pub chatgpt_key: Option<String>,
    pub chatgpt_base_url: String,
    pub chatgpt_model: String,
    pub deepseek_key: Option<String>,
    pub deepseek_base_url: String,
    pub deepseek_model: String,
    /// Request timeout in seconds.
    pub timeout_secs: f64,
    pub temperature: f64,
}

/// Settings for rendered output.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub output_dir: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Pause between animation frames in milliseconds.
    pub frame_delay_ms: u64,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            source: ModelSource::Offline,
            chatgpt_key: None,
            chatgpt_base_url: DEFAULT_CHATGPT_BASE_URL.to_string(),
            chatgpt_model: DEFAULT_CHATGPT_MODEL.to_string(),
            deepseek_key: None,
            deepseek_base_url: DEFAULT_DEEPSEEK_BASE_URL.to_string(),
            deepseek_model: DEFAULT_DEEPSEEK_MODEL.to_string(),
            timeout_secs: 30.0,
            temperature: 0.7,
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            width: 800,
            height: 600,
            frame_delay_ms: 10,
        }
    }
}

impl LabConfig {
    /// Parse a configuration from YAML text.
    pub fn from_yaml(text: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Read and parse a configuration file.
    pub fn from_file<P>(path: P) -> ConfigResult<Self>
    where P: AsRef<Path>
    {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }
}

/// Load the configuration from `path`, or from [`CONFIG_FILE`] in the working
/// directory if `None`.
///
/// A missing file yields the defaults; an unreadable or malformed one is
/// logged and also yields the defaults.
pub fn load(path: Option<&Path>) -> LabConfig {
    let path = path.unwrap_or_else(|| Path::new(CONFIG_FILE));
    if !path.exists() {
        log::debug!("config::load: {} not found; using defaults", path.display());
        return LabConfig::default();
    }
    match LabConfig::from_file(path) {
        Ok(cfg) => cfg,
        Err(err) => {
            log::warn!("config::load: {}: {err}; using defaults", path.display());
            LabConfig::default()
        },
    }
}

/// Pull a `--config PATH` (or `--config=PATH`) pair out of command-line
/// arguments, returning the path and the remaining arguments in order.
///
/// The last occurrence wins; a trailing `--config` with no value is dropped.
pub fn split_config_arg<I>(args: I) -> (Option<PathBuf>, Vec<String>)
where I: IntoIterator<Item = String>
{
    let mut path: Option<PathBuf> = None;
    let mut rest: Vec<String> = Vec::new();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--config" {
            if let Some(p) = args.next() { path = Some(PathBuf::from(p)); }
        } else if let Some(p) = arg.strip_prefix("--config=") {
            path = Some(PathBuf::from(p));
        } else {
            rest.push(arg);
        }
    }
    (path, rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_values() {
        let cfg = LabConfig::default();
        assert_eq!(cfg.chat.source, ModelSource::Offline);
        assert_eq!(cfg.chat.chatgpt_key, None);
        assert_eq!(cfg.chat.chatgpt_base_url, "https://free.v36.cm/v1/");
        assert_eq!(cfg.chat.chatgpt_model, "gpt-4o-mini");
        assert_eq!(cfg.chat.deepseek_base_url, "https://api.deepseek.com");
        assert_eq!(cfg.chat.deepseek_model, "deepseek-chat");
        assert_eq!(cfg.chat.timeout_secs, 30.0);
        assert_eq!(cfg.chat.temperature, 0.7);
        assert_eq!(cfg.display.output_dir, PathBuf::from("output"));
        assert_eq!(cfg.display.frame_delay_ms, 10);
    }

    #[test]
    fn partial_yaml() {
        let yaml = "chat:\n  source: deepseek\n  deepseek_key: sk-test\ndisplay:\n  width: 640\n";
        let cfg = LabConfig::from_yaml(yaml).unwrap();
        assert_eq!(cfg.chat.source, ModelSource::DeepSeek);
        assert_eq!(cfg.chat.deepseek_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.chat.deepseek_model, "deepseek-chat"); // default
        assert_eq!(cfg.display.width, 640);
        assert_eq!(cfg.display.height, 600); // default
    }

    #[test]
    fn malformed_yaml_rejected() {
        let res = LabConfig::from_yaml("chat: [1, 2");
        assert!(matches!(res, Err(ConfigError::Parse(_))));
        let res = LabConfig::from_yaml("chat:\n  source: bard\n");
        assert!(matches!(res, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn config_arg_extraction() {
        let args = ["heat", "--config", "lab.yaml", "--all"].map(String::from);
        let (path, rest) = split_config_arg(args);
        assert_eq!(path, Some(PathBuf::from("lab.yaml")));
        assert_eq!(rest, vec!["heat".to_string(), "--all".to_string()]);

        let (path, rest) = split_config_arg(["--config=a.yaml".to_string()]);
        assert_eq!(path, Some(PathBuf::from("a.yaml")));
        assert!(rest.is_empty());

        let (path, _) = split_config_arg(["--config".to_string()]);
        assert_eq!(path, None);
    }

    #[test]
    fn load_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");
        assert_eq!(load(Some(&missing)), LabConfig::default());

        let bad = dir.path().join("bad.yaml");
        std::fs::File::create(&bad).unwrap().write_all(b"display: {width: -").unwrap();
        assert_eq!(load(Some(&bad)), LabConfig::default());

        let good = dir.path().join("good.yaml");
        std::fs::File::create(&good).unwrap()
            .write_all(b"display:\n  frame_delay_ms: 50\n").unwrap();
        assert_eq!(load(Some(&good)).display.frame_delay_ms, 50);
    }
}
