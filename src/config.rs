// src/config.rs
//! App configuration: the validation pre-filter toggle, loaded from TOML
//! with env overrides, plus a thread-safe handle with dev-gated hot reload.
//!
//! The app ships in two flavors, with and without the input gate;
//! `[validation].enabled` picks between them.

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, SystemTime};

// --- env defaults & names ---
pub const DEFAULT_CONFIG_PATH: &str = "config/analyzer.toml";

pub const ENV_CONFIG_PATH: &str = "ANALYZER_CONFIG_PATH";
pub const ENV_VALIDATION: &str = "ANALYZER_VALIDATION";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub validation: ValidationSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ValidationSection {
    /// When true, submissions must pass the letters-and-spaces gate
    /// before classification.
    #[serde(default)]
    pub enabled: bool,
}

impl AnalyzerConfig {
    /// Load from the TOML file. Uses ANALYZER_CONFIG_PATH or defaults to
    /// "config/analyzer.toml"; a missing file yields the defaults. The
    /// ANALYZER_VALIDATION env var overrides the file's toggle.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading analyzer config at {}", path.display()))?;
            Self::from_toml_str(&content)?
        } else {
            Self::default()
        };

        if let Some(enabled) = parse_bool_env(std::env::var(ENV_VALIDATION).ok()) {
            cfg.validation.enabled = enabled;
        }

        Ok(cfg)
    }

    /// Load from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let cfg: Self = toml::from_str(toml_str).context("parsing analyzer config")?;
        Ok(cfg)
    }
}

/// Resolve the config path from env with the repo default as fallback.
pub fn config_path() -> PathBuf {
    std::env::var(ENV_CONFIG_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

// accepts 1/0/true/false/on/off, case-insensitive
fn parse_bool_env(raw: Option<String>) -> Option<bool> {
    raw.and_then(|s| match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    })
}

/* ----------------------------
Thread-safe handle + hot reload
---------------------------- */

/// A threadsafe handle that can hot-reload the underlying config in dev/local.
/// - Enable by setting ANALYZER_HOT_RELOAD=1
/// - Dev-gated: active only if cfg!(debug_assertions) OR SHUTTLE_ENV is "local"/"development".
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<AnalyzerConfig>>,
}

impl ConfigHandle {
    pub fn new(cfg: AnalyzerConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cfg)),
        }
    }

    pub fn validation_enabled(&self) -> bool {
        self.inner
            .read()
            .map(|cfg| cfg.validation.enabled)
            .unwrap_or(false)
    }

    pub fn current(&self) -> AnalyzerConfig {
        self.inner
            .read()
            .map(|cfg| cfg.clone())
            .unwrap_or_default()
    }
}

/// Returns true if we should enable hot reload (dev/local only).
fn hot_reload_enabled() -> bool {
    let want = std::env::var("ANALYZER_HOT_RELOAD")
        .ok()
        .map(|v| v == "1")
        .unwrap_or(false);
    if !want {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("SHUTTLE_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// Start a simple polling watcher on `path` to hot-reload into `handle`.
/// Polls mtime every 2s. Uses only std, no external deps.
pub fn start_hot_reload_thread(handle: ConfigHandle, path: PathBuf) {
    if !hot_reload_enabled() {
        return;
    }

    thread::spawn(move || {
        let poll = Duration::from_secs(2);
        let mut last_mtime: Option<SystemTime> = None;

        loop {
            match fs::metadata(&path).and_then(|m| m.modified()) {
                Ok(mtime) => {
                    let changed = match last_mtime {
                        None => {
                            last_mtime = Some(mtime);
                            false
                        }
                        Some(prev) => mtime > prev,
                    };
                    if changed {
                        // Reload file and swap config atomically
                        if let Ok(content) = fs::read_to_string(&path) {
                            if let Ok(fresh) = AnalyzerConfig::from_toml_str(&content) {
                                if let Ok(mut guard) = handle.inner.write() {
                                    *guard = fresh;
                                }
                            }
                        }
                        last_mtime = Some(mtime);
                    }
                }
                Err(_) => {
                    // File missing or unreadable; keep trying.
                }
            }
            thread::sleep(poll);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn parses_toggle_from_toml() {
        let cfg = AnalyzerConfig::from_toml_str("[validation]\nenabled = true\n").unwrap();
        assert!(cfg.validation.enabled);

        let cfg = AnalyzerConfig::from_toml_str("[validation]\nenabled = false\n").unwrap();
        assert!(!cfg.validation.enabled);
    }

    #[test]
    fn missing_section_defaults_to_disabled() {
        let cfg = AnalyzerConfig::from_toml_str("").unwrap();
        assert!(!cfg.validation.enabled);
    }

    #[test]
    fn bool_env_parsing_is_forgiving() {
        assert_eq!(parse_bool_env(Some("1".into())), Some(true));
        assert_eq!(parse_bool_env(Some(" TRUE ".into())), Some(true));
        assert_eq!(parse_bool_env(Some("off".into())), Some(false));
        assert_eq!(parse_bool_env(Some("maybe".into())), None);
        assert_eq!(parse_bool_env(None), None);
    }

    #[test]
    #[serial]
    fn env_toggle_overrides_file() {
        std::env::set_var(ENV_CONFIG_PATH, "config/analyzer.toml");
        std::env::set_var(ENV_VALIDATION, "1");
        let cfg = AnalyzerConfig::load().unwrap();
        assert!(cfg.validation.enabled);

        std::env::set_var(ENV_VALIDATION, "0");
        let cfg = AnalyzerConfig::load().unwrap();
        assert!(!cfg.validation.enabled);

        std::env::remove_var(ENV_VALIDATION);
        std::env::remove_var(ENV_CONFIG_PATH);
    }

    #[test]
    #[serial]
    fn missing_file_yields_defaults() {
        std::env::set_var(ENV_CONFIG_PATH, "config/definitely-not-here.toml");
        let cfg = AnalyzerConfig::load().unwrap();
        assert_eq!(cfg, AnalyzerConfig::default());
        std::env::remove_var(ENV_CONFIG_PATH);
    }

    #[test]
    fn handle_reflects_swapped_config() {
        let handle = ConfigHandle::new(AnalyzerConfig::default());
        assert!(!handle.validation_enabled());

        let strict = AnalyzerConfig::from_toml_str("[validation]\nenabled = true\n").unwrap();
        *handle.inner.write().unwrap() = strict;
        assert!(handle.validation_enabled());
    }
}
