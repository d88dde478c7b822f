// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use ludex_app::{
    AppSettings, DESKTOP_MIN_WIDTH, MENU_FEEDBACK, RecoveryCompletion, SEARCH_DEBOUNCE,
    SidebarSettings,
};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "ludex";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_COLUMN_PX: u32 = 8;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub catalog: Catalog,
    #[serde(default)]
    pub recovery: Recovery,
    #[serde(default)]
    pub logging: Logging,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ui: Ui::default(),
            catalog: Catalog::default(),
            recovery: Recovery::default(),
            logging: Logging::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub desktop_min_width: Option<u32>,
    pub column_px: Option<u32>,
    pub search_debounce: Option<String>,
    pub menu_feedback: Option<String>,
    pub close_sidebar_on_select: Option<bool>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            desktop_min_width: Some(DESKTOP_MIN_WIDTH),
            column_px: Some(DEFAULT_COLUMN_PX),
            search_debounce: Some("180ms".to_owned()),
            menu_feedback: Some("140ms".to_owned()),
            close_sidebar_on_select: Some(false),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Recovery {
    pub after_reset: Option<String>,
}

impl Default for Recovery {
    fn default() -> Self {
        Self {
            after_reset: Some("first_step".to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("LUDEX_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set LUDEX_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and keep values under [ui], [catalog], [recovery], and [logging]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.ui.desktop_min_width == Some(0) {
            bail!(
                "ui.desktop_min_width in {} must be positive, got 0",
                path.display()
            );
        }
        if self.ui.column_px == Some(0) {
            bail!("ui.column_px in {} must be positive, got 0", path.display());
        }

        for (key, value) in [
            ("ui.search_debounce", &self.ui.search_debounce),
            ("ui.menu_feedback", &self.ui.menu_feedback),
        ] {
            if let Some(raw) = value {
                let parsed = parse_duration(raw)
                    .with_context(|| format!("{key} in {}", path.display()))?;
                if parsed <= Duration::ZERO {
                    bail!("{key} in {} must be positive, got {raw}", path.display());
                }
            }
        }

        if let Some(raw) = &self.recovery.after_reset {
            if RecoveryCompletion::parse(raw).is_none() {
                bail!(
                    "recovery.after_reset in {} must be \"first_step\" or \"sign_in\", got {raw:?}",
                    path.display()
                );
            }
        }

        if let Some(level) = &self.logging.level {
            tracing_subscriber::EnvFilter::try_new(level).with_context(|| {
                format!(
                    "logging.level in {} is not a valid filter (for example \"info\" or \"ludex_app=debug\")",
                    path.display()
                )
            })?;
        }

        Ok(())
    }

    pub fn app_settings(&self) -> Result<AppSettings> {
        Ok(AppSettings {
            sidebar: SidebarSettings {
                desktop_min_width: self.ui.desktop_min_width.unwrap_or(DESKTOP_MIN_WIDTH),
                close_on_select: self.ui.close_sidebar_on_select.unwrap_or(false),
            },
            search_debounce: self
                .ui
                .search_debounce
                .as_deref()
                .map(parse_duration)
                .transpose()?
                .unwrap_or(SEARCH_DEBOUNCE),
            menu_feedback: self
                .ui
                .menu_feedback
                .as_deref()
                .map(parse_duration)
                .transpose()?
                .unwrap_or(MENU_FEEDBACK),
            recovery_completion: self.recovery_completion(),
        })
    }

    pub fn column_px(&self) -> u32 {
        self.ui.column_px.unwrap_or(DEFAULT_COLUMN_PX)
    }

    pub fn recovery_completion(&self) -> RecoveryCompletion {
        self.recovery
            .after_reset
            .as_deref()
            .and_then(RecoveryCompletion::parse)
            .unwrap_or_default()
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog.path.as_ref().map(PathBuf::from)
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(file) = &self.logging.file {
            return Ok(PathBuf::from(file));
        }
        let data_root = dirs::data_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [logging].file in the config")
        })?;
        Ok(data_root.join(APP_NAME).join("ludex.log"))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# ludex config\n# Place this file at: {}\n\nversion = 1\n\n[ui]\n# Sidebar opens only when the window is at least this many logical pixels wide.\ndesktop_min_width = {}\n# Logical pixels per terminal column.\ncolumn_px = {}\nsearch_debounce = \"180ms\"\nmenu_feedback = \"140ms\"\nclose_sidebar_on_select = false\n\n[catalog]\n# Optional. The built-in demo catalog is used when unset.\n# path = \"/absolute/path/to/catalog.toml\"\n\n[recovery]\n# \"first_step\" or \"sign_in\"\nafter_reset = \"first_step\"\n\n[logging]\nlevel = \"{}\"\n# Optional. Default is the platform data dir (for example ~/.local/share/ludex/ludex.log)\n# file = \"/absolute/path/to/ludex.log\"\n",
            path.display(),
            DESKTOP_MIN_WIDTH,
            DEFAULT_COLUMN_PX,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(mins * 60));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 180ms or 1s)")
}
