use std::{collections::HashMap, fs, path::Path};

use tracing::warn;

use crate::{DEFAULT_API_BASE_URL, DEFAULT_PAGE_SIZE};

pub const SETTINGS_FILE: &str = "artworks.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub page_size: u32,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            page_size: DEFAULT_PAGE_SIZE,
            user_agent: concat!("artwork-browser/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

/// Defaults, then `artworks.toml` in the working directory, then environment.
pub fn load_settings() -> ClientSettings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    load_settings_from(file.as_deref(), |name| std::env::var(name).ok())
}

pub fn load_settings_at(path: &Path) -> ClientSettings {
    let file = fs::read_to_string(path).ok();
    load_settings_from(file.as_deref(), |name| std::env::var(name).ok())
}

pub fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Some(raw) = file_contents {
        match toml::from_str::<HashMap<String, toml::Value>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("api_base_url").and_then(toml::Value::as_str) {
                    settings.api_base_url = v.to_string();
                }
                if let Some(v) = file_cfg.get("page_size").and_then(toml::Value::as_integer) {
                    apply_page_size(&mut settings, u32::try_from(v).ok());
                }
                if let Some(v) = file_cfg.get("user_agent").and_then(toml::Value::as_str) {
                    settings.user_agent = v.to_string();
                }
            }
            Err(err) => warn!("ignoring unreadable {SETTINGS_FILE}: {err}"),
        }
    }

    if let Some(v) = env("ARTWORKS_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("APP__PAGE_SIZE") {
        apply_page_size(&mut settings, v.trim().parse::<u32>().ok());
    }

    if let Some(v) = env("APP__USER_AGENT") {
        settings.user_agent = v;
    }

    settings
}

fn apply_page_size(settings: &mut ClientSettings, page_size: Option<u32>) {
    if let Some(page_size) = page_size.filter(|size| *size > 0) {
        settings.page_size = page_size;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
