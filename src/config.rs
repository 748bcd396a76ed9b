use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Feature configuration stored in JSON. Each shortcut entry is a list of
/// accelerator strings; `mode` selects the strategy (0 = Regular,
/// 1 = Low-Latency, unknown values fall back to Regular at activation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub hide_shortcut: Vec<String>,
    #[serde(default)]
    pub reveal_shortcut: Vec<String>,
    #[serde(default = "default_toggle_shortcut")]
    pub toggle_shortcut: Vec<String>,
    #[serde(default = "default_mode")]
    pub mode: u32,
}

fn default_toggle_shortcut() -> Vec<String> {
    vec!["<Super><Shift>v".into()]
}

fn default_mode() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hide_shortcut: Vec::new(),
            reveal_shortcut: Vec::new(),
            toggle_shortcut: default_toggle_shortcut(),
            mode: default_mode(),
        }
    }
}

pub fn config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("screenveil").join("config.json")
}

pub fn load_config() -> Config {
    let path = config_path();
    if path.exists() {
        let data = fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&data).unwrap_or_default()
    } else {
        Config::default()
    }
}

pub fn save_config(config: &Config) {
    let path = config_path();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let data = serde_json::to_string_pretty(config).unwrap_or_default();
    let _ = fs::write(&path, data);
}
