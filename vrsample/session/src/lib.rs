mod settings;

pub use settings::*;

use serde::{Deserialize, Serialize};
use serde_json as json;
use std::{fs, path::Path};
use vrsample_common::{LogSeverity, anyhow::Result};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    pub application_name: String,
    pub log_level: LogSeverity,
    pub input: InputConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            application_name: "vrsample".into(),
            log_level: LogSeverity::Info,
            input: InputConfig::default(),
        }
    }
}

pub fn load_session(path: &Path) -> Result<SessionConfig> {
    Ok(json::from_str(&fs::read_to_string(path)?)?)
}

pub fn save_session(session: &SessionConfig, path: &Path) -> Result<()> {
    fs::write(path, json::to_string_pretty(session)?)?;

    Ok(())
}
