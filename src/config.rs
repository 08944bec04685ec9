use crate::models::{TargetRange, Targets};
use std::{env, path::PathBuf};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/entries.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub targets: Targets,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parsed(&lookup, "PORT").unwrap_or(DEFAULT_PORT);
        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let defaults = Targets::default();
        let targets = Targets {
            po4: TargetRange {
                min: parsed(&lookup, "PO4_TARGET_MIN").unwrap_or(defaults.po4.min),
                max: parsed(&lookup, "PO4_TARGET_MAX").unwrap_or(defaults.po4.max),
            },
            no3: TargetRange {
                min: parsed(&lookup, "NO3_TARGET_MIN").unwrap_or(defaults.no3.min),
                max: parsed(&lookup, "NO3_TARGET_MAX").unwrap_or(defaults.no3.max),
            },
        };

        Self {
            port,
            data_path,
            targets,
        }
    }
}

fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}
