// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const API_URL_ENV: &str = "KAKEIBO_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the ledger backend, no trailing slash.
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from("com.alphavelocity", "Kakeibo", "kakeibo")
        .context("Could not determine platform-specific config dir")?;
    let dir = proj.config_dir();
    fs::create_dir_all(dir).context("Failed to create config dir")?;
    Ok(dir.join("config.json"))
}

/// Config file if present, defaults otherwise; the environment variable
/// `KAKEIBO_API_URL` overrides either.
pub fn load() -> Result<Config> {
    let p = config_path()?;
    let mut cfg = if p.exists() {
        let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
        serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))?
    } else {
        Config::default()
    };
    if let Ok(url) = std::env::var(API_URL_ENV) {
        if !url.is_empty() {
            cfg.base_url = url;
        }
    }
    cfg.base_url = cfg.base_url.trim_end_matches('/').to_string();
    Ok(cfg)
}

pub fn save(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = serde_json::to_string_pretty(cfg)?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}
