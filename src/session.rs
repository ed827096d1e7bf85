// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Kakeibo", "kakeibo"));

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct SessionFile {
    access_token: String,
    /// `name=value` pair of the refresh cookie set at sign-in, replayed on
    /// every request so the backend can renew the access token.
    refresh_cookie: Option<String>,
}

/// On-disk session state: the access token plus the refresh cookie. The file
/// is written at sign-in and on every successful token refresh, and removed
/// only by an explicit sign-out.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn at(path: PathBuf) -> Self {
        SessionStore { path }
    }

    pub fn default_location() -> Result<Self> {
        let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
            .context("Could not determine platform-specific data dir")?;
        let data_dir = proj.data_dir();
        fs::create_dir_all(data_dir).context("Failed to create data dir")?;
        Ok(SessionStore::at(data_dir.join("session.json")))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read(&self) -> SessionFile {
        // A missing or unreadable file is simply an empty session.
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    fn write(&self, state: &SessionFile) -> io::Result<()> {
        let s = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, s)
    }

    /// Current access token; an absent session reads as the empty string.
    pub fn access_token(&self) -> String {
        self.read().access_token
    }

    pub fn refresh_cookie(&self) -> Option<String> {
        self.read().refresh_cookie
    }

    /// Store a fresh access token, keeping the refresh cookie.
    pub fn store_access_token(&self, token: &str) -> io::Result<()> {
        let mut state = self.read();
        state.access_token = token.to_string();
        self.write(&state)
    }

    /// Begin a new session at sign-in.
    pub fn store(&self, token: &str, refresh_cookie: Option<String>) -> io::Result<()> {
        self.write(&SessionFile {
            access_token: token.to_string(),
            refresh_cookie,
        })
    }

    /// Sign out: drop the session file entirely.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
