// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::config::{self, API_URL_ENV, Config};

pub fn handle(cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            println!("base_url: {}", cfg.base_url);
            println!("config file: {}", config::config_path()?.display());
            println!("({} overrides the file when set)", API_URL_ENV);
        }
        Some(("set-url", sub)) => {
            let url = sub.get_one::<String>("url").unwrap();
            let new_cfg = Config {
                base_url: url.trim_end_matches('/').to_string(),
            };
            config::save(&new_cfg)?;
            println!("Base URL set to {}", new_cfg.base_url);
        }
        _ => {}
    }
    Ok(())
}
