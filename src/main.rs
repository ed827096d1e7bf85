// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use kakeibo::{api::ApiClient, cli, commands, config, session::SessionStore};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let cfg = config::load()?;
    let session = SessionStore::default_location()?;
    let client = ApiClient::new(&cfg.base_url, session)?;

    match matches.subcommand() {
        Some(("signin", sub)) => commands::auth::signin(&client, sub)?,
        Some(("signup", sub)) => commands::auth::signup(&client, sub)?,
        Some(("signout", _)) => commands::auth::signout(&client)?,
        Some(("category", sub)) => commands::categories::handle(&client, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&client, sub)?,
        Some(("summary", sub)) => commands::summary::run(&client, sub)?,
        Some(("profile", sub)) => commands::profile::handle(&client, sub)?,
        Some(("config", sub)) => commands::config::handle(&cfg, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
