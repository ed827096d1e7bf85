// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use crate::api::ApiClient;
use crate::models::{CurrentPassword, NewPassword};
use crate::utils::prompt_password;

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(client)?,
        Some(("edit", sub)) => edit(client, sub)?,
        Some(("password", _)) => password(client)?,
        _ => {}
    }
    Ok(())
}

fn show(client: &ApiClient) -> Result<()> {
    let profile = client.profile()?;
    println!("Name:  {}", profile.name);
    println!("Email: {}", profile.email);
    Ok(())
}

fn edit(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let mut profile = client.profile()?;
    if let Some(name) = sub.get_one::<String>("name") {
        profile.name = name.clone();
    }
    if let Some(email) = sub.get_one::<String>("email") {
        profile.email = email.clone();
    }
    let updated = client.update_profile(&profile)?;
    println!("Profile updated ({} <{}>)", updated.name, updated.email);
    Ok(())
}

/// Verify the current password first, then set the new one; the backend
/// re-checks both steps.
fn password(client: &ApiClient) -> Result<()> {
    let current = prompt_password("Current password")?;
    client.check_password(&CurrentPassword {
        current_password: current,
    })?;

    let new_password = prompt_password("New password")?;
    let confirm_new = prompt_password("Confirm new password")?;
    if new_password != confirm_new {
        bail!("New passwords do not match");
    }

    client.set_new_password(&NewPassword {
        new_password,
        confirm_new_password: confirm_new,
    })?;
    println!("Password changed");
    Ok(())
}
