// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::api::ApiClient;
use crate::models::{SigninRequest, SignupRequest};
use crate::utils::prompt_password;

pub fn signin(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap().clone();
    let password = match sub.get_one::<String>("password") {
        Some(p) => p.clone(),
        None => prompt_password("Password")?,
    };
    client.signin(&SigninRequest {
        email: email.clone(),
        password,
    })?;
    println!("Signed in as {}", email);
    Ok(())
}

pub fn signup(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().clone();
    let email = sub.get_one::<String>("email").unwrap().clone();
    let password = match sub.get_one::<String>("password") {
        Some(p) => p.clone(),
        None => prompt_password("Password")?,
    };
    client.signup(&SignupRequest {
        name,
        email: email.clone(),
        password,
    })?;
    println!("Account created for {}. Run `kakeibo signin` to start.", email);
    Ok(())
}

pub fn signout(client: &ApiClient) -> Result<()> {
    client.session().clear()?;
    println!("Signed out");
    Ok(())
}
