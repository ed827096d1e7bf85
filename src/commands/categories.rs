// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};

use crate::api::ApiClient;
use crate::models::{Category, CategoryDraft, CategoryKind, sort_categories};
use crate::utils::{confirm, format_amount, maybe_print_json, parse_amount, parse_day, pretty_table};

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(client, sub)?,
        Some(("list", sub)) => list(client, sub)?,
        Some(("edit", sub)) => edit(client, sub)?,
        Some(("rm", sub)) => rm(client, sub)?,
        Some(("restore", sub)) => restore(client, sub)?,
        Some(("destroy", sub)) => destroy(client, sub)?,
        _ => {}
    }
    Ok(())
}

fn find_category(client: &ApiClient, id: &str) -> Result<Category> {
    let categories = client.categories()?;
    categories
        .into_iter()
        .find(|c| c.id == id)
        .with_context(|| format!("Category '{}' not found", id))
}

fn add(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().clone();
    let kind: CategoryKind = sub
        .get_one::<String>("kind")
        .unwrap()
        .parse()
        .map_err(anyhow::Error::msg)?;
    let description = sub
        .get_one::<String>("description")
        .cloned()
        .unwrap_or_default();
    let registration_date = sub
        .get_one::<String>("day")
        .map(|s| parse_day(s))
        .transpose()?;
    let amount = sub
        .get_one::<String>("amount")
        .map(|s| parse_amount(s))
        .transpose()?;

    // Names are unique per kind among non-deleted categories.
    let existing = client.categories()?;
    if existing
        .iter()
        .any(|c| !c.is_deleted && c.kind == kind && c.name == name)
    {
        bail!("A {} category named '{}' already exists", kind, name);
    }

    let created = client.create_category(&CategoryDraft {
        name,
        kind,
        is_deleted: false,
        description,
        registration_date,
        amount,
    })?;
    println!("Added {} category '{}' ({})", created.kind, created.name, created.id);
    Ok(())
}

fn list(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let deleted_only = sub.get_flag("deleted");

    let mut categories = client.categories()?;
    categories.retain(|c| c.is_deleted == deleted_only);
    sort_categories(&mut categories);

    if !maybe_print_json(json_flag, jsonl_flag, &categories)? {
        let rows: Vec<Vec<String>> = categories
            .iter()
            .map(|c| {
                vec![
                    c.id.clone(),
                    c.name.clone(),
                    c.kind.to_string(),
                    c.description.clone(),
                    c.registration_date.map(|d| d.to_string()).unwrap_or_default(),
                    c.amount.map(format_amount).unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Name", "Kind", "Description", "Day", "Amount"], rows)
        );
    }
    Ok(())
}

fn edit(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let current = find_category(client, id)?;

    let mut draft = CategoryDraft::from(&current);
    if let Some(name) = sub.get_one::<String>("name") {
        draft.name = name.clone();
    }
    if let Some(kind) = sub.get_one::<String>("kind") {
        draft.kind = kind.parse().map_err(anyhow::Error::msg)?;
    }
    if let Some(description) = sub.get_one::<String>("description") {
        draft.description = description.clone();
    }
    if let Some(day) = sub.get_one::<String>("day") {
        draft.registration_date = Some(parse_day(day)?);
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        draft.amount = Some(parse_amount(amount)?);
    }

    let updated = client.update_category(id, &draft)?;
    println!("Updated category '{}'", updated.name);
    Ok(())
}

fn rm(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let category = find_category(client, id)?;

    if !sub.get_flag("yes") {
        let referencing = client.transactions_for_category(id)?;
        let question = format!(
            "'{}' has {} transaction(s). Really delete?",
            category.name,
            referencing.len()
        );
        if !confirm(&question)? {
            println!("Aborted");
            return Ok(());
        }
    }

    client.soft_delete_category(&category)?;
    println!("Deleted category '{}' (kept for history)", category.name);
    Ok(())
}

fn restore(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let category = find_category(client, id)?;
    if !category.is_deleted {
        bail!("Category '{}' is not deleted", category.name);
    }
    client.restore_category(&category)?;
    println!("Restored category '{}'", category.name);
    Ok(())
}

fn destroy(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let category = find_category(client, id)?;

    if !sub.get_flag("yes") {
        let question = format!(
            "Permanently deletes '{}'. This cannot be undone. Continue?",
            category.name
        );
        if !confirm(&question)? {
            println!("Aborted");
            return Ok(());
        }
    }

    client.destroy_category(id)?;
    println!("Destroyed category '{}'", category.name);
    Ok(())
}
