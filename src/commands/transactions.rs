// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use anyhow::{Context, Result, bail};

use crate::api::ApiClient;
use crate::models::{Transaction, TransactionDraft};
use crate::utils::{
    current_month, format_amount, maybe_print_json, parse_amount, parse_date, parse_month,
    parse_month_number, pretty_table,
};

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(client, sub)?,
        Some(("list", sub)) => list(client, sub)?,
        Some(("edit", sub)) => edit(client, sub)?,
        Some(("rm", sub)) => rm(client, sub)?,
        Some(("cell", sub)) => cell(client, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category_id = sub.get_one::<String>("category").unwrap();
    let memo = sub.get_one::<String>("memo").cloned().unwrap_or_default();

    let categories = client.categories()?;
    let category = categories
        .iter()
        .find(|c| &c.id == category_id)
        .with_context(|| format!("Category '{}' not found", category_id))?;
    if category.is_deleted {
        bail!(
            "Category '{}' is deleted; restore it before recording against it",
            category.name
        );
    }

    let created = client.create_transaction(&TransactionDraft {
        date: date.to_string(),
        amount,
        kind: category.kind,
        category_id: category.id.clone(),
        memo,
    })?;
    println!(
        "Recorded {} {} on {} in '{}' ({})",
        category.kind,
        format_amount(amount),
        date,
        category.name,
        created.id
    );
    Ok(())
}

fn print_transactions(
    client: &ApiClient,
    transactions: &[Transaction],
    json_flag: bool,
    jsonl_flag: bool,
) -> Result<()> {
    if maybe_print_json(json_flag, jsonl_flag, &transactions)? {
        return Ok(());
    }
    let categories = client.categories()?;
    let names: HashMap<&str, &str> = categories
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();
    let rows: Vec<Vec<String>> = transactions
        .iter()
        .map(|t| {
            vec![
                t.id.clone(),
                t.date_only().to_string(),
                t.kind.to_string(),
                names
                    .get(t.category_id.as_str())
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| t.category_id.clone()),
                format_amount(t.amount),
                t.memo.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Date", "Kind", "Category", "Amount", "Memo"], rows)
    );
    Ok(())
}

fn list(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let transactions = if let Some(category_id) = sub.get_one::<String>("category") {
        client.transactions_for_category(category_id)?
    } else {
        let month = match sub.get_one::<String>("month") {
            Some(m) => parse_month(m)?,
            None => current_month(),
        };
        client.transactions_for_month(&month)?
    };

    print_transactions(client, &transactions, json_flag, jsonl_flag)
}

fn edit(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => current_month(),
    };

    let working_set = client.transactions_for_month(&month)?;
    let current = working_set
        .iter()
        .find(|t| &t.id == id)
        .with_context(|| {
            format!(
                "Transaction '{}' not found in {} (pass --month for another month)",
                id, month
            )
        })?;

    let mut draft = TransactionDraft {
        date: current.date_only().to_string(),
        amount: current.amount,
        kind: current.kind,
        category_id: current.category_id.clone(),
        memo: current.memo.clone(),
    };
    if let Some(date) = sub.get_one::<String>("date") {
        draft.date = parse_date(date)?.to_string();
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        draft.amount = parse_amount(amount)?;
    }
    if let Some(memo) = sub.get_one::<String>("memo") {
        draft.memo = memo.clone();
    }
    if let Some(category_id) = sub.get_one::<String>("category") {
        let categories = client.categories()?;
        let category = categories
            .iter()
            .find(|c| &c.id == category_id)
            .with_context(|| format!("Category '{}' not found", category_id))?;
        // The ledger side always follows the category.
        draft.category_id = category.id.clone();
        draft.kind = category.kind;
    }

    client.update_transaction(id, &draft)?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn rm(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    client.delete_transaction(id)?;
    println!("Deleted transaction {}", id);
    Ok(())
}

fn cell(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let category_id = sub.get_one::<String>("category-id").unwrap();
    let month = parse_month_number(sub.get_one::<String>("month").unwrap())?;

    let transactions = client.transactions_in_cell(category_id, month)?;
    print_transactions(client, &transactions, json_flag, jsonl_flag)
}
