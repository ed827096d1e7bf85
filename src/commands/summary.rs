// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::api::ApiClient;
use crate::models::{Category, CategoryKind};
use crate::summary::{
    BalanceCell, BalanceRow, CategoryRow, TotalsRow, balance_row, build_rows, column_totals,
};
use crate::utils::{current_year, format_amount, maybe_print_json, pretty_table};

#[derive(Serialize)]
struct AnnualSummary {
    year: i32,
    income: Vec<CategoryRow>,
    income_total: Option<TotalsRow>,
    expense: Vec<CategoryRow>,
    expense_total: Option<TotalsRow>,
    balance: Option<BalanceRow>,
}

pub fn run(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let include_deleted = sub.get_flag("include-deleted");
    let year = sub
        .get_one::<i32>("year")
        .copied()
        .unwrap_or_else(current_year);

    let mut categories = client.categories()?;
    if !include_deleted {
        categories.retain(|c| !c.is_deleted);
    }
    let facts = client.annual_summary(year)?;

    let income_cats: Vec<Category> = categories
        .iter()
        .filter(|c| c.kind == CategoryKind::Income)
        .cloned()
        .collect();
    let expense_cats: Vec<Category> = categories
        .iter()
        .filter(|c| c.kind == CategoryKind::Expense)
        .cloned()
        .collect();

    let income = build_rows(&income_cats, &facts);
    let expense = build_rows(&expense_cats, &facts);
    let income_total = column_totals(&income);
    let expense_total = column_totals(&expense);
    let balance = balance_row(income_total.as_ref(), expense_total.as_ref());

    let summary = AnnualSummary {
        year,
        income,
        income_total,
        expense,
        expense_total,
        balance,
    };
    if maybe_print_json(json_flag, jsonl_flag, &summary)? {
        return Ok(());
    }

    if summary.income.is_empty() && summary.expense.is_empty() {
        println!("No categories to summarize for {}", year);
        return Ok(());
    }

    let mut rows: Vec<Vec<String>> = Vec::new();
    for row in &summary.income {
        rows.push(category_cells(row));
    }
    if let Some(totals) = &summary.income_total {
        rows.push(total_cells("Income total", totals));
    }
    for row in &summary.expense {
        rows.push(category_cells(row));
    }
    if let Some(totals) = &summary.expense_total {
        rows.push(total_cells("Expense total", totals));
    }
    if let Some(balance) = &summary.balance {
        rows.push(balance_cells(balance));
    }

    let headers = [
        "Category", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "Total",
        "Average",
    ];
    println!("Annual summary for {}", year);
    println!("{}", pretty_table(&headers, rows));
    Ok(())
}

fn category_cells(row: &CategoryRow) -> Vec<String> {
    let mut cells = Vec::with_capacity(15);
    cells.push(row.name.clone());
    cells.extend(row.months.iter().copied().map(format_amount));
    cells.push(format_amount(row.sum));
    cells.push(format_amount(row.average));
    cells
}

fn total_cells(label: &str, totals: &TotalsRow) -> Vec<String> {
    let mut cells = Vec::with_capacity(15);
    cells.push(label.to_string());
    cells.extend(totals.months.iter().copied().map(format_amount));
    cells.push(format_amount(totals.sum));
    cells.push(format_amount(totals.average));
    cells
}

fn balance_cells(balance: &BalanceRow) -> Vec<String> {
    let mut cells = Vec::with_capacity(15);
    cells.push("Balance".to_string());
    cells.extend(balance.months.iter().map(balance_text));
    cells.push(balance_text(&balance.sum));
    // The average column takes no part in the balance.
    cells.push(String::new());
    cells
}

fn balance_text(cell: &BalanceCell) -> String {
    match cell {
        BalanceCell::Surplus(v) => format_amount(*v),
        BalanceCell::Deficit(magnitude) => format!("🔺{}", format_amount(*magnitude)),
    }
}
