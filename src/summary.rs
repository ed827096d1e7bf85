// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Annual summary aggregation.
//!
//! Turns the backend's flat per-category-per-month totals plus the category
//! catalog into the rows of the annual table: one row per category with
//! twelve month cells, a year sum and a monthly average, per-column section
//! totals, and the income-minus-expense balance with its tagged deficit
//! representation.
//!
//! Everything here is a pure read-side view: no network, no mutation of the
//! inputs, and no rendering — amounts stay unrounded until display.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Category, MonthlyCategoryTotal};

pub const MONTHS: usize = 12;

/// One category's year: twelve month cells plus the derived sum and average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub category_id: String,
    pub name: String,
    pub months: [f64; MONTHS],
    pub sum: f64,
    pub average: f64,
}

/// One row per input category, in input order. The caller decides which
/// categories go in (one kind at a time, soft-deleted filtered or not); the
/// engine takes the list as given.
///
/// Facts are keyed by `(categoryId, month)`; a month with no fact is zero,
/// and the first fact wins if the backend ever repeats a cell.
pub fn build_rows(categories: &[Category], facts: &[MonthlyCategoryTotal]) -> Vec<CategoryRow> {
    let mut by_cell: HashMap<(&str, u32), f64> = HashMap::new();
    for fact in facts {
        let Ok(month) = fact.month.parse::<u32>() else {
            continue;
        };
        by_cell
            .entry((fact.category_id.as_str(), month))
            .or_insert(fact.total_amount);
    }

    categories
        .iter()
        .map(|cat| {
            let mut months = [0.0; MONTHS];
            for (idx, cell) in months.iter_mut().enumerate() {
                *cell = by_cell
                    .get(&(cat.id.as_str(), idx as u32 + 1))
                    .copied()
                    .unwrap_or(0.0);
            }
            let sum: f64 = months.iter().sum();
            CategoryRow {
                category_id: cat.id.clone(),
                name: cat.name.clone(),
                months,
                sum,
                average: sum / MONTHS as f64,
            }
        })
        .collect()
}

/// Per-column arithmetic totals over a section's rows, including the sum and
/// average columns.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct TotalsRow {
    pub months: [f64; MONTHS],
    pub sum: f64,
    pub average: f64,
}

/// `None` for an empty section — callers treat "no rows" specially rather
/// than rendering a zero-filled total.
pub fn column_totals(rows: &[CategoryRow]) -> Option<TotalsRow> {
    if rows.is_empty() {
        return None;
    }
    let mut totals = TotalsRow::default();
    for row in rows {
        for (total, value) in totals.months.iter_mut().zip(row.months.iter()) {
            *total += value;
        }
        totals.sum += row.sum;
        totals.average += row.average;
    }
    Some(totals)
}

/// A balance value keeps its sign as an explicit variant: downstream
/// rendering branches on it, so a deficit is never coerced into a plain
/// negative number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceCell {
    Surplus(f64),
    /// Stored as the positive magnitude.
    Deficit(f64),
}

impl BalanceCell {
    fn from_diff(diff: f64) -> Self {
        if diff >= 0.0 {
            BalanceCell::Surplus(diff)
        } else {
            BalanceCell::Deficit(-diff)
        }
    }

    pub fn is_deficit(&self) -> bool {
        matches!(self, BalanceCell::Deficit(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceRow {
    pub months: [BalanceCell; MONTHS],
    pub sum: BalanceCell,
}

/// Income minus expense per month column and for the year sum; the average
/// column takes no part in the balance. A side with no rows counts as zeros;
/// with neither side present there is no balance to report.
pub fn balance_row(
    income: Option<&TotalsRow>,
    expense: Option<&TotalsRow>,
) -> Option<BalanceRow> {
    if income.is_none() && expense.is_none() {
        return None;
    }
    let zero = TotalsRow::default();
    let income = income.unwrap_or(&zero);
    let expense = expense.unwrap_or(&zero);

    let mut months = [BalanceCell::Surplus(0.0); MONTHS];
    for (idx, cell) in months.iter_mut().enumerate() {
        *cell = BalanceCell::from_diff(income.months[idx] - expense.months[idx]);
    }
    Some(BalanceRow {
        months,
        sum: BalanceCell::from_diff(income.sum - expense.sum),
    })
}
