// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Partition every category and transaction into one of the two ledger sides.
/// Fixed at category creation; transactions inherit it from their category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKind::Income => write!(f, "income"),
            CategoryKind::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(CategoryKind::Income),
            "expense" => Ok(CategoryKind::Expense),
            other => Err(format!("unknown kind '{}', expected income|expense", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub description: String,
    /// Day of month (1-31) a recurring item is expected on.
    #[serde(default)]
    pub registration_date: Option<u32>,
    /// Expected recurring amount.
    #[serde(default)]
    pub amount: Option<f64>,
}

/// Create/update payload for a category; the backend assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    pub is_deleted: bool,
    pub description: String,
    pub registration_date: Option<u32>,
    pub amount: Option<f64>,
}

impl From<&Category> for CategoryDraft {
    fn from(cat: &Category) -> Self {
        CategoryDraft {
            name: cat.name.clone(),
            kind: cat.kind,
            is_deleted: cat.is_deleted,
            description: cat.description.clone(),
            registration_date: cat.registration_date,
            amount: cat.amount,
        }
    }
}

/// Income before expense, then by name. The order category pickers and
/// listings present everywhere.
pub fn sort_categories(categories: &mut [Category]) {
    categories.sort_by(|a, b| {
        if a.kind != b.kind {
            if a.kind == CategoryKind::Income {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Greater
            }
        } else {
            a.name.cmp(&b.name)
        }
    });
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// ISO date or datetime as returned by the backend; display is day
    /// granularity via [`Transaction::date_only`].
    pub date: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    #[serde(rename = "categoryId")]
    pub category_id: String,
    #[serde(default)]
    pub memo: String,
}

impl Transaction {
    pub fn date_only(&self) -> &str {
        self.date.get(..10).unwrap_or(&self.date)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionDraft {
    pub date: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    #[serde(rename = "categoryId")]
    pub category_id: String,
    pub memo: String,
}

/// Backend-computed aggregate: total of one category's transactions in one
/// month of the requested year. Consumed read-only by the summary engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyCategoryTotal {
    /// "1".."12"
    pub month: String,
    #[serde(rename = "categoryId")]
    pub category_id: String,
    pub total_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentPassword {
    pub current_password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPassword {
    pub new_password: String,
    pub confirm_new_password: String,
}
