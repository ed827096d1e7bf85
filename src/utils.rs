// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use numfmt::{Formatter, Precision};
use once_cell::sync::Lazy;

const UA: &str = concat!(
    "kakeibo/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/kakeibo)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

/// Month column index of the annual table, 1-12.
pub fn parse_month_number(s: &str) -> Result<u32> {
    let m: u32 = s
        .parse()
        .with_context(|| format!("Invalid month '{}', expected 1-12", s))?;
    if !(1..=12).contains(&m) {
        anyhow::bail!("Invalid month '{}', expected 1-12", s);
    }
    Ok(m)
}

/// Day of month for recurring categories, 1-31.
pub fn parse_day(s: &str) -> Result<u32> {
    let d: u32 = s
        .parse()
        .with_context(|| format!("Invalid day '{}', expected 1-31", s))?;
    if !(1..=31).contains(&d) {
        anyhow::bail!("Invalid day '{}', expected 1-31", s);
    }
    Ok(d)
}

/// Transaction amounts are non-negative magnitudes; the ledger side comes
/// from the category kind.
pub fn parse_amount(s: &str) -> Result<f64> {
    let v: f64 = s
        .parse()
        .with_context(|| format!("Invalid amount '{}'", s))?;
    if !v.is_finite() || v < 0.0 {
        anyhow::bail!("Invalid amount '{}', expected a non-negative number", s);
    }
    Ok(v)
}

pub fn current_month() -> String {
    chrono::Local::now().format("%Y-%m").to_string()
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Display form of an amount: floored, thousands-separated. Aggregation runs
/// on the unrounded values; flooring happens only here.
pub fn format_amount(value: f64) -> String {
    static FMT: Lazy<Formatter> = Lazy::new(|| {
        Formatter::new()
            .separator(',')
            .unwrap()
            .precision(Precision::Decimals(0))
    });
    FMT.fmt_string(value.floor())
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N]: ", question);
    io::stdout().flush().ok();
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

pub fn prompt_password(label: &str) -> Result<String> {
    rpassword::prompt_password(format!("{}: ", label)).context("Failed to read password")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_amount_floors_before_separating() {
        assert_eq!(format_amount(1234567.89), "1,234,567");
        assert_eq!(format_amount(999.999), "999");
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn parse_amount_rejects_negatives() {
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("abc").is_err());
        assert_eq!(parse_amount("1200.5").unwrap(), 1200.5);
    }

    #[test]
    fn parse_month_wants_zero_padded() {
        assert!(parse_month("2025-08").is_ok());
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("August").is_err());
    }
}
