// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON value per line"),
    )
}

fn yes_flag(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("yes")
            .long("yes")
            .short('y')
            .action(ArgAction::SetTrue)
            .help("Skip the confirmation prompt"),
    )
}

pub fn build_cli() -> Command {
    Command::new("kakeibo")
        .about("Household income/expense ledger, backed by a remote ledger API")
        .version(clap::crate_version!())
        .arg_required_else_help(true)
        .subcommand(
            Command::new("signin")
                .about("Sign in and store the session")
                .arg(Arg::new("email").long("email").required(true))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("Prompted for when omitted"),
                ),
        )
        .subcommand(
            Command::new("signup")
                .about("Create an account")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .help("Prompted for when omitted"),
                ),
        )
        .subcommand(Command::new("signout").about("Drop the stored session"))
        .subcommand(
            Command::new("category")
                .about("Manage income/expense categories")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Create a category")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("day")
                                .long("day")
                                .help("Day of month (1-31) a recurring item is expected on"),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .help("Expected recurring amount"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List categories").arg(
                        Arg::new("deleted")
                            .long("deleted")
                            .action(ArgAction::SetTrue)
                            .help("Show soft-deleted categories instead of active ones"),
                    ),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Update category fields")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("day").long("day"))
                        .arg(Arg::new("amount").long("amount")),
                )
                .subcommand(yes_flag(
                    Command::new("rm")
                        .about("Soft-delete a category (kept for history)")
                        .arg(Arg::new("id").required(true)),
                ))
                .subcommand(
                    Command::new("restore")
                        .about("Undo a soft delete")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(yes_flag(
                    Command::new("destroy")
                        .about("Permanently delete a category")
                        .arg(Arg::new("id").required(true)),
                )),
        )
        .subcommand(
            Command::new("tx")
                .about("Manage transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .required(true)
                                .help("YYYY-MM-DD"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .help("Category id; the ledger side follows the category"),
                        )
                        .arg(Arg::new("memo").long("memo")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List one month's transactions")
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .help("YYYY-MM, defaults to the current month"),
                        )
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .help("List by category id instead of by month"),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Update a transaction")
                        .arg(Arg::new("id").required(true))
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .help("Month (YYYY-MM) the transaction lives in; defaults to the current month"),
                        )
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("memo").long("memo")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("cell")
                        .about("List the transactions behind one summary cell")
                        .arg(Arg::new("category-id").required(true))
                        .arg(Arg::new("month").required(true).help("1-12")),
                )),
        )
        .subcommand(json_flags(
            Command::new("summary")
                .about("Annual income/expense/balance table")
                .arg(
                    Arg::new("year")
                        .long("year")
                        .value_parser(value_parser!(i32))
                        .help("Defaults to the current year"),
                )
                .arg(
                    Arg::new("include-deleted")
                        .long("include-deleted")
                        .action(ArgAction::SetTrue)
                        .help("Include soft-deleted categories"),
                ),
        ))
        .subcommand(
            Command::new("profile")
                .about("Account profile and password")
                .subcommand_required(true)
                .subcommand(Command::new("show").about("Show the profile"))
                .subcommand(
                    Command::new("edit")
                        .about("Update profile fields")
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("email").long("email")),
                )
                .subcommand(
                    Command::new("password").about("Change the password (interactive)"),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Client configuration")
                .subcommand_required(true)
                .subcommand(Command::new("show").about("Show the effective configuration"))
                .subcommand(
                    Command::new("set-url")
                        .about("Set the backend base URL")
                        .arg(Arg::new("url").required(true)),
                ),
        )
}
