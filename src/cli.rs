// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn range_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("month")
            .long("month")
            .conflicts_with_all(["from", "to", "all"])
            .help("Single month, YYYY-MM (default: current month)"),
    )
    .arg(
        Arg::new("from")
            .long("from")
            .help("First month of the range, YYYY-MM"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .help("Last month of the range, YYYY-MM (default: --from)"),
    )
    .arg(
        Arg::new("all")
            .long("all")
            .action(ArgAction::SetTrue)
            .conflicts_with_all(["from", "to"])
            .help("All time, including undated transactions"),
    )
}

fn yes_arg(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("yes")
            .long("yes")
            .short('y')
            .action(ArgAction::SetTrue)
            .help("Skip the confirmation prompt"),
    )
}

/// Transaction fields shared by `tx add` and `tx edit`. Defaults are applied
/// by the handlers so that `edit` can tell which fields were given.
fn transaction_args(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("amount")
            .long("amount")
            .required(required)
            .allow_hyphen_values(true)
            .help("Amount; the sign is taken from --kind"),
    )
    .arg(
        Arg::new("kind")
            .long("kind")
            .value_parser(["expense", "revenue"])
            .help("expense (default) or revenue"),
    )
    .arg(
        Arg::new("currency")
            .long("currency")
            .help("EUR (default), USD or GBP"),
    )
    .arg(
        Arg::new("rate")
            .long("rate")
            .help("Exchange rate to EUR (default 1)"),
    )
    .arg(
        Arg::new("method")
            .long("method")
            .help("Payment method (default Cash)"),
    )
    .arg(
        Arg::new("receipt")
            .long("receipt")
            .value_parser(value_parser!(bool))
            .num_args(0..=1)
            .default_missing_value("true")
            .help("Whether a receipt was kept"),
    )
    .arg(
        Arg::new("description")
            .long("description")
            .short('d')
            .help("Free text description"),
    )
    .arg(
        Arg::new("accounting")
            .long("accounting")
            .value_parser(["internal", "external"])
            .help("internal (default) or external"),
    )
    .arg(
        Arg::new("category")
            .long("category")
            .help("Category; suggested from the description when omitted"),
    )
    .arg(Arg::new("date").long("date").help("YYYY-MM-DD"))
    .arg(Arg::new("time").long("time").help("HH:MM"))
    .arg(
        Arg::new("month")
            .long("month")
            .help("Month used when no --date is given, YYYY-MM (default: current)"),
    )
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .about("Personal finance tracker with monthly reports")
        .version(clap::crate_version!())
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .help("User whose records to use (default: $FINTRACK_USER or 'default')"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(transaction_args(
                    Command::new("add").about("Record a transaction"),
                    true,
                ))
                .subcommand(yes_arg(transaction_args(
                    Command::new("edit")
                        .about("Replace fields of a transaction")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                    false,
                )))
                .subcommand(yes_arg(
                    Command::new("rm").about("Delete a transaction").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ))
                .subcommand(json_args(range_args(
                    Command::new("list")
                        .about("Transaction history")
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .short('s')
                                .help("Match description, category or amount"),
                        )
                        .arg(
                            Arg::new("method")
                                .long("method")
                                .action(ArgAction::Append)
                                .help("Only these payment methods (repeatable)"),
                        )
                        .arg(
                            Arg::new("currency")
                                .long("currency")
                                .help("Display currency; non-EUR shows only that currency"),
                        )
                        .arg(
                            Arg::new("sort")
                                .long("sort")
                                .default_value("date")
                                .help("date|amount|type"),
                        )
                        .arg(
                            Arg::new("dir")
                                .long("dir")
                                .default_value("desc")
                                .help("asc|desc|none"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )))
                .subcommand(
                    Command::new("suggest")
                        .about("Past descriptions containing TEXT")
                        .arg(Arg::new("text").required(true))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .default_value("5")
                                .value_parser(value_parser!(usize)),
                        ),
                ),
        )
        .subcommand(json_args(range_args(
            Command::new("report").about("Expenses, revenues and profit by accounting type"),
        )))
        .subcommand(
            Command::new("category")
                .about("Categories")
                .subcommand(Command::new("list"))
                .subcommand(Command::new("add").arg(Arg::new("name").long("name").required(true)))
                .subcommand(
                    Command::new("rename")
                        .arg(Arg::new("old").long("old").required(true))
                        .arg(Arg::new("new").long("new").required(true)),
                )
                .subcommand(yes_arg(
                    Command::new("rm")
                        .about("Remove a category; its transactions move to Other")
                        .arg(Arg::new("name").long("name").required(true)),
                )),
        )
        .subcommand(
            Command::new("method")
                .about("Payment methods")
                .subcommand(Command::new("list"))
                .subcommand(Command::new("add").arg(Arg::new("name").long("name").required(true)))
                .subcommand(yes_arg(
                    Command::new("rm")
                        .about("Remove a payment method; its transactions move to Cash")
                        .arg(Arg::new("name").long("name").required(true)),
                )),
        )
        .subcommand(
            Command::new("classify")
                .about("Suggest a category for a description")
                .arg(Arg::new("description").required(true)),
        )
        .subcommand(
            Command::new("export")
                .about("Export transactions")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn month_conflicts_with_range() {
        let res = build_cli().try_get_matches_from([
            "fintrack", "report", "--month", "2025-01", "--from", "2025-02",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn user_is_global() {
        let m = build_cli()
            .try_get_matches_from(["fintrack", "tx", "list", "--user", "ana"])
            .unwrap();
        let (_, tx) = m.subcommand().unwrap();
        let (_, list) = tx.subcommand().unwrap();
        assert_eq!(list.get_one::<String>("user").map(String::as_str), Some("ana"));
    }
}
