// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use fintrack::categorize::{Classifier, OpenAiClassifier};
use fintrack::config::Config;
use fintrack::store::SqliteStore;
use fintrack::{cli, commands, db};

/// `--user` is global, so the deepest subcommand that saw it wins.
fn user_flag(m: &clap::ArgMatches) -> Option<&str> {
    let mut found = m.get_one::<String>("user").map(String::as_str);
    let mut cur = m;
    while let Some((_, sub)) = cur.subcommand() {
        if let Some(u) = sub.get_one::<String>("user") {
            found = Some(u.as_str());
        }
        cur = sub;
    }
    found
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config = Config::from_env();
    let conn = db::open_or_init(&config)?;
    let user = config.user_or(user_flag(&matches)).to_string();
    let mut store = SqliteStore::new(&conn, &user);

    let classifier = match config.classifier.clone().map(OpenAiClassifier::new) {
        Some(Ok(c)) => Some(c),
        Some(Err(err)) => {
            log::warn!("remote classifier disabled: {:#}", err);
            None
        }
        None => None,
    };
    let classifier = classifier.as_ref().map(|c| c as &dyn Classifier);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path(&config)?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut store, classifier, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut store, sub)?,
        Some(("method", sub)) => commands::payment_methods::handle(&mut store, sub)?,
        Some(("classify", sub)) => commands::classify::handle(classifier, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
