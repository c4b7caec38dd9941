// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::commands::{exporter, reports, transactions};
use fintrack::store::SqliteStore;
use fintrack::{cli, db};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tempfile::tempdir;

fn leaf(argv: &[&str]) -> clap::ArgMatches {
    let mut m = cli::build_cli().get_matches_from(argv);
    while let Some((_, sub)) = m.subcommand() {
        m = sub.clone();
    }
    m
}

fn seeded(conn: &Connection) -> SqliteStore<'_> {
    let mut store = SqliteStore::new(conn, "ana");
    let rows: [&[&str]; 5] = [
        &["--amount", "1000", "--kind", "revenue", "-d", "Salary", "--date", "2025-01-31"],
        &["--amount", "300", "-d", "Rent", "--date", "2025-01-02"],
        &["--amount", "50", "-d", "Supermarket", "--date", "2025-01-15"],
        &[
            "--amount", "200", "--kind", "revenue", "-d", "Consulting", "--date", "2025-01-20",
            "--accounting", "external", "--currency", "USD", "--rate", "0.9",
        ],
        &["--amount", "80", "-d", "Dinner", "--date", "2025-02-03"],
    ];
    for args in rows {
        let mut argv = vec!["fintrack", "tx", "add"];
        argv.extend_from_slice(args);
        transactions::add(&mut store, None, &leaf(&argv)).unwrap();
    }
    store
}

#[test]
fn january_report_keeps_partitions_apart() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let store = seeded(&conn);

    let r = reports::build(&store, &leaf(&["fintrack", "report", "--month", "2025-01"])).unwrap();
    assert_eq!(r.transactions, 4);
    assert_eq!(r.totals.internal.revenues, Decimal::new(1000, 0));
    assert_eq!(r.totals.internal.expenses, Decimal::new(350, 0));
    assert_eq!(r.totals.internal.profit, Decimal::new(650, 0));
    assert_eq!(r.totals.external.revenues, Decimal::new(180, 0));
    assert_eq!(r.totals.external.expenses, Decimal::ZERO);
    assert_eq!(
        r.internal_categories.expenses,
        vec![
            ("Housing".to_string(), Decimal::new(300, 0)),
            ("Grocery Shopping".to_string(), Decimal::new(50, 0)),
        ]
    );
    assert_eq!(
        r.external_categories.revenues,
        vec![("Professional Services".to_string(), Decimal::new(180, 0))]
    );
}

#[test]
fn range_and_all_time_reports() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let store = seeded(&conn);

    let r = reports::build(
        &store,
        &leaf(&["fintrack", "report", "--from", "2025-01", "--to", "2025-02"]),
    )
    .unwrap();
    assert_eq!(r.transactions, 5);
    assert_eq!(r.totals.internal.expenses, Decimal::new(430, 0));

    let all = reports::build(&store, &leaf(&["fintrack", "report", "--all"])).unwrap();
    assert_eq!(all.transactions, 5);
    assert!(all.start.is_none());

    let feb = reports::build(&store, &leaf(&["fintrack", "report", "--from", "2025-02"])).unwrap();
    assert_eq!(feb.transactions, 1);
    assert_eq!(feb.totals.internal.profit, Decimal::new(-80, 0));
}

#[test]
fn export_writes_csv_and_json_oldest_first() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let store = seeded(&conn);
    let dir = tempdir().unwrap();

    let csv_path = dir.path().join("out.csv");
    assert_eq!(exporter::export_transactions(&store, "csv", &csv_path).unwrap(), 5);
    let mut rdr = csv::Reader::from_path(&csv_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(&headers[1], "date");
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(&rows[0][1], "2025-01-02");
    assert_eq!(&rows[0][3], "Rent");
    assert_eq!(&rows[4][1], "2025-02-03");

    let json_path = dir.path().join("out.json");
    exporter::export_transactions(&store, "json", &json_path).unwrap();
    let text = std::fs::read_to_string(&json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&text).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), 5);
    assert_eq!(arr[0]["description"], "Rent");
    assert_eq!(arr[2]["currency"], "USD");

    assert!(exporter::export_transactions(&store, "xml", &json_path).is_err());
}
