// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::commands::confirm;
use crate::models::is_default_category;
use crate::store::CategoryStore;
use crate::utils::pretty_table;

pub fn handle<S: CategoryStore>(store: &mut S, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?;
            store.add_category(name)?;
            println!("Added category '{}'", name.trim());
        }
        Some(("list", _)) => {
            let data: Vec<Vec<String>> = store
                .categories()?
                .into_iter()
                .map(|c| {
                    let origin = if is_default_category(&c) { "default" } else { "custom" };
                    vec![c, origin.to_string()]
                })
                .collect();
            println!("{}", pretty_table(&["Category", "Origin"], data));
        }
        Some(("rename", sub)) => {
            let old = required(sub, "old")?;
            let new = required(sub, "new")?;
            let moved = store.rename_category(old, new)?;
            println!(
                "Renamed category '{}' to '{}' ({} transactions updated)",
                old,
                new.trim(),
                moved
            );
        }
        Some(("rm", sub)) => {
            let name = required(sub, "name")?;
            let prompt = format!(
                "Remove category '{}'? Its transactions move to Other.",
                name
            );
            if !confirm(&prompt, sub.get_flag("yes"))? {
                println!("Aborted");
                return Ok(());
            }
            let moved = store.remove_category(name)?;
            println!(
                "Removed category '{}' ({} transactions moved to Other)",
                name, moved
            );
        }
        _ => {}
    }
    Ok(())
}

pub(crate) fn required<'a>(sub: &'a clap::ArgMatches, id: &str) -> Result<&'a str> {
    sub.get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("--{} is required", id))
}
