// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::commands::categories::required;
use crate::commands::confirm;
use crate::models::is_default_payment_method;
use crate::store::PaymentMethodStore;
use crate::utils::pretty_table;

pub fn handle<S: PaymentMethodStore>(store: &mut S, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?;
            store.add_payment_method(name)?;
            println!("Added payment method '{}'", name.trim());
        }
        Some(("list", _)) => {
            let data: Vec<Vec<String>> = store
                .payment_methods()?
                .into_iter()
                .map(|pm| {
                    let origin = if is_default_payment_method(&pm) {
                        "default"
                    } else {
                        "custom"
                    };
                    vec![pm, origin.to_string()]
                })
                .collect();
            println!("{}", pretty_table(&["Payment method", "Origin"], data));
        }
        Some(("rm", sub)) => {
            let name = required(sub, "name")?;
            let prompt = format!(
                "Remove payment method '{}'? Its transactions move to Cash.",
                name
            );
            if !confirm(&prompt, sub.get_flag("yes"))? {
                println!("Aborted");
                return Ok(());
            }
            let moved = store.remove_payment_method(name)?;
            println!(
                "Removed payment method '{}' ({} transactions moved to Cash)",
                name, moved
            );
        }
        _ => {}
    }
    Ok(())
}
