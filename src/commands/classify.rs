// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::categorize::{Classifier, categorize};

pub fn handle(classifier: Option<&dyn Classifier>, sub: &clap::ArgMatches) -> Result<()> {
    let description = sub
        .get_one::<String>("description")
        .map(String::as_str)
        .unwrap_or("");
    println!("{}", categorize(description, classifier));
    Ok(())
}
