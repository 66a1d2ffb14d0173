// ABOUTME: JSON output for petplates-cli
// ABOUTME: Results go to stdout; logs stay on stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

use petplates::core::errors::AppResult;
use serde::Serialize;

/// Print a value as JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> AppResult<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
