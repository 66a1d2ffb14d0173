// ABOUTME: Command modules for petplates-cli
// ABOUTME: Recipe analysis and ingredient lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PetPlates

pub mod analyze;
pub mod lookup;
