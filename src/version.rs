// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
