// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod pipeline;
pub mod prompt;

pub use pipeline::RagPipeline;
pub use prompt::{build_messages, SYSTEM_PROMPT};
