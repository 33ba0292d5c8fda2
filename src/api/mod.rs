// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod handlers;
pub mod http_server;

pub use errors::{ApiError, ErrorResponse};
pub use handlers::{HealthResponse, HistoryEntry, HistoryResponse};
pub use http_server::{build_router, start_server, AppState};
