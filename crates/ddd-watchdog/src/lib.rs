// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ddd-watchdog: circuit breaker, event router, extraction worker, and the
//! supervising watchdog process that owns it (§4.2–§4.3, §4.7–§4.9).

pub mod breaker;
pub mod error;
pub mod router;
pub mod supervisor;
pub mod ui;
pub mod worker;

pub use breaker::{Admission, CircuitBreaker};
pub use error::WatchdogError;
pub use router::{route, RouteDecision};
pub use supervisor::{process_exists, StatusReport, Supervisor, WorkerStatus};
pub use ui::{Progress, Stage, Terminal};
pub use worker::{log_path, Worker, WorkerStats};
