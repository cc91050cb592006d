//! # Attendance Relay
//!
//! Relays caller credentials to a third-party college portal, captures
//! the authenticated session, and later replays it to fetch a CSV
//! attendance export, which it normalizes into a JSON summary.
//!
//! ## Architecture
//!
//! The crate is layered; each layer only calls downward:
//!
//! ### ① Clients
//! - `clients/` — upstream transport. `PortalClient` owns the login
//!   handshake, cookie capture, report fetch, and best-effort logout.
//!   All transport failures become typed errors at this boundary.
//!
//! ### ② Services
//! - `services/` — single-purpose capabilities, flow-agnostic.
//! - `ReportParser` — the ad-hoc CSV export → `RawReportRow` → summary.
//! - `SubjectResolver` — subject code → display name, total function.
//! - `TelegramNotifier` — detached side-channel for login attempts.
//!
//! ### ③ Orchestration
//! - `orchestrator::App` — composes the layers into the two caller
//!   operations: `login` and `get_attendance`.
//!
//! ### ④ HTTP layer
//! - `api/` — axum routes and handlers; extraction, delegation, and
//!   error-to-status mapping only.
//!
//! Sessions are explicit: `login` hands the caller an opaque
//! `SessionToken`, and every later call presents it. There is no
//! server-side session state.

pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

pub use clients::PortalClient;
pub use config::Config;
pub use error::{Error, Result};
pub use models::{AttendanceEntry, AttendanceSummary, Credentials, RawReportRow, SessionToken};
pub use orchestrator::App;
pub use services::{ReportParser, SubjectResolver};
