//! Data types shared across the relay.

pub mod attendance;
pub mod report;
pub mod session;

pub use attendance::{AttendanceEntry, AttendanceSummary};
pub use report::RawReportRow;
pub use session::{Credentials, SessionToken};
