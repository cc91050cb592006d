//! Capability layer: each service does one thing and knows nothing about
//! the overall flow.

pub mod notifier;
pub mod report_parser;
pub mod subject_resolver;

pub use notifier::{AttemptStatus, TelegramNotifier};
pub use report_parser::{FieldCountPolicy, FieldOutcome, ReportParser, SkipReason};
pub use subject_resolver::SubjectResolver;
