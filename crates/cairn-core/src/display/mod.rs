//! Display formatting for plan documents and operation results.
//!
//! All formatters produce markdown for rich terminal display; the CLI layer
//! decides whether to render it or print it plain. Domain models implement
//! [`std::fmt::Display`] directly in [`models`]; wrapper types provide
//! contextual formatting (the one-line compact status, operation results)
//! without ever mutating the underlying plan.

pub mod datetime;
pub mod models;
pub mod status;

pub use datetime::LocalDateTime;
pub use models::CompactStatus;
pub use status::OperationStatus;
