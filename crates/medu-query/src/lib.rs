//! Read-only query API for Medu content.
//!
//! [`ContentQuery`] is the only surface consumers need: lookup by id, by
//! level, by tag and by cross reference. Absence is reported as a
//! [`QueryError`] whose [`QueryError::is_not_found`] is `true`.

pub mod error;
pub mod query;

pub use error::{QueryError, QueryResult};
pub use query::{ContentQuery, ReferenceEdge};
