//! Request and response bodies for the summary endpoint.

pub mod summary;

pub use summary::{SummaryRequest, SummaryResponse};
