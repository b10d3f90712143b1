//! Request extractors.

pub mod submission;
pub use submission::Submission;
