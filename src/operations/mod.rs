//! Explicit operations a caller performs on a sample outside validation.

pub mod archive;

pub use archive::{archive_sample, archive_with_derived, ArchiveError};
