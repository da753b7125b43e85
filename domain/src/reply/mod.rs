//! Reply extraction.
//!
//! - [`raw::RawResponse`]: a response body classified as JSON or text
//! - [`extractor::extract_reply`]: turns any body into a display string

pub mod extractor;
pub mod raw;
