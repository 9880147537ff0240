// Text normalization — raw HTML to comparable plain text.

pub mod extract;
pub mod normalize;

pub use normalize::{collapse_whitespace, is_normalized, normalize, normalize_bytes, NormalizeError};
