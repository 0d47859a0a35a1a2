//! Utility functions for string formatting and manipulation.

pub mod text;

// Re-export commonly used functions at module level
pub use text::{dedup_sorted, is_california, split_list, title_case};
