//! Static documents published alongside the data-driven pages.

pub mod markdown;

pub use markdown::{MarkdownDocument, PRIVACY_POLICY, TERMS_OF_USE};
