//! Building blocks of the message parser.
//!
//! - [`normalize`] turns raw bytes into logical lines
//! - [`grammar`] recognizes entry headers and resolves timestamps
//! - [`classify`] tells notices and placeholders apart from text

pub mod classify;
pub mod grammar;
pub mod normalize;

pub use grammar::{Grammar, Header, HeaderMatcher};
pub use normalize::{LineNormalizer, LogicalLine, logical_lines};
