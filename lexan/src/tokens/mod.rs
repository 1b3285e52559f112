//! Token model for lexan
//!
//! A scan turns raw text into an ordered sequence of [`Token`]s, each pairing
//! the exact consumed text with one [`TokenType`]:
//!
//! - **Keyword**: one of `int float if else while for return`
//! - **Integer / Float**: decimal digits with an optional leading `-`
//! - **String**: text wrapped in `"` quotes
//! - **Operator / Punctuation**: single characters from fixed sets
//! - **Comment**, **Whitespace**
//! - **Invalid Identifier / Include Directive**: malformed or unsupported
//!   input reported as data instead of as an error
//!
//! Tokens produced by the scanner carry a [`Span`](crate::utils::Span), and a
//! complete scan is collected into a [`TokenStream`].

pub mod token;
pub mod token_stream;

pub use token::{Token, TokenType};
pub use token_stream::{validation, SpannedToken, TokenCounts, TokenStream};
