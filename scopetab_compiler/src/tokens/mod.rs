//! Token model and wire reader
//!
//! Tokens are produced by an external lexer and arrive one group per
//! `<KIND,VALUE,LINE>` (or `<KIND,LINE>` for structural kinds). This module
//! turns that text into a lazy stream of [`Token`] values.
//!
//! ## Key Components
//!
//! - **[`TokenKind`]** - The eight kinds the pass understands plus `Other`
//! - **[`Token`]** - Kind, optional text and source line
//! - **[`TokenReader`]** - Single-pass iterator over any `BufRead`
//! - **[`parse_token`]** - Parser for one group
//!
//! Malformed groups never reach the state machine: the reader logs them and
//! moves on. Limit violations and I/O failures are returned as errors and end
//! the stream.

pub mod error;
pub mod reader;
pub mod token;

pub use error::{TokenFormatError, TokenResult};
pub use reader::{parse_token, parse_tokens, split_groups, TokenReader};
pub use token::{Token, TokenKind};
