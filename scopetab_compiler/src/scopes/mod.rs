//! Scope model
//!
//! A [`ScopeStack`] holds the scopes visible at the current token. Closed
//! scopes leave the stack as plain [`Scope`] values for the archive.

pub mod error;
pub mod stack;
pub mod table;

pub use error::{ScopeError, ScopeResult};
pub use stack::ScopeStack;
pub use table::{Declaration, DeclarationKind, Reference, Scope};
