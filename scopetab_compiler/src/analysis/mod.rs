//! Declaration and reference pass
//!
//! A [`SymbolTableMachine`] consumes tokens one at a time, driven by the
//! static [`TRANSITIONS`] table. Declarations land in the innermost open
//! scope, every `ID` seen in the resting state is resolved innermost-first
//! and recorded as a [`Reference`](crate::scopes::Reference).
//!
//! ## Flow
//!
//! ```text
//! Token -> Event -> transition(state, event) -> Effect -> next state
//! ```
//!
//! The first error (an undeclared name, a token the current state does not
//! accept, an unmatched `}`) stops the pass.

pub mod error;
pub mod machine;
pub mod state;

pub use error::{AnalysisError, AnalysisResult};
pub use machine::SymbolTableMachine;
pub use state::{
    expected_events, render_dot, transition, Effect, Event, State, Transition, TRANSITIONS,
};
