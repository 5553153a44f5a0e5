//! States, events and the declarative transition table

use crate::tokens::TokenKind;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    /// Normal scanning
    Enter,
    /// Type seen, awaiting a name
    Dec,
    /// Name seen, role not yet known
    UndecidedDec,
    /// Inside a parameter list, awaiting a type or `)`
    FunParams,
    /// Parameter type seen, awaiting its name
    BeforeParamType,
    /// Parameter bound, awaiting `,` or `)`
    ParamNamed,
    /// Parameter list closed, awaiting `{`
    BeforeFunBody,
    /// Resolving a use. Left immediately.
    Ref,
}

impl State {
    pub const ALL: [State; 8] = [
        State::Enter,
        State::Dec,
        State::UndecidedDec,
        State::FunParams,
        State::BeforeParamType,
        State::ParamNamed,
        State::BeforeFunBody,
        State::Ref,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            State::Enter => "enter",
            State::Dec => "dec",
            State::UndecidedDec => "undecided_dec",
            State::FunParams => "fun_params",
            State::BeforeParamType => "before_param_type",
            State::ParamNamed => "param_named",
            State::BeforeFunBody => "before_fun_body",
            State::Ref => "ref",
        }
    }

    /// States where the machine may rest between tokens
    pub fn is_resting(&self) -> bool {
        *self != State::Ref
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine input, one per known token kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    Type,
    Id,
    Coma,
    Semicolon,
    OpenPar,
    ClosePar,
    OpenBrace,
    CloseBrace,
}

impl Event {
    pub fn from_kind(kind: &TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Type => Event::Type,
            TokenKind::Id => Event::Id,
            TokenKind::Coma => Event::Coma,
            TokenKind::Semicolon => Event::Semicolon,
            TokenKind::OpenPar => Event::OpenPar,
            TokenKind::ClosePar => Event::ClosePar,
            TokenKind::OpenBrace => Event::OpenBrace,
            TokenKind::CloseBrace => Event::CloseBrace,
            TokenKind::Other(_) => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Event::Type => "TYPE",
            Event::Id => "ID",
            Event::Coma => "COMA",
            Event::Semicolon => "SEMICOLON",
            Event::OpenPar => "OPAR",
            Event::ClosePar => "CPAR",
            Event::OpenBrace => "OBRACE",
            Event::CloseBrace => "CBRACE",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side effect run when a transition fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Start a declaration; clears any pending name
    BeginDeclaration,
    /// Hold the name until its role is known
    CapturePending,
    /// Pending name becomes a variable in the current scope
    CommitVariable,
    /// Pending name becomes a function in the current scope; a parameter scope is pushed
    CommitFunction,
    /// Bind the name as a parameter in the innermost scope
    BindParameter,
    CloseParameters,
    OpenBody,
    /// Pop the innermost scope into the archive
    CloseScope,
    /// Look the name up innermost-first and record a reference
    Resolve,
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub event: Event,
    pub from: State,
    pub to: State,
    pub effect: Effect,
}

const fn row(event: Event, from: State, to: State, effect: Effect) -> Transition {
    Transition {
        event,
        from,
        to,
        effect,
    }
}

/// Every allowed (event, state) pair. Anything else is an unexpected token.
pub const TRANSITIONS: &[Transition] = &[
    row(Event::Type, State::Enter, State::Dec, Effect::BeginDeclaration),
    row(Event::Type, State::FunParams, State::BeforeParamType, Effect::BeginDeclaration),
    row(Event::Id, State::Enter, State::Ref, Effect::Resolve),
    row(Event::Id, State::Dec, State::UndecidedDec, Effect::CapturePending),
    row(Event::Id, State::BeforeParamType, State::ParamNamed, Effect::BindParameter),
    row(Event::Coma, State::UndecidedDec, State::Dec, Effect::CommitVariable),
    row(Event::Coma, State::ParamNamed, State::FunParams, Effect::Continue),
    row(Event::Semicolon, State::UndecidedDec, State::Enter, Effect::CommitVariable),
    row(Event::OpenPar, State::UndecidedDec, State::FunParams, Effect::CommitFunction),
    row(Event::ClosePar, State::FunParams, State::BeforeFunBody, Effect::CloseParameters),
    row(Event::ClosePar, State::ParamNamed, State::BeforeFunBody, Effect::CloseParameters),
    row(Event::OpenBrace, State::BeforeFunBody, State::Enter, Effect::OpenBody),
    row(Event::CloseBrace, State::Enter, State::Enter, Effect::CloseScope),
];

/// Target of the internal transition that follows a resolved reference
pub const AFTER_REFERENCE: State = State::Enter;

/// Pure lookup over [`TRANSITIONS`]
pub fn transition(state: State, event: Event) -> Option<Transition> {
    TRANSITIONS
        .iter()
        .find(|t| t.from == state && t.event == event)
        .copied()
}

/// Events accepted in `state`, in table order
pub fn expected_events(state: State) -> Vec<Event> {
    TRANSITIONS
        .iter()
        .filter(|t| t.from == state)
        .map(|t| t.event)
        .collect()
}

/// Graphviz DOT text for the transition graph
pub fn render_dot() -> String {
    let mut dot = String::from("digraph SymbolTableMachine {\n");
    dot.push_str("    rankdir=LR;\n");
    dot.push_str("    node [shape=circle];\n");
    dot.push_str(&format!(
        "    {} [shape=doublecircle];\n",
        State::Enter.as_str()
    ));

    for t in TRANSITIONS {
        dot.push_str(&format!(
            "    {} -> {} [label=\"{}\"];\n",
            t.from.as_str(),
            t.to.as_str(),
            t.event.as_str()
        ));
    }

    dot.push_str(&format!(
        "    {} -> {} [style=dashed];\n",
        State::Ref.as_str(),
        AFTER_REFERENCE.as_str()
    ));
    dot.push_str("}\n");
    dot
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_is_deterministic() {
        let mut seen = HashSet::new();
        for t in TRANSITIONS {
            assert!(
                seen.insert((t.from, t.event)),
                "duplicate row for {} on {}",
                t.from,
                t.event
            );
        }
    }

    #[test]
    fn test_lookup() {
        let t = transition(State::UndecidedDec, Event::OpenPar).unwrap();
        assert_eq!(t.to, State::FunParams);
        assert_eq!(t.effect, Effect::CommitFunction);

        assert!(transition(State::Dec, Event::Semicolon).is_none());
        assert!(transition(State::Ref, Event::Id).is_none());
    }

    #[test]
    fn test_close_brace_only_from_enter() {
        for state in State::ALL {
            let allowed = transition(state, Event::CloseBrace).is_some();
            assert_eq!(allowed, state == State::Enter, "state {}", state);
        }
    }

    #[test]
    fn test_every_resting_state_has_an_exit() {
        for state in State::ALL.iter().filter(|s| s.is_resting()) {
            assert!(!expected_events(*state).is_empty(), "state {}", state);
        }
    }

    #[test]
    fn test_event_from_kind() {
        assert_eq!(Event::from_kind(&TokenKind::OpenBrace), Some(Event::OpenBrace));
        assert_eq!(Event::from_kind(&TokenKind::Other("NUM".into())), None);
    }

    #[test]
    fn test_render_dot() {
        let dot = render_dot();
        assert!(dot.starts_with("digraph SymbolTableMachine {"));
        assert!(dot.contains("undecided_dec -> fun_params [label=\"OPAR\"];"));
        assert!(dot.contains("ref -> enter [style=dashed];"));
        assert_eq!(dot.matches("->").count(), TRANSITIONS.len() + 1);
    }
}
