//! Token-driven symbol table machine

use super::error::{AnalysisError, AnalysisResult};
use super::state::{transition, Effect, Event, State, AFTER_REFERENCE};
use crate::config::runtime::AnalysisPreferences;
use crate::logging::codes;
use crate::output::AnalysisOutput;
use crate::scopes::{DeclarationKind, Reference, Scope, ScopeStack};
use crate::tokens::Token;
use crate::{log_debug, log_warning};

/// Name whose role is still undecided
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingDeclaration {
    identifier: String,
    line: u32,
}

/// Builds the scope archive and reference list one token at a time
///
/// The machine never looks ahead. Any error poisons it; a fresh machine is
/// needed for the next stream.
#[derive(Debug)]
pub struct SymbolTableMachine {
    state: State,
    scopes: ScopeStack,
    archive: Vec<Scope>,
    references: Vec<Reference>,
    pending: Option<PendingDeclaration>,
    preferences: AnalysisPreferences,
    last_line: u32,
    tokens_seen: usize,
    poisoned: bool,
}

impl Default for SymbolTableMachine {
    fn default() -> Self {
        Self::new(AnalysisPreferences::default())
    }
}

impl SymbolTableMachine {
    pub fn new(preferences: AnalysisPreferences) -> Self {
        Self {
            state: State::Enter,
            scopes: ScopeStack::new(preferences.max_scope_depth),
            archive: Vec::new(),
            references: Vec::new(),
            pending: None,
            preferences,
            last_line: 0,
            tokens_seen: 0,
            poisoned: false,
        }
    }

    /// Run a whole token sequence through a fresh machine
    pub fn analyze<I>(tokens: I, preferences: AnalysisPreferences) -> AnalysisResult<AnalysisOutput>
    where
        I: IntoIterator<Item = Token>,
    {
        let mut machine = Self::new(preferences);
        for token in tokens {
            machine.step(&token)?;
        }
        machine.finalize()
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Live scopes, global included
    pub fn depth(&self) -> usize {
        self.scopes.depth()
    }

    pub fn scopes(&self) -> &ScopeStack {
        &self.scopes
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn archive(&self) -> &[Scope] {
        &self.archive
    }

    pub fn tokens_seen(&self) -> usize {
        self.tokens_seen
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Consume one token
    pub fn step(&mut self, token: &Token) -> AnalysisResult<()> {
        if self.poisoned {
            return Err(AnalysisError::MachinePoisoned);
        }

        let result = self.dispatch(token);
        if result.is_err() {
            self.poisoned = true;
        }
        result
    }

    fn dispatch(&mut self, token: &Token) -> AnalysisResult<()> {
        self.tokens_seen += 1;
        self.last_line = token.line;

        let Some(event) = Event::from_kind(&token.kind) else {
            if self.preferences.skip_unknown_kinds {
                log_warning!(code = codes::warnings::UNKNOWN_KIND_IGNORED, "Ignoring token of unknown kind",
                    line = token.line,
                    "kind" => &token.kind
                );
                return Ok(());
            }
            return Err(AnalysisError::unexpected_token(
                token.kind.as_str(),
                self.state,
                token.line,
            ));
        };

        let step = transition(self.state, event).ok_or_else(|| {
            AnalysisError::unexpected_token(event.as_str(), self.state, token.line)
        })?;

        if self.preferences.log_transitions {
            log_debug!("Transition",
                "from" => step.from,
                "to" => step.to,
                "event" => event,
                "line" => token.line
            );
        }

        self.apply(step.effect, token)?;
        self.state = step.to;

        if self.state == State::Ref {
            self.state = AFTER_REFERENCE;
        }
        Ok(())
    }

    fn value_of<'t>(&self, token: &'t Token) -> AnalysisResult<&'t str> {
        match token.value.as_deref() {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(AnalysisError::MissingTokenValue {
                kind: token.kind.to_string(),
                line: token.line,
            }),
        }
    }

    fn take_pending(&mut self) -> AnalysisResult<PendingDeclaration> {
        self.pending
            .take()
            .ok_or_else(|| AnalysisError::internal("commit without a pending declaration"))
    }

    fn declare(&mut self, name: &str, line: u32, kind: DeclarationKind) {
        if let Some(previous) = self.scopes.declare(name, line, kind) {
            log_debug!("Redeclaration replaces earlier binding",
                "identifier" => name,
                "previous_line" => previous.line,
                "line" => line
            );
        }
    }

    fn apply(&mut self, effect: Effect, token: &Token) -> AnalysisResult<()> {
        match effect {
            Effect::BeginDeclaration => {
                self.pending = None;
            }
            Effect::CapturePending => {
                self.pending = Some(PendingDeclaration {
                    identifier: self.value_of(token)?.to_string(),
                    line: token.line,
                });
            }
            Effect::CommitVariable => {
                let pending = self.take_pending()?;
                self.declare(&pending.identifier, pending.line, DeclarationKind::Variable);
            }
            Effect::CommitFunction => {
                let pending = self.take_pending()?;
                self.declare(&pending.identifier, pending.line, DeclarationKind::Function);
                self.scopes.push(Some(pending.identifier), token.line)?;
            }
            Effect::BindParameter => {
                let name = self.value_of(token)?.to_string();
                self.declare(&name, token.line, DeclarationKind::Parameter);
            }
            Effect::CloseParameters | Effect::OpenBody | Effect::Continue => {}
            Effect::CloseScope => {
                let scope = self.scopes.pop(token.line)?;
                log_debug!("Scope archived",
                    "owner" => scope.owner().unwrap_or("-"),
                    "symbols" => scope.len(),
                    "line" => token.line
                );
                self.archive.push(scope);
            }
            Effect::Resolve => {
                let identifier = self.value_of(token)?;
                let (declaration, scope_depth) = self
                    .scopes
                    .resolve(identifier)
                    .ok_or_else(|| AnalysisError::undeclared_reference(identifier, token.line))?;
                let reference = Reference {
                    line: token.line,
                    identifier: identifier.to_string(),
                    declaration: declaration.line,
                    declaration_kind: declaration.kind,
                    scope_depth,
                };
                self.references.push(reference);
            }
        }
        Ok(())
    }

    /// End of stream: hand back the outer scope, the archive and the references
    pub fn finalize(mut self) -> AnalysisResult<AnalysisOutput> {
        if self.poisoned {
            return Err(AnalysisError::MachinePoisoned);
        }

        let open = self.scopes.depth() - 1;

        if self.preferences.require_balanced_scopes {
            if self.state != State::Enter {
                return Err(AnalysisError::IncompleteDeclaration { state: self.state });
            }
            if open > 0 {
                return Err(AnalysisError::UnbalancedScopes { open });
            }
        } else {
            if self.state != State::Enter {
                log_warning!("Token stream ended inside a declaration; pending name dropped",
                    "state" => self.state
                );
            }
            if open > 0 {
                log_warning!(code = codes::warnings::SCOPES_FORCE_CLOSED, "Archiving scopes left open at end of stream",
                    line = self.last_line,
                    "open" => open
                );
                let closed = self.scopes.close_all(self.last_line);
                self.archive.extend(closed);
            }
        }

        Ok(AnalysisOutput {
            global: self.scopes.into_global(),
            archive: self.archive,
            references: self.references,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{parse_tokens, TokenKind};
    use assert_matches::assert_matches;

    fn run(input: &str) -> AnalysisResult<AnalysisOutput> {
        SymbolTableMachine::analyze(parse_tokens(input).unwrap(), AnalysisPreferences::default())
    }

    fn lenient() -> AnalysisPreferences {
        AnalysisPreferences {
            require_balanced_scopes: false,
            ..AnalysisPreferences::default()
        }
    }

    fn triples(output: &AnalysisOutput) -> Vec<(u32, &str, u32)> {
        output.references.iter().map(Reference::as_triple).collect()
    }

    #[test]
    fn test_variable_declaration_then_use() {
        let output = run("<TYPE,int,1><ID,x,1><SEMICOLON,1><ID,x,2>").unwrap();

        assert_eq!(output.global.line_of("x"), Some(1));
        assert_eq!(output.global.len(), 1);
        assert!(output.archive.is_empty());
        assert_eq!(triples(&output), vec![(2, "x", 1)]);
    }

    #[test]
    fn test_type_name_is_optional() {
        let output = run("<TYPE,1><ID,x,1><SEMICOLON,1><ID,x,2>").unwrap();
        assert_eq!(output.global.line_of("x"), Some(1));
        assert_eq!(triples(&output), vec![(2, "x", 1)]);

        let output = run(
            "<TYPE,1><ID,f,1><OPAR,1><TYPE,1><ID,p,1><CPAR,1><OBRACE,1><ID,p,2><CBRACE,2>",
        )
        .unwrap();
        assert_eq!(triples(&output), vec![(2, "p", 1)]);
    }

    #[test]
    fn test_function_with_parameter() {
        let output = run(
            "<TYPE,int,1><ID,f,1><OPAR,1><TYPE,int,1><ID,x,1><CPAR,1><OBRACE,1><ID,x,2><CBRACE,2>",
        )
        .unwrap();

        assert_eq!(output.global.line_of("f"), Some(1));
        assert_eq!(
            output.global.get("f").map(|d| d.kind),
            Some(DeclarationKind::Function)
        );
        assert_eq!(output.archive.len(), 1);
        assert_eq!(output.archive[0].line_of("x"), Some(1));
        assert_eq!(output.archive[0].owner(), Some("f"));
        assert_eq!(triples(&output), vec![(2, "x", 1)]);
        assert_eq!(output.references[0].declaration_kind, DeclarationKind::Parameter);
        assert_eq!(output.references[0].scope_depth, 1);
    }

    #[test]
    fn test_undeclared_reference() {
        assert_matches!(
            run("<ID,y,1>"),
            Err(AnalysisError::UndeclaredReference { ref identifier, line: 1 }) if identifier == "y"
        );
    }

    #[test]
    fn test_shadowing() {
        let input = "\
            <TYPE,int,1><ID,x,1><SEMICOLON,1>\n\
            <TYPE,int,2><ID,g,2><OPAR,2><CPAR,2><OBRACE,2>\n\
            <TYPE,float,3><ID,x,3><SEMICOLON,3>\n\
            <ID,x,4>\n\
            <CBRACE,5>\n\
            <ID,x,6>\n";
        let output = run(input).unwrap();

        assert_eq!(triples(&output), vec![(4, "x", 3), (6, "x", 1)]);
        assert_eq!(output.archive[0].line_of("x"), Some(3));
    }

    #[test]
    fn test_outer_names_visible_inside_functions() {
        let input = "<TYPE,int,1><ID,g,1><SEMICOLON,1>\
                     <TYPE,void,2><ID,f,2><OPAR,2><CPAR,2><OBRACE,2><ID,g,3><ID,f,3><CBRACE,4>";
        let output = run(input).unwrap();
        assert_eq!(triples(&output), vec![(3, "g", 1), (3, "f", 2)]);
        assert!(output.references.iter().all(|r| r.scope_depth == 0));
    }

    #[test]
    fn test_names_do_not_leak_out_of_closed_scopes() {
        let input = "<TYPE,void,1><ID,f,1><OPAR,1><TYPE,int,1><ID,p,1><CPAR,1><OBRACE,1><CBRACE,2><ID,p,3>";
        assert_matches!(
            run(input),
            Err(AnalysisError::UndeclaredReference { line: 3, .. })
        );
    }

    #[test]
    fn test_comma_separated_variables() {
        let output =
            run("<TYPE,int,1><ID,a,1><COMA,1><ID,b,1><COMA,1><ID,c,2><SEMICOLON,2>").unwrap();

        let names: Vec<_> = output.global.iter().map(|d| (d.name.as_str(), d.line)).collect();
        assert_eq!(names, vec![("a", 1), ("b", 1), ("c", 2)]);
        assert!(output
            .global
            .iter()
            .all(|d| d.kind == DeclarationKind::Variable));
    }

    #[test]
    fn test_multiple_parameters() {
        let input = "<TYPE,int,1><ID,add,1><OPAR,1>\
                     <TYPE,int,1><ID,a,1><COMA,1><TYPE,int,1><ID,b,1>\
                     <CPAR,1><OBRACE,1><ID,a,2><ID,b,2><CBRACE,3>";
        let output = run(input).unwrap();

        let params: Vec<_> = output.archive[0].iter().map(|d| d.name.as_str()).collect();
        assert_eq!(params, vec!["a", "b"]);
        assert_eq!(triples(&output), vec![(2, "a", 1), (2, "b", 1)]);
    }

    #[test]
    fn test_body_locals_share_parameter_scope() {
        let input = "<TYPE,int,1><ID,f,1><OPAR,1><TYPE,int,1><ID,p,1><CPAR,1><OBRACE,1>\
                     <TYPE,int,2><ID,local,2><SEMICOLON,2><CBRACE,3>";
        let output = run(input).unwrap();

        assert_eq!(output.archive.len(), 1);
        assert_eq!(output.archive[0].len(), 2);
        assert_eq!(output.archive[0].closed_at(), Some(3));
    }

    #[test]
    fn test_depth_accounting_and_archive_order() {
        let tokens = parse_tokens(
            "<TYPE,int,1><ID,outer,1><OPAR,1><CPAR,1><OBRACE,1>\
             <TYPE,int,2><ID,inner,2><OPAR,2><CPAR,2><OBRACE,2>\
             <CBRACE,3><CBRACE,4>",
        )
        .unwrap();
        let mut machine = SymbolTableMachine::default();
        let mut depths = Vec::new();
        for token in &tokens {
            machine.step(token).unwrap();
            depths.push(machine.depth());
        }

        // each OPAR adds one, each CBRACE removes one
        assert_eq!(depths, vec![1, 1, 2, 2, 2, 2, 2, 3, 3, 3, 2, 1]);
        let owners: Vec<_> = machine.archive().iter().map(|s| s.owner()).collect();
        assert_eq!(owners, vec![Some("inner"), Some("outer")]);

        let output = machine.finalize().unwrap();
        assert_eq!(output.global.line_of("outer"), Some(1));
        assert_eq!(output.archive[1].line_of("inner"), Some(2));
    }

    #[test]
    fn test_replay_is_deterministic() {
        let input = "<TYPE,int,1><ID,x,1><SEMICOLON,1>\
                     <TYPE,int,2><ID,f,2><OPAR,2><TYPE,int,2><ID,x,2><CPAR,2><OBRACE,2>\
                     <ID,x,3><CBRACE,3><ID,x,4><ID,f,5>";
        let first = run(input).unwrap();
        let second = run(input).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_redeclaration_overwrites() {
        let output = run("<TYPE,int,1><ID,x,1><SEMICOLON,1><TYPE,int,2><ID,x,2><SEMICOLON,2><ID,x,3>")
            .unwrap();
        assert_eq!(output.global.len(), 1);
        assert_eq!(triples(&output), vec![(3, "x", 2)]);
    }

    #[test]
    fn test_unexpected_token_poisons_machine() {
        let mut machine = SymbolTableMachine::default();
        machine
            .step(&Token::with_value(TokenKind::Type, "int", 1))
            .unwrap();

        assert_matches!(
            machine.step(&Token::new(TokenKind::Semicolon, 1)),
            Err(AnalysisError::UnexpectedToken { state: State::Dec, line: 1, .. })
        );
        assert!(machine.is_poisoned());
        assert_matches!(
            machine.step(&Token::with_value(TokenKind::Id, "x", 2)),
            Err(AnalysisError::MachinePoisoned)
        );
        assert_matches!(machine.finalize(), Err(AnalysisError::MachinePoisoned));
    }

    #[test]
    fn test_unmatched_close_brace() {
        assert_matches!(
            run("<CBRACE,1>"),
            Err(AnalysisError::Scope(crate::scopes::ScopeError::UnmatchedCloseBrace {
                line: 1
            }))
        );
    }

    #[test]
    fn test_unbalanced_scopes_are_fatal_by_default() {
        assert_matches!(
            run("<TYPE,int,1><ID,f,1><OPAR,1><CPAR,1><OBRACE,1>"),
            Err(AnalysisError::UnbalancedScopes { open: 1 })
        );
    }

    #[test]
    fn test_unbalanced_scopes_archived_when_lenient() {
        let tokens =
            parse_tokens("<TYPE,int,1><ID,f,1><OPAR,1><CPAR,1><OBRACE,1><TYPE,int,2><ID,y,2><SEMICOLON,2>")
                .unwrap();
        let output = SymbolTableMachine::analyze(tokens, lenient()).unwrap();

        assert_eq!(output.archive.len(), 1);
        assert_eq!(output.archive[0].line_of("y"), Some(2));
        assert_eq!(output.archive[0].closed_at(), Some(2));
    }

    #[test]
    fn test_incomplete_declaration() {
        assert_matches!(
            run("<TYPE,int,1><ID,x,1>"),
            Err(AnalysisError::IncompleteDeclaration {
                state: State::UndecidedDec
            })
        );

        let tokens = parse_tokens("<TYPE,int,1><ID,x,1>").unwrap();
        let output = SymbolTableMachine::analyze(tokens, lenient()).unwrap();
        assert!(output.global.is_empty());
    }

    #[test]
    fn test_unknown_kinds() {
        let input = "<TYPE,int,1><ID,x,1><SEMICOLON,1><NUM,5,2><ID,x,2>";
        assert_matches!(
            run(input),
            Err(AnalysisError::UnexpectedToken { ref kind, line: 2, .. }) if kind == "NUM"
        );

        let preferences = AnalysisPreferences {
            skip_unknown_kinds: true,
            ..AnalysisPreferences::default()
        };
        let output =
            SymbolTableMachine::analyze(parse_tokens(input).unwrap(), preferences).unwrap();
        assert_eq!(triples(&output), vec![(2, "x", 1)]);
    }

    #[test]
    fn test_scope_depth_limit() {
        let preferences = AnalysisPreferences {
            max_scope_depth: 2,
            ..AnalysisPreferences::default()
        };
        let tokens = parse_tokens(
            "<TYPE,int,1><ID,f,1><OPAR,1><CPAR,1><OBRACE,1><TYPE,int,2><ID,g,2><OPAR,2>",
        )
        .unwrap();
        assert_matches!(
            SymbolTableMachine::analyze(tokens, preferences),
            Err(AnalysisError::Scope(
                crate::scopes::ScopeError::ScopeDepthExceeded { line: 2, max: 2 }
            ))
        );
    }

    #[test]
    fn test_missing_value_on_identifier() {
        let mut machine = SymbolTableMachine::default();
        assert_matches!(
            machine.step(&Token::new(TokenKind::Id, 1)),
            Err(AnalysisError::MissingTokenValue { line: 1, .. })
        );
    }

    #[test]
    fn test_ref_is_transient() {
        let mut machine = SymbolTableMachine::default();
        for token in parse_tokens("<TYPE,int,1><ID,x,1><SEMICOLON,1><ID,x,2>").unwrap() {
            machine.step(&token).unwrap();
            assert_ne!(machine.state(), State::Ref);
        }
        assert_eq!(machine.state(), State::Enter);
        assert_eq!(machine.references().len(), 1);
        assert_eq!(machine.tokens_seen(), 4);
    }
}
