//! Live scope stack

use super::error::{ScopeError, ScopeResult};
use super::table::{Declaration, DeclarationKind, Scope};
use crate::config::compile_time::scopes::DEFAULT_SCOPE_DEPTH;

/// Ordered stack of open scopes. Index 0 is the global scope and is never
/// popped, so the stack is never empty.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
    max_depth: usize,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new(DEFAULT_SCOPE_DEPTH)
    }
}

impl ScopeStack {
    /// `max_depth` counts the global scope
    pub fn new(max_depth: usize) -> Self {
        Self {
            scopes: vec![Scope::global()],
            max_depth: max_depth.max(1),
        }
    }

    /// Number of live scopes, global included
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn global(&self) -> &Scope {
        &self.scopes[0]
    }

    /// Innermost open scope
    pub fn current(&self) -> &Scope {
        self.scopes.last().unwrap_or(&self.scopes[0])
    }

    fn current_mut(&mut self) -> &mut Scope {
        let top = self.scopes.len() - 1;
        &mut self.scopes[top]
    }

    /// Bind `name` in the innermost scope, returning any declaration it replaced
    pub fn declare(&mut self, name: &str, line: u32, kind: DeclarationKind) -> Option<Declaration> {
        self.current_mut().declare(name, line, kind)
    }

    /// Open a new empty scope for the function `owner`
    pub fn push(&mut self, owner: Option<String>, line: u32) -> ScopeResult<()> {
        if self.scopes.len() >= self.max_depth {
            return Err(ScopeError::ScopeDepthExceeded {
                line,
                max: self.max_depth,
            });
        }
        let depth = self.scopes.len();
        self.scopes.push(Scope::new(depth, owner, Some(line)));
        Ok(())
    }

    /// Close the innermost scope and hand it back for archiving
    pub fn pop(&mut self, line: u32) -> ScopeResult<Scope> {
        if self.scopes.len() <= 1 {
            return Err(ScopeError::UnmatchedCloseBrace { line });
        }
        let mut scope = self
            .scopes
            .pop()
            .ok_or(ScopeError::UnmatchedCloseBrace { line })?;
        scope.close(line);
        Ok(scope)
    }

    /// Innermost-first lookup. Returns the declaration and the depth of the
    /// scope holding it.
    pub fn resolve(&self, name: &str) -> Option<(&Declaration, usize)> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).map(|d| (d, scope.depth())))
    }

    /// Close every non-global scope, innermost first
    pub fn close_all(&mut self, line: u32) -> Vec<Scope> {
        let mut closed = Vec::with_capacity(self.scopes.len() - 1);
        while let Ok(scope) = self.pop(line) {
            closed.push(scope);
        }
        closed
    }

    /// Open scopes, outermost first
    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    pub fn into_global(mut self) -> Scope {
        self.scopes.swap_remove(0)
    }
}
