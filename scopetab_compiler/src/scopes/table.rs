//! Scope and reference records

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Role a declared identifier plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Variable,
    Function,
    Parameter,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Variable => "variable",
            Self::Function => "function",
            Self::Parameter => "parameter",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub name: String,
    pub line: u32,
    pub kind: DeclarationKind,
}

/// One region of visibility: the global scope, or a function's parameters
/// together with its body
///
/// Declarations keep first-insertion order. Redeclaring a name replaces its
/// line and kind without moving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scope {
    depth: usize,
    owner: Option<String>,
    opened_at: Option<u32>,
    closed_at: Option<u32>,
    declarations: Vec<Declaration>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Scope {
    pub fn global() -> Self {
        Self::new(0, None, None)
    }

    pub fn new(depth: usize, owner: Option<String>, opened_at: Option<u32>) -> Self {
        Self {
            depth,
            owner,
            opened_at,
            closed_at: None,
            declarations: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Bind `name`, returning the declaration it replaced
    pub fn declare(&mut self, name: &str, line: u32, kind: DeclarationKind) -> Option<Declaration> {
        let declaration = Declaration {
            name: name.to_string(),
            line,
            kind,
        };
        match self.index.get(name) {
            Some(&slot) => Some(std::mem::replace(&mut self.declarations[slot], declaration)),
            None => {
                self.index.insert(name.to_string(), self.declarations.len());
                self.declarations.push(declaration);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.index.get(name).map(|&slot| &self.declarations[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn line_of(&self, name: &str) -> Option<u32> {
        self.get(name).map(|d| d.line)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// 0 for the global scope
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Function whose parameter list opened this scope
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn opened_at(&self) -> Option<u32> {
        self.opened_at
    }

    pub fn closed_at(&self) -> Option<u32> {
        self.closed_at
    }

    pub fn is_global(&self) -> bool {
        self.depth == 0
    }

    pub(crate) fn close(&mut self, line: u32) {
        self.closed_at = Some(line);
    }
}

/// A resolved identifier use
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// Line of the use
    pub line: u32,
    pub identifier: String,
    /// Line of the governing declaration
    pub declaration: u32,
    pub declaration_kind: DeclarationKind,
    /// Depth of the scope the declaration was found in
    pub scope_depth: usize,
}

impl Reference {
    /// (use line, identifier, declaration line)
    pub fn as_triple(&self) -> (u32, &str, u32) {
        (self.line, &self.identifier, self.declaration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_keeps_insertion_order() {
        let mut scope = Scope::global();
        scope.declare("b", 1, DeclarationKind::Variable);
        scope.declare("a", 2, DeclarationKind::Function);

        let names: Vec<_> = scope.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(scope.line_of("a"), Some(2));
        assert!(scope.is_global());
    }

    #[test]
    fn test_redeclaration_overwrites_in_place() {
        let mut scope = Scope::new(1, Some("f".into()), Some(3));
        scope.declare("x", 3, DeclarationKind::Parameter);
        scope.declare("y", 4, DeclarationKind::Variable);

        let previous = scope.declare("x", 5, DeclarationKind::Variable);
        assert_eq!(previous.map(|d| d.line), Some(3));
        assert_eq!(scope.len(), 2);
        assert_eq!(scope.iter().next().map(|d| d.line), Some(5));
        assert_eq!(scope.get("x").map(|d| d.kind), Some(DeclarationKind::Variable));
    }

    #[test]
    fn test_scope_metadata() {
        let mut scope = Scope::new(2, Some("inner".into()), Some(7));
        assert_eq!(scope.owner(), Some("inner"));
        assert_eq!(scope.opened_at(), Some(7));
        assert_eq!(scope.closed_at(), None);

        scope.close(12);
        assert_eq!(scope.closed_at(), Some(12));
        assert!(!scope.is_global());
        assert!(scope.is_empty());
    }
}
