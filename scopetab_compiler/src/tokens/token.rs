//! Token model for the declaration/reference pass
//!
//! Tokens arrive already lexed. Only `TYPE` and `ID` carry text; every other
//! kind is structural and carries just its source line.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lexical category of an incoming token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Type name (`int`, `float`, ...)
    Type,
    /// Identifier
    Id,
    /// `,`
    Coma,
    /// `;`
    Semicolon,
    /// `(`
    OpenPar,
    /// `)`
    ClosePar,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// Any kind the pass has no transition for
    Other(String),
}

impl TokenKind {
    /// Canonical wire name
    pub fn as_str(&self) -> &str {
        match self {
            Self::Type => "TYPE",
            Self::Id => "ID",
            Self::Coma => "COMA",
            Self::Semicolon => "SEMICOLON",
            Self::OpenPar => "OPAR",
            Self::ClosePar => "CPAR",
            Self::OpenBrace => "OBRACE",
            Self::CloseBrace => "CBRACE",
            Self::Other(name) => name,
        }
    }

    /// Map a wire name (canonical or alias) to a kind
    pub fn from_wire(name: &str) -> Self {
        match name {
            "TYPE" => Self::Type,
            "ID" => Self::Id,
            "COMA" | "COMMA" => Self::Coma,
            "SEMICOLON" => Self::Semicolon,
            "OPAR" | "OPEN_PAR" => Self::OpenPar,
            "CPAR" | "CLOSE_PAR" => Self::ClosePar,
            "OBRACE" | "OPEN_BRACE" => Self::OpenBrace,
            "CBRACE" | "CLOSE_BRACE" => Self::CloseBrace,
            other => Self::Other(other.to_string()),
        }
    }

    /// Kinds whose VALUE field is meaningful
    pub fn is_value_bearing(&self) -> bool {
        matches!(self, Self::Type | Self::Id)
    }

    /// Kinds that are malformed without a VALUE field
    pub fn requires_value(&self) -> bool {
        matches!(self, Self::Id)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_wire(s))
    }
}

/// One lexed token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<String>,
    /// 1-based source line
    pub line: u32,
}

impl Token {
    /// Structural token with no text
    pub fn new(kind: TokenKind, line: u32) -> Self {
        Self {
            kind,
            value: None,
            line,
        }
    }

    /// Value-bearing token (`TYPE` or `ID`)
    pub fn with_value(kind: TokenKind, value: impl Into<String>, line: u32) -> Self {
        Self {
            kind,
            value: Some(value.into()),
            line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "<{},{},{}>", self.kind, value, self.line),
            None => write!(f, "<{},{}>", self.kind, self.line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_map_to_canonical_kinds() {
        assert_eq!(TokenKind::from_wire("OPEN_PAR"), TokenKind::OpenPar);
        assert_eq!(TokenKind::from_wire("CLOSE_BRACE"), TokenKind::CloseBrace);
        assert_eq!(TokenKind::from_wire("COMMA"), TokenKind::Coma);
        assert_eq!(TokenKind::from_wire("OPEN_BRACE").as_str(), "OBRACE");
    }

    #[test]
    fn test_unknown_kind_is_kept() {
        let kind: TokenKind = "NUM".parse().unwrap();
        assert_eq!(kind, TokenKind::Other("NUM".to_string()));
        assert_eq!(kind.to_string(), "NUM");
    }

    #[test]
    fn test_value_bearing() {
        assert!(TokenKind::Type.is_value_bearing());
        assert!(TokenKind::Id.is_value_bearing());
        assert!(!TokenKind::Semicolon.is_value_bearing());
        assert!(!TokenKind::Other("NUM".into()).is_value_bearing());
        assert!(TokenKind::Id.requires_value());
        assert!(!TokenKind::Type.requires_value());
    }

    #[test]
    fn test_display_uses_wire_format() {
        assert_eq!(Token::with_value(TokenKind::Id, "x", 3).to_string(), "<ID,x,3>");
        assert_eq!(Token::new(TokenKind::CloseBrace, 9).to_string(), "<CBRACE,9>");
    }
}
