//! Final tables produced by the pass and their renderings

pub mod report;
pub mod tables;

use crate::scopes::{Reference, Scope};
use serde::Serialize;

pub use report::{AnalysisReport, ReportStats};
pub use tables::{render_reference_table, render_symbol_table, render_tables};

/// Outer scope, closed scopes in closing order, and every resolved use
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisOutput {
    pub global: Scope,
    pub archive: Vec<Scope>,
    pub references: Vec<Reference>,
}

impl AnalysisOutput {
    /// Declarations across the outer scope and every archived scope
    pub fn total_symbol_count(&self) -> usize {
        self.global.len() + self.archive.iter().map(Scope::len).sum::<usize>()
    }

    /// Outer scope plus archived scopes
    pub fn scope_count(&self) -> usize {
        1 + self.archive.len()
    }

    pub fn reference_count(&self) -> usize {
        self.references.len()
    }

    /// Outer scope first, then the archive in order
    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        std::iter::once(&self.global).chain(self.archive.iter())
    }
}
