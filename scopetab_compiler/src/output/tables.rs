//! Fixed-width text tables

use super::AnalysisOutput;
use crate::config::runtime::OutputPreferences;
use crate::scopes::{Reference, Scope};

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", line.trim_end())
}

/// Left-aligned columns, two spaces apart, widths fitted to the content
fn render_rows(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = format_row(headers.iter().copied(), &widths);
    for row in rows {
        out.push_str(&format_row(row.iter().map(String::as_str), &widths));
    }
    out
}

/// LINE / REFERENCE / DECLARATION, one row per resolved use in order
pub fn render_reference_table(references: &[Reference]) -> String {
    let rows: Vec<Vec<String>> = references
        .iter()
        .map(|r| {
            vec![
                r.line.to_string(),
                r.identifier.clone(),
                r.declaration.to_string(),
            ]
        })
        .collect();
    render_rows(&["LINE", "REFERENCE", "DECLARATION"], &rows)
}

fn scope_header(scope: &Scope) -> String {
    match scope.owner() {
        None => "== global ==".to_string(),
        Some(owner) => {
            let span = match (scope.opened_at(), scope.closed_at()) {
                (Some(open), Some(close)) => format!(", lines {}-{}", open, close),
                (Some(open), None) => format!(", from line {}", open),
                _ => String::new(),
            };
            format!("== {} (depth {}{}) ==", owner, scope.depth(), span)
        }
    }
}

fn render_scope(scope: &Scope, show_kind: bool) -> String {
    let rows: Vec<Vec<String>> = scope
        .iter()
        .map(|d| {
            let mut row = vec![d.name.clone(), d.line.to_string()];
            if show_kind {
                row.push(d.kind.to_string());
            }
            row
        })
        .collect();

    let headers: &[&str] = if show_kind {
        &["NAME", "LINE", "KIND"]
    } else {
        &["NAME", "LINE"]
    };

    format!("{}\n{}", scope_header(scope), render_rows(headers, &rows))
}

/// Outer scope, then each archived scope in archival order
pub fn render_symbol_table(output: &AnalysisOutput, show_kind: bool) -> String {
    output
        .scopes()
        .map(|scope| render_scope(scope, show_kind))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reference table followed by the symbol table
pub fn render_tables(output: &AnalysisOutput, preferences: &OutputPreferences) -> String {
    format!(
        "{}\n{}",
        render_reference_table(&output.references),
        render_symbol_table(output, preferences.show_declaration_kind)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scopes::DeclarationKind;

    fn sample_output() -> AnalysisOutput {
        let mut global = Scope::global();
        global.declare("f", 1, DeclarationKind::Function);

        let mut params = Scope::new(1, Some("f".into()), Some(1));
        params.declare("x", 1, DeclarationKind::Parameter);
        params.close(2);

        AnalysisOutput {
            global,
            archive: vec![params],
            references: vec![Reference {
                line: 2,
                identifier: "x".into(),
                declaration: 1,
                declaration_kind: DeclarationKind::Parameter,
                scope_depth: 1,
            }],
        }
    }

    #[test]
    fn test_reference_table_layout() {
        let table = render_reference_table(&sample_output().references);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "LINE  REFERENCE  DECLARATION");
        assert!(lines[1].starts_with("2     x"));
        assert_eq!(lines[1].find('x'), lines[0].find("REFERENCE"));
        assert_eq!(lines[1].rfind('1'), lines[0].find("DECLARATION"));
    }

    #[test]
    fn test_empty_reference_table_has_header() {
        assert_eq!(
            render_reference_table(&[]),
            "LINE  REFERENCE  DECLARATION\n"
        );
    }

    #[test]
    fn test_symbol_table_lists_scopes_in_order() {
        let table = render_symbol_table(&sample_output(), true);
        let expected = "== global ==\n\
                        NAME  LINE  KIND\n\
                        f     1     function\n\
                        \n\
                        == f (depth 1, lines 1-2) ==\n\
                        NAME  LINE  KIND\n\
                        x     1     parameter\n";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_symbol_table_without_kind() {
        let table = render_symbol_table(&sample_output(), false);
        assert!(table.contains("NAME  LINE\nf     1\n"));
        assert!(!table.contains("KIND"));
    }
}
