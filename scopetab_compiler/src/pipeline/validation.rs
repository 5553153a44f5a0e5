use crate::logging::codes;

/// Validate that every code the pipeline reports is registered
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    crate::file_processor::init_file_processor_logging()?;

    let required = [
        codes::tokens::MALFORMED_TOKEN_LINE,
        codes::tokens::INVALID_LINE_NUMBER,
        codes::tokens::EMPTY_TOKEN_KIND,
        codes::tokens::IDENTIFIER_TOO_LONG,
        codes::tokens::LINE_TOO_LONG,
        codes::tokens::TOO_MANY_TOKENS,
        codes::analysis::UNMATCHED_CLOSE_BRACE,
        codes::analysis::UNBALANCED_SCOPES,
        codes::analysis::INCOMPLETE_DECLARATION,
        codes::analysis::UNEXPECTED_TOKEN,
        codes::analysis::SCOPE_DEPTH_EXCEEDED,
        codes::references::UNDECLARED_REFERENCE,
        codes::warnings::UNKNOWN_KIND_IGNORED,
        codes::warnings::SCOPES_FORCE_CLOSED,
    ];

    for code in &required {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Pipeline code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "codes_checked" => required.len()
    );

    Ok(())
}
