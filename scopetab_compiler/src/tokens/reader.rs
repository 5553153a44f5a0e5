//! Line-oriented token reader
//!
//! Reads `<KIND,VALUE,LINE>` / `<KIND,LINE>` groups lazily from any
//! `BufRead`. Malformed groups are dropped with a warning, limit violations
//! and I/O failures end the stream.

use super::error::{TokenFormatError, TokenResult};
use super::token::{Token, TokenKind};
use crate::config::compile_time::tokens::*;
use crate::config::runtime::InputPreferences;
use crate::{log_debug, log_warning};
use std::collections::VecDeque;
use std::io::BufRead;

/// Parse one token group. Angle brackets are optional.
pub fn parse_token(text: &str) -> TokenResult<Token> {
    let trimmed = text.trim();
    let inner = trimmed.strip_prefix('<').unwrap_or(trimmed);
    let inner = inner.strip_suffix('>').unwrap_or(inner);

    let fields: Vec<&str> = inner.split(',').map(str::trim).collect();
    let (kind_field, value_field, line_field) = match fields.as_slice() {
        [kind, value, line] => (*kind, Some(*value), *line),
        [kind, line] => (*kind, None, *line),
        _ => return Err(TokenFormatError::wrong_field_count(trimmed, fields.len())),
    };

    if kind_field.is_empty() {
        return Err(TokenFormatError::empty_kind(trimmed));
    }

    let line = match line_field.parse::<u32>() {
        Ok(line) if line > 0 => line,
        _ => return Err(TokenFormatError::invalid_line_number(trimmed, line_field)),
    };

    let kind = TokenKind::from_wire(kind_field);

    if kind.is_value_bearing() {
        match value_field {
            Some(value) if !value.is_empty() => {
                if value.len() > MAX_IDENTIFIER_LENGTH {
                    return Err(TokenFormatError::IdentifierTooLong {
                        line,
                        length: value.len(),
                        max: MAX_IDENTIFIER_LENGTH,
                    });
                }
                Ok(Token::with_value(kind, value, line))
            }
            _ if kind.requires_value() => {
                Err(TokenFormatError::missing_value(kind_field, trimmed))
            }
            // `<TYPE,1>`: the type name is optional
            _ => Ok(Token::new(kind, line)),
        }
    } else {
        // structural kinds ignore any VALUE the producer wrote (e.g. `<SEMICOLON,;,1>`)
        Ok(Token::new(kind, line))
    }
}

/// Split a physical line into its token groups
///
/// `<A,1><B,x,1>` yields two groups. A line without `<` is one group.
pub fn split_groups(line: &str) -> Vec<TokenResult<&str>> {
    let line = line.trim();
    if !line.contains('<') {
        return vec![Ok(line)];
    }

    let mut groups = Vec::new();
    let mut rest = line;
    while !rest.is_empty() {
        let Some(start) = rest.find('<') else {
            groups.push(Err(TokenFormatError::stray_text(rest)));
            break;
        };
        let stray = rest[..start].trim();
        if !stray.is_empty() {
            groups.push(Err(TokenFormatError::stray_text(stray)));
        }
        match rest[start..].find('>') {
            Some(end) => {
                groups.push(Ok(&rest[start..=start + end]));
                rest = rest[start + end + 1..].trim_start();
            }
            None => {
                // unterminated group: parse what is there so the field count is reported
                groups.push(Ok(&rest[start..]));
                break;
            }
        }
    }
    groups
}

/// Lazy, single-pass token iterator over a line-oriented source
pub struct TokenReader<R> {
    reader: R,
    source: String,
    preferences: InputPreferences,
    buffer: String,
    pending: VecDeque<Token>,
    input_line: usize,
    tokens_read: usize,
    skipped: usize,
    finished: bool,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_preferences(reader, "<input>", InputPreferences::default())
    }

    pub fn with_preferences(reader: R, source: &str, preferences: InputPreferences) -> Self {
        Self {
            reader,
            source: source.to_string(),
            preferences,
            buffer: String::new(),
            pending: VecDeque::new(),
            input_line: 0,
            tokens_read: 0,
            skipped: 0,
            finished: false,
        }
    }

    /// Tokens yielded so far
    pub fn tokens_read(&self) -> usize {
        self.tokens_read
    }

    /// Malformed groups dropped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Physical lines consumed so far
    pub fn input_line(&self) -> usize {
        self.input_line
    }

    fn skip(&mut self, error: &TokenFormatError) {
        self.skipped += 1;
        if self.preferences.log_skipped_lines {
            log_warning!(code = error.error_code(), "Skipping malformed token group",
                "input_line" => self.input_line,
                "source" => &self.source,
                "reason" => error
            );
        }
    }

    /// Read the next physical line and queue its tokens. `Ok(false)` at EOF.
    fn fill(&mut self) -> TokenResult<bool> {
        self.buffer.clear();
        let read = self
            .reader
            .read_line(&mut self.buffer)
            .map_err(|e| TokenFormatError::io(self.input_line + 1, &e))?;
        if read == 0 {
            return Ok(false);
        }
        self.input_line += 1;

        if self.buffer.len() > MAX_LINE_LENGTH {
            return Err(TokenFormatError::LineTooLong {
                input_line: self.input_line,
                length: self.buffer.len(),
                max: MAX_LINE_LENGTH,
            });
        }

        let line = std::mem::take(&mut self.buffer);
        if line.trim().is_empty() {
            if !self.preferences.skip_blank_lines {
                self.skip(&TokenFormatError::wrong_field_count("", 0));
            }
            self.buffer = line;
            return Ok(true);
        }

        for group in split_groups(&line) {
            match group.and_then(parse_token) {
                Ok(token) => self.pending.push_back(token),
                Err(error) if error.is_recoverable() => self.skip(&error),
                Err(error) => return Err(error),
            }
        }
        self.buffer = line;
        Ok(true)
    }
}

impl<R: BufRead> Iterator for TokenReader<R> {
    type Item = TokenResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }

            if let Some(token) = self.pending.pop_front() {
                if self.tokens_read >= MAX_TOKEN_COUNT {
                    self.finished = true;
                    return Some(Err(TokenFormatError::TooManyTokens {
                        max: MAX_TOKEN_COUNT,
                    }));
                }
                self.tokens_read += 1;
                return Some(Ok(token));
            }

            match self.fill() {
                Ok(true) => continue,
                Ok(false) => {
                    self.finished = true;
                    log_debug!("Token stream exhausted",
                        "source" => &self.source,
                        "tokens" => self.tokens_read,
                        "skipped" => self.skipped
                    );
                    return None;
                }
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error));
                }
            }
        }
    }
}

/// Collect every token in `text`, skipping malformed groups
pub fn parse_tokens(text: &str) -> TokenResult<Vec<Token>> {
    TokenReader::new(text.as_bytes()).collect()
}
