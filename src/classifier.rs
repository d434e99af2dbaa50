//! Statement classification. Surface forms overlap textually, so the first
//! match in [`classify`] wins and the order of the checks must not change.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::diagnostics::{DiagnosticKind, Result, TsapaError};

static ASSIGNMENT: Lazy<Regex> = Lazy::new(|| compile(r"^(\w+) <- (.+)$"));
static EXTENDS: Lazy<Regex> = Lazy::new(|| compile(r" extends (\w+)$"));
static FIELD_CALL: Lazy<Regex> = Lazy::new(|| compile(r"^[0-9A-Za-z_,\s]+ [a-zA-Z_, ]+:\w*"));
static CALL: Lazy<Regex> = Lazy::new(|| compile(r"^[0-9a-zA-Z_,]+:\w*"));
static COPY: Lazy<Regex> = Lazy::new(|| compile(r"copy (\w+)$"));
static BLOCK: Lazy<Regex> = Lazy::new(|| compile(r"^\[([a-zA-Z_, ]*)\|(.*)\]$"));
static INTEGER: Lazy<Regex> = Lazy::new(|| compile(r"^-?[0-9]+$"));
static FLOAT: Lazy<Regex> = Lazy::new(|| compile(r"^-?[0-9]+\.[0-9]+$"));
static IDENTIFIER: Lazy<Regex> = Lazy::new(|| compile(r"^\w+$"));

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(re) => re,
        Err(err) => panic!("invalid classifier pattern `{pattern}`: {err}"),
    }
}

pub const COMMENT_MARKER: &str = "//";
pub const MACRO_SIGIL: char = '!';

#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
    Comment,
    Sequence(Vec<&'a str>),
    Assign {
        name: &'a str,
        expr: &'a str,
    },
    /// `field <- expr extends target`
    Extend {
        field: &'a str,
        expr: &'a str,
        target: &'a str,
    },
    FieldCall {
        receiver: &'a str,
        field: &'a str,
        args: Vec<&'a str>,
    },
    Call {
        callee: &'a str,
        args: Vec<&'a str>,
    },
    Copy {
        source: &'a str,
    },
    Object,
    Block {
        params: Vec<&'a str>,
        body: &'a str,
    },
    Integer(&'a str),
    Float(&'a str),
    Boolean(bool),
    Macro {
        name: &'a str,
        rest: &'a str,
    },
    Identifier(&'a str),
    Parenthesized(&'a str),
    Empty,
}

impl Statement<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            Statement::Comment => "comment",
            Statement::Sequence(_) => "sequence",
            Statement::Assign { .. } => "assignment",
            Statement::Extend { .. } => "extends-assignment",
            Statement::FieldCall { .. } => "field-call",
            Statement::Call { .. } => "call",
            Statement::Copy { .. } => "copy",
            Statement::Object => "object",
            Statement::Block { .. } => "block",
            Statement::Integer(_) => "integer",
            Statement::Float(_) => "float",
            Statement::Boolean(_) => "boolean",
            Statement::Macro { .. } => "macro",
            Statement::Identifier(_) => "identifier",
            Statement::Parenthesized(_) => "parenthesized",
            Statement::Empty => "empty",
        }
    }
}

pub fn classify(text: &str) -> Result<Statement<'_>> {
    if text.starts_with(COMMENT_MARKER) {
        return Ok(Statement::Comment);
    }

    let parts = split_top_level(text, ';');
    if parts.len() > 1 {
        return Ok(Statement::Sequence(parts.into_iter().map(str::trim).collect()));
    }

    if ASSIGNMENT.is_match(text) {
        return Ok(assignment(text));
    }

    if FIELD_CALL.is_match(text) {
        if let Some((receiver, rest)) = text.split_once(' ') {
            let (field, args) = rest.split_once(':').unwrap_or((rest, ""));
            return Ok(Statement::FieldCall {
                receiver,
                field: field.trim(),
                args: arguments(args),
            });
        }
    }

    if CALL.is_match(text) {
        if let Some((callee, args)) = text.split_once(':') {
            return Ok(Statement::Call {
                callee,
                args: arguments(args),
            });
        }
    }

    if let Some(caps) = COPY.captures(text) {
        if let Some(source) = caps.get(1) {
            return Ok(Statement::Copy {
                source: source.as_str(),
            });
        }
    }

    if text == "object" {
        return Ok(Statement::Object);
    }

    if let Some(caps) = BLOCK.captures(text) {
        if let (Some(params), Some(body)) = (caps.get(1), caps.get(2)) {
            let params = params
                .as_str()
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect();
            return Ok(Statement::Block {
                params,
                body: body.as_str(),
            });
        }
    }

    if INTEGER.is_match(text) {
        return Ok(Statement::Integer(text));
    }
    if FLOAT.is_match(text) {
        return Ok(Statement::Float(text));
    }
    match text {
        "true" => return Ok(Statement::Boolean(true)),
        "false" => return Ok(Statement::Boolean(false)),
        _ => {}
    }

    if let Some(invocation) = text.strip_prefix(MACRO_SIGIL) {
        if !invocation.is_empty() {
            let (name, rest) = invocation.split_once(' ').unwrap_or((invocation, ""));
            return Ok(Statement::Macro { name, rest });
        }
    }

    if IDENTIFIER.is_match(text) {
        return Ok(Statement::Identifier(text));
    }

    if text.len() >= 2 && text.starts_with('(') && text.ends_with(')') {
        return Ok(Statement::Parenthesized(&text[1..text.len() - 1]));
    }

    if text.is_empty() {
        return Ok(Statement::Empty);
    }

    Err(TsapaError::new(
        DiagnosticKind::Syntax,
        format!("no pattern matches `{text}`"),
    ))
}

fn assignment(text: &str) -> Statement<'_> {
    if let Some(caps) = EXTENDS.captures(text) {
        if let (Some(clause), Some(target)) = (caps.get(0), caps.get(1)) {
            let head = &text[..clause.start()];
            if let Some((field, expr)) = head.split_once(" <- ") {
                return Statement::Extend {
                    field,
                    expr,
                    target: target.as_str(),
                };
            }
        }
    }
    let (name, expr) = text.split_once(" <- ").unwrap_or((text, ""));
    Statement::Assign { name, expr }
}

pub fn arguments(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    split_top_level(text, ',').into_iter().map(str::trim).collect()
}

/// Splits on `delimiter` wherever it is not nested in `(...)` or `[...]`.
pub fn split_top_level(text: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            c if c == delimiter && depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Replaces every quoted string literal in `text` with the name returned by
/// `bind`, which receives the literal's unescaped contents.
///
/// A literal runs from an unescaped `"` to the next unescaped `"`; inside it
/// `\"` stands for a quote. An unterminated literal is a syntax error.
pub fn extract_literals<F>(text: &str, mut bind: F) -> Result<String>
where
    F: FnMut(String) -> String,
{
    if !text.contains('"') {
        return Ok(text.to_string());
    }

    let mut output = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                output.push(ch);
                if let Some(next) = chars.next() {
                    output.push(next);
                }
            }
            '"' => {
                let mut literal = String::new();
                let mut closed = false;
                while let Some(inner) = chars.next() {
                    match inner {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' => match chars.next() {
                            Some('"') => literal.push('"'),
                            Some(other) => {
                                literal.push('\\');
                                literal.push(other);
                            }
                            None => literal.push('\\'),
                        },
                        other => literal.push(other),
                    }
                }
                if !closed {
                    return Err(TsapaError::new(
                        DiagnosticKind::Syntax,
                        "string cannot be parsed: unbalanced quotes",
                    ));
                }
                output.push_str(&bind(literal));
            }
            _ => output.push(ch),
        }
    }
    Ok(output)
}
