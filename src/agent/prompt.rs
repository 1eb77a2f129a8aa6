//! Prompt templates.
//!
//! Templates use `{name}` placeholders. `{{` and `}}` render literal braces,
//! which the JSON answer schemas embedded in every prompt rely on. A
//! placeholder with no value is an error rather than an empty substitution.

use crate::error::SockError;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("undefined variable '{name}' at position {position} in template")]
    UndefinedVariable { name: String, position: usize },

    #[error("unmatched '{{' at position {position} in template")]
    UnmatchedBrace { position: usize },

    #[error("empty variable name '{{}}' at position {position} in template")]
    EmptyVariableName { position: usize },
}

impl From<TemplateError> for SockError {
    fn from(err: TemplateError) -> Self {
        SockError::PromptError(err.to_string())
    }
}

/// Values substituted into a template.
pub type PromptVars = HashMap<&'static str, String>;

/// Render `template` with `vars`.
pub fn render(template: &str, vars: &PromptVars) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;
    let mut offset = 0;

    while let Some(idx) = rest.find(['{', '}']) {
        out.push_str(&rest[..idx]);
        let position = offset + idx;
        let tail = &rest[idx..];

        let consumed = if tail.starts_with("{{") {
            out.push('{');
            2
        } else if tail.starts_with("}}") {
            out.push('}');
            2
        } else if tail.starts_with('}') {
            // A lone closing brace is ordinary text.
            out.push('}');
            1
        } else {
            let close = tail
                .find('}')
                .ok_or(TemplateError::UnmatchedBrace { position })?;
            let name = tail[1..close].trim();
            if name.is_empty() {
                return Err(TemplateError::EmptyVariableName { position });
            }
            let value = vars
                .get(name)
                .ok_or_else(|| TemplateError::UndefinedVariable {
                    name: name.to_string(),
                    position,
                })?;
            out.push_str(value);
            close + 1
        };

        rest = &tail[consumed..];
        offset = position + consumed;
    }

    out.push_str(rest);
    Ok(out)
}

/// Build a variables map from pairs.
pub fn vars<const N: usize>(pairs: [(&'static str, String); N]) -> PromptVars {
    pairs.into_iter().collect()
}
