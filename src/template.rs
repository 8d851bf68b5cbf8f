//! Placeholder expansion for page templates.
//!
//! Two placeholder forms are recognized:
//!
//! | Syntax        | Meaning                                   |
//! |---------------|-------------------------------------------|
//! | `{{> name}}`  | include partial `name` (expanded in turn) |
//! | `{{name}}`    | substitute variable `name`                |
//!
//! `name` matches `[A-Za-z0-9_]+` and whitespace inside the braces, Unicode
//! spaces included, is ignored.
//!
//! Expansion runs in two passes: every partial placeholder is resolved first
//! (recursively), then variables are substituted once over the result. Values
//! of variables are inserted verbatim and never scanned again.
//!
//! Unknown names are left in the output untouched and reported through
//! [`Expanded::unresolved`]. Self-including partials fail with
//! [`TemplateError::Cycle`] instead of recursing forever.

use regex::{Captures, Regex};
use std::{collections::HashMap, fmt, sync::LazyLock};
use thiserror::Error;

/// Partial name → raw partial text.
pub type Partials = HashMap<String, String>;

/// Variable name → value text.
pub type Vars = HashMap<String, String>;

/// Default limit on how many partials may be nested inside each other.
pub const DEFAULT_MAX_DEPTH: usize = 32;

static RE_PARTIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{>\s*([A-Za-z0-9_]+)\s*\}\}").expect("valid partial regex")
});

static RE_VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("valid variable regex")
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("partial cycle detected: {chain}")]
    Cycle { chain: String },

    #[error("partial `{name}` is nested deeper than {limit} levels")]
    DepthExceeded { name: String, limit: usize },
}

/// A placeholder whose name had no binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unresolved {
    Partial(String),
    Variable(String),
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Partial(name) => write!(f, "partial not found: {name}"),
            Self::Variable(name) => write!(f, "variable not found: {name}"),
        }
    }
}

/// Result of a successful expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expanded {
    pub text: String,
    /// Names left unexpanded, in the order they were met.
    pub unresolved: Vec<Unresolved>,
}

/// Expands templates against a fixed set of partials and variables.
#[derive(Debug, Clone, Copy)]
pub struct Expander<'a> {
    partials: &'a Partials,
    vars: &'a Vars,
    max_depth: usize,
}

impl<'a> Expander<'a> {
    pub const fn new(partials: &'a Partials, vars: &'a Vars) -> Self {
        Self {
            partials,
            vars,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Expand partials, then variables, in `text`.
    pub fn expand(&self, text: &str) -> Result<Expanded, TemplateError> {
        let mut unresolved = Vec::new();
        let mut chain = Vec::new();

        let text = self.expand_partials(text, &mut chain, &mut unresolved)?;
        let text = self.substitute_vars(&text, &mut unresolved);

        Ok(Expanded { text, unresolved })
    }

    /// Replace every `{{> name}}` with the expanded partial.
    ///
    /// `chain` holds the partials currently being expanded, outermost first.
    fn expand_partials(
        &self,
        text: &str,
        chain: &mut Vec<&'a str>,
        unresolved: &mut Vec<Unresolved>,
    ) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for caps in RE_PARTIAL.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            out.push_str(&text[last..whole.start()]);
            last = whole.end();

            let name = &caps[1];
            let Some((key, content)) = self.partials.get_key_value(name) else {
                unresolved.push(Unresolved::Partial(name.to_owned()));
                out.push_str(whole.as_str());
                continue;
            };
            let key = key.as_str();

            if chain.contains(&key) {
                let mut names = chain.clone();
                names.push(key);
                return Err(TemplateError::Cycle {
                    chain: names.join(" -> "),
                });
            }
            if chain.len() >= self.max_depth {
                return Err(TemplateError::DepthExceeded {
                    name: key.to_owned(),
                    limit: self.max_depth,
                });
            }

            chain.push(key);
            let expanded = self.expand_partials(content, chain, unresolved);
            chain.pop();
            out.push_str(&expanded?);
        }

        out.push_str(&text[last..]);
        Ok(out)
    }

    /// Replace every `{{name}}` with its value. Single pass, values are opaque.
    fn substitute_vars(&self, text: &str, unresolved: &mut Vec<Unresolved>) -> String {
        RE_VARIABLE
            .replace_all(text, |caps: &Captures<'_>| match self.vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => {
                    unresolved.push(Unresolved::Variable(caps[1].to_owned()));
                    caps[0].to_owned()
                }
            })
            .into_owned()
    }
}

/// Whether `name` can appear inside a placeholder.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Expand `text` with the default nesting limit.
pub fn expand(text: &str, partials: &Partials, vars: &Vars) -> Result<Expanded, TemplateError> {
    Expander::new(partials, vars).expand(text)
}
