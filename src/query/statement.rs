//! # Statement Templates
//!
//! SQL statements issued by the catalog routes. A [`Statement`] is SQL text
//! plus positional text parameters (`?1`, `?2`, ...). Depending on the
//! configured [`Binding`], a search term is either bound as a parameter or
//! rendered inline through the literal quoter.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::quote::{like_contains, quote};

/// Table or column name is not a plain (optionally schema-qualified) identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid SQL identifier: '{0}'")]
pub struct InvalidIdentifier(pub String);

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_$#@]*(\.[A-Za-z_][A-Za-z0-9_$#@]*)?$")
            .expect("identifier pattern is valid")
    })
}

/// A validated table or column name, such as `qsys2.services_info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SqlIdentifier(String);

impl SqlIdentifier {
    /// Validate and wrap an identifier
    pub fn parse(name: impl Into<String>) -> Result<Self, InvalidIdentifier> {
        let name = name.into();
        if identifier_pattern().is_match(&name) {
            Ok(Self(name))
        } else {
            Err(InvalidIdentifier(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SqlIdentifier {
    type Error = InvalidIdentifier;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SqlIdentifier> for String {
    fn from(value: SqlIdentifier) -> Self {
        value.0
    }
}

impl fmt::Display for SqlIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How externally supplied values reach the SQL text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Binding {
    /// Bind values as statement parameters
    #[default]
    Parameters,
    /// Render values inline as quoted string literals
    Inline,
}

/// SQL text with positional text parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    sql: String,
    params: Vec<String>,
}

impl Statement {
    /// A statement with no parameters
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// `SELECT * FROM <table>`
    pub fn select_all(table: &SqlIdentifier) -> Self {
        Self::new(format!("select * from {}", table))
    }

    /// `SELECT * FROM <table> WHERE <column> LIKE '%TERM%'`
    pub fn select_like(
        table: &SqlIdentifier,
        column: &SqlIdentifier,
        term: &str,
        binding: Binding,
    ) -> Self {
        let pattern = like_contains(term);
        match binding {
            Binding::Parameters => Self {
                sql: format!("select * from {} where {} like ?1", table, column),
                params: vec![pattern],
            },
            Binding::Inline => Self::new(format!(
                "select * from {} where {} like {}",
                table,
                column,
                quote(&pattern)
            )),
        }
    }

    /// SQL text as sent to the driver
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound parameters, in placeholder order
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// SQL text with every `?N` placeholder replaced by its quoted parameter.
    ///
    /// Used for logs and diagnostics; for inline statements this is the SQL text.
    pub fn inline_sql(&self) -> String {
        if self.params.is_empty() {
            return self.sql.clone();
        }

        let mut output = String::with_capacity(self.sql.len() + 16);
        let mut chars = self.sql.char_indices().peekable();
        while let Some((start, c)) = chars.next() {
            if c != '?' {
                output.push(c);
                continue;
            }

            let mut end = start + 1;
            while let Some(&(idx, d)) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                end = idx + 1;
                chars.next();
            }

            let param = self.sql[start + 1..end]
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| self.params.get(idx));

            match param {
                Some(value) => output.push_str(&quote(value)),
                None => output.push_str(&self.sql[start..end]),
            }
        }
        output
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inline_sql())
    }
}
