//! Purpose: Build table endpoint URLs and their `sysparm_*` query strings.
//! Exports: `QueryString`, `Action`, `table_url`, `escape`, `escape_clause_value`, `PROTOCOL_MARKER`.
//! Invariants: Every query starts with the JSONv2 protocol marker.
//! Invariants: Caller-supplied values are form-escaped before concatenation.
//! Invariants: Filter values cannot add encoded-query clauses (`^` is doubled).

use super::error::{Error, ErrorKind};
use url::Url;
use url::form_urlencoded::byte_serialize;

pub const PROTOCOL_MARKER: &str = "JSONv2";

const CLAUSE_SEPARATOR: char = '^';

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    Insert,
    Update,
    DeleteRecord,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Insert => "insert",
            Action::Update => "update",
            Action::DeleteRecord => "deleteRecord",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueryString(String);

impl Default for QueryString {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryString {
    pub fn new() -> Self {
        Self(PROTOCOL_MARKER.to_string())
    }

    pub fn action(self, action: Action) -> Self {
        self.param("sysparm_action", action.as_str())
    }

    /// Appends `sysparm_query=<field>=<escaped value>`.
    ///
    /// `^` separates encoded-query clauses, so a literal caret is doubled
    /// before form escaping; the value stays one equality clause.
    pub fn filter_eq(mut self, field: &str, value: &str) -> Self {
        self.0.push_str("&sysparm_query=");
        self.0.push_str(field);
        self.0.push('=');
        self.0.push_str(&escape(&escape_clause_value(value)));
        self
    }

    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.0.push('&');
        self.0.push_str(key);
        self.0.push('=');
        self.0.push_str(&escape(value));
        self
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn escape(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

/// Doubles every `^` so the remote query parser reads it as a literal caret.
pub fn escape_clause_value(value: &str) -> String {
    value.replace(CLAUSE_SEPARATOR, "^^")
}

/// `<base>/<endpoint>?<query>`; the endpoint is a single path segment.
pub fn table_url(base: &Url, endpoint: &str, query: &QueryString) -> Result<Url, Error> {
    ensure_endpoint(endpoint)?;
    let mut url = base.clone();
    {
        let mut path = url.path_segments_mut().map_err(|_| {
            Error::new(ErrorKind::Usage).with_message("instance url cannot be a base")
        })?;
        path.pop_if_empty().push(endpoint);
    }
    url.set_query(Some(query.as_str()));
    Ok(url)
}

fn ensure_endpoint(endpoint: &str) -> Result<(), Error> {
    if endpoint.is_empty() {
        return Err(Error::new(ErrorKind::Usage).with_message("table endpoint must not be empty"));
    }
    if endpoint
        .chars()
        .any(|ch| matches!(ch, '/' | '?' | '#' | '&') || ch.is_whitespace())
    {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("table endpoint must be a single path segment")
            .with_endpoint(endpoint));
    }
    Ok(())
}
