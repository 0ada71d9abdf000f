//! Strict decoding of `GET /books` query parameters into a [`QueryFilter`].
//!
//! Exactly nine parameter names are recognized. Anything else is an error
//! rather than a silently ignored filter, so a typo such as `autorFilter`
//! fails the request instead of widening the result set.

use std::collections::{BTreeSet, HashSet};

use thiserror::Error;

use super::models::QueryFilter;

/// A query parameter [`decode`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryParam {
    pub name: &'static str,
    /// Parsed as a signed integer rather than taken verbatim.
    pub integer: bool,
    pub description: &'static str,
}

const fn text(name: &'static str, description: &'static str) -> QueryParam {
    QueryParam {
        name,
        integer: false,
        description,
    }
}

/// Every parameter accepted by [`decode`], in documentation order.
pub const RECOGNIZED_PARAMS: [QueryParam; 9] = [
    text("titleFilter", "Exact title"),
    text("collection", "Collection the book belongs to"),
    text("authorFilter", "Exact author"),
    text("genreFilter", "Exact genre"),
    text("pubFilter", "Exact publisher"),
    text("editionFilter", "Exact edition"),
    text("from", "Earliest pub_date, inclusive"),
    text("to", "Latest pub_date, inclusive"),
    QueryParam {
        name: "max",
        integer: true,
        description: "Result cap; zero or absent means unbounded",
    },
];

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// One or more parameter names outside [`RECOGNIZED_PARAMS`], sorted.
    #[error("unknown query parameter(s): {}", quoted(.0))]
    UnknownFields(Vec<String>),

    #[error("invalid value for '{field}': '{value}' is not an integer")]
    InvalidInteger { field: &'static str, value: String },
}

/// Decode raw `(name, value)` pairs into a filter.
///
/// Only the first occurrence of a repeated name is used. A malformed `max`
/// is reported before unknown names so the outcome does not depend on the
/// order pairs arrive in.
pub fn decode<I, K, V>(params: I) -> Result<QueryFilter, DecodeError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut filter = QueryFilter::default();
    let mut seen = HashSet::new();
    let mut unknown = BTreeSet::new();
    let mut raw_max = None;

    for (key, value) in params {
        let key = key.as_ref();
        if !seen.insert(key.to_owned()) {
            continue;
        }

        let value = value.as_ref().to_owned();
        match key {
            "titleFilter" => filter.title = value,
            "collection" => filter.collection = value,
            "authorFilter" => filter.author = value,
            "genreFilter" => filter.genre = value,
            "pubFilter" => filter.publisher = value,
            "editionFilter" => filter.edition = value,
            "from" => filter.from = value,
            "to" => filter.to = value,
            "max" => raw_max = Some(value),
            other => {
                unknown.insert(other.to_owned());
            }
        }
    }

    if let Some(raw) = raw_max {
        filter.max = raw
            .parse::<i64>()
            .map_err(|_| DecodeError::InvalidInteger {
                field: "max",
                value: raw,
            })?;
    }

    if !unknown.is_empty() {
        return Err(DecodeError::UnknownFields(unknown.into_iter().collect()));
    }

    Ok(filter)
}
