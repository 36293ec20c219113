//! Paginated Response Normalization
//!
//! The messaging API is inconsistent about list shapes: some endpoints return
//! a bare JSON array, others a `{count, next, previous, results}` envelope.
//! Everything downstream of this module sees a single [`Page`] shape, so the
//! inconsistency never leaks into timeline logic.

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// A normalized page of records
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Records in server order
    pub items: Vec<T>,
    /// Whether the server advertises a further page
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            has_more: false,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Envelope {
        #[serde(default)]
        #[allow(dead_code)]
        count: Option<u64>,
        next: Option<String>,
        #[serde(default)]
        #[allow(dead_code)]
        previous: Option<String>,
        results: Vec<T>,
    },
    Bare(Vec<T>),
}

/// Parse a list response body into a [`Page`].
///
/// A bare array carries no pagination metadata, so it is treated as the only
/// page. For envelopes, `has_more` is the presence of a `next` link.
pub fn parse_page<T: DeserializeOwned>(body: &str) -> Result<Page<T>, serde_json::Error> {
    Ok(match serde_json::from_str::<ListBody<T>>(body)? {
        ListBody::Envelope { next, results, .. } => Page {
            items: results,
            has_more: next.is_some(),
        },
        ListBody::Bare(items) => Page {
            items,
            has_more: false,
        },
    })
}
