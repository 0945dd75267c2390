//! Quote record and client-submitted payload types

use serde::{Deserialize, Serialize};

/// A stored quote. Ids are assigned by the server, never by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: u64,
    pub text: String,
    pub author: String,
}

/// A quote as submitted by a client, before an id is assigned.
///
/// Both fields are optional at the serde level so that incomplete payloads
/// deserialize cleanly and can be rejected (or silently dropped, for bulk
/// uploads) by presence checks instead of failing the whole request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewQuote {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl NewQuote {
    /// Returns `(text, author)` if both fields are present and non-empty.
    pub fn fields(&self) -> Option<(&str, &str)> {
        match (self.text.as_deref(), self.author.as_deref()) {
            (Some(text), Some(author)) if !text.is_empty() && !author.is_empty() => {
                Some((text, author))
            }
            _ => None,
        }
    }
}
