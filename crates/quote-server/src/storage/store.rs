//! File-backed quote store
//!
//! The full quote sequence lives in memory and is rewritten to the backing
//! file in full on every mutation. Ids follow the original policy exactly:
//! next id = last element's id + 1 (or 1 for an empty store), not a max-seen
//! counter.

use quote_types::{NewQuote, Quote};
use rand::seq::SliceRandom;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

/// Storage layer errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// The in-memory quote sequence plus its backing file.
///
/// Constructed once at startup and shared across handlers via `Arc`. The
/// write lock is held across id assignment, append, and the file rewrite,
/// so ids stay sequential under concurrent requests.
pub struct QuoteStore {
    quotes: RwLock<Vec<Quote>>,
    path: PathBuf,
}

fn seed_quotes() -> Vec<Quote> {
    vec![
        Quote {
            id: 1,
            text: "Believe in yourself, bro!".to_string(),
            author: "Pavan".to_string(),
        },
        Quote {
            id: 2,
            text: "Stay hungry, stay foolish.".to_string(),
            author: "Steve Jobs".to_string(),
        },
        Quote {
            id: 3,
            text: "Do or do not. There is no try.".to_string(),
            author: "Yoda".to_string(),
        },
    ]
}

impl QuoteStore {
    /// Load the store from the backing file, or seed it if the file does
    /// not exist. A file that exists but fails to parse is a fatal startup
    /// error; no recovery is attempted.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let quotes = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            let quotes: Vec<Quote> = serde_json::from_str(&content)?;
            info!("Loaded {} quotes from {}", quotes.len(), path.display());
            quotes
        } else {
            let quotes = seed_quotes();
            info!(
                "No backing file at {}, seeding {} quotes",
                path.display(),
                quotes.len()
            );
            write_quotes(&path, &quotes).await?;
            quotes
        };

        Ok(Self {
            quotes: RwLock::new(quotes),
            path,
        })
    }

    /// All quotes, in insertion order.
    pub async fn all(&self) -> Vec<Quote> {
        self.quotes.read().await.clone()
    }

    /// Linear scan for the first quote with a matching id.
    pub async fn find_by_id(&self, id: u64) -> Option<Quote> {
        self.quotes.read().await.iter().find(|q| q.id == id).cloned()
    }

    /// Uniformly random quote, or `None` if the store is empty.
    pub async fn random(&self) -> Option<Quote> {
        let quotes = self.quotes.read().await;
        quotes.choose(&mut rand::thread_rng()).cloned()
    }

    /// Append a single quote, assign its id, and rewrite the backing file.
    pub async fn append(&self, text: &str, author: &str) -> Result<Quote> {
        let mut quotes = self.quotes.write().await;

        let quote = Quote {
            id: next_id(&quotes),
            text: text.to_string(),
            author: author.to_string(),
        };
        quotes.push(quote.clone());

        write_quotes(&self.path, &quotes).await?;
        Ok(quote)
    }

    /// Append a batch of candidate quotes in a single file rewrite.
    ///
    /// Candidates missing `text` or `author` are silently dropped, but ids
    /// are computed from each candidate's position in the original batch, so
    /// a dropped entry still consumes its id slot and leaves a gap. Accepted
    /// entries are returned in input order.
    pub async fn append_many(&self, candidates: &[NewQuote]) -> Result<Vec<Quote>> {
        let mut quotes = self.quotes.write().await;

        let starting_id = next_id(&quotes);
        let mut accepted = Vec::new();
        for (index, candidate) in candidates.iter().enumerate() {
            if let Some((text, author)) = candidate.fields() {
                accepted.push(Quote {
                    id: starting_id + index as u64,
                    text: text.to_string(),
                    author: author.to_string(),
                });
            }
        }
        quotes.extend(accepted.iter().cloned());

        write_quotes(&self.path, &quotes).await?;
        Ok(accepted)
    }
}

fn next_id(quotes: &[Quote]) -> u64 {
    quotes.last().map(|q| q.id + 1).unwrap_or(1)
}

/// Overwrite the backing file with the full sequence, pretty-printed.
async fn write_quotes(path: &PathBuf, quotes: &[Quote]) -> Result<()> {
    let content = serde_json::to_string_pretty(quotes)?;
    tokio::fs::write(path, content).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(text: &str, author: &str) -> NewQuote {
        NewQuote {
            text: Some(text.to_string()),
            author: Some(author.to_string()),
        }
    }

    #[tokio::test]
    async fn test_load_seeds_when_file_missing() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("quotes.json");

        let store = QuoteStore::load(&path).await?;
        let quotes = store.all().await;
        assert_eq!(quotes.len(), 3);
        assert_eq!(
            quotes.iter().map(|q| q.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        // Seeding persists immediately
        let on_disk: Vec<Quote> = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(on_disk, quotes);

        Ok(())
    }

    #[tokio::test]
    async fn test_load_rejects_malformed_file() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("quotes.json");
        std::fs::write(&path, "not json at all")?;

        assert!(matches!(
            QuoteStore::load(&path).await,
            Err(StoreError::Json(_))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_append_assigns_sequential_ids() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("quotes.json");
        std::fs::write(&path, "[]")?;

        let store = QuoteStore::load(&path).await?;
        assert!(store.all().await.is_empty());

        let first = store.append("A", "B").await?;
        assert_eq!(first.id, 1);

        let second = store.append("C", "D").await?;
        assert_eq!(second.id, 2);

        assert_eq!(store.find_by_id(2).await, Some(second));
        assert_eq!(store.find_by_id(99).await, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_append_many_drops_invalid_and_assigns_ids_by_position() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("quotes.json");
        std::fs::write(&path, "[]")?;

        let store = QuoteStore::load(&path).await?;
        store.append("A", "B").await?;

        // Middle candidate has no text; it is dropped but still consumes
        // its id slot, leaving a gap
        let batch = vec![
            candidate("C", "D"),
            NewQuote {
                text: None,
                author: Some("E".to_string()),
            },
            candidate("F", "G"),
        ];
        let accepted = store.append_many(&batch).await?;

        assert_eq!(accepted.len(), 2);
        assert_eq!(
            accepted.iter().map(|q| q.id).collect::<Vec<_>>(),
            vec![2, 4]
        );
        assert_eq!(
            accepted.iter().map(|q| q.text.as_str()).collect::<Vec<_>>(),
            vec!["C", "F"]
        );

        // Dropped entries never reach the file either
        let on_disk: Vec<Quote> = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(on_disk.len(), 3);

        // Next id still derives from the last element, past the gap
        let next = store.append("H", "I").await?;
        assert_eq!(next.id, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_reload_round_trips_exact_sequence() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("quotes.json");

        let before = {
            let store = QuoteStore::load(&path).await?;
            store.append("Extra", "Author").await?;
            store.all().await
        };

        // "Restart": a fresh store must see the identical sequence
        let reloaded = QuoteStore::load(&path).await?;
        assert_eq!(reloaded.all().await, before);

        Ok(())
    }

    #[tokio::test]
    async fn test_random_returns_none_on_empty_store() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("quotes.json");
        std::fs::write(&path, "[]")?;

        let store = QuoteStore::load(&path).await?;
        assert_eq!(store.random().await, None);

        store.append("A", "B").await?;
        assert_eq!(store.random().await.map(|q| q.id), Some(1));

        Ok(())
    }

    #[tokio::test]
    async fn test_backing_file_is_pretty_printed() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("quotes.json");

        QuoteStore::load(&path).await?;
        let content = std::fs::read_to_string(&path)?;
        assert!(content.starts_with("[\n  {"));

        Ok(())
    }
}
