//! HTTP handlers

pub mod quotes;

/// Welcome banner at the root path.
pub async fn root() -> &'static str {
    "Welcome to the Quote API!"
}
