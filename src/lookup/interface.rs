use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    pub title: String,
    pub page_id: u64,
    /// May contain markup from the search engine (match highlighting).
    pub snippet: String,
    pub url: String,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("search returned {code} {text}")]
    Status { code: u16, text: String },

    #[error("malformed search response: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub trait Lookup {
    /// Results keep the order the service ranked them in. No matches is
    /// `Ok(vec![])`, not an error.
    fn search(&self, term: &str) -> Result<Vec<LookupResult>, LookupError>;
}
