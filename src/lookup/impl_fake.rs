use crate::config::LookupConfig;
use crate::library::logger::interface::Logger;
use crate::lookup::interface::{Lookup, LookupError, LookupResult};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
enum Outcome {
    Results(Vec<LookupResult>),
    Status(u16, String),
}

/// Answers every search the same way and remembers the terms it was asked.
#[derive(Clone)]
pub struct LookupFake {
    logger: Arc<dyn Logger + Send + Sync>,
    outcome: Outcome,
    searches: Arc<Mutex<Vec<String>>>,
}

impl LookupFake {
    pub fn with_results(logger: Arc<dyn Logger + Send + Sync>, results: Vec<LookupResult>) -> Self {
        Self {
            logger: logger.with_namespace("lookup").with_namespace("fake"),
            outcome: Outcome::Results(results),
            searches: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn failing(logger: Arc<dyn Logger + Send + Sync>, code: u16, text: &str) -> Self {
        Self {
            outcome: Outcome::Status(code, text.to_string()),
            ..Self::with_results(logger, vec![])
        }
    }

    /// A result whose URL is derived from the page id the way the real
    /// service's results are.
    pub fn result(title: &str, page_id: u64, snippet: &str) -> LookupResult {
        LookupResult {
            title: title.to_string(),
            page_id,
            snippet: snippet.to_string(),
            url: format!("{}{}", LookupConfig::default().page_url_base, page_id),
        }
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches
            .lock()
            .map(|searches| searches.clone())
            .unwrap_or_default()
    }
}

impl Lookup for LookupFake {
    fn search(&self, term: &str) -> Result<Vec<LookupResult>, LookupError> {
        let _ = self.logger.info(&format!("LookupFake::search({:?})", term));

        if let Ok(mut searches) = self.searches.lock() {
            searches.push(term.to_string());
        }

        match &self.outcome {
            Outcome::Results(results) => Ok(results.clone()),
            Outcome::Status(code, text) => Err(LookupError::Status {
                code: *code,
                text: text.clone(),
            }),
        }
    }
}
