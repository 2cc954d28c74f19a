use crate::config::{Config, LookupConfig};
use crate::library::logger::interface::Logger;
use crate::lookup::interface::{Lookup, LookupError, LookupResult};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: SearchQuery,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    pageid: u64,
    title: String,
    #[serde(default)]
    snippet: String,
}

pub struct LookupWikipedia {
    config: LookupConfig,
    client: reqwest::blocking::Client,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl LookupWikipedia {
    pub fn new(
        config: &Config,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(config.lookup.user_agent.as_str())
            .build()?;

        Ok(Self {
            config: config.lookup.clone(),
            client,
            logger: logger.with_namespace("lookup").with_namespace("wikipedia"),
        })
    }

    fn request(&self, term: &str) -> reqwest::blocking::RequestBuilder {
        let limit = self.config.result_limit.to_string();

        self.client.get(&self.config.endpoint).query(&[
            ("action", "query"),
            ("list", "search"),
            ("prop", "info"),
            ("inprop", "url"),
            ("format", "json"),
            ("srlimit", limit.as_str()),
            ("srsearch", term),
        ])
    }

    fn parse_results(&self, body: &str) -> Result<Vec<LookupResult>, LookupError> {
        let response: SearchResponse = serde_json::from_str(body)?;

        Ok(response
            .query
            .search
            .into_iter()
            .map(|hit| LookupResult {
                url: format!("{}{}", self.config.page_url_base, hit.pageid),
                title: hit.title,
                page_id: hit.pageid,
                snippet: hit.snippet,
            })
            .collect())
    }
}

impl Lookup for LookupWikipedia {
    fn search(&self, term: &str) -> Result<Vec<LookupResult>, LookupError> {
        let _ = self.logger.info(&format!("Searching for {:?}", term));

        let response = self.request(term).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                code: status.as_u16(),
                text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text()?;
        let results = self.parse_results(&body)?;

        let _ = self
            .logger
            .info(&format!("Found {} results for {:?}", results.len(), term));

        Ok(results)
    }
}
