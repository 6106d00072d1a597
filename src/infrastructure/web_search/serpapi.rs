//! SerpAPI Google search provider

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::web_search::{WebSearchProvider, WebSearchResult, WebSearchResults};
use crate::domain::DomainError;
use crate::infrastructure::llm::HttpClientTrait;

const DEFAULT_SERPAPI_BASE_URL: &str = "https://serpapi.com";
const DEFAULT_NUM_RESULTS: usize = 5;

/// Google organic results through SerpAPI
#[derive(Debug)]
pub struct SerpApiProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
    num_results: usize,
}

impl<C: HttpClientTrait> SerpApiProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_SERPAPI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            num_results: DEFAULT_NUM_RESULTS,
        }
    }

    pub fn with_num_results(mut self, num_results: usize) -> Self {
        self.num_results = num_results.max(1);
        self
    }

    fn search_url(&self) -> String {
        format!("{}/search.json", self.base_url)
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<WebSearchResults, DomainError> {
        let response: SerpApiResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("serpapi", format!("Failed to parse search response: {}", e))
        })?;

        if let Some(error) = response.error {
            return Err(DomainError::provider("serpapi", error));
        }

        let results = response
            .organic_results
            .into_iter()
            .filter_map(|r| {
                let snippet = r.snippet?;
                let result = WebSearchResult::new(snippet);
                Some(match r.link {
                    Some(link) => result.with_link(link),
                    None => result,
                })
            })
            .take(self.num_results)
            .collect();

        Ok(WebSearchResults::new(results))
    }
}

#[async_trait]
impl<C: HttpClientTrait> WebSearchProvider for SerpApiProvider<C> {
    async fn search(&self, query: &str) -> Result<WebSearchResults, DomainError> {
        let num = self.num_results.to_string();
        let params = [
            ("engine", "google"),
            ("q", query),
            ("api_key", self.api_key.as_str()),
            ("num", num.as_str()),
        ];

        let response = self.client.get_json(&self.search_url(), vec![], &params).await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "serpapi"
    }
}

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<SerpApiOrganicResult>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SerpApiOrganicResult {
    snippet: Option<String>,
    link: Option<String>,
}
