//! NASA ADS literature search

use lab_application::ports::reference_lookup::LookupError;
use serde::Deserialize;
use tracing::debug;

const FIELDS: &str = "title,author,year,bibcode,abstract";
const RULE_WIDTH: usize = 80;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    response: SearchDocs,
}

#[derive(Debug, Deserialize)]
struct SearchDocs {
    #[serde(default)]
    docs: Vec<Paper>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Paper {
    title: Vec<String>,
    author: Vec<String>,
    year: Option<String>,
    bibcode: Option<String>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
}

impl Paper {
    fn render(&self) -> String {
        let title = self.title.first().map(String::as_str).unwrap_or("No title");
        let authors = if self.author.is_empty() {
            "No authors".to_string()
        } else {
            self.author.join(", ")
        };
        format!(
            "TITLE: {}\nAUTHORS: {}\nYEAR: {}\nBIBCODE: {}\nABSTRACT: {}\n{}",
            title,
            authors,
            self.year.as_deref().unwrap_or("Unknown year"),
            self.bibcode.as_deref().unwrap_or("No bibcode"),
            self.abstract_text.as_deref().unwrap_or("No abstract available"),
            "-".repeat(RULE_WIDTH),
        )
    }
}

/// Client for the ADS search API
pub struct AdsSearch {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl AdsSearch {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub async fn search(&self, query: &str, rows: u32) -> Result<String, LookupError> {
        let token = self.token.as_deref().ok_or_else(|| {
            LookupError::NotAvailable("NASA ADS token is not configured (NASA_ADS_KEY)".to_string())
        })?;

        debug!(query, rows, "Searching NASA ADS");
        let rows = rows.to_string();

        let response = self
            .client
            .get(format!("{}/search/query", self.base_url))
            .bearer_auth(token)
            .query(&[("q", query), ("fl", FIELDS), ("rows", rows.as_str())])
            .send()
            .await
            .map_err(|e| LookupError::ServiceFailed(format!("ADS request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::ServiceFailed(format!(
                "ADS returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| LookupError::ServiceFailed(format!("Invalid ADS response: {}", e)))?;

        Ok(render_results(query, &body.response.docs))
    }
}

fn render_results(query: &str, papers: &[Paper]) -> String {
    if papers.is_empty() {
        return format!("No ADS results found for query: {}", query);
    }
    papers
        .iter()
        .map(Paper::render)
        .collect::<Vec<_>>()
        .join("\n\n")
}
