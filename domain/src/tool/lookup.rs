//! Knowledge lookups offered to the model during a meeting
//!
//! | Tool | Backing service | Arguments |
//! |------|-----------------|-----------|
//! | `ads_search` | NASA ADS | `query`, `num_articles` (1-3) |
//! | `simbad_search` | SIMBAD | `object_name` |

use super::entities::{ToolCall, ToolDefinition, ToolParameter};

pub const ADS_SEARCH: &str = "ads_search";
pub const SIMBAD_SEARCH: &str = "simbad_search";

/// Articles returned when the model does not say how many it wants
pub const DEFAULT_NUM_ARTICLES: u32 = 3;
const MAX_NUM_ARTICLES: u32 = 3;

pub fn ads_search_definition() -> ToolDefinition {
    ToolDefinition::new(
        ADS_SEARCH,
        "Search NASA's Astrophysics Data System (ADS) for astronomy research papers. \
         Returns abstracts and bibliographic information for the most relevant papers. \
         Use this when you need references or background from peer-reviewed literature.",
    )
    .param(ToolParameter::text(
        "query",
        "The search query to use to search NASA ADS for astronomy papers. \
         More specific queries are more likely to return relevant papers.",
    ))
    .param(ToolParameter::choice(
        "num_articles",
        "The number of papers to return from the search query.",
        1..=MAX_NUM_ARTICLES as i64,
    ))
}

pub fn simbad_search_definition() -> ToolDefinition {
    ToolDefinition::new(
        SIMBAD_SEARCH,
        "Query the SIMBAD astronomical database for information about celestial objects. \
         Returns detailed information including coordinates, magnitudes, spectral type, and more. \
         Use this to retrieve details for a known star, galaxy, or object by name.",
    )
    .param(ToolParameter::text(
        "object_name",
        "The name of the astronomical object to search for. \
         Can be a common name (e.g., 'M31'), catalog identifier, or coordinates.",
    ))
}

/// Both lookup tools, in the order they are offered
pub fn lookup_tools() -> Vec<ToolDefinition> {
    vec![ads_search_definition(), simbad_search_definition()]
}

/// A validated lookup derived from a model's tool call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupRequest {
    Literature { query: String, num_articles: u32 },
    Object { name: String },
}

impl LookupRequest {
    /// Interpret a tool call; the error text is handed back to the model
    pub fn from_call(call: &ToolCall) -> Result<Self, String> {
        match call.tool_name.as_str() {
            ADS_SEARCH => {
                let query = call.required_str("query")?.to_string();
                let num_articles = call
                    .int_arg("num_articles")
                    .map(|n| n.clamp(1, MAX_NUM_ARTICLES as i64) as u32)
                    .unwrap_or(DEFAULT_NUM_ARTICLES);
                Ok(LookupRequest::Literature {
                    query,
                    num_articles,
                })
            }
            SIMBAD_SEARCH => Ok(LookupRequest::Object {
                name: call.required_str("object_name")?.to_string(),
            }),
            other => Err(format!("Unknown tool: {}", other)),
        }
    }
}
