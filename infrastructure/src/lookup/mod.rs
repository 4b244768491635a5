//! Knowledge lookup adapters
//!
//! [`AstroLookup`] implements the [`ReferenceLookup`] port by dispatching
//! literature searches to NASA ADS and object lookups to SIMBAD.

mod ads;
mod simbad;

pub use ads::AdsSearch;
pub use simbad::SimbadLookup;

use crate::config::FileConfig;
use async_trait::async_trait;
use lab_application::ports::reference_lookup::{LookupError, ReferenceLookup};
use lab_domain::LookupRequest;

/// ADS and SIMBAD behind one port
pub struct AstroLookup {
    ads: AdsSearch,
    simbad: SimbadLookup,
}

impl AstroLookup {
    pub fn new(ads: AdsSearch, simbad: SimbadLookup) -> Self {
        Self { ads, simbad }
    }

    /// Build both clients from the loaded configuration
    pub fn from_config(client: reqwest::Client, config: &FileConfig) -> Self {
        Self::new(
            AdsSearch::new(
                client.clone(),
                config.providers.ads_base_url.clone(),
                config.api_keys.nasa_ads().map(str::to_string),
            ),
            SimbadLookup::new(client, config.providers.simbad_tap_url.clone()),
        )
    }
}

#[async_trait]
impl ReferenceLookup for AstroLookup {
    async fn lookup(&self, request: &LookupRequest) -> Result<String, LookupError> {
        match request {
            LookupRequest::Literature {
                query,
                num_articles,
            } => self.ads.search(query, *num_articles).await,
            LookupRequest::Object { name } => self.simbad.lookup(name).await,
        }
    }
}
