//! PubMed source implementation using the NCBI E-utilities API.

use async_trait::async_trait;
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::config::NcbiConfig;
use crate::models::{RawRecord, SearchQuery};
use crate::sources::medline::parse_medline;
use crate::sources::{Source, SourceError};
use crate::utils::{with_retry, HttpClient, RetryConfig};

/// Public E-utilities endpoint
pub const DEFAULT_EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Above this many IDs efetch is sent as a POST; NCBI rejects long GET URLs
pub const EFETCH_GET_ID_LIMIT: usize = 200;

/// PubMed research source
///
/// Searches with `esearch` and fetches MEDLINE records with `efetch`.
#[derive(Debug, Clone)]
pub struct PubMedSource {
    client: HttpClient,
    base_url: String,
    tool: String,
    email: Option<String>,
    api_key: Option<String>,
    retry: RetryConfig,
}

impl PubMedSource {
    /// Create a PubMed source against the public E-utilities endpoint
    pub fn new() -> Result<Self, SourceError> {
        Ok(Self::with_client(
            HttpClient::new()?,
            &NcbiConfig::default(),
            RetryConfig::default(),
        ))
    }

    /// Create with an explicit client, NCBI settings and retry policy
    pub fn with_client(client: HttpClient, ncbi: &NcbiConfig, retry: RetryConfig) -> Self {
        Self {
            client,
            base_url: ncbi.base_url.trim_end_matches('/').to_string(),
            tool: ncbi.tool.clone(),
            email: ncbi.email.clone(),
            api_key: ncbi.api_key.clone(),
            retry,
        }
    }

    fn esearch_url(&self) -> String {
        format!("{}/esearch.fcgi", self.base_url)
    }

    fn efetch_url(&self) -> String {
        format!("{}/efetch.fcgi", self.base_url)
    }

    /// Parameters NCBI asks every client to send
    fn etiquette_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("tool", self.tool.clone())];
        if let Some(email) = &self.email {
            params.push(("email", email.clone()));
        }
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }
        params
    }

    /// Build esearch query parameters
    fn search_params(&self, query: &SearchQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("term", query.query.clone()),
            ("retmax", query.max_results.to_string()),
            ("retmode", "xml".to_string()),
        ];
        params.extend(self.etiquette_params());
        params
    }

    /// Build efetch query parameters for specific PubMed IDs
    fn fetch_params(&self, ids: &[String]) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("id", ids.join(",")),
            ("rettype", "medline".to_string()),
            ("retmode", "text".to_string()),
        ];
        params.extend(self.etiquette_params());
        params
    }

    /// Parse an esearch XML response into PubMed IDs
    fn parse_search_response(xml: &str) -> Result<Vec<String>, SourceError> {
        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct ESearchResult {
            #[serde(rename = "ERROR")]
            error: Option<String>,
            IdList: Option<IdList>,
        }

        #[derive(Debug, Deserialize)]
        #[allow(non_snake_case)]
        struct IdList {
            #[serde(rename = "Id", default)]
            ids: Vec<String>,
        }

        let result: ESearchResult = from_str(xml)
            .map_err(|e| SourceError::Parse(format!("Failed to parse PubMed search XML: {}", e)))?;

        if let Some(error) = result.error {
            return Err(SourceError::Api(format!("PubMed search failed: {}", error)));
        }

        Ok(result
            .IdList
            .map(|list| list.ids)
            .unwrap_or_default()
            .into_iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect())
    }

    async fn get_with_retry(
        &self,
        url: &str,
        params: &[(&'static str, String)],
    ) -> Result<String, SourceError> {
        with_retry(self.retry, || self.client.get_text(url, params)).await
    }

    async fn post_with_retry(
        &self,
        url: &str,
        params: &[(&'static str, String)],
    ) -> Result<String, SourceError> {
        with_retry(self.retry, || self.client.post_form_text(url, params)).await
    }

    /// Look up the PubMed IDs matching a query
    pub async fn search_ids(&self, query: &SearchQuery) -> Result<Vec<String>, SourceError> {
        if query.query.trim().is_empty() {
            return Err(SourceError::InvalidRequest("empty search query".to_string()));
        }

        let xml = self
            .get_with_retry(&self.esearch_url(), &self.search_params(query))
            .await?;
        Self::parse_search_response(&xml)
    }

    /// Fetch MEDLINE records for the given PubMed IDs
    pub async fn fetch_records(&self, ids: &[String]) -> Result<Vec<RawRecord>, SourceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.efetch_url();
        let params = self.fetch_params(ids);
        let text = if ids.len() > EFETCH_GET_ID_LIMIT {
            tracing::debug!("Posting efetch for {} IDs", ids.len());
            self.post_with_retry(&url, &params).await?
        } else {
            self.get_with_retry(&url, &params).await?
        };
        Ok(parse_medline(&text))
    }
}

#[async_trait]
impl Source for PubMedSource {
    fn id(&self) -> &str {
        "pubmed"
    }

    fn name(&self) -> &str {
        "PubMed"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawRecord>, SourceError> {
        tracing::info!("Searching PubMed for: {}", query.query);

        let ids = self.search_ids(query).await?;
        if ids.is_empty() {
            tracing::warn!("No results found");
            return Ok(Vec::new());
        }

        tracing::debug!("Fetching {} PubMed records", ids.len());
        let records = self.fetch_records(&ids).await?;

        if records.len() != ids.len() {
            tracing::debug!(
                "Requested {} records, received {}",
                ids.len(),
                records.len()
            );
        }

        Ok(records)
    }
}
