//! Integration tests for pubmed-papers
//!
//! These tests run the full search pipeline against a mock E-utilities server.

use mockito::{Matcher, Server};
use pubmed_papers::config::NcbiConfig;
use pubmed_papers::report;
use pubmed_papers::sources::{MockSource, SourceError};
use pubmed_papers::utils::{HttpClient, RetryConfig};
use pubmed_papers::{PaperFetcher, PubMedSource, RawRecord, SearchQuery, Source};
use std::time::Duration;

const ESEARCH_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<eSearchResult>
<Count>3</Count><RetMax>3</RetMax><RetStart>0</RetStart>
<IdList>
<Id>111</Id>
<Id>222</Id>
<Id>333</Id>
</IdList>
</eSearchResult>"#;

const ESEARCH_EMPTY_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<eSearchResult><Count>0</Count><RetMax>0</RetMax><RetStart>0</RetStart><IdList></IdList></eSearchResult>"#;

const EFETCH_MEDLINE: &str = "
PMID- 111
DP  - 2021 Mar 4
TI  - Checkpoint inhibitors in practice: an industry
      perspective.
AU  - Smith J
AU  - Doe A
AD  - Acme Biotech Inc, Cambridge, MA, USA. j.smith@acme-bio.com
AD  - Department of Oncology, University Hospital, Oslo, Norway.

PMID- 222
DP  - 2020
TI  - Purely academic work.
AU  - Roe R
AD  - Karolinska Institute, Stockholm.

PMID- 333
DP  - Spring
TI  - Malformed date.
AU  - Poe P
AD  - Beta Therapeutics LLC.
";

fn ncbi(base_url: &str) -> NcbiConfig {
    NcbiConfig {
        email: Some("tester@example.org".to_string()),
        api_key: Some("secret".to_string()),
        tool: "pubmed-papers".to_string(),
        base_url: base_url.to_string(),
    }
}

fn source(base_url: &str, retry: RetryConfig) -> PubMedSource {
    PubMedSource::with_client(HttpClient::new().unwrap(), &ncbi(base_url), retry)
}

fn fast_retry(attempts: u32) -> RetryConfig {
    RetryConfig {
        max_attempts: attempts,
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
        backoff_multiplier: 2.0,
    }
}

#[tokio::test]
async fn test_pubmed_search_end_to_end() {
    let mut server = Server::new_async().await;

    let esearch = server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("db".into(), "pubmed".into()),
            Matcher::UrlEncoded("term".into(), "cancer immunotherapy".into()),
            Matcher::UrlEncoded("retmax".into(), "3".into()),
            Matcher::UrlEncoded("email".into(), "tester@example.org".into()),
            Matcher::UrlEncoded("api_key".into(), "secret".into()),
        ]))
        .with_status(200)
        .with_body(ESEARCH_XML)
        .expect(1)
        .create_async()
        .await;

    let efetch = server
        .mock("GET", "/efetch.fcgi")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("id".into(), "111,222,333".into()),
            Matcher::UrlEncoded("rettype".into(), "medline".into()),
            Matcher::UrlEncoded("retmode".into(), "text".into()),
        ]))
        .with_status(200)
        .with_body(EFETCH_MEDLINE)
        .expect(1)
        .create_async()
        .await;

    let fetcher = PaperFetcher::new(source(&server.url(), RetryConfig::no_retry()));
    let papers = fetcher
        .search_papers(&SearchQuery::new("cancer immunotherapy").max_results(3))
        .await
        .unwrap();

    esearch.assert_async().await;
    efetch.assert_async().await;

    assert_eq!(papers.len(), 1);
    let paper = &papers[0];
    assert_eq!(paper.pubmed_id(), "111");
    assert_eq!(
        paper.title(),
        "Checkpoint inhibitors in practice: an industry perspective."
    );
    assert_eq!(paper.publication_date().to_string(), "2021-01-01");
    assert_eq!(paper.authors().len(), 2);
    assert_eq!(
        paper.corresponding_author_email(),
        Some("j.smith@acme-bio.com")
    );

    let csv = report::to_csv_string(&papers).unwrap();
    assert!(csv.contains("111,"));
    assert!(csv.contains(",Smith J,"));
    assert!(csv.contains("j.smith@acme-bio.com"));
}

#[tokio::test]
async fn test_pubmed_search_no_ids_skips_fetch() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(ESEARCH_EMPTY_XML)
        .create_async()
        .await;

    let efetch = server
        .mock("GET", "/efetch.fcgi")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let records = source(&server.url(), RetryConfig::no_retry())
        .search(&SearchQuery::new("no such topic"))
        .await
        .unwrap();

    assert!(records.is_empty());
    efetch.assert_async().await;
}

#[tokio::test]
async fn test_pubmed_client_error_is_fatal() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body("bad request")
        .create_async()
        .await;

    let fetcher = PaperFetcher::new(source(&server.url(), fast_retry(3)));
    let result = fetcher.search_papers(&SearchQuery::new("x")).await;

    assert!(matches!(result, Err(SourceError::Api(_))));
}

#[tokio::test]
async fn test_pubmed_server_error_is_retried() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(ESEARCH_XML)
        .create_async()
        .await;

    let efetch = server
        .mock("GET", "/efetch.fcgi")
        .match_query(Matcher::Any)
        .with_status(503)
        .expect(2)
        .create_async()
        .await;

    let result = source(&server.url(), fast_retry(2))
        .search(&SearchQuery::new("x"))
        .await;

    assert!(matches!(result, Err(SourceError::Network(_))));
    efetch.assert_async().await;
}

#[tokio::test]
async fn test_mock_source_pipeline_json_records() {
    let records: Vec<RawRecord> = serde_json::from_str(
        r#"[
            {"PMID": "1", "TI": "A Study", "DP": "2020 Jan",
             "AU": ["Smith J", "Doe A"], "AD": "Acme Biotech Inc; University Hospital"},
            {"PMID": "2", "DP": "unparsable", "AU": ["X"], "AD": "Acme Inc"},
            {"PMID": "3", "DP": "2019", "AU": ["Y"], "AD": ["Harvard Medical School"]}
        ]"#,
    )
    .unwrap();

    let fetcher = PaperFetcher::new(MockSource::with_records(records));
    let papers = fetcher
        .search_papers(&SearchQuery::new("anything"))
        .await
        .unwrap();

    assert_eq!(papers.len(), 1);
    let names: Vec<&str> = papers[0]
        .non_academic_authors()
        .iter()
        .map(|a| a.name())
        .collect();
    assert_eq!(names, vec!["Smith J"]);
    assert!(papers[0].company_affiliations().contains("Acme Biotech Inc"));
}

#[tokio::test]
async fn test_csv_file_output() {
    let fetcher = PaperFetcher::new(MockSource::with_records(vec![RawRecord::new()
        .with("PMID", "42")
        .with("TI", "Title")
        .with("DP", "2018")
        .with("AU", vec!["Lee K"])
        .with("AD", "Gamma Biosciences GmbH, k.lee@gamma.de")]));

    let papers = fetcher
        .search_papers(&SearchQuery::new("q"))
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    report::write_csv(&papers, std::fs::File::create(&path).unwrap()).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let mut lines = written.lines();
    assert!(lines.next().unwrap().starts_with("PubmedID,Title,Publication Date"));
    assert_eq!(
        lines.next().unwrap(),
        "42,Title,2018-01-01,Lee K,\"Gamma Biosciences GmbH, k.lee@gamma.de\",k.lee@gamma.de"
    );
}
