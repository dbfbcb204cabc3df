// src/services/doi.rs

//! Persistent identifier (DOI) lookup.
//!
//! The profile page carries no DOIs, so each publication is looked up by
//! first-author surname and title on a Crossref OpenURL endpoint. Lookups
//! are best-effort: every failure becomes [`LookupOutcome::Failed`] and the
//! publication keeps an empty identifier.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tokio::time::{Instant, sleep_until};
use url::form_urlencoded;

use crate::error::{AppError, Result};
use crate::models::LookupConfig;

/// Result of a single identifier lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Lookups are switched off; no request was made
    Disabled,
    /// The service returned an identifier
    Found(String),
    /// The service answered without an identifier
    NotFound,
    /// The request or its response was unusable
    Failed(String),
}

impl LookupOutcome {
    /// The identifier, or `""` for every outcome except `Found`.
    pub fn identifier(&self) -> &str {
        match self {
            LookupOutcome::Found(doi) => doi,
            _ => "",
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }
}

/// A bibliographic service that can map (surname, title) to a DOI.
#[async_trait]
pub trait DoiSource: Send + Sync {
    /// Query the service. `Ok(None)` means it answered but had no DOI.
    async fn query(&self, contact: &str, surname: &str, title: &str) -> Result<Option<String>>;
}

/// Crossref OpenURL lookup returning JSON.
pub struct CrossRefOpenUrl {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl CrossRefOpenUrl {
    pub fn new(client: Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
        }
    }

    /// Build the request URL for one lookup.
    pub fn query_url(&self, contact: &str, surname: &str, title: &str) -> String {
        format!(
            "{}&pid={}&aulast={}&atitle={}&format=json",
            self.base_url,
            escape(contact),
            escape(surname),
            escape(title)
        )
    }
}

#[async_trait]
impl DoiSource for CrossRefOpenUrl {
    async fn query(&self, contact: &str, surname: &str, title: &str) -> Result<Option<String>> {
        let url = self.query_url(contact, surname, title);
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::lookup(format!("HTTP {status}")));
        }

        let body: Value = serde_json::from_str(&response.text().await?)?;
        Ok(parse_doi(&body))
    }
}

/// Read the DOI field from a lookup response, verbatim.
///
/// Fields are tried in order; empty values fall through to the next one.
pub fn parse_doi(body: &Value) -> Option<String> {
    [
        body.pointer("/created/DOI"),
        body.pointer("/message/DOI"),
        body.get("DOI"),
    ]
    .into_iter()
    .flatten()
    .find_map(|v| v.as_str().filter(|doi| !doi.is_empty()))
    .map(str::to_string)
}

fn escape(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Spaces consecutive lookups at least `interval` apart.
///
/// The first lookup also waits one full interval.
#[derive(Debug)]
pub struct Pacer {
    interval: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Wait until the next lookup may be issued, then record it.
    pub async fn wait(&mut self) {
        let now = Instant::now();
        let deadline = match self.last {
            Some(last) => (last + self.interval).max(now),
            None => now + self.interval,
        };
        sleep_until(deadline).await;
        self.last = Some(Instant::now());
    }
}

/// Resolves persistent identifiers one publication at a time.
///
/// `resolve` takes `&mut self`, so lookups through one resolver are
/// always sequential and paced.
pub struct IdentifierResolver {
    source: Box<dyn DoiSource>,
    contact: Option<String>,
    pacer: Pacer,
}

impl IdentifierResolver {
    pub fn new(source: Box<dyn DoiSource>, contact: Option<String>, interval: Duration) -> Self {
        Self {
            source,
            contact: contact.filter(|c| !c.trim().is_empty()),
            pacer: Pacer::new(interval),
        }
    }

    /// Build a Crossref-backed resolver from configuration.
    pub fn from_config(config: &LookupConfig, client: Client) -> Self {
        let source = CrossRefOpenUrl::new(client, config.base_url.clone(), config.timeout());
        Self::new(
            Box::new(source),
            config.contact().map(str::to_string),
            config.delay(),
        )
    }

    pub fn is_enabled(&self) -> bool {
        self.contact.is_some()
    }

    /// Look up the identifier for one publication.
    ///
    /// Never fails: errors are reported as [`LookupOutcome::Failed`].
    pub async fn resolve(&mut self, surname: &str, title: &str) -> LookupOutcome {
        let Some(contact) = self.contact.as_deref() else {
            return LookupOutcome::Disabled;
        };

        self.pacer.wait().await;
        log::debug!("Getting DOI for paper by {surname}: {title}");

        match self.source.query(contact, surname, title).await {
            Ok(Some(doi)) => LookupOutcome::Found(doi),
            Ok(None) => LookupOutcome::NotFound,
            Err(e) => LookupOutcome::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::utils::test_server::{serve_once, serve_stalled};

    #[derive(Clone)]
    enum MockResponse {
        Found(&'static str),
        NotFound,
        Error(&'static str),
    }

    /// Records the time and arguments of each query.
    #[derive(Clone)]
    struct MockSource {
        response: MockResponse,
        calls: Arc<Mutex<Vec<(Instant, String, String)>>>,
    }

    impl MockSource {
        fn new(response: MockResponse) -> Self {
            Self {
                response,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl DoiSource for MockSource {
        async fn query(&self, _contact: &str, surname: &str, title: &str) -> Result<Option<String>> {
            self.calls
                .lock()
                .unwrap()
                .push((Instant::now(), surname.to_string(), title.to_string()));
            match self.response {
                MockResponse::Found(doi) => Ok(Some(doi.to_string())),
                MockResponse::NotFound => Ok(None),
                MockResponse::Error(msg) => Err(AppError::lookup(msg)),
            }
        }
    }

    fn make_resolver(source: &MockSource, contact: Option<&str>) -> IdentifierResolver {
        IdentifierResolver::new(
            Box::new(source.clone()),
            contact.map(str::to_string),
            Duration::from_secs(1),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn disabled_resolver_makes_no_calls() {
        let source = MockSource::new(MockResponse::Found("10.1/x"));
        let mut resolver = make_resolver(&source, None);
        let start = Instant::now();

        let outcome = resolver.resolve("Smith", "Great Results").await;

        assert_eq!(outcome, LookupOutcome::Disabled);
        assert_eq!(outcome.identifier(), "");
        assert_eq!(source.call_count(), 0);
        assert_eq!(Instant::now(), start);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_contact_counts_as_disabled() {
        let source = MockSource::new(MockResponse::Found("10.1/x"));
        let mut resolver = make_resolver(&source, Some(""));
        assert!(!resolver.is_enabled());
        assert_eq!(resolver.resolve("Smith", "T").await, LookupOutcome::Disabled);
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn found_identifier_is_returned_verbatim() {
        let source = MockSource::new(MockResponse::Found("10.1038/Nature.123"));
        let mut resolver = make_resolver(&source, Some("me@example.org"));

        let outcome = resolver.resolve("Smith", "Great Results").await;

        assert!(outcome.succeeded());
        assert_eq!(outcome.identifier(), "10.1038/Nature.123");
        let calls = source.calls.lock().unwrap();
        assert_eq!(calls[0].1, "Smith");
        assert_eq!(calls[0].2, "Great Results");
    }

    #[tokio::test(start_paused = true)]
    async fn failures_degrade_to_empty_identifier() {
        let source = MockSource::new(MockResponse::Error("connection refused"));
        let mut resolver = make_resolver(&source, Some("me@example.org"));

        let outcome = resolver.resolve("Smith", "T").await;

        assert!(matches!(outcome, LookupOutcome::Failed(ref msg) if msg.contains("connection refused")));
        assert_eq!(outcome.identifier(), "");

        let source = MockSource::new(MockResponse::NotFound);
        let mut resolver = make_resolver(&source, Some("me@example.org"));
        assert_eq!(resolver.resolve("Smith", "T").await, LookupOutcome::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn lookups_are_spaced_by_interval() {
        let source = MockSource::new(MockResponse::NotFound);
        let mut resolver = make_resolver(&source, Some("me@example.org"));
        let start = Instant::now();

        for i in 0..5 {
            resolver.resolve("Smith", &format!("Paper {i}")).await;
            if i == 2 {
                // Work between lookups counts toward the pause.
                tokio::time::sleep(Duration::from_millis(1500)).await;
            }
        }

        let calls = source.calls.lock().unwrap();
        assert_eq!(calls.len(), 5);
        assert!(calls[0].0 - start >= Duration::from_secs(1));
        for pair in calls.windows(2) {
            assert!(pair[1].0 - pair[0].0 >= Duration::from_secs(1));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn pacer_skips_wait_when_interval_already_passed() {
        let mut pacer = Pacer::new(Duration::from_secs(1));
        pacer.wait().await;
        tokio::time::sleep(Duration::from_secs(3)).await;
        let before = Instant::now();
        pacer.wait().await;
        assert_eq!(Instant::now(), before);
    }

    fn live_resolver(base: &str, timeout_secs: u64) -> IdentifierResolver {
        let config = LookupConfig {
            contact: Some("me@example.org".to_string()),
            base_url: format!("{base}/openurl?redirect=false"),
            delay_ms: 10,
            timeout_secs,
        };
        IdentifierResolver::from_config(&config, Client::new())
    }

    #[tokio::test]
    async fn crossref_json_doi_is_found() {
        let base = serve_once("200 OK", r#"{"created":{"DOI":"10.1/x"}}"#).await;
        let outcome = live_resolver(&base, 5).resolve("Smith", "Great Results").await;
        assert_eq!(outcome, LookupOutcome::Found("10.1/x".to_string()));
    }

    #[tokio::test]
    async fn crossref_error_status_fails() {
        let base = serve_once("500 Internal Server Error", "oops").await;
        let outcome = live_resolver(&base, 5).resolve("Smith", "T").await;
        assert!(matches!(outcome, LookupOutcome::Failed(ref msg) if msg.contains("500")));
        assert_eq!(outcome.identifier(), "");
    }

    #[tokio::test]
    async fn crossref_invalid_json_fails() {
        let base = serve_once("200 OK", "<crossref_result/>").await;
        let outcome = live_resolver(&base, 5).resolve("Smith", "T").await;
        assert!(matches!(outcome, LookupOutcome::Failed(_)));
        assert_eq!(outcome.identifier(), "");
    }

    #[tokio::test]
    async fn crossref_answer_without_doi_is_not_found() {
        let base = serve_once("200 OK", r#"{"status":"unresolved"}"#).await;
        let outcome = live_resolver(&base, 5).resolve("Smith", "T").await;
        assert_eq!(outcome, LookupOutcome::NotFound);
    }

    #[tokio::test]
    async fn crossref_stalled_response_times_out() {
        let base = serve_stalled().await;
        let started = std::time::Instant::now();
        let outcome = live_resolver(&base, 1).resolve("Smith", "T").await;
        assert!(matches!(outcome, LookupOutcome::Failed(_)));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn query_url_escapes_title() {
        let source = CrossRefOpenUrl::new(
            Client::new(),
            "http://www.crossref.org/openurl?redirect=false",
            Duration::from_secs(5),
        );
        assert_eq!(
            source.query_url("me@example.org", "Smith", "Ants & bees: a study"),
            "http://www.crossref.org/openurl?redirect=false&pid=me%40example.org\
             &aulast=Smith&atitle=Ants+%26+bees%3A+a+study&format=json"
        );
    }

    #[test]
    fn query_url_escapes_surname() {
        let source = CrossRefOpenUrl::new(
            Client::new(),
            "http://www.crossref.org/openurl?redirect=false",
            Duration::from_secs(5),
        );
        let url = source.query_url("me@example.org", "O'Brien&x=1", "T");
        assert!(url.contains("&aulast=O%27Brien%26x%3D1&"));
    }

    #[test]
    fn parse_doi_reads_known_fields() {
        assert_eq!(
            parse_doi(&json!({"created": {"DOI": "10.1/a"}})),
            Some("10.1/a".to_string())
        );
        assert_eq!(
            parse_doi(&json!({"message": {"DOI": "10.1/b"}})),
            Some("10.1/b".to_string())
        );
        assert_eq!(parse_doi(&json!({"DOI": "10.1/c"})), Some("10.1/c".to_string()));
        assert_eq!(parse_doi(&json!({"created": {"DOI": ""}})), None);
        assert_eq!(
            parse_doi(&json!({"created": {"DOI": ""}, "message": {"DOI": "10.1/m"}})),
            Some("10.1/m".to_string())
        );
        assert_eq!(
            parse_doi(&json!({"DOI": " 10.1/spaced "})),
            Some(" 10.1/spaced ".to_string())
        );
        assert_eq!(parse_doi(&json!({"status": "unresolved"})), None);
    }
}
