//! A client for Cambridge Dictionary entry pages.
//!
//! The client only fetches; every page is handed to [`RecordAssembler`] for extraction.

use std::time::Duration;

use async_trait::async_trait;
use omni_core::{DictionaryRecord, RecordAssembler};
use reqwest::ClientBuilder;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::{Dictionary, LookupError};

/// The default location of English entry pages.
pub const BASE_URL: &str = "https://dictionary.cambridge.org/dictionary/english/";
/// The default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// An asynchronous client for the Cambridge English Dictionary.
#[derive(Debug, Clone)]
pub struct CambridgeClient {
    /// Entry pages live at `{base_url}{term}`.
    base_url: String,
    client: reqwest::Client,
    assembler: RecordAssembler,
}

impl CambridgeClient {
    /// Builds a client sending `user_agent` with every request.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::BuildClient`] if the underlying HTTP client cannot be built.
    pub fn try_new(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<CambridgeClient, LookupError> {
        let mut headers = HeaderMap::new();

        if let Ok(value) = HeaderValue::from_str(user_agent) {
            headers.insert(USER_AGENT, value);
        } else {
            tracing::warn!("Ignoring invalid user agent: {}", user_agent);
        }

        let client = ClientBuilder::new()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(LookupError::BuildClient)?;

        Ok(Self::with_client(client, base_url))
    }

    /// Constructs a `CambridgeClient` using a pre-configured `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> CambridgeClient {
        CambridgeClient {
            base_url: base_url.into(),
            client,
            assembler: RecordAssembler::cambridge(),
        }
    }

    /// Fetches the raw entry page for `term`.
    ///
    /// # Errors
    ///
    /// - [`LookupError::Request`] on network failures and timeouts.
    /// - [`LookupError::Status`] when the server answers with a non-success status.
    pub async fn fetch(&self, term: &str) -> Result<String, LookupError> {
        let url = format!("{}{}", self.base_url, term);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(LookupError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        response.text().await.map_err(LookupError::Request)
    }
}

#[async_trait]
impl Dictionary for CambridgeClient {
    fn name(&self) -> &str {
        "Cambridge Dictionary"
    }

    async fn lookup(&self, term: &str) -> Result<Option<DictionaryRecord>, LookupError> {
        let page = self.fetch(term).await?;
        let record = self.assembler.assemble(&page, term);

        match &record {
            Some(record) => tracing::info!(
                "Dictionary result for '{}': {} definitions, {} examples",
                term,
                record.definitions.len(),
                record.examples.len()
            ),
            None => tracing::info!("No dictionary entry for '{}'", term),
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use super::*;

    const ENTRY: &str = r#"<html><body>
<span class="pos dpos">noun</span>
<span class="ipa dipa lpr-2 lpl-1">ɪkˈsep.ʃən</span>
<div class="pos-body">
<div class="def ddef_d db">someone or something that is not included in a rule</div>
<div class="examp dexamp"><span class="eg deg">I like all kinds of music with the exception of opera.</span></div>
</div>
</div>
</div>
</body></html>"#;

    fn client(server: &MockServer) -> CambridgeClient {
        CambridgeClient::try_new(server.url("/dictionary/english/"), "omni-test", DEFAULT_TIMEOUT)
            .unwrap()
    }

    #[tokio::test]
    async fn test_lookup_found() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/dictionary/english/exception")
                    .header("user-agent", "omni-test");
                then.status(200).body(ENTRY);
            })
            .await;

        let record = client(&server).lookup("exception").await.unwrap().unwrap();

        mock.assert_async().await;
        assert_eq!(record.term, "exception");
        assert_eq!(record.part_of_speech, "noun");
        assert_eq!(record.pronunciation, "ɪkˈsep.ʃən");
        assert_eq!(
            record.definitions,
            vec!["someone or something that is not included in a rule"]
        );
        assert_eq!(
            record.examples,
            vec!["I like all kinds of music with the exception of opera."]
        );
    }

    #[tokio::test]
    async fn test_lookup_page_without_entry() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/dictionary/english/qwzx");
                then.status(200).body("<html><h1>Search results</h1></html>");
            })
            .await;

        let record = client(&server).lookup("qwzx").await.unwrap();

        assert_eq!(record, None);
    }

    #[tokio::test]
    async fn test_lookup_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(404);
            })
            .await;

        let result = client(&server).lookup("missing").await;

        assert!(matches!(
            result,
            Err(LookupError::Status(status)) if status.as_u16() == 404
        ));
    }

    #[test]
    fn test_with_client() {
        let http_client = reqwest::Client::new();
        let client = CambridgeClient::with_client(http_client, BASE_URL);

        assert_eq!(client.name(), "Cambridge Dictionary");
    }
}
