use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::booking::Airport;

/// Query parameter carrying the free text, as the endpoint expects it.
const SEARCH_TERM_PARAM: &str = "searchTerm";

/// Failures while fetching suggestion candidates.
///
/// These are values, not panics: the worker forwards them to the UI, which
/// shows a non-blocking notice for the affected side and keeps the previous
/// candidate list.
#[derive(Debug, Error)]
pub enum SuggestError {
    /// The endpoint answered with a non-success status.
    #[error("suggestion endpoint returned HTTP {status}")]
    Http { status: u16 },
    /// The request never completed (DNS, connect, timeout).
    #[error("suggestion request failed: {0}")]
    Transport(String),
    /// The response body was not the expected JSON envelope.
    #[error("suggestion response could not be decoded: {0}")]
    Decode(String),
}

/// Response envelope from the suggestion endpoint.
///
/// A body without the `results` field decodes as an empty candidate list
/// rather than an error.
#[derive(Debug, Default, Deserialize)]
struct SuggestionPayload {
    #[serde(default)]
    results: Vec<Airport>,
}

/// Source of suggestion candidates for a free-text term.
///
/// The production implementation speaks HTTP; worker and UI tests substitute
/// scripted sources.
pub trait SuggestSource: Send + 'static {
    fn search(&self, term: &str) -> Result<Vec<Airport>, SuggestError>;
}

/// HTTP source issuing `GET <endpoint>?searchTerm=<term>`.
pub struct HttpSuggestSource {
    client: Client,
    endpoint: String,
}

impl HttpSuggestSource {
    /// Build a source for the configured endpoint with a per-request
    /// timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SuggestError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SuggestError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl SuggestSource for HttpSuggestSource {
    fn search(&self, term: &str) -> Result<Vec<Airport>, SuggestError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[(SEARCH_TERM_PARAM, term)])
            .send()
            .map_err(|err| SuggestError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SuggestError::Http {
                status: status.as_u16(),
            });
        }

        let payload: SuggestionPayload = response
            .json()
            .map_err(|err| SuggestError::Decode(err.to_string()))?;
        Ok(payload.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_decodes_result_records() {
        let payload: SuggestionPayload = serde_json::from_str(
            r#"{"results":[{"municipality":"London","name":"Heathrow","iata_code":"LHR"}]}"#,
        )
        .expect("decode");
        assert_eq!(payload.results.len(), 1);
        assert_eq!(payload.results[0].iata_code, "LHR");
        assert_eq!(payload.results[0].municipality, "London");
    }

    #[test]
    fn missing_results_field_is_an_empty_list() {
        let payload: SuggestionPayload = serde_json::from_str("{}").expect("decode");
        assert!(payload.results.is_empty());
    }

    #[test]
    fn extra_envelope_fields_are_ignored() {
        let payload: SuggestionPayload = serde_json::from_str(
            r#"{"total":412,"results":[{"iata_code":"CDG"}],"took_ms":9}"#,
        )
        .expect("decode");
        assert_eq!(payload.results.len(), 1);
        assert!(payload.results[0].name.is_empty());
    }

    #[test]
    fn error_messages_name_the_failure() {
        let error = SuggestError::Http { status: 503 };
        assert_eq!(error.to_string(), "suggestion endpoint returned HTTP 503");
        let error = SuggestError::Transport("connection refused".into());
        assert!(error.to_string().contains("connection refused"));
    }
}
