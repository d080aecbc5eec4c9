use std::collections::HashMap;
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use parking_lot::Mutex;
use reqwest::blocking::Client as HttpClient;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::RelationKind;

const DEFAULT_ENDPOINT: &str = "https://api.wordnik.com/v4";
const DEFAULT_USER_AGENT: &str = "lexigraph/0.1";

/// One relationship category returned by the word service, e.g. all the
/// synonyms of a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRelationship {
    pub relationship_type: String,
    #[serde(default)]
    pub words: Vec<String>,
}

impl WordRelationship {
    pub fn new(relationship_type: impl Into<String>, words: &[&str]) -> Self {
        Self {
            relationship_type: relationship_type.into(),
            words: words.iter().map(|word| word.to_string()).collect(),
        }
    }
}

/// Maps an external relationship category onto a relation kind. Categories
/// without a counterpart are ignored by training.
pub fn map_relationship(relationship_type: &str) -> Option<RelationKind> {
    match relationship_type {
        "synonym" => Some(RelationKind::Synonym),
        "antonym" => Some(RelationKind::Antonym),
        "variant" => Some(RelationKind::Identical),
        "hypernym" => Some(RelationKind::Subset),
        "hyponym" => Some(RelationKind::Superset),
        _ => None,
    }
}

pub trait RelatedWordsSource: Send + Sync {
    fn related_words(&self, word: &str) -> Result<Vec<WordRelationship>>;
}

#[derive(Debug, Clone)]
pub struct WordnikConfig {
    pub endpoint: String,
    pub api_key: String,
    pub limit_per_relationship_type: usize,
    pub max_attempts: u32,
    pub retry_base_delay: Duration,
    pub timeout: Duration,
}

impl WordnikConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            limit_per_relationship_type: 10,
            max_attempts: 3,
            retry_base_delay: Duration::from_secs(1),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit_per_relationship_type = limit.max(1);
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}

pub struct WordnikClient {
    http: HttpClient,
    config: WordnikConfig,
}

impl WordnikClient {
    pub fn new(config: WordnikConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(config.timeout)
            .build()
            .context("impossible d'initialiser le client HTTP pour Wordnik")?;
        Ok(Self { http, config })
    }

    fn related_words_url(&self, word: &str) -> Result<Url> {
        let mut url = Url::parse(&self.config.endpoint)
            .with_context(|| format!("URL Wordnik invalide: {}", self.config.endpoint))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("URL Wordnik sans chemin: {}", self.config.endpoint))?
            .pop_if_empty()
            .push("word.json")
            .push(word)
            .push("relatedWords");
        url.query_pairs_mut()
            .append_pair("useCanonical", "true")
            .append_pair(
                "limitPerRelationshipType",
                &self.config.limit_per_relationship_type.to_string(),
            )
            .append_pair("api_key", &self.config.api_key);
        Ok(url)
    }
}

impl RelatedWordsSource for WordnikClient {
    fn related_words(&self, word: &str) -> Result<Vec<WordRelationship>> {
        let url = self.related_words_url(word)?;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            match self.http.get(url.clone()).send() {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let relationships: Vec<WordRelationship> = response
                            .json()
                            .context("réponse Wordnik illisible")?;
                        debug!(word, categories = relationships.len(), "message" = "mots liés reçus");
                        return Ok(relationships);
                    }

                    if should_retry_status(status) && attempt < self.config.max_attempts {
                        warn!(
                            attempt,
                            status = status.as_u16(),
                            word,
                            "message" = "réponse HTTP non valide, nouvelle tentative"
                        );
                        sleep(retry_delay(self.config.retry_base_delay, attempt));
                        continue;
                    }

                    return Err(anyhow!(
                        "réponse HTTP invalide depuis Wordnik pour '{}' (statut {})",
                        word,
                        status
                    ));
                }
                Err(err) => {
                    if attempt < self.config.max_attempts {
                        warn!(
                            attempt,
                            word,
                            "erreur" = %err,
                            "message" = "erreur lors de l'appel à Wordnik, nouvelle tentative"
                        );
                        sleep(retry_delay(self.config.retry_base_delay, attempt));
                        continue;
                    }
                    return Err(anyhow!("échec lors de l'appel à Wordnik pour '{word}': {err}"));
                }
            }
        }
    }
}

fn should_retry_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
            | StatusCode::BAD_GATEWAY
            | StatusCode::REQUEST_TIMEOUT
            | StatusCode::INTERNAL_SERVER_ERROR
    )
}

fn retry_delay(base: Duration, attempt: u32) -> Duration {
    let step = 1u32 << attempt.saturating_sub(1).min(16);
    base.saturating_mul(step)
}

/// In-memory word service keyed by word; unknown words have no relations.
#[derive(Clone, Default)]
pub struct MockRelatedWords {
    responses: Arc<Mutex<HashMap<String, Vec<WordRelationship>>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockRelatedWords {
    pub fn insert(&self, word: &str, relationships: Vec<WordRelationship>) {
        self.responses.lock().insert(word.to_string(), relationships);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

impl RelatedWordsSource for MockRelatedWords {
    fn related_words(&self, word: &str) -> Result<Vec<WordRelationship>> {
        self.requests.lock().push(word.to_string());
        Ok(self.responses.lock().get(word).cloned().unwrap_or_default())
    }
}
