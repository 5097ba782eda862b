//! The external translator boundary.
//!
//! The engine treats translation as a black box behind the [`Translator`]
//! trait. Two implementations ship with the crate: a deterministic
//! [`PassthroughTranslator`] for tests and offline runs, and an
//! [`HttpTranslator`] for JSON translation endpoints
//! (`POST {q, source?, target}` returning `{"translatedText": ...}`).

use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::retry::{with_retry_if, RetryConfig};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A black-box translation backend.
///
/// Implementations may fail or time out; the dispatcher aborts the whole
/// per-locale submission on the first failure.
pub trait Translator: Send + Sync {
    /// Translate source text into the target locale.
    fn translate<'a>(&'a self, text: &'a str, target: &'a Locale) -> BoxFuture<'a, Result<String>>;
}

/// Deterministic stand-in translator: tags text with the locale code, so
/// `"Acme"` translated to `fr` becomes `"[fr] Acme"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

impl Translator for PassthroughTranslator {
    fn translate<'a>(&'a self, text: &'a str, target: &'a Locale) -> BoxFuture<'a, Result<String>> {
        let tagged = format!("[{}] {}", target, text);
        Box::pin(async move { Ok(tagged) })
    }
}

/// Endpoint settings for [`HttpTranslator`].
#[derive(Debug, Clone)]
pub struct HttpTranslatorConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    /// Source locale hint sent with each request, when the endpoint wants
    /// one instead of auto-detection.
    pub source_locale: Option<Locale>,
}

impl HttpTranslatorConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: None,
            timeout: Duration::from_secs(30),
            source_locale: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_source_locale(mut self, locale: Locale) -> Self {
        self.source_locale = Some(locale);
        self
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_url: std::env::var("TRANSLATOR_API_URL")
                .map_err(|_| Error::Config("TRANSLATOR_API_URL not set".to_string()))?,
            api_key: std::env::var("TRANSLATOR_API_KEY").ok(),
            timeout: std::env::var("TRANSLATOR_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(30)),
            source_locale: std::env::var("TRANSLATOR_SOURCE_LOCALE")
                .ok()
                .map(Locale::new)
                .transpose()?,
        })
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// HTTP client for a JSON translation endpoint, with retry on transient
/// failures.
pub struct HttpTranslator {
    client: reqwest::Client,
    config: HttpTranslatorConfig,
    retry: RetryConfig,
}

impl HttpTranslator {
    pub fn new(config: HttpTranslatorConfig) -> Result<HttpTranslator> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(HttpTranslator {
            client,
            config,
            retry: RetryConfig::translator_call(),
        })
    }

    pub fn from_env() -> Result<HttpTranslator> {
        Self::new(HttpTranslatorConfig::from_env()?)
    }

    /// Override the retry policy (the default is
    /// [`RetryConfig::translator_call`]).
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    async fn request(&self, text: &str, target: &Locale) -> Result<String> {
        let body = TranslateRequest {
            q: text,
            source: self.config.source_locale.as_ref().map(Locale::as_str),
            target: target.as_str(),
            format: "text",
        };

        let mut request = self.client.post(&self.config.api_url).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await.map_err(|e| Error::Translator {
            locale: target.clone(),
            message: format!("request failed: {}", e),
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(Error::Translator {
                locale: target.clone(),
                message: format!("HTTP {}: {}", status.as_u16(), body),
            });
        }

        let parsed: TranslateResponse = response.json().await.map_err(|e| Error::Translator {
            locale: target.clone(),
            message: format!("malformed response: {}", e),
        })?;

        Ok(parsed.translated_text)
    }
}

/// Retry 429 and 5xx responses plus network/parse failures; other client
/// errors (400, 401, 403, ...) fail fast.
fn is_retryable(error: &Error) -> bool {
    if let Error::Translator { message, .. } = error {
        if let Some(rest) = message.strip_prefix("HTTP ") {
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            if let Ok(status) = digits.parse::<u16>() {
                return status == 429 || status >= 500;
            }
        }
        return true;
    }
    false
}

impl Translator for HttpTranslator {
    fn translate<'a>(&'a self, text: &'a str, target: &'a Locale) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            with_retry_if(
                &self.retry,
                &format!("translation to '{}'", target),
                || self.request(text, target),
                is_retryable,
            )
            .await
        })
    }
}
