use async_trait::async_trait;
use md5::{Digest, Md5};
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::{Credentials, Translator, NO_TRANSLATION};
use crate::config::TranslateConfig;
use crate::error::{BisubError, Result};

/// Response shape of the translate endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    #[serde(default)]
    pub trans_result: Option<Vec<TranslatePair>>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_msg: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatePair {
    pub src: String,
    pub dst: String,
}

/// Gateway to the Baidu translate endpoint with request signing and retry.
pub struct BaiduTranslator {
    client: Client,
    config: TranslateConfig,
    credentials: Credentials,
    disabled: bool,
}

impl BaiduTranslator {
    pub fn new(config: TranslateConfig, credentials: Credentials) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("HTTP client creation should not fail");

        Self {
            client,
            config,
            credentials,
            disabled: false,
        }
    }

    /// One signed GET against the endpoint.
    async fn request_translation(&self, text: &str) -> Result<String> {
        let salt = fresh_salt();
        let sign = sign_request(&self.credentials.app_id, text, salt, &self.credentials.app_key);
        let salt_str = salt.to_string();

        debug!("Sending translation request to: {}", self.config.endpoint);

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("q", text),
                ("from", self.config.source_lang.as_str()),
                ("to", self.config.target_lang.as_str()),
                ("appid", self.credentials.app_id.as_str()),
                ("salt", salt_str.as_str()),
                ("sign", sign.as_str()),
            ])
            .send()
            .await
            .map_err(|e| BisubError::Translation(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(BisubError::Translation(format!(
                "translate endpoint error {}: {}",
                status, error_text
            )));
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| BisubError::Translation(format!("Failed to parse response: {}", e)))?;

        parse_translation(body)
    }
}

#[async_trait]
impl Translator for BaiduTranslator {
    async fn translate(&mut self, text: &str) -> Result<String> {
        if self.disabled {
            return Ok(NO_TRANSLATION.to_string());
        }

        let attempts = self.config.max_retries.max(1);
        for attempt in 1..=attempts {
            match self.request_translation(text).await {
                Ok(translation) => return Ok(translation),
                Err(e) => {
                    warn!("│ Attempt {}/{} failed: {}", attempt, attempts, e);
                    if attempt < attempts {
                        tokio::time::sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
                    }
                }
            }
        }

        Err(BisubError::TranslationExhausted(attempts))
    }

    fn disable(&mut self) {
        self.disabled = true;
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }
}

/// A fresh uniform salt in `[32768, 65536)`.
fn fresh_salt() -> u32 {
    rand::thread_rng().gen_range(32_768..65_536)
}

/// `sign = md5(app_id + text + salt + app_key)` as lowercase hex.
pub fn sign_request(app_id: &str, text: &str, salt: u32, app_key: &str) -> String {
    md5_hex(&format!("{}{}{}{}", app_id, text, salt, app_key))
}

fn md5_hex(payload: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(payload.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Extract `trans_result[0].dst`; anything else counts as a failed attempt.
fn parse_translation(body: TranslateResponse) -> Result<String> {
    if let Some(code) = body.error_code {
        return Err(BisubError::Translation(format!(
            "endpoint error {}: {}",
            code,
            body.error_msg.unwrap_or_default()
        )));
    }

    body.trans_result
        .and_then(|pairs| pairs.into_iter().next())
        .map(|pair| pair.dst)
        .ok_or_else(|| BisubError::Translation("response carries no trans_result".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_hex_known_vectors() {
        assert_eq!(md5_hex(""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(md5_hex("abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_sign_concatenation_order() {
        assert_eq!(
            sign_request("20250001", "Good morning.", 40_000, "secret"),
            md5_hex("20250001Good morning.40000secret")
        );
        // Lowercase hex, 32 digits.
        let sign = sign_request("a", "b", 32_768, "c");
        assert_eq!(sign.len(), 32);
        assert!(sign.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
    }

    #[test]
    fn test_salt_range() {
        for _ in 0..1000 {
            let salt = fresh_salt();
            assert!((32_768..65_536).contains(&salt));
        }
    }

    #[test]
    fn test_parse_translation_success() {
        let body: TranslateResponse = serde_json::from_str(
            r#"{ "from": "en", "to": "zh", "trans_result": [ { "src": "Good morning.", "dst": "早上好。" } ] }"#,
        )
        .unwrap();
        assert_eq!(parse_translation(body).unwrap(), "早上好。");
    }

    #[test]
    fn test_parse_translation_missing_result() {
        let body: TranslateResponse = serde_json::from_str(r#"{ "from": "en" }"#).unwrap();
        assert!(matches!(
            parse_translation(body),
            Err(BisubError::Translation(_))
        ));
    }

    #[test]
    fn test_parse_translation_endpoint_error() {
        let body: TranslateResponse = serde_json::from_str(
            r#"{ "error_code": "54001", "error_msg": "Invalid Sign" }"#,
        )
        .unwrap();
        let err = parse_translation(body).unwrap_err();
        assert!(err.to_string().contains("54001"));
    }

    #[tokio::test]
    async fn test_disabled_gateway_returns_sentinel_without_network() {
        let credentials = Credentials {
            app_id: "20250001".to_string(),
            app_key: "secret".to_string(),
        };
        let mut translator = BaiduTranslator::new(TranslateConfig::default(), credentials);

        assert!(!translator.is_disabled());
        translator.disable();
        assert!(translator.is_disabled());
        assert_eq!(translator.translate("Good morning.").await.unwrap(), NO_TRANSLATION);
    }
}
