use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info};

use super::config::{AZURE_OUTPUT_FORMAT_HEADER, AZURE_SUBSCRIPTION_KEY_HEADER, AzureTTSConfig};
use crate::core::tts::{SpeechSynthesizer, SynthesizedAudio, TTSError, TTSResult, Voice};

/// User-Agent header value for upstream requests.
const USER_AGENT: &str = "ssml-gateway";

/// Longest upstream error body echoed into an error message.
const MAX_ERROR_BODY: usize = 512;

/// Azure Cognitive Services Text-to-Speech over its REST API.
#[derive(Debug, Clone)]
pub struct AzureSynthesizer {
    client: reqwest::Client,
    config: AzureTTSConfig,
}

impl AzureSynthesizer {
    pub fn new(config: AzureTTSConfig) -> TTSResult<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TTSError::InvalidConfiguration(format!("HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AzureTTSConfig {
        &self.config
    }

    async fn error_from_response(response: reqwest::Response) -> TTSError {
        let status = response.status();
        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }
        TTSError::ProviderError(format!("Azure TTS returned {status}: {body}"))
    }
}

#[async_trait]
impl SpeechSynthesizer for AzureSynthesizer {
    async fn synthesize(&self, ssml: &str) -> TTSResult<SynthesizedAudio> {
        debug!(
            url = %self.config.synthesis_url(),
            ssml_length = ssml.len(),
            "Sending synthesis request"
        );

        let response = self
            .client
            .post(self.config.synthesis_url())
            .header(AZURE_SUBSCRIPTION_KEY_HEADER, &self.config.subscription_key)
            .header(CONTENT_TYPE, "application/ssml+xml")
            .header(AZURE_OUTPUT_FORMAT_HEADER, &self.config.output_format)
            .body(ssml.to_string())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| v.starts_with("audio/"))
            .unwrap_or_else(|| self.config.content_type())
            .to_string();

        let data = response.bytes().await?;
        if data.is_empty() {
            return Err(TTSError::AudioGenerationFailed(
                "Azure TTS returned an empty audio body".to_string(),
            ));
        }

        info!(audio_size = data.len(), "Azure synthesis completed");
        Ok(SynthesizedAudio { data, content_type })
    }

    async fn list_voices(&self) -> TTSResult<Vec<Voice>> {
        let response = self
            .client
            .get(self.config.voices_url())
            .header(AZURE_SUBSCRIPTION_KEY_HEADER, &self.config.subscription_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        response
            .json::<Vec<Voice>>()
            .await
            .map_err(|e| TTSError::ProviderError(format!("Invalid voice list: {e}")))
    }

    fn name(&self) -> &'static str {
        "azure"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn synthesizer_for(server: &MockServer) -> AzureSynthesizer {
        AzureSynthesizer::new(AzureTTSConfig {
            subscription_key: "test-key".to_string(),
            endpoint: Some(server.uri()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_new_rejects_missing_key() {
        let result = AzureSynthesizer::new(AzureTTSConfig::default());
        assert!(matches!(result, Err(TTSError::InvalidConfiguration(_))));
    }

    #[tokio::test]
    async fn test_synthesize_posts_ssml() {
        let server = MockServer::start().await;
        let ssml = "<speak>hello</speak>";

        Mock::given(method("POST"))
            .and(path("/cognitiveservices/v1"))
            .and(header("Ocp-Apim-Subscription-Key", "test-key"))
            .and(header("Content-Type", "application/ssml+xml"))
            .and(header("X-Microsoft-OutputFormat", "audio-24khz-48kbitrate-mono-mp3"))
            .and(body_string(ssml))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/mpeg")
                    .set_body_bytes(vec![0xFF, 0xF3, 0x44]),
            )
            .expect(1)
            .mount(&server)
            .await;

        let audio = synthesizer_for(&server).synthesize(ssml).await.unwrap();
        assert_eq!(audio.data.as_ref(), &[0xFF, 0xF3, 0x44]);
        assert_eq!(audio.content_type, "audio/mpeg");
    }

    #[tokio::test]
    async fn test_synthesize_falls_back_to_format_content_type() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
            .mount(&server)
            .await;

        let audio = synthesizer_for(&server).synthesize("<speak/>").await.unwrap();
        assert_eq!(audio.content_type, "audio/mpeg");
    }

    #[tokio::test]
    async fn test_synthesize_maps_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad ssml"))
            .mount(&server)
            .await;

        let err = synthesizer_for(&server)
            .synthesize("<speak/>")
            .await
            .unwrap_err();
        match err {
            TTSError::ProviderError(msg) => {
                assert!(msg.contains("400"));
                assert!(msg.contains("bad ssml"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_synthesize_rejects_empty_audio() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let err = synthesizer_for(&server)
            .synthesize("<speak/>")
            .await
            .unwrap_err();
        assert!(matches!(err, TTSError::AudioGenerationFailed(_)));
    }

    #[tokio::test]
    async fn test_list_voices() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/cognitiveservices/voices/list"))
            .and(header("Ocp-Apim-Subscription-Key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"ShortName": "en-US-JennyNeural", "Locale": "en-US", "Gender": "Female"},
                {"ShortName": "zh-CN-XiaoxiaoNeural", "Locale": "zh-CN", "Gender": "Female"}
            ])))
            .mount(&server)
            .await;

        let voices = synthesizer_for(&server).list_voices().await.unwrap();
        assert_eq!(voices.len(), 2);
        assert_eq!(voices[1].short_name, "zh-CN-XiaoxiaoNeural");
        assert_eq!(voices[0].extra["Gender"], "Female");
    }

    #[tokio::test]
    async fn test_network_error() {
        let synthesizer = AzureSynthesizer::new(AzureTTSConfig {
            subscription_key: "k".to_string(),
            endpoint: Some("http://127.0.0.1:1".to_string()),
            ..Default::default()
        })
        .unwrap();

        let err = synthesizer.list_voices().await.unwrap_err();
        assert!(matches!(err, TTSError::NetworkError(_)));
    }
}
