#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use bytes::Bytes;
use http_body_util::BodyExt;
use parking_lot::Mutex;
use ssml_gateway::{
    ServerConfig, SpeechSynthesizer, SynthesizedAudio, TTSError, TTSResult, Voice, create_app,
    state::AppState,
};
use tower::ServiceExt;

pub const FAKE_AUDIO: &[u8] = &[0xFF, 0xF3, 0x44, 0xC4];

/// Records every document it is asked to synthesize.
#[derive(Default)]
pub struct StubSynthesizer {
    pub calls: AtomicUsize,
    pub last_ssml: Mutex<Option<String>>,
    pub fail_with: Option<TTSError>,
}

impl StubSynthesizer {
    pub fn failing(error: TTSError) -> Self {
        Self {
            fail_with: Some(error),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_ssml(&self) -> Option<String> {
        self.last_ssml.lock().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for StubSynthesizer {
    async fn synthesize(&self, ssml: &str) -> TTSResult<SynthesizedAudio> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_ssml.lock() = Some(ssml.to_string());

        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        Ok(SynthesizedAudio {
            data: Bytes::from_static(FAKE_AUDIO),
            content_type: "audio/mpeg".to_string(),
        })
    }

    async fn list_voices(&self) -> TTSResult<Vec<Voice>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        Ok(serde_json::from_value(serde_json::json!([
            {"ShortName": "en-US-JennyNeural", "Locale": "en-US", "Gender": "Female"},
            {"ShortName": "zh-CN-XiaoxiaoNeural", "Locale": "zh-CN", "Gender": "Female"}
        ]))
        .unwrap())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

pub fn app_with(config: ServerConfig, stub: Option<Arc<StubSynthesizer>>) -> Router {
    let synthesizer = stub.map(|s| s as Arc<dyn SpeechSynthesizer>);
    create_app(AppState::with_synthesizer(config, synthesizer))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_auth(uri: &str, authorization: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("authorization", authorization)
        .body(Body::empty())
        .unwrap()
}

pub fn get_from(uri: &str, client_ip: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-real-ip", client_ip)
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
