//! Integration tests for HTTP handlers
#![allow(clippy::expect_used)]

use std::io::Cursor;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use ai_speech::{
    AudioFormat, AudioTranscoder, CanonicalWaveform, EncodedAudio, ProviderKind, SpeechError,
    SpeechSynthesizer, SynthesisOrchestrator, SynthesisService,
};
use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use domain::SynthesisRequest;
use infrastructure::AppConfig;
use presentation_http::{routes::create_router, state::AppState};
use serde_json::{Value, json};

/// How a stub provider answers
#[derive(Debug, Clone, Copy)]
enum Outcome {
    Audio,
    Unavailable,
    Fail,
}

/// Stub provider recording what it was asked for
#[derive(Debug)]
struct StubProvider {
    kind: ProviderKind,
    outcome: Outcome,
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, f64)>>,
}

impl StubProvider {
    fn new(kind: ProviderKind, outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            kind,
            outcome,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_seen(&self) -> Option<(String, f64)> {
        self.seen.lock().expect("lock").last().cloned()
    }
}

#[async_trait]
impl SpeechSynthesizer for StubProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn is_configured(&self) -> bool {
        !matches!(self.outcome, Outcome::Unavailable)
    }

    async fn synthesize(&self, request: &SynthesisRequest) -> Result<EncodedAudio, SpeechError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .expect("lock")
            .push((request.accent.bucket().to_string(), request.rate.multiplier()));

        match self.outcome {
            Outcome::Audio => Ok(EncodedAudio::new(
                vec![0xFF, 0xFB, 0x90, 0x00],
                AudioFormat::Mp3,
                self.kind,
            )),
            Outcome::Unavailable => Err(SpeechError::ProviderUnavailable {
                provider: self.kind,
                reason: "API key not configured".to_string(),
            }),
            Outcome::Fail => Err(SpeechError::ProviderError {
                provider: self.kind,
                status: 500,
                body: format!("{} exploded", self.kind),
            }),
        }
    }
}

/// Stub transcoder returning one second of canonical silence
#[derive(Debug)]
struct StubTranscoder {
    available: bool,
    fail: bool,
}

fn canonical_wav(samples: u32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).expect("writer");
        for _ in 0..samples {
            writer.write_sample(0i16).expect("sample");
        }
        writer.finalize().expect("finalize");
    }
    cursor.into_inner()
}

#[async_trait]
impl AudioTranscoder for StubTranscoder {
    async fn transcode(&self, _audio: &EncodedAudio) -> Result<CanonicalWaveform, SpeechError> {
        if self.fail {
            return Err(SpeechError::Transcode(
                "ffmpeg exited with exit status: 1: invalid data".to_string(),
            ));
        }
        CanonicalWaveform::from_wav_bytes(canonical_wav(16_000))
    }

    async fn is_available(&self) -> bool {
        self.available
    }
}

struct Harness {
    server: TestServer,
    primary: Arc<StubProvider>,
    secondary: Arc<StubProvider>,
}

fn harness_with(
    primary: Outcome,
    secondary: Outcome,
    transcoder: StubTranscoder,
    config: AppConfig,
) -> Harness {
    let primary = StubProvider::new(ProviderKind::Primary, primary);
    let secondary = StubProvider::new(ProviderKind::Secondary, secondary);
    let orchestrator = SynthesisOrchestrator::new(primary.clone(), secondary.clone());
    let service = SynthesisService::new(orchestrator, Arc::new(transcoder));

    let state = AppState {
        synthesis: Arc::new(service),
        config: Arc::new(config),
    };
    let server = TestServer::new(create_router(state)).expect("Failed to create test server");

    Harness {
        server,
        primary,
        secondary,
    }
}

fn harness(primary: Outcome, secondary: Outcome) -> Harness {
    harness_with(
        primary,
        secondary,
        StubTranscoder {
            available: true,
            fail: false,
        },
        AppConfig::default(),
    )
}

// ============ Health ============

#[tokio::test]
async fn health_returns_ok() {
    let h = harness(Outcome::Audio, Outcome::Audio);

    let response = h.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn ready_when_one_provider_and_ffmpeg() {
    let h = harness(Outcome::Unavailable, Outcome::Audio);

    let response = h.server.get("/ready").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ready"], true);
    assert_eq!(body["primary_configured"], false);
    assert_eq!(body["secondary_configured"], true);
}

#[tokio::test]
async fn not_ready_without_ffmpeg() {
    let h = harness_with(
        Outcome::Audio,
        Outcome::Audio,
        StubTranscoder {
            available: false,
            fail: false,
        },
        AppConfig::default(),
    );

    let response = h.server.get("/ready").await;

    response.assert_status_service_unavailable();
    let body: Value = response.json();
    assert_eq!(body["transcoder_available"], false);
}

#[tokio::test]
async fn not_ready_without_providers() {
    let h = harness(Outcome::Unavailable, Outcome::Unavailable);
    h.server.get("/ready").await.assert_status_service_unavailable();
}

// ============ Synthesis ============

#[tokio::test]
async fn post_returns_canonical_wav() {
    let h = harness(Outcome::Audio, Outcome::Audio);

    let response = h
        .server
        .post("/synthesize-speech")
        .json(&json!({ "text": "Hello", "accent": "en_us", "rate": 1.0 }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "audio/wav");
    assert_eq!(response.header("cache-control"), "no-store");

    let bytes = response.as_bytes();
    assert_eq!(&bytes[..4], b"RIFF");
    let waveform = CanonicalWaveform::from_wav_bytes(bytes.to_vec()).expect("canonical wav");
    assert_eq!(waveform.duration_ms(), 1000);
    assert_eq!(h.primary.calls(), 1);
    assert_eq!(h.secondary.calls(), 0);
}

#[tokio::test]
async fn get_query_string_is_served() {
    let h = harness(Outcome::Audio, Outcome::Audio);

    let response = h
        .server
        .get("/synthesize-speech")
        .add_query_param("text", "Good evening")
        .add_query_param("accent", "en-GB")
        .add_query_param("rate", "1.08")
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "audio/wav");
    assert_eq!(h.primary.last_seen(), Some(("en_br".to_string(), 1.08)));
}

#[tokio::test]
async fn defaults_apply_when_fields_missing() {
    let h = harness(Outcome::Audio, Outcome::Audio);

    h.server
        .post("/synthesize-speech")
        .json(&json!({ "text": "Hello" }))
        .await
        .assert_status_ok();

    assert_eq!(h.primary.last_seen(), Some(("en_us".to_string(), 1.0)));
}

#[tokio::test]
async fn string_rate_is_accepted_and_garbage_falls_back() {
    let h = harness(Outcome::Audio, Outcome::Audio);

    h.server
        .post("/synthesize-speech")
        .json(&json!({ "text": "Hello", "rate": "1.5" }))
        .await
        .assert_status_ok();
    assert_eq!(h.primary.last_seen(), Some(("en_us".to_string(), 1.5)));

    h.server
        .post("/synthesize-speech")
        .json(&json!({ "text": "Hello", "rate": "fast" }))
        .await
        .assert_status_ok();
    assert_eq!(h.primary.last_seen(), Some(("en_us".to_string(), 1.0)));
}

#[tokio::test]
async fn unknown_accent_falls_back_to_us() {
    let h = harness(Outcome::Audio, Outcome::Audio);

    h.server
        .post("/synthesize-speech")
        .json(&json!({ "text": "Hello", "accent": "fr_fr" }))
        .await
        .assert_status_ok();

    assert_eq!(h.primary.last_seen(), Some(("en_us".to_string(), 1.0)));
}

#[tokio::test]
async fn blank_text_is_rejected_without_provider_call() {
    let h = harness(Outcome::Audio, Outcome::Audio);

    let response = h
        .server
        .post("/synthesize-speech")
        .json(&json!({ "text": "   \n" }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "bad_request");
    assert!(body["detail"].is_string());
    assert_eq!(h.primary.calls(), 0);
    assert_eq!(h.secondary.calls(), 0);
}

#[tokio::test]
async fn missing_text_is_rejected() {
    let h = harness(Outcome::Audio, Outcome::Audio);

    let response = h.server.get("/synthesize-speech").await;

    response.assert_status_bad_request();
    assert_eq!(h.primary.calls(), 0);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let h = harness(Outcome::Audio, Outcome::Audio);

    let response = h
        .server
        .post("/synthesize-speech")
        .bytes(b"{\"text\": ".as_slice().into())
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let mut config = AppConfig::default();
    config.server.max_body_size_bytes = 64;
    let h = harness_with(
        Outcome::Audio,
        Outcome::Audio,
        StubTranscoder {
            available: true,
            fail: false,
        },
        config,
    );

    let response = h
        .server
        .post("/synthesize-speech")
        .json(&json!({ "text": "x".repeat(1024) }))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(h.primary.calls(), 0);
}

#[tokio::test]
async fn primary_failure_falls_back_silently() {
    let h = harness(Outcome::Fail, Outcome::Audio);

    let response = h
        .server
        .post("/synthesize-speech")
        .json(&json!({ "text": "Hello" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "audio/wav");
    assert_eq!(h.primary.calls(), 1);
    assert_eq!(h.secondary.calls(), 1);
}

#[tokio::test]
async fn both_providers_failing_is_service_unavailable() {
    let h = harness(Outcome::Unavailable, Outcome::Fail);

    let response = h
        .server
        .post("/synthesize-speech")
        .json(&json!({ "text": "Hello" }))
        .await;

    response.assert_status_service_unavailable();
    let body: Value = response.json();
    assert_eq!(body["code"], "service_unavailable");
    let detail = body["detail"].as_str().expect("detail");
    assert!(detail.contains("API key not configured"));
    assert!(detail.contains("secondary exploded"));
}

#[tokio::test]
async fn transcode_failure_is_server_error() {
    let h = harness_with(
        Outcome::Audio,
        Outcome::Audio,
        StubTranscoder {
            available: true,
            fail: true,
        },
        AppConfig::default(),
    );

    let response = h
        .server
        .post("/synthesize-speech")
        .json(&json!({ "text": "Hello" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["code"], "transcode_failed");
    // Transcode failures are terminal, no second provider attempt
    assert_eq!(h.secondary.calls(), 0);
}
