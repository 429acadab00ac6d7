//! End-to-end pipeline tests against a mock HTTP server

#![allow(clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use media_dl::{
    Artifact, AudioExtractor, Config, DownloadRequest, Error, Event, MediaPipeline,
    PipelineState, ShareSink,
};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::sync::broadcast;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pipeline_for(dir: &TempDir) -> MediaPipeline {
    let config = Config {
        output_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    MediaPipeline::new(config).unwrap()
}

fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Test extractor that produces a real mp3 file next to the input,
/// the way the ffmpeg implementation derives its output path
struct StubExtractor;

#[async_trait]
impl AudioExtractor for StubExtractor {
    async fn extract_audio(&self, input: &Artifact) -> media_dl::Result<Artifact> {
        let output = input.path.with_extension("mp3");
        tokio::fs::write(&output, b"ID3 stub audio").await?;
        Ok(Artifact::new(output, "mp3"))
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Share sink recording every artifact handed to it
#[derive(Default)]
struct RecordingSink {
    shared: Mutex<Vec<Artifact>>,
}

impl ShareSink for RecordingSink {
    fn share(&self, artifact: &Artifact) -> media_dl::Result<()> {
        self.shared.lock().unwrap().push(artifact.clone());
        Ok(())
    }
}

#[tokio::test]
async fn plain_download_completes_with_the_raw_artifact() {
    let server = MockServer::start().await;
    let body = vec![42u8; 32 * 1024];
    Mock::given(method("GET"))
        .and(path("/video.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.clone(), "video/mp4"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut pipeline = pipeline_for(&dir);
    let mut rx = pipeline.subscribe();

    let state = pipeline
        .start(&DownloadRequest::new(format!("{}/video.mp4", server.uri())))
        .await;

    let artifact = match state {
        PipelineState::Completed { artifact } => artifact,
        other => panic!("expected Completed, got {other:?}"),
    };
    assert_eq!(artifact.extension, "mp4");
    let name = artifact.path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("LD_") && name.ends_with(".mp4"));
    assert_eq!(std::fs::read(&artifact.path).unwrap(), body);

    // Event stream: Downloading before Completed, progress in between
    let events = drain(&mut rx);
    let states: Vec<&PipelineState> = events
        .iter()
        .filter_map(|e| match e {
            Event::StateChanged { state } => Some(state),
            _ => None,
        })
        .collect();
    let downloading_pos = states
        .iter()
        .position(|s| **s == PipelineState::Downloading)
        .expect("Downloading state should be announced");
    let completed_pos = states
        .iter()
        .position(|s| matches!(s, PipelineState::Completed { .. }))
        .expect("Completed state should be announced");
    assert!(downloading_pos < completed_pos);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, Event::Progress { .. })),
        "a download with a declared length should emit progress"
    );
}

#[tokio::test]
async fn audio_only_download_completes_with_mp3_keeping_the_base_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/video.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![7u8; 2048], "video/mp4"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = Config {
        output_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let mut pipeline = MediaPipeline::with_extractor(config, Arc::new(StubExtractor)).unwrap();
    let mut rx = pipeline.subscribe();

    let state = pipeline
        .start(&DownloadRequest::audio_only(format!(
            "{}/video.mp4",
            server.uri()
        )))
        .await;

    let artifact = match state {
        PipelineState::Completed { artifact } => artifact,
        other => panic!("expected Completed, got {other:?}"),
    };
    assert_eq!(artifact.extension, "mp3");
    let name = artifact.path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("LD_") && name.ends_with(".mp3"));
    assert!(artifact.path.exists());

    // The transcoded file keeps the download's base filename
    let downloads: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|e| e == "mp4"))
        .collect();
    assert_eq!(downloads.len(), 1, "raw download should remain on disk");
    assert_eq!(
        downloads[0].file_stem().unwrap(),
        artifact.path.file_stem().unwrap()
    );

    // Converting must be announced between Downloading and Completed
    let events = drain(&mut rx);
    let states: Vec<&PipelineState> = events
        .iter()
        .filter_map(|e| match e {
            Event::StateChanged { state } => Some(state),
            _ => None,
        })
        .collect();
    let downloading = states
        .iter()
        .position(|s| **s == PipelineState::Downloading)
        .unwrap();
    let converting = states
        .iter()
        .position(|s| **s == PipelineState::Converting)
        .unwrap();
    let completed = states
        .iter()
        .position(|s| matches!(s, PipelineState::Completed { .. }))
        .unwrap();
    assert!(downloading < converting && converting < completed);
}

#[tokio::test]
async fn blocked_host_issues_no_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut pipeline = pipeline_for(&dir);

    let state = pipeline
        .start(&DownloadRequest::new("https://m.youtube.com/x"))
        .await;

    assert_eq!(state, PipelineState::Idle);
    assert!(
        server.received_requests().await.unwrap().is_empty(),
        "a blocked request must never reach the network"
    );
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn non_2xx_response_fails_the_run_and_disables_sharing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone.mp4"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut pipeline = pipeline_for(&dir);

    let state = pipeline
        .start(&DownloadRequest::new(format!("{}/gone.mp4", server.uri())))
        .await;

    match state {
        PipelineState::Failed { reason } => {
            assert!(reason.contains("410"), "reason should carry the status: {reason}");
        }
        other => panic!("expected Failed, got {other:?}"),
    }

    let sink = RecordingSink::default();
    assert!(matches!(
        pipeline.share_to(&sink),
        Err(Error::NothingToShare)
    ));
    assert!(sink.shared.lock().unwrap().is_empty());
}

#[tokio::test]
async fn completed_artifact_is_handed_to_the_share_sink() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/clip.webm"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![5u8; 512], "video/webm"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut pipeline = pipeline_for(&dir);

    pipeline
        .start(&DownloadRequest::new(format!("{}/clip.webm", server.uri())))
        .await;

    let sink = RecordingSink::default();
    pipeline.share_to(&sink).unwrap();
    let shared = sink.shared.lock().unwrap();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].extension, "webm");
    assert!(shared[0].path.exists());
}

#[tokio::test]
async fn a_new_request_supersedes_the_previous_artifact() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/first.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![1u8; 256], "video/mp4"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/second.webm"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![2u8; 256], "video/webm"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut pipeline = pipeline_for(&dir);

    pipeline
        .start(&DownloadRequest::new(format!("{}/first.mp4", server.uri())))
        .await;
    let first = pipeline.artifact().unwrap().clone();

    pipeline
        .start(&DownloadRequest::new(format!(
            "{}/second.webm",
            server.uri()
        )))
        .await;
    let second = pipeline.artifact().unwrap().clone();

    assert_eq!(second.extension, "webm");
    // Superseded, not deleted: the first file stays on disk
    assert!(first.path.exists());
    assert!(second.path.exists());
}
