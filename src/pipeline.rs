//! Pipeline controller — the download-and-convert state machine
//!
//! [`MediaPipeline`] orchestrates host policy, the streamed downloader, and
//! the optional audio extraction, owns the single "last produced artifact"
//! slot, and emits lifecycle events to subscribers. One request runs at a
//! time (`start` takes `&mut self`); there is no cancellation — a run
//! continues to completion or failure.
//!
//! ```text
//! Idle --(start, url non-empty, Allowed)--> Downloading
//! Idle --(start, url empty)--> Idle, message
//! Idle --(start, Blocked)--> Idle, message
//! Downloading --(ok, !want_audio_only)--> Completed(download)
//! Downloading --(ok, want_audio_only)--> Converting
//! Downloading --(err)--> Failed(reason)
//! Converting --(ok)--> Completed(transcoded)
//! Converting --(err)--> Failed("conversion failed")
//! Completed/Failed --(start)--> re-evaluates from the top
//! ```

use crate::config::Config;
use crate::download::StreamDownloader;
use crate::error::{Error, Result, TransportError, ValidationError};
use crate::policy;
use crate::transcode::{AudioExtractor, FfmpegAudioExtractor, NoOpAudioExtractor};
use crate::types::{Artifact, DownloadRequest, Event, HostVerdict, PipelineState};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Capacity of the event broadcast channel
///
/// Progress events can arrive in bursts; slow subscribers that fall further
/// behind than this observe `RecvError::Lagged` and skip ahead.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Collaborator that turns the current artifact into a platform share action
///
/// Implemented by the embedding presentation layer. The pipeline calls
/// [`share`](ShareSink::share) only when an artifact exists; with an empty
/// slot it reports [`Error::NothingToShare`] without invoking the sink.
pub trait ShareSink {
    /// Hand the artifact to the platform's sharing mechanism
    ///
    /// # Errors
    ///
    /// Implementations may fail, e.g. when no application can receive the
    /// share; such errors are surfaced to the caller unchanged.
    fn share(&self, artifact: &Artifact) -> Result<()>;
}

/// The download-and-convert pipeline controller
///
/// Create one per session with [`MediaPipeline::new`], subscribe to events,
/// then drive it with [`start`](MediaPipeline::start) once per user action.
pub struct MediaPipeline {
    downloader: StreamDownloader,
    extractor: Arc<dyn AudioExtractor>,
    event_tx: broadcast::Sender<Event>,
    state: PipelineState,
    artifact: Option<Artifact>,
}

impl MediaPipeline {
    /// Create a pipeline from configuration
    ///
    /// Builds the HTTP client (its connect/read defaults are the only
    /// timeouts in play) and selects the audio extractor: an explicitly
    /// configured ffmpeg path wins, then PATH discovery if enabled, then
    /// the no-op extractor so plain downloads keep working without ffmpeg.
    ///
    /// # Errors
    ///
    /// Fails only when the HTTP client cannot be constructed.
    pub fn new(config: Config) -> Result<Self> {
        let extractor = Self::select_extractor(&config);
        Self::with_extractor(config, extractor)
    }

    /// Create a pipeline with an injected audio extractor
    ///
    /// Used by tests and embedders with their own conversion engine.
    ///
    /// # Errors
    ///
    /// Fails only when the HTTP client cannot be constructed.
    pub fn with_extractor(config: Config, extractor: Arc<dyn AudioExtractor>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(TransportError::Network)?;
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        info!(extractor = extractor.name(), output_dir = ?config.output_dir, "pipeline ready");

        Ok(Self {
            downloader: StreamDownloader::new(client, config.output_dir),
            extractor,
            event_tx,
            state: PipelineState::Idle,
            artifact: None,
        })
    }

    fn select_extractor(config: &Config) -> Arc<dyn AudioExtractor> {
        if let Some(path) = &config.tools.ffmpeg_path {
            return Arc::new(
                FfmpegAudioExtractor::new(path.clone()).with_audio_quality(config.audio_quality),
            );
        }
        if config.tools.search_path
            && let Some(extractor) = FfmpegAudioExtractor::from_path()
        {
            return Arc::new(extractor.with_audio_quality(config.audio_quality));
        }
        warn!("ffmpeg not found, audio extraction disabled");
        Arc::new(NoOpAudioExtractor)
    }

    /// Subscribe to pipeline events
    ///
    /// Each receiver gets every event emitted after the call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Current pipeline state
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// The last produced artifact, if any
    pub fn artifact(&self) -> Option<&Artifact> {
        self.artifact.as_ref()
    }

    /// Whether the selected extractor can actually perform extractions
    pub fn can_extract_audio(&self) -> bool {
        self.extractor.is_available()
    }

    /// Validate a request URL without performing any I/O
    ///
    /// The same check `start` applies before touching the network;
    /// embedders can call it up front to keep their controls in sync.
    ///
    /// # Errors
    ///
    /// [`ValidationError::EmptyUrl`] when the trimmed URL is empty,
    /// [`ValidationError::BlockedHost`] when the host is on the blocklist.
    pub fn validate(url: &str) -> std::result::Result<(), ValidationError> {
        if url.trim().is_empty() {
            return Err(ValidationError::EmptyUrl);
        }
        if policy::classify(url) == HostVerdict::Blocked {
            return Err(ValidationError::BlockedHost {
                host: policy::host_of(url),
            });
        }
        Ok(())
    }

    /// Run one request to completion and return the final state
    ///
    /// Every step error is caught here and mapped to state plus
    /// notifications; this method never returns an error and never panics.
    /// A new request re-evaluates everything from the top, discarding the
    /// previous run's state.
    pub async fn start(&mut self, request: &DownloadRequest) -> PipelineState {
        // Fresh request: previous Completed/Failed state is discarded
        self.state = PipelineState::Idle;

        match self.run(request).await {
            Ok(state) => state,
            Err(Error::Validation(e)) => {
                debug!(error = %e, "request rejected");
                self.notify(match e {
                    ValidationError::EmptyUrl => "Please enter a URL.",
                    ValidationError::BlockedHost { .. } => {
                        "Downloads from this host are not supported."
                    }
                });
                self.set_state(PipelineState::Idle);
                self.state.clone()
            }
            Err(e @ Error::Conversion(_)) => {
                // User-facing text stays generic; the detail is logged
                error!(error = %e, "audio extraction failed");
                self.fail("conversion failed".to_string(), "Conversion failed.")
            }
            Err(e) => {
                error!(error = %e, "download failed");
                let reason = e.to_string();
                self.fail(reason.clone(), &format!("Download error: {reason}"))
            }
        }
    }

    /// The pipeline steps proper; every `?` here is caught by `start`
    async fn run(&mut self, request: &DownloadRequest) -> Result<PipelineState> {
        let url = request.url.trim();
        Self::validate(url)?;

        self.set_state(PipelineState::Downloading);
        self.notify("Downloading...");

        let progress_tx = self.event_tx.clone();
        let downloaded = self
            .downloader
            .download(url, |progress| {
                let _ = progress_tx.send(Event::Progress { progress });
            })
            .await?;

        let final_artifact = if request.want_audio_only {
            self.set_state(PipelineState::Converting);
            self.notify("Converting to mp3...");
            self.extractor.extract_audio(&downloaded).await?
        } else {
            downloaded
        };

        let display_name = final_artifact
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.notify(format!("Completed: {display_name}"));

        self.artifact = Some(final_artifact.clone());
        self.set_state(PipelineState::Completed {
            artifact: final_artifact,
        });
        Ok(self.state.clone())
    }

    /// Hand the current artifact to the share collaborator
    ///
    /// # Errors
    ///
    /// [`Error::NothingToShare`] when no artifact exists (nothing was
    /// downloaded yet, or the last run failed); otherwise whatever the sink
    /// itself returns.
    pub fn share_to(&self, sink: &dyn ShareSink) -> Result<()> {
        match &self.artifact {
            Some(artifact) => sink.share(artifact),
            None => Err(Error::NothingToShare),
        }
    }

    /// Transition to Failed, clearing the artifact slot so a stale file can
    /// never be shared after a failed run
    fn fail(&mut self, reason: String, message: &str) -> PipelineState {
        self.artifact = None;
        self.notify(message);
        self.set_state(PipelineState::Failed { reason });
        self.state.clone()
    }

    fn set_state(&mut self, state: PipelineState) {
        debug!(?state, "state change");
        self.state = state.clone();
        let _ = self.event_tx.send(Event::StateChanged { state });
    }

    fn notify(&self, text: impl Into<String>) {
        let _ = self.event_tx.send(Event::Message { text: text.into() });
    }
}
