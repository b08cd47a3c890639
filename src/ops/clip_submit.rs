//! Clip submission: snapshot the selection, encode the audio, POST it to the
//! classification service and interpret the reply.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ClipError;
use crate::types::interval::IntervalModel;
use crate::types::media_file::LoadedFile;

/// Selection and file captured when the user submits. Later drags do not affect it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipRequest {
    pub file: LoadedFile,
    pub start: f64,
    pub end: f64,
}

impl ClipRequest {
    pub fn snapshot(file: &LoadedFile, interval: &IntervalModel) -> Self {
        Self {
            file: file.clone(),
            start: interval.start(),
            end: interval.end(),
        }
    }
}

/// JSON body sent to the classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionPayload {
    pub filename: String,
    pub content_type: String,
    /// Plain base64, without a `data:` prefix.
    pub audio_data: String,
    pub start: f64,
    pub end: f64,
}

impl SubmissionPayload {
    pub fn encode(request: &ClipRequest, bytes: &[u8]) -> Self {
        Self {
            filename: request.file.name.clone(),
            content_type: request.file.mime_type.clone(),
            audio_data: BASE64.encode(bytes),
            start: request.start,
            end: request.end,
        }
    }
}

/// Classifier reply: either `{error}` or `{output}`. Extra fields are tolerated.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
    /// Duration bucket reported by some service versions.
    #[serde(default)]
    pub message: Option<String>,
}

impl ClassifierResponse {
    pub fn into_label(self) -> Result<String, ClipError> {
        if let Some(message) = &self.message {
            tracing::debug!(message = %message, "Classifier note");
        }
        match (self.error, self.output) {
            (Some(error), _) => Err(ClipError::Service(error)),
            (None, Some(label)) => Ok(label),
            (None, None) => Err(ClipError::Protocol(
                "response has neither error nor output".to_string(),
            )),
        }
    }
}

pub fn parse_response(body: &str) -> Result<String, ClipError> {
    let response: ClassifierResponse =
        serde_json::from_str(body).map_err(|e| ClipError::Protocol(e.to_string()))?;
    response.into_label()
}

/// Message shown when the classifier returns a label.
pub fn success_message(label: &str) -> String {
    format!("Yayy!! It's a {label} song")
}

/// HTTP seam for the classifier call.
pub trait Transport: Send + Sync {
    /// POSTs `body` as `application/json`. Returns the body of a 2xx reply.
    fn post_json(&self, url: &str, body: &str) -> Result<String, ClipError>;
}

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
        }
    }
}

impl Transport for UreqTransport {
    fn post_json(&self, url: &str, body: &str) -> Result<String, ClipError> {
        match self
            .agent
            .post(url)
            .set("Content-Type", "application/json")
            .send_string(body)
        {
            Ok(response) => response
                .into_string()
                .map_err(|e| ClipError::Transport(e.to_string())),
            Err(ureq::Error::Status(code, _)) => Err(ClipError::Status(code)),
            Err(e) => Err(ClipError::Transport(e.to_string())),
        }
    }
}

/// Lifecycle of one submission. Absence from the submitter means `Idle`.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitState {
    Idle,
    Reading { file: String },
    Requesting { file: String },
    Success { file: String, label: String },
    Failed { file: String, message: String },
}

impl SubmitState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmitState::Success { .. } | SubmitState::Failed { .. })
    }

    fn file(&self) -> Option<&str> {
        match self {
            SubmitState::Idle => None,
            SubmitState::Reading { file }
            | SubmitState::Requesting { file }
            | SubmitState::Success { file, .. }
            | SubmitState::Failed { file, .. } => Some(file.as_str()),
        }
    }
}

/// Reads, encodes and sends one clip, reporting each step through `progress`.
pub fn submit_clip(
    transport: &dyn Transport,
    endpoint: &str,
    request: &ClipRequest,
    mut progress: impl FnMut(SubmitState),
) -> Result<String, ClipError> {
    let file = request.file.name.clone();
    progress(SubmitState::Reading { file: file.clone() });
    let bytes = request.file.read_bytes()?;
    let payload = SubmissionPayload::encode(request, &bytes);
    let body = serde_json::to_string(&payload).map_err(|e| ClipError::Protocol(e.to_string()))?;

    progress(SubmitState::Requesting { file });
    tracing::info!(
        endpoint,
        start = request.start,
        end = request.end,
        bytes = bytes.len(),
        "Sending clip"
    );
    let reply = transport.post_json(endpoint, &body)?;
    parse_response(&reply)
}

/// Runs submissions on worker threads and hands their progress back to the UI thread.
/// At most one submission per file name is in flight.
pub struct ClipSubmitter {
    endpoint: String,
    transport: Arc<dyn Transport>,
    tx: Sender<SubmitState>,
    rx: Receiver<SubmitState>,
    in_flight: HashMap<String, SubmitState>,
}

impl ClipSubmitter {
    pub fn new(endpoint: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let (tx, rx) = channel();
        Self {
            endpoint: endpoint.into(),
            transport,
            tx,
            rx,
            in_flight: HashMap::new(),
        }
    }

    pub fn is_busy(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn state_of(&self, file: &str) -> SubmitState {
        self.in_flight.get(file).cloned().unwrap_or(SubmitState::Idle)
    }

    /// Snapshots the selection and starts a background submission.
    pub fn submit(
        &mut self,
        file: Option<&LoadedFile>,
        interval: &IntervalModel,
    ) -> Result<(), ClipError> {
        let file = file.ok_or(ClipError::NoFileSelected)?;
        if self.in_flight.contains_key(&file.name) {
            return Err(ClipError::AlreadyInFlight {
                file: file.name.clone(),
            });
        }

        let request = ClipRequest::snapshot(file, interval);
        self.in_flight.insert(
            file.name.clone(),
            SubmitState::Reading {
                file: file.name.clone(),
            },
        );

        let id = Uuid::new_v4();
        let transport = Arc::clone(&self.transport);
        let endpoint = self.endpoint.clone();
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let span = tracing::info_span!("submission", id = %id, file = %request.file.name);
            let _guard = span.enter();

            let progress_tx = tx.clone();
            let result = submit_clip(transport.as_ref(), &endpoint, &request, |state| {
                progress_tx.send(state).ok();
            });
            let file = request.file.name.clone();
            let outcome = match result {
                Ok(label) => {
                    tracing::info!(label = %label, "Clip classified");
                    SubmitState::Success { file, label }
                }
                Err(error) => {
                    match &error {
                        ClipError::Service(_) => tracing::warn!(%error, "Classifier rejected clip"),
                        _ => tracing::error!(%error, "Clip submission failed"),
                    }
                    SubmitState::Failed {
                        file,
                        message: error.user_message(),
                    }
                }
            };
            // The receiver is gone only when the app is shutting down.
            tx.send(outcome).ok();
        });
        Ok(())
    }

    /// Drains progress from workers. Terminal states free the file for another submission.
    pub fn poll(&mut self) -> Vec<SubmitState> {
        let mut updates = Vec::new();
        while let Ok(state) = self.rx.try_recv() {
            self.record(&state);
            updates.push(state);
        }
        updates
    }

    #[cfg(test)]
    fn wait(&mut self, timeout: Duration) -> Option<SubmitState> {
        let state = self.rx.recv_timeout(timeout).ok()?;
        self.record(&state);
        Some(state)
    }

    fn record(&mut self, state: &SubmitState) {
        let Some(file) = state.file() else {
            return;
        };
        if state.is_terminal() {
            self.in_flight.remove(file);
        } else {
            self.in_flight.insert(file.to_string(), state.clone());
        }
    }
}
