//! Scripted port implementations shared by the unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use riverchart_domain::{
    ClientSettings, FileUpload, RequestDescriptor, Session, TransportResponse, UserId,
};
use serde_json::{Value, json};

use crate::auth::{SessionSlot, SessionVault, TokenStore};
use crate::error::{StorageError, TransportError};
use crate::gateway::{RequestGateway, UploadChannel};
use crate::ports::{
    Clock, Navigator, NetworkTransport, PersistentKv, PlatformAuth, PlatformProfile, ToastKind,
    UserFeedback,
};

type Scripted = Result<TransportResponse, TransportError>;

/// Builds a scripted JSON response.
pub fn json_response(status: u16, body: &Value) -> Scripted {
    Ok(TransportResponse::new(status, body.to_string()))
}

/// Replays queued responses in order and records what was sent.
///
/// An empty queue answers `200 {"code":200,"data":null}`.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<RequestDescriptor>>,
    uploads: Mutex<Vec<FileUpload>>,
}

impl ScriptedTransport {
    pub fn push(&self, response: Scripted) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<FileUpload> {
        self.uploads.lock().unwrap().clone()
    }

    fn next(&self) -> Scripted {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| json_response(200, &json!({"code": 200, "data": null})))
    }
}

#[async_trait]
impl NetworkTransport for ScriptedTransport {
    async fn send(&self, request: &RequestDescriptor) -> Scripted {
        self.requests.lock().unwrap().push(request.clone());
        self.next()
    }

    async fn send_file(&self, upload: &FileUpload) -> Scripted {
        self.uploads.lock().unwrap().push(upload.clone());
        self.next()
    }
}

/// Counts indicator calls and records toasts.
#[derive(Default)]
pub struct CountingFeedback {
    titles: Mutex<Vec<String>>,
    hidden: Mutex<usize>,
    toasts: Mutex<Vec<(String, ToastKind)>>,
}

impl CountingFeedback {
    pub fn shown(&self) -> usize {
        self.titles.lock().unwrap().len()
    }

    pub fn hidden(&self) -> usize {
        *self.hidden.lock().unwrap()
    }

    pub fn titles(&self) -> Vec<String> {
        self.titles.lock().unwrap().clone()
    }

    pub fn toasts(&self) -> Vec<(String, ToastKind)> {
        self.toasts.lock().unwrap().clone()
    }
}

impl UserFeedback for CountingFeedback {
    fn show_loading(&self, title: &str) {
        self.titles.lock().unwrap().push(title.to_string());
    }

    fn hide_loading(&self) {
        *self.hidden.lock().unwrap() += 1;
    }

    fn toast(&self, message: &str, kind: ToastKind) {
        self.toasts.lock().unwrap().push((message.to_string(), kind));
    }
}

/// Key-value store backed by a map.
#[derive(Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
}

impl PersistentKv for MemoryKv {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }
}

/// Records relaunch targets.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn relaunch(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

/// Clock pinned to one instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Platform sign-on double.
#[derive(Default)]
pub struct StubPlatform {
    pub code: Option<String>,
    pub profile: Option<PlatformProfile>,
}

#[async_trait]
impl PlatformAuth for StubPlatform {
    async fn request_login_code(&self) -> Option<String> {
        self.code.clone()
    }

    async fn user_profile(&self) -> Option<PlatformProfile> {
        self.profile.clone()
    }
}

/// A gateway wired to scripted ports.
pub struct Harness {
    pub transport: Arc<ScriptedTransport>,
    pub feedback: Arc<CountingFeedback>,
    pub storage: Arc<MemoryKv>,
    pub navigator: Arc<RecordingNavigator>,
    pub clock: Arc<FixedClock>,
    pub slot: SessionSlot,
    pub vault: SessionVault,
    pub tokens: TokenStore,
    pub gateway: RequestGateway,
    pub uploads: UploadChannel,
}

impl Harness {
    pub fn new() -> Self {
        let transport = Arc::new(ScriptedTransport::default());
        let feedback = Arc::new(CountingFeedback::default());
        let storage = Arc::new(MemoryKv::default());
        let slot = SessionSlot::new();
        let vault = SessionVault::new(storage.clone());
        let tokens = TokenStore::new(slot.clone(), vault.clone());
        let gateway = RequestGateway::new(
            ClientSettings::default(),
            transport.clone(),
            feedback.clone(),
            tokens.clone(),
        );
        Self {
            transport,
            feedback,
            storage,
            navigator: Arc::new(RecordingNavigator::default()),
            clock: Arc::new(FixedClock::default()),
            slot,
            vault,
            uploads: UploadChannel::new(gateway.clone()),
            tokens,
            gateway,
        }
    }

    /// Puts a session straight into the in-memory slot.
    pub async fn sign_in(&self, user_id: i64, token: &str) {
        self.slot
            .set(Session {
                user_id: UserId::new(user_id),
                token: token.to_string(),
                profile: json!({"id": user_id, "token": token}),
            })
            .await;
    }
}
