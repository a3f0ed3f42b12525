use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::*;
use crate::ports::CameraError;
use crate::types::{FacingMode, ScanConfig, StatusStyle};
use scanlink_realtime::{RealtimeClient, RealtimeConfig};

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RecordingChannel {
    sent: Mutex<Vec<(String, Value)>>,
}

impl RecordingChannel {
    fn sent(&self) -> Vec<(String, Value)> {
        self.sent.lock().unwrap().clone()
    }

    fn scans(&self) -> Vec<Value> {
        self.sent()
            .into_iter()
            .filter(|(name, _)| name == BARCODE_SCANNED)
            .map(|(_, payload)| payload)
            .collect()
    }
}

#[async_trait]
impl ScanChannel for RecordingChannel {
    async fn emit(&self, event: &str, payload: Value) {
        self.sent.lock().unwrap().push((event.to_string(), payload));
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ViewCall {
    Status(ConnectionState),
    LastScan(String),
    Highlight(bool),
    CameraError(String),
}

#[derive(Default)]
struct RecordingView {
    calls: Mutex<Vec<ViewCall>>,
}

impl RecordingView {
    fn calls(&self) -> Vec<ViewCall> {
        self.calls.lock().unwrap().clone()
    }

    fn last_status(&self) -> Option<ConnectionState> {
        self.calls().into_iter().rev().find_map(|call| match call {
            ViewCall::Status(state) => Some(state),
            _ => None,
        })
    }

    fn last_highlight(&self) -> Option<bool> {
        self.calls().into_iter().rev().find_map(|call| match call {
            ViewCall::Highlight(on) => Some(on),
            _ => None,
        })
    }
}

impl ScannerView for RecordingView {
    fn set_status(&self, state: ConnectionState) {
        self.calls.lock().unwrap().push(ViewCall::Status(state));
    }

    fn show_last_scan(&self, text: &str) {
        self.calls.lock().unwrap().push(ViewCall::LastScan(text.to_string()));
    }

    fn set_scan_highlight(&self, on: bool) {
        self.calls.lock().unwrap().push(ViewCall::Highlight(on));
    }

    fn show_camera_error(&self, message: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(ViewCall::CameraError(message.to_string()));
    }
}

#[derive(Default)]
struct CountingHaptics {
    pulses: Mutex<Vec<Duration>>,
}

impl Haptics for CountingHaptics {
    fn vibrate(&self, duration: Duration) -> bool {
        self.pulses.lock().unwrap().push(duration);
        true
    }
}

/// Decoder that replays a fixed list of results, or fails to start.
struct ScriptedDecoder {
    script: Option<Vec<DecodeEvent>>,
    started_with: Option<(FacingMode, ScanConfig)>,
}

impl ScriptedDecoder {
    fn yielding(events: Vec<DecodeEvent>) -> Self {
        Self {
            script: Some(events),
            started_with: None,
        }
    }

    fn failing() -> Self {
        Self {
            script: None,
            started_with: None,
        }
    }
}

#[async_trait]
impl BarcodeDecoder for ScriptedDecoder {
    async fn start(
        &mut self,
        facing: FacingMode,
        config: &ScanConfig,
    ) -> Result<mpsc::Receiver<DecodeEvent>, CameraError> {
        self.started_with = Some((facing, *config));
        let script = self.script.take().ok_or(CameraError::PermissionDenied)?;
        let (tx, rx) = mpsc::channel(script.len().max(1));
        for event in script {
            tx.try_send(event).unwrap();
        }
        Ok(rx)
    }
}

fn code() -> PairingCode {
    PairingCode::parse("ABC123").unwrap()
}

fn decoded(text: &str) -> DecodeEvent {
    DecodeEvent::Decoded(text.to_string())
}

/// A transport stream that has already delivered `events` and closed.
fn transport(events: &[TransportEvent]) -> mpsc::Receiver<TransportEvent> {
    let (tx, rx) = mpsc::channel(events.len().max(1));
    for event in events {
        tx.try_send(*event).unwrap();
    }
    rx
}

async fn client_with(
    channel: &Arc<RecordingChannel>,
    view: &Arc<RecordingView>,
    haptics: Option<Arc<dyn Haptics>>,
) -> PairingClient<RecordingChannel> {
    PairingClient::init(
        Some(Arc::clone(channel)),
        code(),
        Arc::clone(view) as Arc<dyn ScannerView>,
        haptics,
        ScannerSettings::default(),
    )
    .await
    .expect("client should activate with a channel")
}

// ---------------------------------------------------------------------------
// Initialization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn no_channel_means_no_client_and_no_side_effects() {
    let view = Arc::new(RecordingView::default());
    let client = PairingClient::<RecordingChannel>::init(
        None,
        code(),
        Arc::clone(&view) as Arc<dyn ScannerView>,
        None,
        ScannerSettings::default(),
    )
    .await;

    assert!(client.is_none());
    assert!(view.calls().is_empty());
}

#[tokio::test]
async fn init_joins_pairing_room_once() {
    let channel = Arc::new(RecordingChannel::default());
    let view = Arc::new(RecordingView::default());
    let client = client_with(&channel, &view, None).await;

    assert_eq!(channel.sent(), vec![(JOIN_PAIRING.to_string(), json!("ABC123"))]);
    assert_eq!(client.code().as_str(), "ABC123");
    assert_eq!(client.state(), ConnectionState::Disconnected);
    assert!(view.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Connection state
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_follows_last_transport_event() {
    let channel = Arc::new(RecordingChannel::default());
    let view = Arc::new(RecordingView::default());
    let mut client = client_with(&channel, &view, None).await;

    client.handle_transport(TransportEvent::Disconnect);
    client.handle_transport(TransportEvent::Connect);

    assert_eq!(client.state(), ConnectionState::Connected);
    let status = view.last_status().unwrap();
    assert_eq!(status.label(), "Connected to Server");
    assert_eq!(status.style(), StatusStyle::Success);

    client.handle_transport(TransportEvent::Disconnect);
    assert_eq!(view.last_status(), Some(ConnectionState::Disconnected));
    assert_eq!(channel.sent().len(), 1, "state changes never emit");
}

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

#[tokio::test]
async fn camera_starts_with_rear_camera_and_scan_config() {
    let channel = Arc::new(RecordingChannel::default());
    let view = Arc::new(RecordingView::default());
    let client = client_with(&channel, &view, None).await;
    let mut decoder = ScriptedDecoder::yielding(Vec::new());

    assert!(client.start_camera(&mut decoder).await.is_some());
    let (facing, config) = decoder.started_with.unwrap();
    assert_eq!(facing, FacingMode::Environment);
    assert_eq!(config, ScanConfig::default());
}

#[tokio::test]
async fn camera_failure_shows_message_and_forwards_nothing() {
    let channel = Arc::new(RecordingChannel::default());
    let view = Arc::new(RecordingView::default());
    let client = client_with(&channel, &view, None).await;
    let mut decoder = ScriptedDecoder::failing();

    client.run(transport(&[]), &mut decoder).await;

    assert_eq!(
        view.calls(),
        vec![ViewCall::CameraError(CAMERA_ERROR_MESSAGE.to_string())]
    );
    assert!(channel.scans().is_empty());
}

#[tokio::test]
async fn camera_failure_still_tracks_connection() {
    let channel = Arc::new(RecordingChannel::default());
    let view = Arc::new(RecordingView::default());
    let client = client_with(&channel, &view, None).await;
    let mut decoder = ScriptedDecoder::failing();

    client
        .run(transport(&[TransportEvent::Connect]), &mut decoder)
        .await;

    assert_eq!(view.last_status(), Some(ConnectionState::Connected));
    assert!(channel.scans().is_empty());
}

// ---------------------------------------------------------------------------
// Scanning
// ---------------------------------------------------------------------------

#[tokio::test]
async fn every_decode_is_forwarded_in_order_with_repeats() {
    let channel = Arc::new(RecordingChannel::default());
    let view = Arc::new(RecordingView::default());
    let client = client_with(&channel, &view, None).await;
    let mut decoder = ScriptedDecoder::yielding(vec![
        decoded("111"),
        decoded("111"),
        DecodeEvent::NotFound("no code".into()),
        decoded("222"),
        decoded("111"),
    ]);

    client.run(transport(&[]), &mut decoder).await;

    let barcodes: Vec<Value> = channel
        .scans()
        .into_iter()
        .map(|payload| payload["barcode"].clone())
        .collect();
    assert_eq!(barcodes, vec![json!("111"), json!("111"), json!("222"), json!("111")]);
    assert!(channel
        .scans()
        .iter()
        .all(|payload| payload["code"] == json!("ABC123")));
}

#[tokio::test]
async fn join_precedes_every_scan() {
    let channel = Arc::new(RecordingChannel::default());
    let view = Arc::new(RecordingView::default());
    let client = client_with(&channel, &view, None).await;
    let mut decoder = ScriptedDecoder::yielding(vec![decoded("1"), decoded("2")]);

    client.run(transport(&[]), &mut decoder).await;

    let names: Vec<String> = channel.sent().into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec![JOIN_PAIRING, BARCODE_SCANNED, BARCODE_SCANNED]);
}

#[tokio::test]
async fn not_found_frames_are_silent() {
    let channel = Arc::new(RecordingChannel::default());
    let view = Arc::new(RecordingView::default());
    let mut client = client_with(&channel, &view, None).await;

    client
        .handle_decode(DecodeEvent::NotFound("NotFoundException".into()))
        .await;

    assert_eq!(channel.sent().len(), 1);
    assert!(view.calls().is_empty());
}

#[tokio::test]
async fn haptic_pulse_per_scan() {
    let channel = Arc::new(RecordingChannel::default());
    let view = Arc::new(RecordingView::default());
    let haptics = Arc::new(CountingHaptics::default());
    let mut client = client_with(
        &channel,
        &view,
        Some(Arc::clone(&haptics) as Arc<dyn Haptics>),
    )
    .await;

    client.handle_decode(decoded("42")).await;
    client.handle_decode(decoded("42")).await;

    assert_eq!(
        *haptics.pulses.lock().unwrap(),
        vec![Duration::from_millis(200); 2]
    );
}

#[tokio::test]
async fn zero_vibrate_skips_haptics() {
    let channel = Arc::new(RecordingChannel::default());
    let view = Arc::new(RecordingView::default());
    let haptics = Arc::new(CountingHaptics::default());
    let mut settings = ScannerSettings::default();
    settings.feedback.vibrate = Duration::ZERO;
    let mut client = PairingClient::init(
        Some(Arc::clone(&channel)),
        code(),
        Arc::clone(&view) as Arc<dyn ScannerView>,
        Some(Arc::clone(&haptics) as Arc<dyn Haptics>),
        settings,
    )
    .await
    .unwrap();

    client.handle_decode(decoded("42")).await;

    assert!(haptics.pulses.lock().unwrap().is_empty());
    assert_eq!(channel.scans().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn highlight_clears_after_flash() {
    let channel = Arc::new(RecordingChannel::default());
    let view = Arc::new(RecordingView::default());
    let mut client = client_with(&channel, &view, None).await;

    client.handle_decode(decoded("0192837465")).await;
    assert_eq!(view.last_highlight(), Some(true));

    tokio::time::sleep(Duration::from_millis(499)).await;
    assert_eq!(view.last_highlight(), Some(true));

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(view.last_highlight(), Some(false));
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn pairing_session_scenario() {
    let channel = Arc::new(RecordingChannel::default());
    let view = Arc::new(RecordingView::default());
    let client = client_with(&channel, &view, None).await;
    let mut decoder = ScriptedDecoder::yielding(vec![decoded("0192837465")]);

    client
        .run(transport(&[TransportEvent::Connect]), &mut decoder)
        .await;

    assert_eq!(
        channel.sent(),
        vec![
            (JOIN_PAIRING.to_string(), json!("ABC123")),
            (
                BARCODE_SCANNED.to_string(),
                json!({ "code": "ABC123", "barcode": "0192837465" })
            ),
        ]
    );

    let calls = view.calls();
    assert!(calls.contains(&ViewCall::Status(ConnectionState::Connected)));
    assert!(calls.contains(&ViewCall::LastScan("Sent: 0192837465".into())));
    assert_eq!(view.last_highlight(), Some(true));

    tokio::time::sleep(Duration::from_millis(501)).await;
    assert_eq!(view.last_highlight(), Some(false));
}

#[tokio::test]
async fn status_still_updates_with_many_scans_queued_offline() {
    // Nothing listens on port 1, so every scan stays in the transport buffer.
    let (realtime, _events) = RealtimeClient::connect(RealtimeConfig {
        server_url: "http://127.0.0.1:1".into(),
        connect_timeout_secs: 1,
        ..Default::default()
    });
    let view = Arc::new(RecordingView::default());
    let client = PairingClient::init(
        Some(Arc::new(realtime)),
        code(),
        Arc::clone(&view) as Arc<dyn ScannerView>,
        None,
        ScannerSettings::default(),
    )
    .await
    .unwrap();

    let scans = (0..300).map(|i| decoded(&format!("{i:010}"))).collect();
    let mut decoder = ScriptedDecoder::yielding(scans);
    let (tx, rx) = mpsc::channel(1);

    let session = tokio::spawn(async move { client.run(rx, &mut decoder).await });
    tokio::time::timeout(Duration::from_secs(5), async {
        while view.calls().iter().filter(|c| matches!(c, ViewCall::LastScan(_))).count() < 300 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("scans stopped being handled");

    tx.send(TransportEvent::Disconnect).await.unwrap();
    drop(tx);
    tokio::time::timeout(Duration::from_secs(5), session)
        .await
        .expect("pairing loop stalled in emit")
        .unwrap();

    assert_eq!(view.last_status(), Some(ConnectionState::Disconnected));
}
