//! Line-oriented stand-in for the camera decoder.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use scanlink_scanner::{BarcodeDecoder, CameraError, DecodeEvent, FacingMode, ScanConfig};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const NOT_FOUND: &str = "No barcode detected in frame";

/// Reads one decoded payload per line from stdin or a file.
///
/// Each line is one frame, released no faster than the configured fps. A
/// blank line is a frame with nothing readable.
pub struct LineDecoder {
    input: Option<PathBuf>,
}

impl LineDecoder {
    /// `None` reads from stdin.
    pub fn new(input: Option<PathBuf>) -> Self {
        Self { input }
    }

    async fn open(&self) -> Result<Box<dyn AsyncRead + Unpin + Send>, CameraError> {
        match &self.input {
            Some(path) => {
                let file = tokio::fs::File::open(path).await.map_err(|e| {
                    CameraError::Unavailable(format!("{}: {e}", path.display()))
                })?;
                Ok(Box::new(file))
            }
            None => Ok(Box::new(tokio::io::stdin())),
        }
    }
}

#[async_trait]
impl BarcodeDecoder for LineDecoder {
    async fn start(
        &mut self,
        facing: FacingMode,
        config: &ScanConfig,
    ) -> Result<mpsc::Receiver<DecodeEvent>, CameraError> {
        let reader = self.open().await?;
        let frame = Duration::from_secs(1) / config.fps.max(1);
        info!(
            source = %self.input.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "stdin".into()),
            facing = ?facing,
            "Reading barcodes"
        );

        let (tx, rx) = mpsc::channel(32);
        tokio::spawn(read_frames(reader, frame, tx));
        Ok(rx)
    }
}

async fn read_frames(
    reader: Box<dyn AsyncRead + Unpin + Send>,
    frame: Duration,
    tx: mpsc::Sender<DecodeEvent>,
) {
    let mut lines = BufReader::new(reader).lines();
    let mut ticker = tokio::time::interval(frame);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                debug!("Barcode input exhausted");
                break;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read barcode input");
                break;
            }
        };

        let text = line.trim();
        let event = if text.is_empty() {
            DecodeEvent::NotFound(NOT_FOUND.to_string())
        } else {
            DecodeEvent::Decoded(text.to_string())
        };
        if tx.send(event).await.is_err() {
            break;
        }
    }
}
