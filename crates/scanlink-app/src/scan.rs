//! `scanlink scan`: join a pairing session and forward scans.

use std::sync::Arc;
use std::time::Duration;

use scanlink_common::{Notification, NotificationQueue, PairingCode, ScanlinkError};
use scanlink_config::ScanlinkConfig;
use scanlink_realtime::{RealtimeClient, RealtimeEvent};
use scanlink_scanner::{translate_transport_events, Haptics, PairingClient, ScannerView};
use tracing::{info, warn};

use crate::cli::ScanArgs;
use crate::console::{ConsoleView, TerminalBell};
use crate::decoder::LineDecoder;
use crate::settings;

/// How long to wait for queued scans to flush after stopping.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

pub async fn run(args: ScanArgs, config: &ScanlinkConfig) -> Result<(), ScanlinkError> {
    let code = PairingCode::parse(&args.code)?;
    let realtime = settings::realtime_config(&config.server, args.server.as_deref());
    realtime
        .ws_url()
        .map_err(|e| ScanlinkError::Network(e.to_string()))?;
    let scanner = settings::scanner_settings(&config.scanner);

    let banners = NotificationQueue::with_dismiss_after(
        config.notifications.capacity as usize,
        settings::banner_dismiss_after(config),
    );
    let view = Arc::new(ConsoleView::stdout(banners));
    let haptics: Option<Arc<dyn Haptics>> = if args.no_haptics {
        None
    } else {
        Some(Arc::new(TerminalBell))
    };

    let (client, events) = RealtimeClient::connect(realtime);
    let client = Arc::new(client);

    let banner_view = Arc::clone(&view);
    let (transport, translator) = translate_transport_events(events, move |event| {
        if let RealtimeEvent::ConnectError(reason) = event {
            banner_view.post(Notification::danger("Connection refused", reason.as_str()));
        }
    });

    let Some(pairing) = PairingClient::init(
        Some(Arc::clone(&client)),
        code,
        Arc::clone(&view) as Arc<dyn ScannerView>,
        haptics,
        scanner,
    )
    .await
    else {
        return Ok(());
    };
    view.set_status(pairing.state());

    let mut decoder = LineDecoder::new(args.input);
    let mut session = tokio::spawn(async move {
        pairing.run(transport, &mut decoder).await;
    });

    tokio::select! {
        _ = &mut session => info!("Scanner session ended"),
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                warn!(error = %e, "Failed to listen for Ctrl-C");
            }
            info!("Interrupted, leaving pairing session");
        }
    }

    client.disconnect();
    if tokio::time::timeout(SHUTDOWN_GRACE, translator).await.is_err() {
        warn!("Realtime client did not stop in time");
    }
    session.abort();
    Ok(())
}
