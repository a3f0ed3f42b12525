//! Terminal rendering of the scanner page.

use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;
use std::time::Duration;

use scanlink_common::{Notification, NotificationLevel, NotificationQueue};
use scanlink_scanner::{ConnectionState, Haptics, ScannerView};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BOLD_GREEN: &str = "\x1b[1;32m";
const RESET: &str = "\x1b[0m";
/// Cursor up one line, then erase it.
const REWRITE_PREVIOUS_LINE: &str = "\x1b[1A\r\x1b[2K";

struct ConsoleState<W> {
    out: W,
    banners: NotificationQueue,
    last_scan: Option<String>,
    /// Lines written since the last scan echo.
    lines_since_scan: usize,
    highlighted: bool,
}

/// [`ScannerView`] that writes status, scan echoes and banners as lines.
///
/// With `ansi` enabled the status badge is colored and the highlighted
/// scan echo is redrawn in bold green in place.
pub struct ConsoleView<W: Write + Send> {
    state: Mutex<ConsoleState<W>>,
    ansi: bool,
}

impl ConsoleView<io::Stdout> {
    pub fn stdout(banners: NotificationQueue) -> Self {
        let ansi = io::stdout().is_terminal();
        Self::new(io::stdout(), banners, ansi)
    }
}

impl<W: Write + Send> ConsoleView<W> {
    pub fn new(out: W, banners: NotificationQueue, ansi: bool) -> Self {
        Self {
            state: Mutex::new(ConsoleState {
                out,
                banners,
                last_scan: None,
                lines_since_scan: 0,
                highlighted: false,
            }),
            ansi,
        }
    }

    /// Show a banner and keep it until it auto-dismisses.
    pub fn post(&self, notification: Notification) {
        if let Ok(mut state) = self.state.lock() {
            post_banner(&mut state, notification);
        }
    }

    /// Titles of banners that have not been dismissed yet.
    pub fn visible_banners(&self) -> Vec<String> {
        let Ok(mut state) = self.state.lock() else {
            return Vec::new();
        };
        let titles = state.banners.visible().iter().map(|n| n.title.clone()).collect();
        titles
    }

    pub fn is_highlighted(&self) -> bool {
        self.state.lock().map(|s| s.highlighted).unwrap_or(false)
    }

    pub fn into_inner(self) -> Option<W> {
        self.state.into_inner().ok().map(|s| s.out)
    }
}

fn write_line<W: Write>(state: &mut ConsoleState<W>, line: &str) {
    let _ = writeln!(state.out, "{line}");
    let _ = state.out.flush();
    state.lines_since_scan += 1;
}

fn post_banner<W: Write>(state: &mut ConsoleState<W>, notification: Notification) {
    let line = format!(
        "[{}] {}: {}",
        notification.level.style(),
        notification.title,
        notification.body
    );
    state.banners.push(notification);
    write_line(state, &line);
}

impl<W: Write + Send> ScannerView for ConsoleView<W> {
    fn set_status(&self, connection: ConnectionState) {
        let banner = match connection {
            ConnectionState::Connected => {
                Notification::success("Connected", "Scans are forwarded to the checkout.")
            }
            ConnectionState::Disconnected => {
                Notification::danger("Disconnected", "Waiting for the server.")
            }
        };
        if let Ok(mut state) = self.state.lock() {
            let badge = connection.style().css_class();
            let line = if self.ansi {
                let color = match connection {
                    ConnectionState::Connected => GREEN,
                    ConnectionState::Disconnected => RED,
                };
                format!("{color}[{badge}] {}{RESET}", connection.label())
            } else {
                format!("[{badge}] {}", connection.label())
            };
            write_line(&mut state, &line);
            post_banner(&mut state, banner);
        }
    }

    fn show_last_scan(&self, text: &str) {
        if let Ok(mut state) = self.state.lock() {
            write_line(&mut state, text);
            state.last_scan = Some(text.to_string());
            state.lines_since_scan = 0;
        }
    }

    fn set_scan_highlight(&self, on: bool) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.highlighted = on;
        if !on || !self.ansi || state.lines_since_scan != 0 {
            return;
        }
        if let Some(text) = state.last_scan.clone() {
            let _ = writeln!(state.out, "{REWRITE_PREVIOUS_LINE}{BOLD_GREEN}{text}{RESET}");
            let _ = state.out.flush();
        }
    }

    fn show_camera_error(&self, message: &str) {
        if let Ok(mut state) = self.state.lock() {
            let line = if self.ansi {
                format!("{RED}{message}{RESET}")
            } else {
                message.to_string()
            };
            write_line(&mut state, &line);
            post_banner(
                &mut state,
                Notification::new(NotificationLevel::Danger, "Camera", message),
            );
        }
    }
}

/// [`Haptics`] stand-in: rings the terminal bell.
pub struct TerminalBell;

impl Haptics for TerminalBell {
    fn vibrate(&self, _duration: Duration) -> bool {
        let mut err = io::stderr();
        err.write_all(b"\x07").and_then(|()| err.flush()).is_ok()
    }
}
