//! Serial session: one connection to the keypad, a background read loop feeding the
//! terminal, and the single-byte reset signal sent after a save.
//!
//! ```text
//! Closed --start()--> Opening --open ok--> Open(reading) --stream end / read error--> Closed
//!                        \--request/open failed--> Closed
//! ```

mod decoder;
mod read_loop;
mod send_reset_signal;
mod start;
mod stop;
mod terminal;
mod transport;

use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{mpsc, Mutex as AsyncMutex};
use tokio::task::JoinHandle;

pub use decoder::Utf8Decoder;
pub use terminal::TerminalBuffer;
pub use transport::{
    detect_usb_ports, BoxedReader, BoxedWriter, SerialStreams, SerialTransport, TokioSerialHandle,
    TokioSerialTransport, TransportHandle,
};

pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// ASCII `'1'`. Some firmware revisions listen for `0x04` instead, hence configurable.
pub const DEFAULT_RESET_SIGNAL: u8 = b'1';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialConfig {
    pub baud_rate: u32,
    pub reset_signal: u8,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            reset_signal: DEFAULT_RESET_SIGNAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Opening,
    Open,
}

/// What the read loop reports. Consumed by whoever owns the receiver (the controller).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerialEvent {
    /// Decoded text received from the device.
    Data(String),
    /// The stream ended or the session was stopped.
    Closed,
    /// The stream failed; the session is closed.
    ReadFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// A device was requested and opened.
    Opened(String),
    /// The retained device was opened again after its stream ended.
    Reopened(String),
    /// Already open with a live read loop; nothing done.
    AlreadyOpen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Sent,
    /// The session was not open; nothing was written.
    Skipped,
}

/// State shared with the read loop. `generation` changes on every open and on stop so a
/// stale read loop can tell it no longer owns the session.
#[derive(Debug)]
struct Shared {
    state: SessionState,
    generation: u64,
}

pub struct SerialSession {
    transport: Arc<dyn SerialTransport>,
    config: SerialConfig,
    shared: Arc<Mutex<Shared>>,
    handle: Option<Arc<dyn TransportHandle>>,
    writer: Arc<AsyncMutex<Option<BoxedWriter>>>,
    reader: Option<JoinHandle<()>>,
    events: mpsc::UnboundedSender<SerialEvent>,
}

impl SerialSession {
    /// Creates a closed session and the receiving end of its event channel.
    pub fn new(
        transport: Arc<dyn SerialTransport>,
        config: SerialConfig,
    ) -> (Self, mpsc::UnboundedReceiver<SerialEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();

        (
            Self {
                transport,
                config,
                shared: Arc::new(Mutex::new(Shared {
                    state: SessionState::Closed,
                    generation: 0,
                })),
                handle: None,
                writer: Arc::new(AsyncMutex::new(None)),
                reader: None,
                events,
            },
            receiver,
        )
    }

    pub fn config(&self) -> SerialConfig {
        self.config
    }

    pub fn state(&self) -> SessionState {
        lock(&self.shared).state
    }

    pub fn is_open(&self) -> bool {
        self.state() == SessionState::Open
    }

    /// True while a read loop task is alive.
    pub fn is_reading(&self) -> bool {
        self.reader.as_ref().is_some_and(|reader| !reader.is_finished())
    }

    /// Name of the device currently (or last) opened.
    pub fn device_name(&self) -> Option<String> {
        self.handle.as_ref().map(|handle| handle.name())
    }

    fn set_state(&self, state: SessionState) {
        lock(&self.shared).state = state;
    }

    /// Starts a new ownership period and returns its generation.
    fn next_generation(&self) -> u64 {
        let mut shared = lock(&self.shared);
        shared.generation += 1;
        shared.generation
    }
}

impl std::fmt::Debug for SerialSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialSession")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("device", &self.device_name())
            .field("reading", &self.is_reading())
            .finish()
    }
}

impl Drop for SerialSession {
    fn drop(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
