//! In-memory stand-ins for the file store and the serial transport. Both append to a
//! shared call log so tests can check the order in which things happened.
#![allow(dead_code)]

use async_trait::async_trait;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tokio::io::{AsyncWrite, DuplexStream};

use macropad_config::serial::{SerialConfig, SerialStreams, SerialTransport, TransportHandle};
use macropad_config::store::{FileHandle, FileStore, WritableStream};
use macropad_config::{EditController, MacropadError, Result};

#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// One file held in memory. Picking it can be cancelled and writing it can be made to fail.
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    pub name: String,
    pub contents: Arc<Mutex<Option<Vec<u8>>>>,
    pub fail_writes: Arc<AtomicBool>,
    pub log: CallLog,
}

impl MemoryFileStore {
    pub fn with_file(name: &str, contents: &str, log: CallLog) -> Self {
        Self {
            name: name.to_string(),
            contents: Arc::new(Mutex::new(Some(contents.as_bytes().to_vec()))),
            fail_writes: Arc::new(AtomicBool::new(false)),
            log,
        }
    }

    pub fn replace(&self, contents: &str) {
        *self.contents.lock().unwrap() = Some(contents.as_bytes().to_vec());
    }

    pub fn saved(&self) -> serde_json::Value {
        let bytes = self.contents.lock().unwrap().clone().expect("no file contents");
        serde_json::from_slice(&bytes).expect("saved file is not JSON")
    }

    pub fn saved_text(&self) -> String {
        let bytes = self.contents.lock().unwrap().clone().expect("no file contents");
        String::from_utf8(bytes).unwrap()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn pick_readable_file(&self) -> Result<Box<dyn FileHandle>> {
        if self.contents.lock().unwrap().is_none() {
            return Err(MacropadError::UserCancelled);
        }
        self.log.push("pick");
        Ok(Box::new(MemoryHandle {
            name: self.name.clone(),
            contents: self.contents.clone(),
            fail_writes: self.fail_writes.clone(),
            log: self.log.clone(),
        }))
    }
}

struct MemoryHandle {
    name: String,
    contents: Arc<Mutex<Option<Vec<u8>>>>,
    fail_writes: Arc<AtomicBool>,
    log: CallLog,
}

#[async_trait]
impl FileHandle for MemoryHandle {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn read_all(&self) -> Result<Vec<u8>> {
        self.contents
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| MacropadError::ReadFailed("file vanished".to_string()))
    }

    async fn open_writable(&self) -> Result<Box<dyn WritableStream>> {
        Ok(Box::new(MemoryWritable {
            buffer: Vec::new(),
            contents: self.contents.clone(),
            fail: self.fail_writes.load(Ordering::SeqCst),
            log: self.log.clone(),
        }))
    }
}

struct MemoryWritable {
    buffer: Vec<u8>,
    contents: Arc<Mutex<Option<Vec<u8>>>>,
    fail: bool,
    log: CallLog,
}

#[async_trait]
impl WritableStream for MemoryWritable {
    async fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        if self.fail {
            self.log.push("write-failed");
            return Err(MacropadError::WriteFailed("disk full".to_string()));
        }
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    async fn close(self: Box<Self>) -> Result<()> {
        *self.contents.lock().unwrap() = Some(self.buffer);
        self.log.push("write-complete");
        Ok(())
    }
}

/// Serial transport whose device output is driven by the test and whose writes are
/// recorded in the call log as `reset:0xNN`.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub log: CallLog,
    pub cancel: bool,
    pub requests: Arc<AtomicUsize>,
    pub devices: Arc<Mutex<Vec<DuplexStream>>>,
}

impl RecordingTransport {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            ..Default::default()
        }
    }

    /// Device end of the most recent open; writing to it feeds the read loop.
    pub fn device(&self) -> DuplexStream {
        self.devices.lock().unwrap().pop().expect("device was never opened")
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SerialTransport for RecordingTransport {
    async fn request_device(&self) -> Result<Box<dyn TransportHandle>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.cancel {
            return Err(MacropadError::UserCancelled);
        }
        Ok(Box::new(RecordingHandle {
            log: self.log.clone(),
            devices: self.devices.clone(),
        }))
    }
}

struct RecordingHandle {
    log: CallLog,
    devices: Arc<Mutex<Vec<DuplexStream>>>,
}

#[async_trait]
impl TransportHandle for RecordingHandle {
    fn name(&self) -> String {
        "/dev/ttyACM0".to_string()
    }

    async fn open(&self, _baud_rate: u32) -> Result<SerialStreams> {
        let (ours, theirs) = tokio::io::duplex(1024);
        self.devices.lock().unwrap().push(theirs);
        Ok(SerialStreams {
            reader: Box::new(ours),
            writer: Box::new(RecordingWriter { log: self.log.clone() }),
        })
    }
}

struct RecordingWriter {
    log: CallLog,
}

impl AsyncWrite for RecordingWriter {
    fn poll_write(self: Pin<&mut Self>, _: &mut Context<'_>, buf: &[u8]) -> Poll<std::io::Result<usize>> {
        for byte in buf {
            self.log.push(format!("reset:0x{:02x}", byte));
        }
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// A controller wired to the in-memory store and the recording transport.
pub fn controller(
    file: &str,
    contents: &str,
) -> (EditController, Arc<MemoryFileStore>, Arc<RecordingTransport>, CallLog) {
    let log = CallLog::default();
    let store = Arc::new(MemoryFileStore::with_file(file, contents, log.clone()));
    let transport = Arc::new(RecordingTransport::new(log.clone()));
    let controller = EditController::new(store.clone(), transport.clone(), SerialConfig::default());
    (controller, store, transport, log)
}
