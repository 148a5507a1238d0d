use std::io::ErrorKind;
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{lock, BoxedReader, SerialEvent, SerialSession, SessionState, Utf8Decoder};
use crate::{log_debug, log_error, log_info};

const READ_CHUNK: usize = 1024;

enum ReadEnd {
    Eof,
    Failed(String),
    /// Nobody is listening for events any more.
    Detached,
}

impl SerialSession {
    /// Spawns the loop that forwards decoded device output until the stream ends.
    ///
    /// The loop is the only producer of [`SerialEvent::Data`]. When it ends it closes
    /// the session, unless a newer open or a stop already took the session over.
    pub(super) fn spawn_read_loop(&self, reader: BoxedReader, generation: u64) -> JoinHandle<()> {
        let shared = self.shared.clone();
        let writer = self.writer.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            let end = read_until_end(reader, &events).await;

            let still_owner = {
                let mut shared = lock(&shared);
                let owner = shared.generation == generation;
                if owner {
                    shared.state = SessionState::Closed;
                }
                owner
            };
            if !still_owner {
                return;
            }
            writer.lock().await.take();

            match end {
                ReadEnd::Eof => {
                    log_info!("Serial stream closed");
                    let _ = events.send(SerialEvent::Closed);
                }
                ReadEnd::Failed(reason) => {
                    log_error!("Failed to read from serial port: {}", reason);
                    let _ = events.send(SerialEvent::ReadFailed(reason));
                }
                ReadEnd::Detached => log_debug!("Serial events receiver dropped, read loop exiting"),
            }
        })
    }
}

async fn read_until_end(mut reader: BoxedReader, events: &mpsc::UnboundedSender<SerialEvent>) -> ReadEnd {
    let mut buf = vec![0u8; READ_CHUNK];
    let mut decoder = Utf8Decoder::default();

    loop {
        match reader.read(&mut buf).await {
            Ok(0) => {
                let rest = decoder.finish();
                if !rest.is_empty() {
                    let _ = events.send(SerialEvent::Data(rest));
                }
                return ReadEnd::Eof;
            }
            Ok(n) => {
                let text = decoder.push(&buf[..n]);
                if text.is_empty() {
                    continue;
                }
                log_debug!("Serial received {} bytes", n);
                if events.send(SerialEvent::Data(text)).is_err() {
                    return ReadEnd::Detached;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return ReadEnd::Failed(e.to_string()),
        }
    }
}
