// src/serial/transport.rs
//! Serial transport adapter: finding a device and opening it as a pair of byte streams.

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_serial::{SerialPort, SerialPortBuilderExt};

use crate::error::{MacropadError, Result};
use crate::{log_info, log_warn};

pub type BoxedReader = Box<dyn AsyncRead + Send + Unpin>;
pub type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Independent halves of one open connection.
pub struct SerialStreams {
    pub reader: BoxedReader,
    pub writer: BoxedWriter,
}

/// Where devices come from. Requesting one may involve the user and may be cancelled.
#[async_trait]
pub trait SerialTransport: Send + Sync {
    async fn request_device(&self) -> Result<Box<dyn TransportHandle>>;
}

/// A chosen device. Can be opened again after its stream ended.
#[async_trait]
pub trait TransportHandle: Send + Sync {
    fn name(&self) -> String;

    async fn open(&self, baud_rate: u32) -> Result<SerialStreams>;
}

/// Local USB serial ports through `tokio-serial`.
#[derive(Debug, Clone, Default)]
pub struct TokioSerialTransport {
    /// Fixed port path. When unset, the first detected USB port is used.
    port: Option<String>,
}

impl TokioSerialTransport {
    pub fn new(port: Option<String>) -> Self {
        Self { port }
    }
}

#[async_trait]
impl SerialTransport for TokioSerialTransport {
    async fn request_device(&self) -> Result<Box<dyn TransportHandle>> {
        let path = match &self.port {
            Some(port) => port.clone(),
            None => {
                let ports = detect_usb_ports();
                log_info!("Found {} serial port(s): {:?}", ports.len(), ports);
                ports.into_iter().next().ok_or(MacropadError::DeviceNotFound)?
            }
        };

        Ok(Box::new(TokioSerialHandle { path }))
    }
}

#[derive(Debug, Clone)]
pub struct TokioSerialHandle {
    path: String,
}

#[async_trait]
impl TransportHandle for TokioSerialHandle {
    fn name(&self) -> String {
        self.path.clone()
    }

    async fn open(&self, baud_rate: u32) -> Result<SerialStreams> {
        log_info!("Opening serial port {} at {} baud", self.path, baud_rate);

        let mut port = tokio_serial::new(&self.path, baud_rate)
            .open_native_async()
            .map_err(|e| MacropadError::OpenFailed {
                port: self.path.clone(),
                reason: e.to_string(),
            })?;

        // CDC-ACM firmware usually holds its output until the host asserts DTR.
        if let Err(e) = port.write_data_terminal_ready(true) {
            log_warn!("Could not assert DTR on {}: {}", self.path, e);
        }

        let (reader, writer) = tokio::io::split(port);
        Ok(SerialStreams {
            reader: Box::new(reader),
            writer: Box::new(writer),
        })
    }
}

/// Detect available USB serial ports (works on Linux + macOS)
pub fn detect_usb_ports() -> Vec<String> {
    let mut ports = Vec::new();

    #[cfg(target_os = "linux")]
    {
        // Linux: ttyACM* for CDC devices (RP2040 and friends), ttyUSB* for bridges
        if let Ok(entries) = std::fs::read_dir("/dev") {
            for entry in entries.flatten() {
                if let Some(name) = entry.file_name().to_str() {
                    if name.starts_with("ttyACM") || name.starts_with("ttyUSB") {
                        ports.push(format!("/dev/{}", name));
                    }
                }
            }
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(entries) = std::fs::read_dir("/dev") {
            for entry in entries.flatten() {
                if let Some(name) = entry.file_name().to_str() {
                    if name.starts_with("cu.usbmodem") || name.starts_with("cu.usbserial") {
                        ports.push(format!("/dev/{}", name));
                    }
                }
            }
        }
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        if let Ok(available) = tokio_serial::available_ports() {
            ports.extend(available.into_iter().map(|port| port.port_name));
        }
    }

    // Sort and dedupe
    ports.sort();
    ports.dedup();
    ports
}
