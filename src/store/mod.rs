//! File store adapter: how the controller obtains, reads and rewrites a configuration file.

mod local;

use async_trait::async_trait;

use crate::error::Result;

pub use local::{LocalFileHandle, LocalFileStore};

/// Source of configuration files. Picking may involve the user and may be cancelled.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Returns a handle to the chosen file, or `UserCancelled`.
    async fn pick_readable_file(&self) -> Result<Box<dyn FileHandle>>;
}

/// A file chosen through a [`FileStore`]. Kept by the controller so later saves go to
/// the same place.
#[async_trait]
pub trait FileHandle: Send + Sync {
    /// Display name for status messages.
    fn name(&self) -> String;

    async fn read_all(&self) -> Result<Vec<u8>>;

    async fn open_writable(&self) -> Result<Box<dyn WritableStream>>;
}

/// Write side of a [`FileHandle`]. Content becomes visible in the file once `close`
/// returns successfully.
#[async_trait]
pub trait WritableStream: Send {
    async fn write_all(&mut self, bytes: &[u8]) -> Result<()>;

    async fn close(self: Box<Self>) -> Result<()>;
}
