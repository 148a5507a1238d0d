// src/store/local.rs
//! Filesystem-backed store. The "picker" is whatever path the UI last selected.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use super::{FileHandle, FileStore, WritableStream};
use crate::error::{MacropadError, Result};
use crate::{log_info, log_warn};

#[derive(Debug, Default)]
pub struct LocalFileStore {
    selection: Mutex<Option<PathBuf>>,
}

impl LocalFileStore {
    pub fn new(initial: Option<PathBuf>) -> Self {
        Self {
            selection: Mutex::new(initial),
        }
    }

    /// Sets the path the next pick returns.
    pub fn select(&self, path: PathBuf) {
        match self.selection.lock() {
            Ok(mut selection) => *selection = Some(path),
            Err(poisoned) => *poisoned.into_inner() = Some(path),
        }
    }

    pub fn selection(&self) -> Option<PathBuf> {
        match self.selection.lock() {
            Ok(selection) => selection.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn pick_readable_file(&self) -> Result<Box<dyn FileHandle>> {
        let path = self.selection().ok_or(MacropadError::UserCancelled)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if !is_json {
            return Err(MacropadError::UnsupportedFile(path));
        }

        let metadata = tokio::fs::metadata(&path).await?;
        if !metadata.is_file() {
            return Err(MacropadError::UnsupportedFile(path));
        }

        log_info!("Picked configuration file {}", path.display());
        Ok(Box::new(LocalFileHandle { path }))
    }
}

#[derive(Debug, Clone)]
pub struct LocalFileHandle {
    path: PathBuf,
}

impl LocalFileHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "config.json".to_string());
        self.path.with_file_name(format!(".{}.tmp", file_name))
    }
}

#[async_trait]
impl FileHandle for LocalFileHandle {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    async fn read_all(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path).await.map_err(|e| {
            log_warn!("Could not read {}: {}", self.path.display(), e);
            MacropadError::ReadFailed(format!("{}: {}", self.path.display(), e))
        })
    }

    async fn open_writable(&self) -> Result<Box<dyn WritableStream>> {
        let temp = self.temp_path();
        let file = File::create(&temp)
            .await
            .map_err(|e| MacropadError::WriteFailed(format!("{}: {}", temp.display(), e)))?;

        Ok(Box::new(LocalWritable {
            target: self.path.clone(),
            temp,
            file: Some(file),
        }))
    }
}

/// Writes into a sibling temp file; `close` syncs it and renames it over the target.
struct LocalWritable {
    target: PathBuf,
    temp: PathBuf,
    file: Option<File>,
}

#[async_trait]
impl WritableStream for LocalWritable {
    async fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| MacropadError::WriteFailed("stream already closed".to_string()))?;
        file.write_all(bytes)
            .await
            .map_err(|e| MacropadError::WriteFailed(e.to_string()))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let mut this = self;
        let Some(mut file) = this.file.take() else {
            return Err(MacropadError::WriteFailed("stream already closed".to_string()));
        };

        let committed = async {
            file.flush().await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&this.temp, &this.target).await
        }
        .await;

        committed.map_err(|e| MacropadError::WriteFailed(format!("{}: {}", this.target.display(), e)))
    }
}

impl Drop for LocalWritable {
    fn drop(&mut self) {
        // Only an abandoned stream still owns its file; leave no temp file behind.
        if self.file.take().is_some() || self.temp.exists() {
            if let Err(e) = std::fs::remove_file(&self.temp) {
                log_warn!("Could not remove {}: {}", self.temp.display(), e);
            }
        }
    }
}
