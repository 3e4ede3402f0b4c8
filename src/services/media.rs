//! Media playback commands relayed to an external transport

use std::sync::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Transport command for the system media player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum MediaCommand {
    Play,
    Pause,
    Seek { position_seconds: f64 },
    SkipForward,
    SkipBackward,
}

/// One-way sink for media commands
pub trait MediaTransport: Send + Sync + std::fmt::Debug {
    fn send(&self, command: MediaCommand) -> Result<(), String>;
}

/// Transport that only logs commands and remembers the last one
#[derive(Debug, Default)]
pub struct LoggingTransport {
    last: Mutex<Option<MediaCommand>>,
}

impl LoggingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_command(&self) -> Option<MediaCommand> {
        self.last.lock().ok().and_then(|last| *last)
    }
}

impl MediaTransport for LoggingTransport {
    fn send(&self, command: MediaCommand) -> Result<(), String> {
        info!("Media command: {:?}", command);
        let mut last = self.last.lock()
            .map_err(|e| format!("Failed to lock media transport: {}", e))?;
        *last = Some(command);
        Ok(())
    }
}
