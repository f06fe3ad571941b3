use std::time::{Duration, Instant};

use crate::error::ClientError;

/// Destination for copied short URLs.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClientError>;
}

/// The system clipboard.
///
/// Keep the value alive for as long as copied text should stay available; on
/// some platforms the contents are served by this process.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClientError> {
        let inner = arboard::Clipboard::new().map_err(|e| ClientError::Clipboard(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClientError> {
        self.inner
            .set_text(text)
            .map_err(|e| ClientError::Clipboard(e.to_string()))
    }
}

/// Transient "copied" flag that reverts on its own once `duration` has
/// passed since the last copy.
#[derive(Debug, Clone)]
pub struct CopyAck {
    copied_at: Option<Instant>,
    duration: Duration,
}

impl CopyAck {
    pub fn new(duration: Duration) -> Self {
        Self {
            copied_at: None,
            duration,
        }
    }

    pub fn arm(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    pub fn reset(&mut self) {
        self.copied_at = None;
    }

    pub fn is_active(&self, now: Instant) -> bool {
        match self.copied_at {
            Some(at) => now.saturating_duration_since(at) < self.duration,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_until_armed() {
        let ack = CopyAck::new(Duration::from_secs(2));
        assert!(!ack.is_active(Instant::now()));
    }

    #[test]
    fn reverts_after_duration() {
        let mut ack = CopyAck::new(Duration::from_secs(2));
        let start = Instant::now();
        ack.arm(start);

        assert!(ack.is_active(start));
        assert!(ack.is_active(start + Duration::from_millis(1999)));
        assert!(!ack.is_active(start + Duration::from_secs(2)));
        assert!(!ack.is_active(start + Duration::from_secs(60)));
    }

    #[test]
    fn rearming_extends_the_window() {
        let mut ack = CopyAck::new(Duration::from_secs(2));
        let start = Instant::now();
        ack.arm(start);
        ack.arm(start + Duration::from_millis(1500));

        assert!(ack.is_active(start + Duration::from_millis(3000)));
        assert!(!ack.is_active(start + Duration::from_millis(3500)));
    }

    #[test]
    fn reset_clears_immediately() {
        let mut ack = CopyAck::new(Duration::from_secs(2));
        let start = Instant::now();
        ack.arm(start);
        ack.reset();

        assert!(!ack.is_active(start));
    }
}
