//! Transient status message with an expiry.

use std::time::{Duration, Instant};

/// How long a status message stays on screen.
pub const STATUS_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone)]
pub struct StatusLine {
    message: Option<(String, Instant)>,
    ttl: Duration,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new(STATUS_TTL)
    }
}

impl StatusLine {
    pub fn new(ttl: Duration) -> Self {
        Self { message: None, ttl }
    }

    /// Show `text` from `now` on, replacing any earlier message.
    pub fn set(&mut self, text: impl Into<String>, now: Instant) {
        self.message = Some((text.into(), now));
    }

    /// The message if it has not expired at `now`.
    pub fn current(&self, now: Instant) -> Option<&str> {
        match &self.message {
            Some((text, since)) if now.saturating_duration_since(*since) < self.ttl => {
                Some(text.as_str())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_expires_after_ttl() {
        let start = Instant::now();
        let mut line = StatusLine::new(Duration::from_secs(2));
        assert_eq!(line.current(start), None);

        line.set("AI request failed", start);
        assert_eq!(line.current(start), Some("AI request failed"));
        assert_eq!(
            line.current(start + Duration::from_millis(1999)),
            Some("AI request failed")
        );
        assert_eq!(line.current(start + Duration::from_secs(2)), None);
    }

    #[test]
    fn newer_message_restarts_the_clock() {
        let start = Instant::now();
        let mut line = StatusLine::new(Duration::from_secs(2));
        line.set("first", start);
        line.set("second", start + Duration::from_secs(1));
        assert_eq!(line.current(start + Duration::from_millis(2500)), Some("second"));
        assert_eq!(line.current(start + Duration::from_secs(3)), None);
    }
}
