//! Destinations for position readings.

use std::sync::{Mutex, PoisonError};

use crate::error::Result;
use crate::reading::PositionReading;
use crate::recorder::Recorder;

/// Something that can record a reading.
#[async_trait::async_trait]
pub trait ReadingSink: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Persist one reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the reading could not be recorded.
    async fn record(&self, reading: &PositionReading) -> Result<()>;
}

#[async_trait::async_trait]
impl ReadingSink for Recorder {
    fn name(&self) -> &'static str {
        "mongodb"
    }

    async fn record(&self, reading: &PositionReading) -> Result<()> {
        self.store(reading).await
    }
}

/// Keeps readings in memory. Used by `fetch` and by tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    readings: Mutex<Vec<PositionReading>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Readings recorded so far, oldest first.
    #[must_use]
    pub fn readings(&self) -> Vec<PositionReading> {
        self.readings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of readings recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.readings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl ReadingSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn record(&self, reading: &PositionReading) -> Result<()> {
        self.readings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(reading.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_memory_sink_records() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        let reading = PositionReading::new("t", json!("1"), json!("2"));
        sink.record(&reading).await.unwrap();

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.readings(), vec![reading]);
        assert_eq!(sink.name(), "memory");
    }

    #[tokio::test]
    async fn test_memory_sink_survives_poisoned_lock() {
        let sink = std::sync::Arc::new(MemorySink::new());
        let first = PositionReading::new("t1", json!("1"), json!("2"));
        sink.record(&first).await.unwrap();

        let poisoner = std::sync::Arc::clone(&sink);
        let joined = std::thread::spawn(move || {
            let _guard = poisoner.readings.lock().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(joined.is_err());
        assert!(sink.readings.is_poisoned());

        let second = PositionReading::new("t2", json!("3"), json!("4"));
        sink.record(&second).await.unwrap();

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.readings(), vec![first, second]);
    }

    #[test]
    fn test_recorder_sink_name() {
        let recorder = Recorder::new(&crate::config::RecorderConfig::default());
        assert_eq!(ReadingSink::name(&recorder), "mongodb");
    }
}
