//! Cross-thread publication of the active quality level

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::performance::QualityLevel;

/// Quality level handle readable from a render thread
///
/// The level is stored as a single byte, so a reader sees either the old
/// or the new level and never a partial update. Clones share one slot.
#[derive(Debug, Clone)]
pub struct SharedQuality {
    level: Arc<AtomicU8>,
}

impl SharedQuality {
    /// Create a handle holding `level`
    pub fn new(level: QualityLevel) -> Self {
        Self {
            level: Arc::new(AtomicU8::new(Self::encode(level))),
        }
    }

    /// Publish a new level
    pub fn publish(&self, level: QualityLevel) {
        self.level.store(Self::encode(level), Ordering::Release);
    }

    /// Read the last published level
    pub fn load(&self) -> QualityLevel {
        let raw = self.level.load(Ordering::Acquire);
        QualityLevel::from_index(usize::from(raw)).unwrap_or_default()
    }

    const fn encode(level: QualityLevel) -> u8 {
        level as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_publish_and_load() {
        let shared = SharedQuality::new(QualityLevel::Nominal);
        assert_eq!(shared.load(), QualityLevel::Nominal);

        shared.publish(QualityLevel::Reduced);
        assert_eq!(shared.load(), QualityLevel::Reduced);
    }

    #[test]
    fn test_clones_share_state() {
        let writer = SharedQuality::new(QualityLevel::Nominal);
        let reader = writer.clone();

        writer.publish(QualityLevel::High);
        assert_eq!(reader.load(), QualityLevel::High);
    }

    #[test]
    fn test_reader_thread_sees_valid_levels() {
        let writer = SharedQuality::new(QualityLevel::Reduced);
        let reader = writer.clone();

        let handle = thread::spawn(move || {
            for _ in 0..10_000 {
                assert!(QualityLevel::ALL.contains(&reader.load()));
            }
        });

        for i in 0..10_000 {
            writer.publish(QualityLevel::ALL[i % 3]);
        }
        handle.join().unwrap();
    }
}
