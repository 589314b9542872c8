//! Shared threshold table
//!
//! The table is replaced whole, never edited band by band. Readers take an
//! `Arc` snapshot and classify against it, so an evaluation in flight keeps
//! the table it started with even if a replacement lands meanwhile.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;
use types::errors::ThresholdError;
use types::threshold::ThresholdTable;

/// Atomically swappable threshold table
#[derive(Debug, Default)]
pub struct ThresholdStore {
    current: RwLock<Arc<ThresholdTable>>,
}

impl ThresholdStore {
    pub fn new(table: ThresholdTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table)),
        }
    }

    /// Table in effect right now.
    pub fn snapshot(&self) -> Arc<ThresholdTable> {
        // The guarded value is a single Arc, so a poisoned lock still holds a whole table.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Publish a new table as-is and return the one it replaced.
    pub fn replace(&self, table: ThresholdTable) -> Arc<ThresholdTable> {
        let bands = table.len();
        let next = Arc::new(table);
        let previous = {
            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *guard, next)
        };
        info!(bands, previous_bands = previous.len(), "threshold table replaced");
        previous
    }

    /// Publish a new table only if it passes [`ThresholdTable::validate`].
    ///
    /// On rejection the current table stays in effect.
    pub fn replace_validated(
        &self,
        table: ThresholdTable,
    ) -> Result<Arc<ThresholdTable>, ThresholdError> {
        table.validate()?;
        Ok(self.replace(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use types::threshold::RiskThreshold;

    use crate::classify::classify;

    #[test]
    fn test_snapshot_survives_replace() {
        let store = ThresholdStore::new(ThresholdTable::default_percentage());
        let before = store.snapshot();

        let previous = store.replace(ThresholdTable::default_fraction());

        assert_eq!(*before, ThresholdTable::default_percentage());
        assert_eq!(*previous, ThresholdTable::default_percentage());
        assert_eq!(*store.snapshot(), ThresholdTable::default_fraction());
        assert_eq!(classify(1.0, before.bands()).as_str(), "low");
        assert_eq!(classify(1.0, store.snapshot().bands()).as_str(), "high");
    }

    #[test]
    fn test_replace_validated_rejects_bad_table() {
        let store = ThresholdStore::new(ThresholdTable::default_percentage());
        let overlapping = ThresholdTable::new(vec![
            RiskThreshold::below(5.0, "A"),
            RiskThreshold::at_least(2.0, "B"),
        ]);

        let err = store.replace_validated(overlapping).unwrap_err();
        assert_eq!(err, ThresholdError::Overlap { first: 0, second: 1 });
        assert_eq!(*store.snapshot(), ThresholdTable::default_percentage());
    }

    #[test]
    fn test_default_store_is_empty() {
        let store = ThresholdStore::default();
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_concurrent_readers_see_whole_tables() {
        let store = Arc::new(ThresholdStore::new(ThresholdTable::default_percentage()));
        let valid = [
            ThresholdTable::default_percentage(),
            ThresholdTable::default_fraction(),
        ];

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                let valid = valid.clone();
                thread::spawn(move || {
                    for _ in 0..500 {
                        let table = store.snapshot();
                        assert!(valid.contains(&*table));
                    }
                })
            })
            .collect();

        for i in 0..200 {
            if i % 2 == 0 {
                store.replace(ThresholdTable::default_fraction());
            } else {
                store.replace(ThresholdTable::default_percentage());
            }
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
