//! Deduplication of repeated text field values.
//!
//! Columns such as currency codes or company sizes repeat on nearly every
//! line. Interning hands out one shared `Arc<str>` per distinct value, so
//! repeated values cost a hash lookup instead of an allocation.

use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct Interner {
    strings: HashSet<Arc<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the shared copy of `s`, allocating only on first sight.
    pub fn intern(&mut self, s: &str) -> Arc<str> {
        if let Some(existing) = self.strings.get(s) {
            return Arc::clone(existing);
        }
        let shared: Arc<str> = Arc::from(s);
        self.strings.insert(Arc::clone(&shared));
        shared
    }

    /// Number of distinct strings held.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn clear(&mut self) {
        self.strings.clear();
    }
}
