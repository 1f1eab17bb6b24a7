//! Credential pool with a rotating cursor.

use std::sync::atomic::{AtomicUsize, Ordering};

/// An ordered set of API credentials sharing one rotation cursor.
///
/// The cursor is advanced when the active credential hits a rate limit.
/// It is atomic, so concurrent rotations interleave without clobbering
/// each other; which key a given request ends up with is still not
/// deterministic under contention, and does not need to be.
#[derive(Debug)]
pub struct CredentialPool {
    keys: Vec<String>,
    cursor: AtomicUsize,
}

impl CredentialPool {
    /// Create a pool from an ordered credential list. Blank entries are
    /// dropped.
    pub fn new(keys: Vec<String>) -> Self {
        let keys: Vec<String> = keys
            .into_iter()
            .filter(|k| !k.trim().is_empty())
            .collect();
        log::info!("credential pool initialized with {} key(s)", keys.len());
        Self {
            keys,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Collect credentials from numbered environment variables:
    /// `<prefix>`, `<prefix>_2`, `<prefix>_3`, ... until the first gap.
    pub fn from_env(prefix: &str) -> Self {
        let mut keys = Vec::new();
        if let Ok(key) = std::env::var(prefix) {
            keys.push(key);
        }
        let mut n = 2;
        while let Ok(key) = std::env::var(format!("{prefix}_{n}")) {
            keys.push(key);
            n += 1;
        }
        Self::new(keys)
    }

    /// Number of usable credentials.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the pool has no usable credentials.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The active `(index, key)` pair, or `None` for an empty pool.
    pub fn active(&self) -> Option<(usize, &str)> {
        if self.keys.is_empty() {
            return None;
        }
        let index = self.cursor.load(Ordering::Relaxed) % self.keys.len();
        Some((index, &self.keys[index]))
    }

    /// Advance the cursor to the next credential (wrapping) and return
    /// the new index.
    pub fn advance(&self) -> usize {
        let next = self.cursor.fetch_add(1, Ordering::Relaxed) + 1;
        next % self.keys.len().max(1)
    }
}
