//! Persistent cart counter.
//!
//! The cart is a single non-negative integer stored as a decimal string
//! under [`CART_STORAGE_KEY`]. It tracks no line items. Reads never fail:
//! an absent, unreadable, or invalid value reads as zero. Writes normalize
//! instead of rejecting.
//!
//! `increment` is an unlocked read-modify-write. Two processes sharing the
//! same store can lose an increment (last write wins); this is a known race.

use crate::storage::LocalStorage;

/// Storage key of the counter.
pub const CART_STORAGE_KEY: &str = "pd_cart_count_v1";

/// Cart counter over an injected [`LocalStorage`].
pub struct CartCounter<S> {
    storage: S,
}

impl<S: LocalStorage> CartCounter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Current count, 0 when nothing valid is stored.
    pub fn read(&self) -> u64 {
        match self.storage.get_item(CART_STORAGE_KEY) {
            Ok(Some(raw)) => parse_count(&raw),
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!("Cart storage unavailable, assuming empty cart: {}", e);
                0
            }
        }
    }

    /// Persists `max(0, floor(count))` and returns the stored value.
    /// Storage failures are logged and otherwise ignored.
    pub fn write(&self, count: f64) -> u64 {
        let normalized = normalize(count);
        if let Err(e) = self
            .storage
            .set_item(CART_STORAGE_KEY, &normalized.to_string())
        {
            tracing::warn!("Failed to persist cart count {}: {}", normalized, e);
        }
        normalized
    }

    /// Adds one item and returns the new count.
    pub fn increment(&self) -> u64 {
        let next = self.read().saturating_add(1);
        self.write(next as f64)
    }
}

fn parse_count(raw: &str) -> u64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => n.floor() as u64,
        _ => 0,
    }
}

fn normalize(count: f64) -> u64 {
    if count.is_finite() && count > 0.0 {
        count.floor() as u64
    } else {
        0
    }
}
