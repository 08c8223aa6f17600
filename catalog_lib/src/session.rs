//! Matching responses to the query that is currently on screen.
//!
//! Requests are never cancelled. When the user moves on before a response
//! arrives, the response is dropped because its key no longer matches.

use crate::address::QueryKey;

#[derive(Debug, Default)]
pub struct ResponseGate {
    active: Option<QueryKey>,
}

impl ResponseGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as the query whose results should be shown. Returns
    /// false when it was already active, in which case no new request is
    /// needed.
    pub fn activate(&mut self, key: QueryKey) -> bool {
        if self.active.as_ref() == Some(&key) {
            return false;
        }
        self.active = Some(key);
        true
    }

    pub fn active(&self) -> Option<&QueryKey> {
        self.active.as_ref()
    }

    /// Whether a response for `key` may be shown.
    pub fn accept(&self, key: &QueryKey) -> bool {
        let current = self.active.as_ref() == Some(key);
        if !current {
            tracing::debug!("discarding stale response for {}", key);
        }
        current
    }
}
