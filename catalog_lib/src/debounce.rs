//! Debounced search input.
//!
//! [`Debouncer`] is a cancellable timer: every `push` cancels the pending
//! timer and starts a new one, and only a value that stays unchanged for the
//! whole quiet period is emitted. [`SearchBox`] pairs it with the visible
//! input text and the address.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::address::{AddressState, AddressUpdate};

/// Quiet period before typed search text is applied.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Emits the last pushed value once no new value has arrived for `delay`.
///
/// Must be used inside a tokio runtime. Settled values are delivered on the
/// receiver returned by [`Debouncer::new`].
pub struct Debouncer<T> {
    delay: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T> Debouncer<T> {
    /// Drops the pending value, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// Restarts the timer with `value`.
    pub fn push(&mut self, value: T) {
        self.cancel();
        let deadline = Instant::now() + self.delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            // The receiver may be gone during shutdown.
            let _ = tx.send(value);
        }));
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// The search input: visible text that follows every keystroke, and an
/// address value that only follows settled text.
pub struct SearchBox {
    text: String,
    /// Address search text seen by the last resync.
    synced: String,
    debouncer: Debouncer<String>,
}

impl SearchBox {
    /// Creates a box showing the address's current search text.
    pub fn new(address: &AddressState, delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (debouncer, rx) = Debouncer::new(delay);
        let current = address.q.clone().unwrap_or_default();
        (
            Self {
                text: current.clone(),
                synced: current,
                debouncer,
            },
            rx,
        )
    }

    /// Visible input text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// A keystroke: the visible text changes now, the address later.
    pub fn on_input(&mut self, text: &str) {
        self.text = text.to_string();
        self.debouncer.push(self.text.clone());
    }

    pub fn clear(&mut self) {
        self.on_input("");
    }

    /// Handles a settled value from the receiver. Updates the address (and
    /// resets its page) only when the value differs from the address's
    /// search text. Returns whether the address changed.
    pub fn on_settled(&self, value: &str, address: &mut AddressState) -> bool {
        let current = address.q.as_deref().unwrap_or("");
        if value == current {
            return false;
        }
        tracing::debug!("search settled on {:?}", value);
        address.apply(AddressUpdate::search(value));
        true
    }

    /// Resynchronizes the visible text after an address change (navigation,
    /// a pasted address, or a settled search). Only reacts when the address's
    /// search text itself changed, so a page change keeps in-progress typing.
    /// Never schedules an update, so writing back the value that produced
    /// the change cannot loop.
    pub fn on_address_changed(&mut self, address: &AddressState) {
        let current = address.q.as_deref().unwrap_or("");
        if self.synced == current {
            return;
        }
        self.synced = current.to_string();
        if self.text != current {
            self.debouncer.cancel();
            self.text = current.to_string();
        }
    }
}
