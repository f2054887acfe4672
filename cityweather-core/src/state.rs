use std::sync::Arc;

use tokio::sync::watch;

/// A shared value that readers can poll or subscribe to.
///
/// Clones refer to the same cell.
#[derive(Debug)]
pub struct Observable<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self { tx: Arc::clone(&self.tx) }
    }
}

impl<T: Clone> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replace the value and wake every subscriber.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// The receiver sees the current value as already seen and wakes on the next `set`.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}
