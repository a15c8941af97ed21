//! Memoized lazy cells
//!
//! A `Memo` wraps a zero-argument supplier and computes it at most once,
//! caching the result. Page chains use this to materialize links on demand
//! without eager construction of the whole sequence.

use parking_lot::Mutex;

type Supplier<T> = Box<dyn FnOnce() -> T + Send>;

enum State<T> {
    Pending(Supplier<T>),
    Evaluating,
    Ready(T),
}

/// A value computed at most once, on first access
pub struct Memo<T> {
    state: Mutex<State<T>>,
}

impl<T: Clone> Memo<T> {
    /// Create a memo that runs `supplier` on first access
    pub fn new(supplier: impl FnOnce() -> T + Send + 'static) -> Self {
        Self {
            state: Mutex::new(State::Pending(Box::new(supplier))),
        }
    }

    /// Create an already-resolved memo
    pub fn ready(value: T) -> Self {
        Self {
            state: Mutex::new(State::Ready(value)),
        }
    }

    /// Get the value, computing it on the first call
    ///
    /// Panics if the supplier re-enters `get` on the same cell.
    pub fn get(&self) -> T {
        let state = std::mem::replace(&mut *self.state.lock(), State::Evaluating);
        match state {
            State::Ready(value) => {
                *self.state.lock() = State::Ready(value.clone());
                value
            }
            State::Pending(supplier) => {
                let value = supplier();
                *self.state.lock() = State::Ready(value.clone());
                value
            }
            State::Evaluating => panic!("Memo::get re-entered during evaluation"),
        }
    }

    /// Whether the value has been computed
    pub fn is_ready(&self) -> bool {
        matches!(&*self.state.lock(), State::Ready(_))
    }
}

impl<T> std::fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &*self.state.lock() {
            State::Pending(_) => "pending",
            State::Evaluating => "evaluating",
            State::Ready(_) => "ready",
        };
        write!(f, "Memo({state})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_computed_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let memo = Memo::new(move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            42
        });

        assert!(!memo.is_ready());
        assert_eq!(memo.get(), 42);
        assert_eq!(memo.get(), 42);
        assert!(memo.is_ready());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_ready() {
        let memo = Memo::ready("cached");
        assert!(memo.is_ready());
        assert_eq!(memo.get(), "cached");
    }
}
