//! Observer lists
//!
//! [`Subscribers`] is a cheap-to-clone list of callbacks. Notification works
//! on a snapshot of the list taken before the first callback runs, so a
//! callback may subscribe or unsubscribe (itself or others) without
//! corrupting the iteration. A callback removed during a notification pass
//! is not invoked for the remainder of that pass; a callback added during a
//! pass is first invoked on the next one.
//!
//! # Example
//!
//! ```rust
//! use lumen_core::observer::Subscribers;
//!
//! let subscribers: Subscribers<bool> = Subscribers::new();
//! let id = subscribers.subscribe(|reduced| println!("reduced motion: {reduced}"));
//! subscribers.notify(&true);
//! assert!(subscribers.unsubscribe(id));
//! ```

use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

new_key_type! {
    /// Handle returned by [`Subscribers::subscribe`]
    pub struct SubscriptionId;
}

type Callback<T> = Rc<dyn Fn(&T)>;

/// A shared list of change callbacks
pub struct Subscribers<T> {
    inner: Rc<RefCell<SlotMap<SubscriptionId, Callback<T>>>>,
}

impl<T> Clone for Subscribers<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> Subscribers<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SlotMap::with_key())),
        }
    }

    /// Register a callback
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        self.inner.borrow_mut().insert(Rc::new(callback))
    }

    /// Remove a callback
    ///
    /// Returns `false` if the id was never registered or was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.borrow_mut().remove(id).is_some()
    }

    /// Invoke every registered callback with `value`
    ///
    /// Returns the number of callbacks invoked.
    pub fn notify(&self, value: &T) -> usize {
        let snapshot: Vec<(SubscriptionId, Callback<T>)> = self
            .inner
            .borrow()
            .iter()
            .map(|(id, callback)| (id, Rc::clone(callback)))
            .collect();

        let mut invoked = 0;
        for (id, callback) in snapshot {
            // Removed by an earlier callback in this pass
            let alive = self.inner.borrow().contains_key(id);
            if alive {
                callback(value);
                invoked += 1;
            }
        }
        invoked
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Drop every callback
    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }
}

impl<T: 'static> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.inner.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_notify_reaches_all_subscribers() {
        let subs: Subscribers<i32> = Subscribers::new();
        let total = Rc::new(Cell::new(0));

        for _ in 0..3 {
            let total = Rc::clone(&total);
            subs.subscribe(move |v| total.set(total.get() + *v));
        }

        assert_eq!(subs.notify(&2), 3);
        assert_eq!(total.get(), 6);
    }

    #[test]
    fn test_unsubscribe_self_during_notify() {
        let subs: Subscribers<()> = Subscribers::new();
        let calls = Rc::new(Cell::new(0));
        let own_id: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));

        let id = {
            let subs_inner = subs.clone();
            let calls = Rc::clone(&calls);
            let own_id = Rc::clone(&own_id);
            subs.subscribe(move |_| {
                calls.set(calls.get() + 1);
                if let Some(id) = own_id.get() {
                    subs_inner.unsubscribe(id);
                }
            })
        };
        own_id.set(Some(id));

        subs.notify(&());
        subs.notify(&());
        assert_eq!(calls.get(), 1);
        assert!(subs.is_empty());
    }

    #[test]
    fn test_unsubscribe_later_subscriber_during_notify() {
        let subs: Subscribers<()> = Subscribers::new();
        let second_calls = Rc::new(Cell::new(0));
        let victim: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));

        {
            let subs_inner = subs.clone();
            let victim = Rc::clone(&victim);
            subs.subscribe(move |_| {
                if let Some(id) = victim.get() {
                    subs_inner.unsubscribe(id);
                }
            });
        }
        let second = {
            let second_calls = Rc::clone(&second_calls);
            subs.subscribe(move |_| second_calls.set(second_calls.get() + 1))
        };
        victim.set(Some(second));

        assert_eq!(subs.notify(&()), 1);
        assert_eq!(second_calls.get(), 0);
    }

    #[test]
    fn test_subscribe_during_notify_waits_for_next_pass() {
        let subs: Subscribers<()> = Subscribers::new();
        let added_calls = Rc::new(Cell::new(0));

        {
            let subs_inner = subs.clone();
            let added_calls = Rc::clone(&added_calls);
            subs.subscribe(move |_| {
                let added_calls = Rc::clone(&added_calls);
                subs_inner.subscribe(move |_| added_calls.set(added_calls.get() + 1));
            });
        }

        subs.notify(&());
        assert_eq!(added_calls.get(), 0);
        subs.notify(&());
        assert_eq!(added_calls.get(), 1);
    }
}
