//! # Multicast Delegate
//!
//! A [`MultiDelegate`] holds an ordered list of callbacks. Each one is tagged
//! with a [`DelegateKey`] when it is added; the key is the only handle for
//! removing it later. Keys come from a per-registry [`KeyAllocator`] and are
//! never reused, so removal is unambiguous even when several entries share a
//! receiver or have no receiver at all.
//!
//! # Reentrancy
//!
//! Every operation takes `&self`, so a callback may add or remove entries on
//! the registry that is currently broadcasting to it. The outcome is fixed:
//!
//! - A broadcast works on a snapshot of the entries taken when it starts.
//! - Entries added during a broadcast run from the next broadcast on.
//! - Entries removed during a broadcast are skipped if not yet reached.
//!   Entries that already ran are unaffected.
//! - A broadcast started from inside a callback skips entries that are still
//!   running. An entry is never re-entered.
//! - A collecting broadcast started from inside a callback fails with
//!   [`DelegateError::Reentered`] instead, so a collected result list always
//!   has one value per listener it was expected to reach.
//!
//! # Example
//!
//! ```rust,ignore
//! let numbers: MultiDelegate<fn() -> f32> = MultiDelegate::new();
//! let one = numbers.add_closure(|| 1.0f32);
//! let two = numbers.add_closure(|| 2.0f32);
//! assert_eq!(numbers.broadcast_collect(()), vec![1.0, 2.0]);
//!
//! numbers.remove(one);
//! assert_eq!(numbers.broadcast_collect(()), vec![2.0]);
//! ```

use crate::entry::Entry;
use std::{
    any::Any,
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};
use tether_core::{
    Callable, Concat, DelegateError, DelegateKey, KeyAllocator, Method, Signature,
};

type CurriedArgs<S, P> = <<S as Signature>::Args as Concat<P>>::Output;

/// One registered callback.
struct Slot<S: Signature> {
    key: DelegateKey,
    /// Set once the slot leaves the registry, so running broadcasts skip it.
    removed: Cell<bool>,
    /// Captured at add time; stays readable while the entry is executing.
    receiver: Option<*const ()>,
    /// Owner of a closure added with [`MultiDelegate::add_closure_owned_by`].
    /// Holding it keeps `receiver` from being reused by another allocation.
    owner: Option<Weak<dyn Any>>,
    entry: RefCell<Entry<S>>,
}

impl<S: Signature> Slot<S> {
    fn is_live(&self) -> bool {
        let owner_live = self
            .owner
            .as_ref()
            .is_none_or(|owner| owner.strong_count() > 0);
        owner_live && self.entry.try_borrow().is_ok_and(|entry| entry.is_live())
    }
}

/// What a dispatch does when it reaches an entry that is still running.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Running {
    Skip,
    Fail,
}

/// An ordered, multi-slot callback registry for signature `S`.
///
/// Entries run in insertion order. Removing an entry never reorders the rest.
pub struct MultiDelegate<S: Signature = fn()> {
    slots: RefCell<Vec<Rc<Slot<S>>>>,
    allocator: KeyAllocator,
}

impl<S: Signature> MultiDelegate<S> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty registry with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: RefCell::new(Vec::with_capacity(capacity)),
            allocator: KeyAllocator::new(),
        }
    }

    /// Returns `true` if at least one entry is registered.
    pub fn has_any_listeners(&self) -> bool {
        !self.slots.borrow().is_empty()
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Returns `true` if no entries are registered.
    pub fn is_empty(&self) -> bool {
        !self.has_any_listeners()
    }

    /// Keys of the registered entries, in insertion order.
    pub fn keys(&self) -> Vec<DelegateKey> {
        self.slots.borrow().iter().map(|slot| slot.key).collect()
    }

    /// Returns `true` if an entry with `key` is currently registered.
    ///
    /// Keys that were removed, or never issued by this registry, never match.
    pub fn is_bound(&self, key: DelegateKey) -> bool {
        self.slots.borrow().iter().any(|slot| slot.key == key)
    }

    /// Returns `true` if any entry is a method bound to exactly `receiver`, or
    /// a closure owned by it.
    pub fn is_bound_to<T>(&self, receiver: &Rc<RefCell<T>>) -> bool {
        let addr = Some(Rc::as_ptr(receiver).cast::<()>());
        self.slots.borrow().iter().any(|slot| slot.receiver == addr)
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Append a prebuilt entry and return its key.
    pub fn add(&self, entry: Entry<S>) -> DelegateKey {
        let receiver = entry.receiver_addr();
        self.insert(entry, receiver, None)
    }

    fn insert(
        &self,
        entry: Entry<S>,
        receiver: Option<*const ()>,
        owner: Option<Weak<dyn Any>>,
    ) -> DelegateKey {
        let key = self.allocator.allocate();
        let slot = Slot {
            key,
            removed: Cell::new(false),
            receiver,
            owner,
            entry: RefCell::new(entry),
        };
        self.slots.borrow_mut().push(Rc::new(slot));
        #[cfg(feature = "tracing")]
        {
            tracing::trace!(%key, listeners = self.len(), "listener added");
        }
        key
    }

    /// Append `method` bound to `receiver`.
    ///
    /// Both `fn(&mut T, ..)` and `fn(&T, ..)` methods are accepted. The
    /// receiver is not kept alive by the registry: remove the entry before
    /// dropping it.
    pub fn add_method<T, M, A>(&self, receiver: &Rc<RefCell<T>>, method: M) -> DelegateKey
    where
        T: 'static,
        A: 'static,
        M: Method<T, S::Args, A, Output = S::Output> + 'static,
    {
        self.add(Entry::method(receiver, method))
    }

    /// Append `method` bound to `receiver` with trailing arguments fixed to `payload`.
    pub fn add_method_with<T, M, A, P>(
        &self,
        receiver: &Rc<RefCell<T>>,
        method: M,
        payload: P,
    ) -> DelegateKey
    where
        T: 'static,
        A: 'static,
        S::Args: Concat<P>,
        P: Clone + 'static,
        M: Method<T, CurriedArgs<S, P>, A, Output = S::Output> + 'static,
    {
        self.add(Entry::method_with(receiver, method, payload))
    }

    /// Append a closure.
    pub fn add_closure<F>(&self, closure: F) -> DelegateKey
    where
        F: Callable<S::Args, Output = S::Output> + 'static,
    {
        self.add(Entry::closure(closure))
    }

    /// Append a closure that belongs to `owner`.
    ///
    /// The closure is matched by [`is_bound_to`](Self::is_bound_to) and
    /// removed by [`remove_bound_to`](Self::remove_bound_to) exactly like a
    /// method bound to `owner`, so an owner can drop all of its callbacks at
    /// once. Like a receiver, the owner is not kept alive; once it is dropped
    /// the closure is pruned by [`retain_live`](Self::retain_live) but still
    /// runs until then.
    pub fn add_closure_owned_by<T, F>(&self, owner: &Rc<RefCell<T>>, closure: F) -> DelegateKey
    where
        T: 'static,
        F: Callable<S::Args, Output = S::Output> + 'static,
    {
        let receiver = Some(Rc::as_ptr(owner).cast::<()>());
        let weak: Weak<dyn Any> = Rc::<RefCell<T>>::downgrade(owner);
        self.insert(Entry::closure(closure), receiver, Some(weak))
    }

    /// Append a closure with trailing arguments fixed to `payload`.
    pub fn add_closure_with<F, P>(&self, closure: F, payload: P) -> DelegateKey
    where
        S::Args: Concat<P>,
        P: Clone + 'static,
        F: Callable<CurriedArgs<S, P>, Output = S::Output> + 'static,
    {
        self.add(Entry::closure_with(closure, payload))
    }

    /// Append a free function.
    pub fn add_function<F>(&self, function: F) -> DelegateKey
    where
        F: Callable<S::Args, Output = S::Output> + Copy + 'static,
    {
        self.add(Entry::function(function))
    }

    /// Append a free function with trailing arguments fixed to `payload`.
    pub fn add_function_with<F, P>(&self, function: F, payload: P) -> DelegateKey
    where
        S::Args: Concat<P>,
        P: Clone + 'static,
        F: Callable<CurriedArgs<S, P>, Output = S::Output> + Copy + 'static,
    {
        self.add(Entry::function_with(function, payload))
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Remove the entry tagged with `key`.
    ///
    /// Returns `false`, and changes nothing, if no such entry is registered.
    pub fn remove(&self, key: DelegateKey) -> bool {
        let slot = {
            let mut slots = self.slots.borrow_mut();
            match slots.iter().position(|slot| slot.key == key) {
                Some(index) => slots.remove(index),
                None => return false,
            }
        };
        slot.removed.set(true);
        #[cfg(feature = "tracing")]
        {
            tracing::trace!(%key, listeners = self.len(), "listener removed");
        }
        // `slot` drops here, outside the registry borrow.
        true
    }

    /// Remove every entry. The key allocator is not reset.
    pub fn clear(&self) {
        let removed = std::mem::take(&mut *self.slots.borrow_mut());
        for slot in &removed {
            slot.removed.set(true);
        }
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(removed = removed.len(), "listeners cleared");
        }
    }

    /// Remove every entry that is a method bound to exactly `receiver`, or a
    /// closure owned by it.
    ///
    /// Returns the number of entries removed.
    pub fn remove_bound_to<T>(&self, receiver: &Rc<RefCell<T>>) -> usize {
        let addr = Some(Rc::as_ptr(receiver).cast::<()>());
        self.remove_where(|slot| slot.receiver == addr)
    }

    /// Remove every entry whose receiver or owner has been dropped.
    ///
    /// Entries that are executing right now are kept. Returns the number of
    /// entries removed.
    pub fn retain_live(&self) -> usize {
        let pruned = self.remove_where(|slot| slot.entry.try_borrow().is_ok() && !slot.is_live());
        #[cfg(feature = "tracing")]
        {
            if pruned > 0 {
                tracing::debug!(pruned, "stale listeners pruned");
            }
        }
        pruned
    }

    fn remove_where(&self, mut predicate: impl FnMut(&Slot<S>) -> bool) -> usize {
        let removed: Vec<Rc<Slot<S>>> = {
            let mut slots = self.slots.borrow_mut();
            let (removed, kept) = std::mem::take(&mut *slots)
                .into_iter()
                .partition(|slot| predicate(&**slot));
            *slots = kept;
            removed
        };
        for slot in &removed {
            slot.removed.set(true);
        }
        removed.len()
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Invoke every entry in insertion order, discarding results.
    ///
    /// # Panics
    ///
    /// Panics if an entry's receiver was dropped or is already borrowed.
    /// Entries after the failing one are not invoked. Use
    /// [`try_broadcast`](Self::try_broadcast) for a checked variant.
    #[track_caller]
    pub fn broadcast(&self, args: S::Args)
    where
        S::Args: Clone,
    {
        if let Err(err) = self.try_broadcast(args) {
            panic!("cannot broadcast delegate: {err}");
        }
    }

    /// Invoke every entry in insertion order and collect the results.
    ///
    /// Returns one result per invoked entry, in insertion order. Unless a
    /// callback removes entries during the call, that is one result per entry
    /// registered when the call started.
    ///
    /// # Panics
    ///
    /// Same conditions as [`broadcast`](Self::broadcast), and also when called
    /// from inside one of this registry's own callbacks
    /// ([`DelegateError::Reentered`]).
    #[track_caller]
    pub fn broadcast_collect(&self, args: S::Args) -> Vec<S::Output>
    where
        S::Args: Clone,
    {
        match self.try_broadcast_collect(args) {
            Ok(results) => results,
            Err(err) => panic!("cannot broadcast delegate: {err}"),
        }
    }

    /// Invoke every entry in insertion order, stopping at the first failure.
    ///
    /// Returns the number of entries invoked.
    pub fn try_broadcast(&self, args: S::Args) -> Result<usize, DelegateError>
    where
        S::Args: Clone,
    {
        self.dispatch(args, Running::Skip, |_| {})
    }

    /// Invoke every entry in insertion order and collect the results,
    /// stopping at the first failure.
    ///
    /// Fails with [`DelegateError::Reentered`] when it reaches an entry that
    /// is still running, rather than returning a shorter list.
    pub fn try_broadcast_collect(&self, args: S::Args) -> Result<Vec<S::Output>, DelegateError>
    where
        S::Args: Clone,
    {
        let mut results = Vec::with_capacity(self.len());
        self.dispatch(args, Running::Fail, |output| results.push(output))?;
        Ok(results)
    }

    fn dispatch(
        &self,
        args: S::Args,
        running: Running,
        mut sink: impl FnMut(S::Output),
    ) -> Result<usize, DelegateError>
    where
        S::Args: Clone,
    {
        // Snapshot: the registry borrow is released before any callback runs.
        let snapshot: Vec<Rc<Slot<S>>> = self.slots.borrow().clone();
        #[cfg(feature = "tracing")]
        {
            tracing::trace!(listeners = snapshot.len(), "broadcast started");
        }

        let mut invoked = 0;
        for slot in &snapshot {
            if slot.removed.get() {
                #[cfg(feature = "tracing")]
                {
                    tracing::trace!(key = %slot.key, "skipping listener removed mid-broadcast");
                }
                continue;
            }
            let Ok(mut entry) = slot.entry.try_borrow_mut() else {
                if running == Running::Fail {
                    #[cfg(feature = "tracing")]
                    {
                        tracing::warn!(
                            key = %slot.key,
                            "collecting broadcast re-entered a running listener"
                        );
                    }
                    return Err(DelegateError::Reentered { key: slot.key });
                }
                #[cfg(feature = "tracing")]
                {
                    tracing::trace!(key = %slot.key, "skipping listener that is still running");
                }
                continue;
            };
            let output = match entry.execute(args.clone()) {
                Ok(output) => output,
                Err(err) => {
                    #[cfg(feature = "tracing")]
                    {
                        tracing::warn!(key = %slot.key, error = %err, "listener failed");
                    }
                    return Err(err);
                }
            };
            drop(entry);
            sink(output);
            invoked += 1;
        }

        #[cfg(feature = "tracing")]
        {
            tracing::trace!(invoked, "broadcast finished");
        }
        Ok(invoked)
    }
}

impl<S: Signature> Default for MultiDelegate<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Signature> fmt::Debug for MultiDelegate<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiDelegate")
            .field("keys", &self.keys())
            .field("issued", &self.allocator.issued())
            .finish()
    }
}
