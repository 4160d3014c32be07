//! Registry mutation from inside a running broadcast.

use std::{
    cell::Cell,
    rc::{Rc, Weak},
};
use tether::{DelegateError, prelude::*, testing::Recorder};

type Registry = MultiDelegate<fn()>;

fn recording(
    registry: &Registry,
    log: &Recorder<&'static str>,
    name: &'static str,
) -> DelegateKey {
    let log = log.clone();
    registry.add_closure(move || log.record(name))
}

#[test]
fn test_added_during_broadcast_runs_next_time() {
    let registry = Rc::new(Registry::new());
    let log = Recorder::new();

    let weak = Rc::downgrade(&registry);
    let added = Cell::new(false);
    let inner_log = log.clone();
    registry.add_closure(move || {
        inner_log.record("adder");
        if !added.replace(true) {
            if let Some(registry) = weak.upgrade() {
                recording(&registry, &inner_log, "late");
            }
        }
    });
    recording(&registry, &log, "tail");

    registry.broadcast(());
    assert_eq!(log.take(), vec!["adder", "tail"]);
    assert_eq!(registry.len(), 3);

    registry.broadcast(());
    assert_eq!(log.take(), vec!["adder", "tail", "late"]);
}

#[test]
fn test_removed_ahead_is_skipped() {
    let registry = Rc::new(Registry::new());
    let log = Recorder::new();
    let target: Rc<Cell<Option<DelegateKey>>> = Rc::new(Cell::new(None));

    let weak = Rc::downgrade(&registry);
    let victim = Rc::clone(&target);
    let inner_log = log.clone();
    registry.add_closure(move || {
        inner_log.record("remover");
        if let (Some(registry), Some(key)) = (weak.upgrade(), victim.get()) {
            registry.remove(key);
        }
    });
    target.set(Some(recording(&registry, &log, "victim")));
    recording(&registry, &log, "survivor");

    assert_eq!(registry.try_broadcast(()), Ok(2));
    assert_eq!(log.take(), vec!["remover", "survivor"]);
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_removed_behind_is_unaffected() {
    let registry = Rc::new(Registry::new());
    let log = Recorder::new();

    let first = recording(&registry, &log, "first");
    let weak = Rc::downgrade(&registry);
    let inner_log = log.clone();
    registry.add_closure(move || {
        inner_log.record("remover");
        if let Some(registry) = weak.upgrade() {
            registry.remove(first);
        }
    });

    registry.broadcast(());
    assert_eq!(log.take(), vec!["first", "remover"]);
    assert!(!registry.is_bound(first));
}

#[test]
fn test_self_removal() {
    let registry = Rc::new(Registry::new());
    let log = Recorder::new();
    let own_key: Rc<Cell<Option<DelegateKey>>> = Rc::new(Cell::new(None));

    let weak = Rc::downgrade(&registry);
    let key = Rc::clone(&own_key);
    let inner_log = log.clone();
    own_key.set(Some(registry.add_closure(move || {
        inner_log.record("once");
        if let (Some(registry), Some(key)) = (weak.upgrade(), key.get()) {
            registry.remove(key);
        }
    })));
    recording(&registry, &log, "always");

    registry.broadcast(());
    registry.broadcast(());
    assert_eq!(log.take(), vec!["once", "always", "always"]);
}

#[test]
fn test_clear_during_broadcast_skips_the_rest() {
    let registry = Rc::new(Registry::new());
    let log = Recorder::new();

    recording(&registry, &log, "before");
    let weak = Rc::downgrade(&registry);
    registry.add_closure(move || {
        if let Some(registry) = weak.upgrade() {
            registry.clear();
        }
    });
    recording(&registry, &log, "after");

    assert_eq!(registry.try_broadcast(()), Ok(2));
    assert_eq!(log.take(), vec!["before"]);
    assert!(!registry.has_any_listeners());
}

#[test]
fn test_nested_broadcast_skips_running_entry() {
    let registry = Rc::new(Registry::new());
    let log = Recorder::new();

    let weak = Rc::downgrade(&registry);
    let inner_log = log.clone();
    registry.add_closure(move || {
        inner_log.record("outer");
        if let Some(registry) = weak.upgrade() {
            registry.broadcast(());
        }
    });
    recording(&registry, &log, "b");
    recording(&registry, &log, "c");

    registry.broadcast(());
    assert_eq!(log.take(), vec!["outer", "b", "c", "b", "c"]);
}

#[test]
fn test_nested_collect_fails_instead_of_shrinking() {
    let registry: Rc<MultiDelegate<fn() -> u8>> = Rc::new(MultiDelegate::new());
    let nested = Rc::new(Cell::new(None));

    let weak = Rc::downgrade(&registry);
    let seen = Rc::clone(&nested);
    let outer = registry.add_closure(move || {
        if let Some(registry) = weak.upgrade() {
            seen.set(registry.try_broadcast_collect(()).err());
        }
        1u8
    });
    registry.add_closure(|| 2u8);

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.broadcast_collect(()), vec![1, 2]);
    assert_eq!(nested.get(), Some(DelegateError::Reentered { key: outer }));
}

#[test]
#[should_panic(expected = "cannot be re-entered")]
fn test_nested_broadcast_collect_panics() {
    let registry: Rc<MultiDelegate<fn() -> u8>> = Rc::new(MultiDelegate::new());
    let weak = Rc::downgrade(&registry);
    registry.add_closure(move || {
        weak.upgrade()
            .map_or(0, |registry| registry.broadcast_collect(()).len() as u8)
    });
    registry.broadcast(());
}

#[test]
fn test_collect_counts_only_invoked_entries() {
    let registry: Rc<MultiDelegate<fn() -> u8>> = Rc::new(MultiDelegate::new());
    let target: Rc<Cell<Option<DelegateKey>>> = Rc::new(Cell::new(None));

    let weak: Weak<MultiDelegate<fn() -> u8>> = Rc::downgrade(&registry);
    let victim = Rc::clone(&target);
    registry.add_closure(move || {
        if let (Some(registry), Some(key)) = (weak.upgrade(), victim.get()) {
            registry.remove(key);
        }
        1u8
    });
    target.set(Some(registry.add_closure(|| 2u8)));
    registry.add_closure(|| 3u8);

    assert_eq!(registry.broadcast_collect(()), vec![1, 3]);
}

/// Reads the registry length when dropped.
struct LenOnDrop {
    registry: Weak<Registry>,
    seen: Rc<Cell<Option<usize>>>,
}

impl Drop for LenOnDrop {
    fn drop(&mut self) {
        self.seen.set(self.registry.upgrade().map(|registry| registry.len()));
    }
}

#[test]
fn test_removed_entry_dropped_outside_registry_borrow() {
    let registry = Rc::new(Registry::new());
    let seen = Rc::new(Cell::new(None));

    let probe = LenOnDrop {
        registry: Rc::downgrade(&registry),
        seen: Rc::clone(&seen),
    };
    let key = registry.add_closure(move || {
        let _ = &probe;
    });
    recording(&registry, &Recorder::new(), "other");

    assert!(registry.remove(key));
    assert_eq!(seen.get(), Some(1));
}
