//! Receiver lifetime and borrowing.

use std::rc::Rc;
use tether::{DelegateError, prelude::*};

mod common;
use common::{NumberSource, Printer};

#[test]
fn test_binding_does_not_keep_receiver_alive() {
    let printer = Printer::shared();
    let mut delegate: Delegate<fn(i32)> = Delegate::new();
    let registry: MultiDelegate<fn(i32)> = MultiDelegate::new();

    delegate.bind_method(&printer, Printer::print_int);
    registry.add_method(&printer, Printer::print_int);

    assert_eq!(Rc::strong_count(&printer), 1);
    assert_eq!(Rc::weak_count(&printer), 2);
}

#[test]
fn test_try_execute_reports_dropped_receiver() {
    let printer = Printer::shared();
    let mut delegate: Delegate<fn(i32)> = Delegate::new();
    delegate.bind_method(&printer, Printer::print_int);
    drop(printer);

    assert!(delegate.is_bound());
    let err = delegate.try_execute((1,)).unwrap_err();
    assert!(matches!(err, DelegateError::ReceiverDropped { .. }));
    assert!(err.is_receiver_error());
    assert!(err.to_string().contains("Printer"));
}

#[test]
#[should_panic(expected = "was dropped while still bound")]
fn test_execute_panics_on_dropped_receiver() {
    let source = NumberSource::shared(1.0);
    let mut delegate: Delegate<fn() -> f32> = Delegate::new();
    delegate.bind_method(&source, NumberSource::return_my_number);
    drop(source);
    delegate.execute(());
}

#[test]
#[should_panic(expected = "cannot broadcast delegate")]
fn test_broadcast_panics_on_dropped_receiver() {
    let registry: MultiDelegate<fn(i32)> = MultiDelegate::new();
    {
        let printer = Printer::shared();
        registry.add_method(&printer, Printer::print_int);
    }
    registry.broadcast((1,));
}

#[test]
fn test_try_broadcast_stops_at_dropped_receiver() {
    let survivor = NumberSource::shared(1.0);
    let registry: MultiDelegate<fn() -> f32> = MultiDelegate::new();
    registry.add_method(&survivor, NumberSource::return_my_number);
    {
        let doomed = NumberSource::shared(2.0);
        registry.add_method(&doomed, NumberSource::return_my_number);
    }
    registry.add_closure(|| 3.0f32);

    assert!(matches!(
        registry.try_broadcast_collect(()),
        Err(DelegateError::ReceiverDropped { .. })
    ));

    assert_eq!(registry.retain_live(), 1);
    assert_eq!(registry.broadcast_collect(()), vec![1.0, 3.0]);
    assert_eq!(registry.retain_live(), 0);
}

#[test]
fn test_exclusive_method_reports_busy_receiver() {
    let printer = Printer::shared();
    let mut delegate: Delegate<fn(i32)> = Delegate::new();
    delegate.bind_method(&printer, Printer::print_int);

    let held = printer.borrow();
    assert!(matches!(
        delegate.try_execute((1,)),
        Err(DelegateError::ReceiverBusy { .. })
    ));
    drop(held);

    delegate.execute((2,));
    assert_eq!(printer.borrow().printed, vec![2]);
}

#[test]
fn test_shared_method_coexists_with_shared_borrow() {
    let source = NumberSource::shared(4.0);
    let mut delegate: Delegate<fn() -> f32> = Delegate::new();
    delegate.bind_method(&source, NumberSource::return_my_number);

    let held = source.borrow();
    assert_eq!(delegate.try_execute(()), Ok(4.0));
    drop(held);

    let held = source.borrow_mut();
    assert!(matches!(
        delegate.try_execute(()),
        Err(DelegateError::ReceiverBusy { .. })
    ));
    drop(held);
}

#[test]
fn test_unbind_before_dropping_receiver() {
    let printer = Printer::shared();
    let registry: MultiDelegate<fn(i32)> = MultiDelegate::new();
    let key = registry.add_method(&printer, Printer::print_int);
    registry.add_closure(|_: i32| {});

    registry.remove(key);
    drop(printer);
    assert_eq!(registry.try_broadcast((3,)), Ok(1));
}
