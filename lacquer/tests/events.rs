//! Event broadcast: fan-out, registry mutation, receiver substitution, and
//! the explicit handler table.

mod common;

use common::{by, session, widget, FIND, READ, REFRESH, SESSION, WIDGET};
use lacquer::events::{CallbackObserver, CallEvent};
use lacquer::prelude::*;
use lacquer::testing::{FakeResource, RecordingObserver};
use std::sync::{Arc, Mutex};

fn broadcasting(original: Arc<FakeResource>) -> (Handle, ObserverSet) {
    let observers = ObserverSet::new();
    let handle = Decorator::new()
        .intercept(&[&SESSION, &WIDGET])
        .layer(EventBroadcast::new(observers.clone()))
        .activate(original);
    (handle, observers)
}

#[test]
fn test_fan_out_after_unregister() {
    let original = session();
    original.stub(&REFRESH, Value::Unit);
    let (handle, observers) = broadcasting(original);

    let kept = RecordingObserver::new();
    let removed = RecordingObserver::new();
    observers.register(kept.clone());
    observers.register(removed.clone());
    observers.unregister(&(removed.clone() as Arc<dyn Observer>));

    handle.invoke(&REFRESH, &[]).expect("refresh");

    // Exactly the remaining observer fired, once before and once after.
    assert_eq!(kept.journal(), vec!["before session.refresh", "after session.refresh"]);
    assert_eq!(removed.count(), 0);
}

#[test]
fn test_clear_all_silences_subsequent_calls() {
    let original = session();
    original.stub(&REFRESH, Value::Unit);
    let (handle, observers) = broadcasting(original);

    let observer = RecordingObserver::new();
    observers.register(observer.clone());

    handle.invoke(&REFRESH, &[]).expect("refresh");
    assert_eq!(observer.count(), 2);

    observers.clear_all();
    handle.invoke(&REFRESH, &[]).expect("refresh");
    assert_eq!(observer.count(), 2);
}

#[test]
fn test_errors_bypass_the_broadcast_layer() {
    let original = session();
    original.enqueue(&REFRESH, Err(CallError::other("down")));
    let (handle, observers) = broadcasting(original);

    let observer = RecordingObserver::new();
    observers.register(observer.clone());

    handle.invoke(&REFRESH, &[]).unwrap_err();

    // The before event fired; no after event for a failing call.
    assert_eq!(observer.journal(), vec!["before session.refresh"]);
}

#[test]
fn test_observers_see_the_original_receiver() {
    struct ReceiverCheck {
        expected: Handle,
        matched: Arc<Mutex<Option<bool>>>,
    }

    impl Observer for ReceiverCheck {
        fn before_call(&self, event: &CallEvent<'_>) {
            *self.matched.lock().unwrap() = Some(Arc::ptr_eq(event.target(), &self.expected));
        }
    }

    let original = session();
    original.stub(&REFRESH, Value::Unit);
    let expected: Handle = original.clone();
    let (handle, observers) = broadcasting(original);

    let matched = Arc::new(Mutex::new(None));
    observers.register(Arc::new(ReceiverCheck {
        expected,
        matched: matched.clone(),
    }));

    handle.invoke(&REFRESH, &[]).expect("refresh");
    assert_eq!(*matched.lock().unwrap(), Some(true));
}

#[test]
fn test_after_event_result_parameter() {
    struct ResultCheck {
        seen: Arc<Mutex<Vec<Option<Value>>>>,
    }

    impl Observer for ResultCheck {
        fn after_call(&self, _event: &CallEvent<'_>, result: Option<&Value>) {
            self.seen.lock().unwrap().push(result.cloned());
        }
    }

    let original = session();
    let button = widget("button");
    original.stub(&REFRESH, Value::Unit);
    original.stub(&FIND, Value::Resource(button.clone()));
    let (handle, observers) = broadcasting(original);

    let seen = Arc::new(Mutex::new(Vec::new()));
    observers.register(Arc::new(ResultCheck { seen: seen.clone() }));

    handle.invoke(&REFRESH, &[]).expect("refresh");
    handle.invoke(&FIND, &by("#save")).expect("locate");

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 2);
    // Unit results are not passed; interesting results are, unwrapped.
    assert!(seen[0].is_none());
    let button_handle: Handle = button;
    match &seen[1] {
        Some(Value::Resource(found)) => assert!(Arc::ptr_eq(found, &button_handle)),
        other => panic!("expected the located resource, got {other:?}"),
    }
}

#[test]
fn test_callback_observer_table() {
    let original = session();
    let button = widget("button");
    original.stub(&FIND, Value::Resource(button.clone()));
    original.stub(&REFRESH, Value::Unit);
    button.stub(&READ, Value::from("Save"));
    let (handle, observers) = broadcasting(original);

    let finds = Arc::new(Mutex::new(0usize));
    let reads = Arc::new(Mutex::new(0usize));
    let observer = {
        let finds = finds.clone();
        let reads = reads.clone();
        CallbackObserver::new()
            .on_before(&FIND, move |event| {
                assert_eq!(event.args(), by("#save"));
                *finds.lock().unwrap() += 1;
            })
            .on_after(&READ, move |_event, result| {
                assert_eq!(result, Some(&Value::from("Save")));
                *reads.lock().unwrap() += 1;
            })
    };
    observers.register(Arc::new(observer));

    let found = handle
        .invoke(&FIND, &by("#save"))
        .expect("locate")
        .into_resource()
        .expect("a sub-resource");
    found.invoke(&READ, &[]).expect("read");
    // A method without a handler is a no-op, not an error.
    handle.invoke(&REFRESH, &[]).expect("refresh");

    assert_eq!(*finds.lock().unwrap(), 1);
    assert_eq!(*reads.lock().unwrap(), 1);
}
