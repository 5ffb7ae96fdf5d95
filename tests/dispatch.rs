//! Integration coverage of the dispatch entry/exit round-trip, exercised purely through the
//! crate's public API (no live tracee needed).

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use calltrace::dispatch::Dispatcher;
use calltrace::signature::Signature;
use calltrace::value::{ReturnValue, Trace};

fn entry(name: &str) -> Arc<Trace> {
    Arc::new(Trace::entry(Signature::new(1, name, Vec::new())))
}

fn exit(name: &str) -> Arc<Trace> {
    Arc::new(Trace::exit(
        Signature::new(1, name, Vec::new()),
        Vec::new(),
        ReturnValue::default(),
    ))
}

#[test]
fn register_cb_sees_both_phases_with_identical_scoping() {
    let hits = Rc::new(RefCell::new(Vec::new()));
    let mut d = Dispatcher::new();

    let h = hits.clone();
    let cb: calltrace::Callback = Rc::new(move |t| h.borrow_mut().push((t.signature.name.clone(), t.exit)));
    // This is exactly what `Tracer::register_cb` does internally.
    d.register_cb_on_enter(cb.clone(), &["openat"]);
    d.register_cb_on_exit(cb, &["openat"]);

    d.dispatch(entry("openat"));
    d.dispatch(exit("openat"));
    d.dispatch(entry("write")); // unrelated name, must not fire

    assert_eq!(
        *hits.borrow(),
        vec![("openat".to_string(), false), ("openat".to_string(), true)]
    );
}

#[test]
fn unknown_signature_name_still_routes_by_name() {
    let hits = Rc::new(RefCell::new(0));
    let mut d = Dispatcher::new();
    let h = hits.clone();
    d.register_cb_on_exit(Rc::new(move |_| *h.borrow_mut() += 1), &["*UNKNOWN(9999)*"]);

    let sig = Signature::unknown(9999);
    d.dispatch(Arc::new(Trace::exit(sig, vec![], ReturnValue::default())));
    assert_eq!(*hits.borrow(), 1);
}
