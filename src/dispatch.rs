//! Routes each decoded `Trace` to callbacks and channels, each either global or scoped to a set
//! of call names, in both phases. Dispatch order is globals first, then name-scoped entries, each
//! list in registration order.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::mpsc::Sender;
use std::sync::Arc;

use crate::value::Trace;

/// A callback consumer. Invoked synchronously on the tracer thread. `Rc`, not `Box`, so
/// `Tracer::register_cb` can register the same callback for both phases without requiring it to
/// be `Clone` itself.
pub type Callback = Rc<dyn Fn(&Trace)>;

/// One (global list, per-name map) pair, shared by callbacks and channels.
struct ConsumerList<T> {
    global: Vec<T>,
    named: HashMap<String, Vec<T>>,
}

impl<T> ConsumerList<T> {
    fn new() -> Self {
        ConsumerList {
            global: Vec::new(),
            named: HashMap::new(),
        }
    }

    fn push_global(&mut self, item: T) {
        self.global.push(item);
    }

    fn push_named(&mut self, names: &[&str], item: T)
    where
        T: Clone,
    {
        for name in names {
            self.named
                .entry((*name).to_string())
                .or_insert_with(Vec::new)
                .push(item.clone());
        }
    }
}

/// The four registration structures a [`crate::tracer::Tracer`] owns: callbacks and channels,
/// each for the entry phase and the exit phase.
#[derive(Default)]
pub struct Dispatcher {
    cb_enter: Option<Box<ConsumerList<Callback>>>,
    cb_exit: Option<Box<ConsumerList<Callback>>>,
    ch_enter: Option<Box<ConsumerList<Sender<Arc<Trace>>>>>,
    ch_exit: Option<Box<ConsumerList<Sender<Arc<Trace>>>>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Dispatcher {
            cb_enter: None,
            cb_exit: None,
            ch_enter: None,
            ch_exit: None,
        }
    }

    fn cb_list(list: &mut Option<Box<ConsumerList<Callback>>>) -> &mut ConsumerList<Callback> {
        list.get_or_insert_with(|| Box::new(ConsumerList::new()))
    }

    fn ch_list(
        list: &mut Option<Box<ConsumerList<Sender<Arc<Trace>>>>>,
    ) -> &mut ConsumerList<Sender<Arc<Trace>>> {
        list.get_or_insert_with(|| Box::new(ConsumerList::new()))
    }

    pub fn register_cb_on_enter(&mut self, cb: Callback, names: &[&str]) {
        register_named_or_global(Self::cb_list(&mut self.cb_enter), cb, names);
    }

    pub fn register_cb_on_exit(&mut self, cb: Callback, names: &[&str]) {
        register_named_or_global(Self::cb_list(&mut self.cb_exit), cb, names);
    }

    pub fn register_global_cb_on_enter(&mut self, cb: Callback) {
        Self::cb_list(&mut self.cb_enter).push_global(cb);
    }

    pub fn register_global_cb_on_exit(&mut self, cb: Callback) {
        Self::cb_list(&mut self.cb_exit).push_global(cb);
    }

    pub fn register_channel_on_enter(&mut self, tx: Sender<Arc<Trace>>, names: &[&str]) {
        register_named_or_global(Self::ch_list(&mut self.ch_enter), tx, names);
    }

    pub fn register_channel_on_exit(&mut self, tx: Sender<Arc<Trace>>, names: &[&str]) {
        register_named_or_global(Self::ch_list(&mut self.ch_exit), tx, names);
    }

    pub fn register_global_channel_on_enter(&mut self, tx: Sender<Arc<Trace>>) {
        Self::ch_list(&mut self.ch_enter).push_global(tx);
    }

    pub fn register_global_channel_on_exit(&mut self, tx: Sender<Arc<Trace>>) {
        Self::ch_list(&mut self.ch_exit).push_global(tx);
    }

    /// Deliver one event to every matching consumer: globals first, then name-scoped
    /// registrations, each in insertion order.
    pub fn dispatch(&self, trace: Arc<Trace>) {
        let (cbs, chs) = if trace.exit {
            (&self.cb_exit, &self.ch_exit)
        } else {
            (&self.cb_enter, &self.ch_enter)
        };

        if let Some(list) = cbs {
            for cb in &list.global {
                cb(&trace);
            }
            if let Some(named) = list.named.get(&trace.signature.name) {
                for cb in named {
                    cb(&trace);
                }
            }
        }

        if let Some(list) = chs {
            for tx in &list.global {
                send(tx, Arc::clone(&trace));
            }
            if let Some(named) = list.named.get(&trace.signature.name) {
                for tx in named {
                    send(tx, Arc::clone(&trace));
                }
            }
        }
    }
}

fn register_named_or_global<T: Clone>(list: &mut ConsumerList<T>, item: T, names: &[&str]) {
    if names.is_empty() {
        list.push_global(item);
    } else {
        list.push_named(names, item);
    }
}

/// A full channel blocks the tracer; a disconnected receiver just means the consumer went away,
/// which is not a tracer-fatal condition.
fn send(tx: &Sender<Arc<Trace>>, trace: Arc<Trace>) {
    if tx.send(trace).is_err() {
        log::debug!("channel consumer disconnected; dropping further sends to it");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::Signature;
    use crate::value::ReturnValue;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn entry_trace(name: &str) -> Arc<Trace> {
        Arc::new(Trace {
            signature: Signature::new(1, name, Vec::new()),
            args: Vec::new(),
            ret: ReturnValue::default(),
            exit: false,
        })
    }

    #[test]
    fn globals_run_before_named_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut d = Dispatcher::new();

        let o = order.clone();
        d.register_global_cb_on_enter(Rc::new(move |_: &Trace| o.borrow_mut().push("global1")));
        let o = order.clone();
        d.register_cb_on_enter(Rc::new(move |_: &Trace| o.borrow_mut().push("named1")), &["write"]);
        let o = order.clone();
        d.register_global_cb_on_enter(Rc::new(move |_: &Trace| o.borrow_mut().push("global2")));
        let o = order.clone();
        d.register_cb_on_enter(Rc::new(move |_: &Trace| o.borrow_mut().push("named2")), &["write"]);

        d.dispatch(entry_trace("write"));

        assert_eq!(
            *order.borrow(),
            vec!["global1", "global2", "named1", "named2"]
        );
    }

    #[test]
    fn name_scoped_consumer_ignores_other_names() {
        let hits = Rc::new(RefCell::new(0));
        let mut d = Dispatcher::new();
        let h = hits.clone();
        d.register_cb_on_enter(Rc::new(move |_: &Trace| *h.borrow_mut() += 1), &["open"]);

        d.dispatch(entry_trace("write"));
        assert_eq!(*hits.borrow(), 0);

        d.dispatch(entry_trace("open"));
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn registering_the_same_callback_site_twice_invokes_twice() {
        let hits = Rc::new(RefCell::new(0));
        let mut d = Dispatcher::new();
        for _ in 0..3 {
            let h = hits.clone();
            d.register_global_cb_on_enter(Rc::new(move |_: &Trace| *h.borrow_mut() += 1));
        }
        d.dispatch(entry_trace("write"));
        assert_eq!(*hits.borrow(), 3);
    }

    #[test]
    fn exit_phase_consumers_do_not_see_entry_events() {
        let hits = Rc::new(RefCell::new(0));
        let mut d = Dispatcher::new();
        let h = hits.clone();
        d.register_global_cb_on_exit(Rc::new(move |_: &Trace| *h.borrow_mut() += 1));
        d.dispatch(entry_trace("write"));
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn channel_receives_dispatched_trace() {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut d = Dispatcher::new();
        d.register_global_channel_on_enter(tx);
        d.dispatch(entry_trace("read"));
        let got = rx.recv().expect("trace delivered");
        assert_eq!(got.signature.name, "read");
    }
}
