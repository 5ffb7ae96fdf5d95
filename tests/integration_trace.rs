//! Full end-to-end exercise of `Tracer::run` against a real child process: every observed call
//! produces exactly one entry followed by one matching exit event.
//!
//! Degrades to a skip if the sandbox denies `ptrace`.

use std::process::Command;
use std::sync::mpsc::channel;
use std::sync::Arc;

use calltrace::tracer::{CommandChild, Tracer};
use calltrace::Trace;

#[test]
fn tracing_true_produces_paired_entry_exit_events() {
    let mut tracer = Tracer::new(CommandChild::new(Command::new("/bin/true")));

    let (tx, rx) = channel();
    tracer.register_global_channel(tx);

    match tracer.run() {
        Ok(()) => {}
        Err(e) => {
            eprintln!("skipping: ptrace unavailable in this sandbox ({})", e);
            return;
        }
    }

    let events: Vec<Arc<Trace>> = rx.try_iter().collect();
    if events.is_empty() {
        // A maximally locked-down sandbox may deliver no syscall stops at all even though
        // `run()` itself reported success; nothing further to assert.
        return;
    }

    // Pairing: every entry (name, exit=false) has a matching immediately-following exit with the
    // same name.
    let mut i = 0;
    while i < events.len() {
        assert!(!events[i].exit, "expected an entry event at index {}", i);
        if i + 1 < events.len() {
            assert_eq!(events[i].signature.name, events[i + 1].signature.name);
            assert!(events[i + 1].exit);
            i += 2;
        } else {
            // Tracee exited mid-call: the trailing entry with no paired exit is allowed.
            i += 1;
        }
    }
}

#[test]
fn tracee_that_exits_immediately_yields_zero_events() {
    // Points at a program guaranteed to fail fast, to exercise the "exits before any call"
    // boundary; the pre_exec hook still installs `PTRACE_TRACEME` before the exec attempt fails.
    let mut tracer = Tracer::new(CommandChild::new(Command::new(
        "/nonexistent/definitely-not-a-real-binary",
    )));
    match tracer.run() {
        Ok(()) => {}
        Err(_) => {
            // Either outcome is acceptable here depending on sandbox behavior around the failed
            // exec; the point of this test is that `run` does not hang or panic.
        }
    }
}
