//! End-to-end exercise of `mem`'s tracee-memory reads against a real forked child under
//! `PTRACE_TRACEME`, this time against a genuine address space rather than synthesized register
//! state.
//!
//! Degrades to a skip, not a failure, if the sandbox this test runs in denies `ptrace` (common in
//! unprivileged containers without `CAP_SYS_PTRACE`).

use std::ffi::CString;

use calltrace::decode::escape;
use calltrace::mem;
use nix::sys::ptrace;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{fork, ForkResult};

/// Fork a child that immediately calls `PTRACE_TRACEME` then stops itself with `SIGSTOP`-like
/// behavior via `raise`, so the parent can read its memory while it sits at a known address.
/// Returns `None` if `ptrace` is unavailable in this environment.
fn traced_child_stopped_at_exec() -> Option<nix::unistd::Pid> {
    match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            if ptrace::traceme().is_err() {
                std::process::exit(1);
            }
            let prog = CString::new("/bin/sleep").unwrap();
            let arg = CString::new("5").unwrap();
            let _ = nix::unistd::execv(&prog, &[prog.clone(), arg]);
            std::process::exit(1);
        }
        Ok(ForkResult::Parent { child }) => {
            match waitpid(child, None) {
                Ok(WaitStatus::Stopped(_, _)) => Some(child),
                _ => None,
            }
        }
        Err(_) => None,
    }
}

#[test]
fn reads_a_known_c_string_out_of_the_tracees_argv() {
    let Some(pid) = traced_child_stopped_at_exec() else {
        eprintln!("skipping: fork/ptrace unavailable in this sandbox");
        return;
    };

    // We don't have a stable address for argv without parsing registers/auxv, so this test
    // settles for confirming the read primitives behave against a live address space: reading
    // from address 0 must fail cleanly rather than panicking, which is the property the decoder
    // depends on (`unreadable_pointer` in `decode::mod`).
    let result = mem::read_bytes(pid, 0, 8);
    assert!(result.is_err(), "reading address 0 should fail, not panic");

    let _ = ptrace::kill(pid);
    let _ = waitpid(pid, None);
}

#[test]
fn escape_output_is_always_printable_ascii_regardless_of_source() {
    // Pure-function property already covered in `src/decode/mod.rs`'s unit tests; repeated here
    // against the full public API surface as an integration-level guarantee.
    let bytes: Vec<u8> = (0u16..=255).map(|b| b as u8).collect();
    let escaped = escape(&bytes);
    assert!(escaped.bytes().all(|b| (0x20..=0x7e).contains(&b)));
}
