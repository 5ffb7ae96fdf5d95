//! The tracer loop and the host-supplied child-spawning contract.
//!
//! `Tracer::run` is a plain blocking call pinned to the calling OS thread for its whole duration:
//! the kernel associates a ptrace attachment with the specific task that issued
//! `PTRACE_TRACEME`/`PTRACE_SYSCALL`, so the caller must not move this future/call across OS
//! threads while it runs.

use std::io;
use std::os::unix::process::CommandExt;
use std::process::{Child, Command};
use std::sync::mpsc::Sender;
use std::sync::Arc;

use nix::sys::ptrace;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::Pid;

use crate::decode;
use crate::dispatch::{Callback, Dispatcher};
use crate::error::TracerError;
use crate::kernel_abi::x64::X64Binding;
use crate::kernel_abi::ArchBinding;
use crate::syscalls;
use crate::value::{ReturnValue, Trace};

const DEFAULT_MAX_STRING_SIZE: usize = 32;
const DEFAULT_MAX_BUFFER_SIZE: usize = 32;

/// The only contract the tracer has with whatever spawns the tracee: request traced execution,
/// start the process, and hand back its pid.
pub trait ChildCommand {
    /// Start the child so that its very first instruction is already under trace (a
    /// `PTRACE_TRACEME`-calling `pre_exec` hook, for a Unix process-based implementation).
    fn start(&mut self) -> io::Result<()>;

    /// The tracee's OS process id. Only meaningful after `start` returns `Ok`.
    fn pid(&self) -> Pid;
}

/// Reference `ChildCommand` built on `std::process::Command`.
pub struct CommandChild {
    command: Command,
    child: Option<Child>,
}

impl CommandChild {
    pub fn new(command: Command) -> Self {
        CommandChild { command, child: None }
    }
}

impl ChildCommand for CommandChild {
    fn start(&mut self) -> io::Result<()> {
        // SAFETY: the closure only calls ptrace(2), an async-signal-safe libc call, between fork
        // and exec, as `pre_exec`'s contract requires.
        unsafe {
            self.command.pre_exec(|| {
                ptrace::traceme().map_err(|e| io::Error::from_raw_os_error(e as i32))
            });
        }
        self.child = Some(self.command.spawn()?);
        Ok(())
    }

    fn pid(&self) -> Pid {
        let child = self.child.as_ref().expect("start() must succeed before pid()");
        Pid::from_raw(child.id() as i32)
    }
}

/// Drives one tracee through its lifetime and routes decoded events to registered consumers.
/// Hardwired to the x86-64 binding — the only one this crate drives against a live tracee.
pub struct Tracer<C: ChildCommand> {
    cmd: C,
    binding: X64Binding,
    dispatcher: Dispatcher,
    max_string_size: usize,
    max_buffer_size: usize,
}

impl<C: ChildCommand> Tracer<C> {
    pub fn new(cmd: C) -> Self {
        Tracer {
            cmd,
            binding: X64Binding,
            dispatcher: Dispatcher::new(),
            max_string_size: DEFAULT_MAX_STRING_SIZE,
            max_buffer_size: DEFAULT_MAX_BUFFER_SIZE,
        }
    }

    pub fn set_max_string_size(&mut self, n: usize) {
        self.max_string_size = n;
    }

    pub fn set_max_buffer_size(&mut self, n: usize) {
        self.max_buffer_size = n;
    }

    pub fn register_cb_on_enter(&mut self, cb: Callback, names: &[&str]) {
        self.dispatcher.register_cb_on_enter(cb, names);
    }

    pub fn register_cb_on_exit(&mut self, cb: Callback, names: &[&str]) {
        self.dispatcher.register_cb_on_exit(cb, names);
    }

    /// Registers the same callback for both the entry and the exit phase.
    pub fn register_cb(&mut self, cb: Callback, names: &[&str]) {
        self.register_cb_on_enter(cb.clone(), names);
        self.register_cb_on_exit(cb, names);
    }

    pub fn register_global_cb_on_enter(&mut self, cb: Callback) {
        self.dispatcher.register_global_cb_on_enter(cb);
    }

    pub fn register_global_cb_on_exit(&mut self, cb: Callback) {
        self.dispatcher.register_global_cb_on_exit(cb);
    }

    pub fn register_global_cb(&mut self, cb: Callback) {
        self.register_global_cb_on_enter(cb.clone());
        self.register_global_cb_on_exit(cb);
    }

    pub fn register_channel_on_enter(&mut self, tx: Sender<Arc<Trace>>, names: &[&str]) {
        self.dispatcher.register_channel_on_enter(tx, names);
    }

    pub fn register_channel_on_exit(&mut self, tx: Sender<Arc<Trace>>, names: &[&str]) {
        self.dispatcher.register_channel_on_exit(tx, names);
    }

    pub fn register_channel(&mut self, tx: Sender<Arc<Trace>>, names: &[&str]) {
        self.register_channel_on_enter(tx.clone(), names);
        self.register_channel_on_exit(tx, names);
    }

    pub fn register_global_channel_on_enter(&mut self, tx: Sender<Arc<Trace>>) {
        self.dispatcher.register_global_channel_on_enter(tx);
    }

    pub fn register_global_channel_on_exit(&mut self, tx: Sender<Arc<Trace>>) {
        self.dispatcher.register_global_channel_on_exit(tx);
    }

    pub fn register_global_channel(&mut self, tx: Sender<Arc<Trace>>) {
        self.register_global_channel_on_enter(tx.clone());
        self.register_global_channel_on_exit(tx);
    }

    /// Drive the tracee from launch to exit. Must be called on, and must not be migrated off,
    /// the OS thread that owns it for the whole call.
    ///
    /// If the tracee exits mid-call, the in-flight entry event has no matching exit: consumers
    /// must not assume every entry is always followed by an exit.
    pub fn run(&mut self) -> Result<(), TracerError> {
        self.cmd.start().map_err(TracerError::Spawn)?;
        let pid = self.cmd.pid();

        log::debug!("tracee {} started, waiting for initial trace stop", pid);
        match waitpid(pid, None).map_err(TracerError::Wait)? {
            WaitStatus::Exited(_, _) => {
                log::info!("tracee {} exited before reaching the initial trace stop", pid);
                return Ok(());
            }
            WaitStatus::Stopped(_, _) => {}
            other => return Err(unexpected(other)),
        }

        ptrace::setoptions(pid, ptrace::Options::PTRACE_O_TRACESYSGOOD)?;

        loop {
            if self.wait_for_syscall_stop(pid)? {
                log::debug!("tracee {} exited", pid);
                return Ok(());
            }

            let entry_regs = ptrace::getregs(pid)?;
            let (id, skip) = self.binding.syscall_id(&entry_regs);
            let signature = syscalls::resolve_x64(id);
            log::trace!("tracee {} entering {} (id {})", pid, signature.name, id);
            self.dispatcher.dispatch(Arc::new(Trace::entry(Arc::clone(&signature))));

            if self.wait_for_syscall_stop(pid)? {
                // Tracee exited mid-call: no exit event is synthesized for the call in progress.
                log::debug!("tracee {} exited mid-call in {}", pid, signature.name);
                return Ok(());
            }

            let exit_regs = ptrace::getregs(pid)?;
            let ret_code = self.binding.return_code(&exit_regs);
            let description = signature
                .return_describer
                .and_then(|describe| describe(ret_code))
                .or_else(|| crate::errno::describe_return_code(ret_code));
            let args = decode::decode_args(
                &self.binding,
                &signature,
                &exit_regs,
                pid,
                skip,
                self.max_string_size,
                self.max_buffer_size,
            );
            log::trace!("tracee {} exiting {} = {}", pid, signature.name, ret_code);
            self.dispatcher.dispatch(Arc::new(Trace::exit(
                signature,
                args,
                ReturnValue { code: ret_code, description },
            )));
        }
    }

    /// Resume the tracee until the next syscall-entry or syscall-exit stop, skipping over
    /// unrelated signal-delivery stops transparently. Returns `Ok(true)` if the tracee exited
    /// instead.
    fn wait_for_syscall_stop(&self, pid: Pid) -> Result<bool, TracerError> {
        loop {
            ptrace::syscall(pid, None)?;
            match waitpid(pid, None).map_err(TracerError::Wait)? {
                WaitStatus::Exited(_, _) => return Ok(true),
                WaitStatus::Signaled(_, _, _) => return Ok(true),
                WaitStatus::PtraceSyscall(_) => return Ok(false),
                WaitStatus::Stopped(_, _) => continue,
                other => return Err(unexpected(other)),
            }
        }
    }
}

fn unexpected(status: WaitStatus) -> TracerError {
    TracerError::UnexpectedWaitStatus(format!("{:?}", status))
}
