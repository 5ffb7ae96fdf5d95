//! Typed, `ptrace`-based system-call tracing for a single child process.
//!
//! Attach [`Tracer`] to a freshly spawned child, register callbacks and/or channels for the
//! calls you care about, and call [`Tracer::run`]. Each intercepted system call produces an
//! entry [`Trace`] and, once the kernel returns control, a matching exit `Trace` carrying
//! decoded arguments and the return code.

pub mod decode;
pub mod dispatch;
pub mod errno;
pub mod error;
pub mod kernel_abi;
pub mod mem;
pub mod signature;
pub mod syscalls;
pub mod tracer;
pub mod value;

pub use dispatch::{Callback, Dispatcher};
pub use error::TracerError;
pub use signature::{ArgKind, ArgSpec, Signature};
pub use tracer::{ChildCommand, CommandChild, Tracer};
pub use value::{ArgData, ArgValue, ReturnValue, Trace};
