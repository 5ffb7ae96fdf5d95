//! The per-architecture binding: the only surface that changes per target. Kept as one narrow
//! trait rather than `#[cfg(...)]` sprinkled through the decoder, in the spirit of `rd`'s
//! `SupportedArch`/`registers.rs` split between an arch tag and arch-specific register layouts.

pub mod x64;
pub mod x86;

use crate::value::ArgValue;

/// Architectures this crate knows how to decode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SupportedArch {
    X86,
    X64,
}

/// Outcome of consulting a custom, per-call decoder before falling back to the default argument
/// decoder.
pub enum CustomDecode {
    /// The custom decoder fully populated the argument vector; skip the default decoder.
    Handled(Vec<ArgValue>),
    /// This call isn't special; run the default decoder.
    FallThrough,
}

/// The four operations the core needs from an architecture.
pub trait ArchBinding {
    /// The concrete register snapshot type this binding reads from.
    type Regs;

    /// Which architecture this binding implements.
    fn arch(&self) -> SupportedArch;

    /// The `i`-th parameter register (`i` in `0..6`), as a host-word-sized integer.
    fn param(&self, regs: &Self::Regs, i: usize) -> u64;

    /// The return-value register, sign-interpreted.
    fn return_code(&self, regs: &Self::Regs) -> i64;

    /// Resolve the syscall id from a register snapshot, and the number of leading "arguments"
    /// that resolution itself already consumed (the socketcall/ipc multiplexing skip count on
    /// x86-32; always 0 on x86-64).
    fn syscall_id(&self, regs: &Self::Regs) -> (u64, usize);

    /// Consult the per-call custom decoder, if this call has one.
    fn custom_decode(
        &self,
        id: u64,
        regs: &Self::Regs,
        max_string_size: usize,
        pid: nix::unistd::Pid,
    ) -> CustomDecode;
}
