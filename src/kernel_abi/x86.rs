//! x86-32 Linux binding: the reference binding for the socketcall/ipc multiplexing rule.
//! Parameter registers `%ebx, %ecx, %edx, %esi, %edi, %ebp`; return value in `%eax`.
//!
//! This binding is not wired to a live tracee in this crate (the tracer only ever attaches to
//! x86-64 tracees); it operates over [`Registers`], a plain struct unit tests construct directly,
//! so the multiplexing and decode logic it implements is fully exercised without a real 32-bit
//! child process.

use nix::unistd::Pid;

use super::{ArchBinding, CustomDecode, SupportedArch};

/// Bias added to the `socket`/`ipc` subcommand to build the synthetic id.
const SOCKETCALL_BIAS: u64 = 400;
const IPC_BIAS: u64 = 420;

/// `socketcall`'s syscall number on x86-32.
const SYS_SOCKETCALL: u32 = 102;
/// `ipc`'s (System V IPC multiplexer) syscall number on x86-32.
const SYS_IPC: u32 = 117;

/// A 32-bit register snapshot, laid out the way `PTRACE_GETREGS` would fill it for an x86-32
/// tracee.
#[derive(Debug, Default, Copy, Clone)]
pub struct Registers {
    pub ebx: u32,
    pub ecx: u32,
    pub edx: u32,
    pub esi: u32,
    pub edi: u32,
    pub ebp: u32,
    pub eax: i32,
    pub orig_eax: u32,
}

#[derive(Debug, Default, Copy, Clone)]
pub struct X86Binding;

impl ArchBinding for X86Binding {
    type Regs = Registers;

    fn arch(&self) -> SupportedArch {
        SupportedArch::X86
    }

    fn param(&self, regs: &Self::Regs, i: usize) -> u64 {
        let narrow = match i {
            0 => regs.ebx,
            1 => regs.ecx,
            2 => regs.edx,
            3 => regs.esi,
            4 => regs.edi,
            5 => regs.ebp,
            _ => panic!("x86-32 syscalls take at most 6 parameter registers, got index {}", i),
        };
        // 32-bit architectures zero-extend the register to the decoder's word type.
        narrow as u64
    }

    fn return_code(&self, regs: &Self::Regs) -> i64 {
        regs.eax as i64
    }

    fn syscall_id(&self, regs: &Self::Regs) -> (u64, usize) {
        match regs.orig_eax {
            n if n == SYS_SOCKETCALL => (SOCKETCALL_BIAS + regs.ebx as u64, 1),
            n if n == SYS_IPC => (IPC_BIAS + regs.ebx as u64, 1),
            n => (n as u64, 0),
        }
    }

    /// No x86-32 call in this crate's table needs a custom decoder; always falls through.
    fn custom_decode(
        &self,
        _id: u64,
        _regs: &Self::Regs,
        _max_string_size: usize,
        _pid: Pid,
    ) -> CustomDecode {
        CustomDecode::FallThrough
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_maps_to_the_documented_registers() {
        let binding = X86Binding;
        let regs = Registers {
            ebx: 1,
            ecx: 2,
            edx: 3,
            esi: 4,
            edi: 5,
            ebp: 6,
            ..Default::default()
        };
        for (i, expected) in (0..6).zip(1..=6u64) {
            assert_eq!(binding.param(&regs, i), expected);
        }
    }

    #[test]
    fn socketcall_is_remapped_with_skip_one() {
        let binding = X86Binding;
        let regs = Registers {
            orig_eax: SYS_SOCKETCALL,
            ebx: 1, // SYS_SOCKET
            ..Default::default()
        };
        assert_eq!(binding.syscall_id(&regs), (401, 1));
    }

    #[test]
    fn ipc_is_remapped_with_skip_one() {
        let binding = X86Binding;
        let regs = Registers {
            orig_eax: SYS_IPC,
            ebx: 2,
            ..Default::default()
        };
        assert_eq!(binding.syscall_id(&regs), (422, 1));
    }

    #[test]
    fn ordinary_calls_are_not_remapped() {
        let binding = X86Binding;
        let regs = Registers {
            orig_eax: 5, // open
            ..Default::default()
        };
        assert_eq!(binding.syscall_id(&regs), (5, 0));
    }

    #[test]
    fn negative_return_code_is_sign_extended() {
        let binding = X86Binding;
        let regs = Registers {
            eax: -2, // -ENOENT
            ..Default::default()
        };
        assert_eq!(binding.return_code(&regs), -2);
    }
}
