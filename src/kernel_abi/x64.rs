//! x86-64 Linux binding: the one binding this crate actually drives against a live `ptrace`
//! register snapshot (`libc::user_regs_struct`, as read by `nix::sys::ptrace::getregs`).
//! Parameter registers `%rdi, %rsi, %rdx, %rcx, %r8, %r9`; return value in `%rax`; no
//! syscall-number multiplexing.

use nix::unistd::Pid;

use super::{ArchBinding, CustomDecode, SupportedArch};
use crate::decode::custom::decode_arch_prctl;

/// `arch_prctl`'s syscall id on x86-64; the only call this crate ships a custom decoder for.
const SYS_ARCH_PRCTL: u64 = 158;

#[derive(Debug, Default, Copy, Clone)]
pub struct X64Binding;

impl ArchBinding for X64Binding {
    type Regs = libc::user_regs_struct;

    fn arch(&self) -> SupportedArch {
        SupportedArch::X64
    }

    fn param(&self, regs: &Self::Regs, i: usize) -> u64 {
        match i {
            0 => regs.rdi,
            1 => regs.rsi,
            2 => regs.rdx,
            3 => regs.rcx,
            4 => regs.r8,
            5 => regs.r9,
            _ => panic!("x86-64 syscalls take at most 6 parameter registers, got index {}", i),
        }
    }

    fn return_code(&self, regs: &Self::Regs) -> i64 {
        regs.rax as i64
    }

    fn syscall_id(&self, regs: &Self::Regs) -> (u64, usize) {
        (regs.orig_rax, 0)
    }

    fn custom_decode(
        &self,
        id: u64,
        regs: &Self::Regs,
        _max_string_size: usize,
        pid: Pid,
    ) -> CustomDecode {
        if id == SYS_ARCH_PRCTL {
            let code = self.param(regs, 0);
            let addr = self.param(regs, 1);
            CustomDecode::Handled(decode_arch_prctl(code, addr, pid))
        } else {
            CustomDecode::FallThrough
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zeroed_regs() -> libc::user_regs_struct {
        unsafe { std::mem::zeroed() }
    }

    #[test]
    fn param_maps_to_the_documented_registers() {
        let binding = X64Binding;
        let mut regs = zeroed_regs();
        regs.rdi = 1;
        regs.rsi = 2;
        regs.rdx = 3;
        regs.rcx = 4;
        regs.r8 = 5;
        regs.r9 = 6;
        for (i, expected) in (0..6).zip(1..=6u64) {
            assert_eq!(binding.param(&regs, i), expected);
        }
    }

    #[test]
    fn syscall_id_has_no_multiplexing() {
        let binding = X64Binding;
        let mut regs = zeroed_regs();
        regs.orig_rax = 1;
        assert_eq!(binding.syscall_id(&regs), (1, 0));
    }

    #[test]
    fn arch_prctl_is_routed_to_the_custom_decoder() {
        let binding = X64Binding;
        let mut regs = zeroed_regs();
        regs.orig_rax = SYS_ARCH_PRCTL;
        regs.rdi = 0x1002;
        regs.rsi = 0xDEAD0000;
        match binding.custom_decode(SYS_ARCH_PRCTL, &regs, 32, Pid::from_raw(0)) {
            CustomDecode::Handled(args) => {
                assert_eq!(args[0].printable, "ARCH_SET_FS");
                assert_eq!(args[1].printable, "3735814144");
            }
            CustomDecode::FallThrough => panic!("expected arch_prctl to be handled"),
        }
    }
}
