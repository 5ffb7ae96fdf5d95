//! Per-call custom decoders. Only `arch_prctl` on x86-64 needs one in this crate's shipped
//! tables; new ones plug in through [`crate::kernel_abi::ArchBinding::custom_decode`] the same
//! way.

use nix::unistd::Pid;

use crate::mem;
use crate::value::{ArgData, ArgValue};

const ARCH_SET_GS: u64 = 0x1001;
const ARCH_SET_FS: u64 = 0x1002;
const ARCH_GET_FS: u64 = 0x1003;
const ARCH_GET_GS: u64 = 0x1004;

/// Decode `arch_prctl(code, addr)` (x86-64 syscall id 158).
///
/// `ARCH_SET_*` treats the second argument as an opaque word (the value being installed);
/// `ARCH_GET_*` treats it as a pointer to a `u64` the kernel just wrote the current value into,
/// and reads it back out of the tracee.
pub fn decode_arch_prctl(code: u64, addr: u64, pid: Pid) -> Vec<ArgValue> {
    let (code_printable, decode_addr_as_ptr) = match code {
        ARCH_SET_GS => ("ARCH_SET_GS", false),
        ARCH_SET_FS => ("ARCH_SET_FS", false),
        ARCH_GET_FS => ("ARCH_GET_FS", true),
        ARCH_GET_GS => ("ARCH_GET_GS", true),
        _ => ("*Unknown*", false),
    };

    let first = ArgValue::new(ArgData::Unsigned(code), code_printable);

    let second = if decode_addr_as_ptr {
        match mem::read_bytes(pid, addr, 8) {
            Ok(bytes) => {
                let mut buf = [0u8; 8];
                buf.copy_from_slice(&bytes);
                let value = u64::from_le_bytes(buf);
                ArgValue::new(ArgData::Unsigned(value), value.to_string())
            }
            Err(e) => {
                log::warn!("failed to read arch_prctl output pointer: {}", e);
                ArgValue::new(ArgData::Text(String::new()), "\"\"")
            }
        }
    } else {
        ArgValue::new(ArgData::Unsigned(addr), addr.to_string())
    };

    vec![first, second]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_fs_is_symbolic_and_leaves_second_arg_opaque() {
        let args = decode_arch_prctl(ARCH_SET_FS, 0xDEAD0000, Pid::from_raw(0));
        assert_eq!(args[0].printable, "ARCH_SET_FS");
        assert_eq!(args[1].printable, "3735814144");
    }

    #[test]
    fn unknown_code_falls_back_to_placeholder() {
        let args = decode_arch_prctl(0x9999, 0, Pid::from_raw(0));
        assert_eq!(args[0].printable, "*Unknown*");
    }
}
