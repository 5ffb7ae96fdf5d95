//! The argument decoder: given a signature and a register snapshot, produces the typed +
//! printable `ArgValue` vector. `custom.rs` holds the per-arch, per-call overrides consulted
//! before this default path runs.

pub mod custom;

use nix::errno::Errno;
use nix::unistd::Pid;

use crate::kernel_abi::{ArchBinding, CustomDecode};
use crate::mem;
use crate::signature::{ArgKind, ArgSpec, Signature};
use crate::value::{ArgData, ArgValue};

/// Decode every declared argument of `signature` against one register snapshot.
///
/// `skip` is the number of leading parameter registers already consumed by syscall-id
/// resolution (the socketcall/ipc multiplexing case on x86-32; always 0 on x86-64).
pub fn decode_args<B: ArchBinding>(
    binding: &B,
    signature: &Signature,
    regs: &B::Regs,
    pid: Pid,
    skip: usize,
    max_string_size: usize,
    max_buffer_size: usize,
) -> Vec<ArgValue> {
    if signature.args.is_empty() {
        return vec![ArgValue::args_not_defined()];
    }

    match binding.custom_decode(signature.id, regs, max_string_size, pid) {
        CustomDecode::Handled(args) => args,
        CustomDecode::FallThrough => default_decode(
            binding,
            &signature.args,
            regs,
            pid,
            skip,
            max_string_size,
            max_buffer_size,
        ),
    }
}

fn default_decode<B: ArchBinding>(
    binding: &B,
    args: &[ArgSpec],
    regs: &B::Regs,
    pid: Pid,
    skip: usize,
    max_string_size: usize,
    max_buffer_size: usize,
) -> Vec<ArgValue> {
    args.iter()
        .enumerate()
        .map(|(i, spec)| {
            let raw = binding.param(regs, skip + i);
            decode_one(&spec.kind, raw, pid, max_string_size, max_buffer_size)
        })
        .collect()
}

fn decode_one(
    kind: &ArgKind,
    raw: u64,
    pid: Pid,
    max_string_size: usize,
    max_buffer_size: usize,
) -> ArgValue {
    match kind {
        ArgKind::StringC => decode_string_c(pid, raw, max_string_size),
        ArgKind::StringBuffer => decode_counted_string(pid, raw, max_buffer_size),
        ArgKind::Buffer => decode_buffer(pid, raw, max_buffer_size),
        ArgKind::Ptr(inner) => decode_ptr_to_scalar(inner, raw, pid),
        ArgKind::UnknownStruct => {
            let printable = format!("{}(NOTIMPL={})", raw, kind.tag_name());
            ArgValue::new(ArgData::Raw(raw), printable)
        }
        scalar => {
            let (value, printable) = decode_scalar(scalar, raw);
            ArgValue::new(value, printable)
        }
    }
}

/// Reinterpret a raw register word as one of the fixed-width scalar tags. Only called for tags
/// that aren't `StringC`/`StringBuffer`/`Buffer`/`Ptr`/`UnknownStruct`.
fn decode_scalar(kind: &ArgKind, raw: u64) -> (ArgData, String) {
    match kind {
        ArgKind::I8 => {
            let v = raw as i8 as i64;
            (ArgData::Signed(v), v.to_string())
        }
        ArgKind::I16 => {
            let v = raw as i16 as i64;
            (ArgData::Signed(v), v.to_string())
        }
        ArgKind::I32 => {
            let v = raw as i32 as i64;
            (ArgData::Signed(v), v.to_string())
        }
        ArgKind::I64 | ArgKind::Word => {
            let v = raw as i64;
            (ArgData::Signed(v), v.to_string())
        }
        ArgKind::U8 => {
            let v = raw as u8 as u64;
            (ArgData::Unsigned(v), v.to_string())
        }
        ArgKind::U16 => {
            let v = raw as u16 as u64;
            (ArgData::Unsigned(v), v.to_string())
        }
        ArgKind::U32 => {
            let v = raw as u32 as u64;
            (ArgData::Unsigned(v), v.to_string())
        }
        ArgKind::U64 | ArgKind::UWord => (ArgData::Unsigned(raw), raw.to_string()),
        ArgKind::F32 => {
            let v = f32::from_bits(raw as u32) as f64;
            (ArgData::Float(v), v.to_string())
        }
        ArgKind::F64 => {
            let v = f64::from_bits(raw);
            (ArgData::Float(v), v.to_string())
        }
        ArgKind::StringC
        | ArgKind::StringBuffer
        | ArgKind::Buffer
        | ArgKind::UnknownStruct
        | ArgKind::Ptr(_) => unreachable!("decode_scalar only handles fixed-width scalar tags"),
    }
}

/// Byte width a scalar tag occupies when read out of tracee memory through a `Ptr` wrapper.
fn scalar_width(kind: &ArgKind) -> usize {
    match kind {
        ArgKind::I8 | ArgKind::U8 => 1,
        ArgKind::I16 | ArgKind::U16 => 2,
        ArgKind::I32 | ArgKind::U32 | ArgKind::F32 => 4,
        ArgKind::I64 | ArgKind::U64 | ArgKind::Word | ArgKind::UWord | ArgKind::F64 => 8,
        _ => 8,
    }
}

fn decode_ptr_to_scalar(inner: &ArgKind, addr: u64, pid: Pid) -> ArgValue {
    let width = scalar_width(inner);
    match mem::read_bytes(pid, addr, width) {
        Ok(bytes) => {
            let mut buf = [0u8; 8];
            buf[..bytes.len()].copy_from_slice(&bytes);
            let raw = u64::from_le_bytes(buf);
            let (value, printable) = decode_scalar(inner, raw);
            ArgValue::new(value, printable)
        }
        Err(e) => unreadable_pointer(e),
    }
}

fn decode_string_c(pid: Pid, addr: u64, limit: usize) -> ArgValue {
    match mem::read_c_string(pid, addr, limit) {
        Ok((bytes, truncated)) => {
            let text = quote(&escape(&bytes), truncated);
            ArgValue::new(ArgData::Text(text.clone()), text)
        }
        Err(e) => unreadable_pointer(e),
    }
}

fn decode_counted_string(pid: Pid, addr: u64, max_buffer_size: usize) -> ArgValue {
    match mem::read_bytes(pid, addr, max_buffer_size) {
        Ok(bytes) => {
            let text = quote(&escape(&bytes), true);
            ArgValue::new(ArgData::Text(text.clone()), text)
        }
        Err(e) => unreadable_pointer(e),
    }
}

fn decode_buffer(pid: Pid, addr: u64, max_buffer_size: usize) -> ArgValue {
    match mem::read_bytes(pid, addr, max_buffer_size) {
        Ok(bytes) => {
            let mut printable: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
            printable.push_str("...");
            ArgValue::new(ArgData::Bytes(bytes), printable)
        }
        Err(e) => unreadable_pointer(e),
    }
}

/// A failed tracee-memory read is logged and the argument gets a placeholder printable form
/// instead of aborting the trace.
fn unreadable_pointer(e: Errno) -> ArgValue {
    log::warn!("failed to read tracee memory for argument: {}", e);
    ArgValue::new(ArgData::Text(String::new()), "\"\"")
}

/// Escape raw bytes for safe display: `\n`/`\r`/`\t` for the three whitespace controls, printable
/// ASCII as-is, everything else as `\<decimal>`. Guarantees every output byte is printable ASCII.
pub fn escape(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(b as char),
            _ => out.push_str(&format!("\\{}", b)),
        }
    }
    out
}

fn quote(escaped: &str, truncated: bool) -> String {
    let mut s = String::with_capacity(escaped.len() + 5);
    s.push('"');
    s.push_str(escaped);
    s.push('"');
    if truncated {
        s.push_str("...");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_totality_over_every_byte() {
        for b in 0u16..=255 {
            let escaped = escape(&[b as u8]);
            assert!(
                escaped.bytes().all(|c| (0x20..=0x7e).contains(&c)),
                "byte {} escaped to non-printable {:?}",
                b,
                escaped
            );
        }
    }

    #[test]
    fn escape_known_controls() {
        assert_eq!(escape(b"\n"), "\\n");
        assert_eq!(escape(b"\r"), "\\r");
        assert_eq!(escape(b"\t"), "\\t");
        assert_eq!(escape(b"A"), "A");
        assert_eq!(escape(&[0u8]), "\\0");
        assert_eq!(escape(&[200u8]), "\\200");
    }

    #[test]
    fn quote_appends_ellipsis_only_when_truncated() {
        assert_eq!(quote("hi", false), "\"hi\"");
        assert_eq!(quote("hi", true), "\"hi\"...");
    }

    #[test]
    fn decode_scalar_respects_declared_width_and_sign() {
        let (value, printable) = decode_scalar(&ArgKind::I8, 0xff);
        assert_eq!(printable, "-1");
        match value {
            ArgData::Signed(v) => assert_eq!(v, -1),
            _ => panic!("expected signed value"),
        }

        let (_, printable) = decode_scalar(&ArgKind::U8, 0xff);
        assert_eq!(printable, "255");
    }

    #[test]
    fn unknown_struct_printable_form() {
        let v = decode_one(&ArgKind::UnknownStruct, 0x2a, Pid::from_raw(0), 32, 32);
        assert_eq!(v.printable, "42(NOTIMPL=UnknownStruct)");
    }
}
