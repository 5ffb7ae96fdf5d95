//! Reads out of the tracee's address space: `StringC` walks byte-by-byte until a NUL or a
//! configured limit; `Buffer`/`StringBuffer`/pointer-to-scalar read a fixed, known length. All of
//! it rides on `PTRACE_PEEKDATA`, one machine word at a time — the only unit `ptrace` lets us read
//! memory in.

use nix::errno::Errno;
use nix::sys::ptrace;
use nix::unistd::Pid;

const WORD_SIZE: usize = std::mem::size_of::<libc::c_long>();

/// Read one machine word from `addr` in `pid`'s address space.
fn read_word(pid: Pid, addr: u64) -> Result<i64, Errno> {
    ptrace::read(pid, addr as ptrace::AddressType).map(|v| v as i64)
}

/// Read exactly `len` bytes starting at `addr`, one word at a time. Stops and returns whatever
/// error `PTRACE_PEEKDATA` reported on the first failing word; bytes already collected are
/// discarded by the caller on error (the caller logs and substitutes a placeholder).
pub fn read_bytes(pid: Pid, addr: u64, len: usize) -> Result<Vec<u8>, Errno> {
    let mut out = Vec::with_capacity(len);
    let mut cursor = addr;
    while out.len() < len {
        let word = read_word(pid, cursor)?;
        let bytes = word.to_ne_bytes();
        let take = (len - out.len()).min(WORD_SIZE);
        out.extend_from_slice(&bytes[..take]);
        cursor += WORD_SIZE as u64;
    }
    Ok(out)
}

/// Read a NUL-terminated C string, one byte at a time (logically; implemented a word at a time
/// for fewer syscalls), stopping at the first NUL or after `limit` bytes, whichever comes first.
///
/// Returns the raw bytes read (not including the terminating NUL) and whether the limit was hit
/// before a NUL was found.
pub fn read_c_string(pid: Pid, addr: u64, limit: usize) -> Result<(Vec<u8>, bool), Errno> {
    let mut out = Vec::new();
    let mut cursor = addr;
    'outer: loop {
        let word = read_word(pid, cursor)?;
        let bytes = word.to_ne_bytes();
        for &b in bytes.iter() {
            if b == 0 {
                break 'outer;
            }
            out.push(b);
            if out.len() >= limit {
                return Ok((out, true));
            }
        }
        cursor += WORD_SIZE as u64;
    }
    Ok((out, false))
}

#[cfg(test)]
mod tests {
    use super::*;

    // `read_word`/`read_bytes`/`read_c_string` all require a live tracee to exercise against a
    // real address space; see `tests/decoder.rs` for the end-to-end coverage. The escaping and
    // limit logic that consumes these bytes is pure and is unit tested in `crate::decode`.
    #[test]
    fn word_size_matches_pointer_width() {
        assert_eq!(WORD_SIZE, std::mem::size_of::<usize>());
    }
}
