//! The signature table: a dense, architecture-specific array mapping numeric syscall ids to
//! [`Signature`]s, built once at first use — the shape an external code generator would emit from
//! a tab-separated source file.
//!
//! `table_x64` and `table_x86` are hand-authored in that generator's target shape rather than run
//! through the generator itself, covering the common POSIX calls plus a handful of others worth
//! exercising explicitly.

mod table_x64;
mod table_x86;

use std::sync::Arc;

use lazy_static::lazy_static;

use crate::signature::{ArgSpec, Signature};

/// One sparse table entry, as the generator would emit it: an id plus a signature payload.
/// Entries don't need to be sorted; [`dense_table`] fills every gap up to the max id with the
/// unknown sentinel.
struct Entry {
    id: u64,
    name: &'static str,
    args: Vec<ArgSpec>,
}

fn entry(id: u64, name: &'static str, args: Vec<ArgSpec>) -> Entry {
    Entry { id, name, args }
}

/// Build the dense array: `table[i].id == i` for every non-sentinel entry, with
/// [`Signature::unknown`] filling every gap.
fn dense_table(entries: Vec<Entry>) -> Vec<Arc<Signature>> {
    let max_id = entries.iter().map(|e| e.id).max().unwrap_or(0);
    let mut table: Vec<Arc<Signature>> = (0..=max_id).map(Signature::unknown).collect();
    for e in entries {
        table[e.id as usize] = Signature::new(e.id, e.name, e.args);
    }
    table
}

lazy_static! {
    static ref X64_TABLE: Vec<Arc<Signature>> = dense_table(table_x64::entries());
    static ref X86_TABLE: Vec<Arc<Signature>> = dense_table(table_x86::entries());
}

/// Resolve a syscall id against the x86-64 table, producing a synthesized unknown signature for
/// ids outside the table or landing on a gap.
pub fn resolve_x64(id: u64) -> Arc<Signature> {
    resolve(&X64_TABLE, id)
}

/// Resolve a syscall id against the x86-32 table (including the socketcall/ipc-remapped
/// synthetic ids in the 400/420 ranges).
pub fn resolve_x86(id: u64) -> Arc<Signature> {
    resolve(&X86_TABLE, id)
}

fn resolve(table: &[Arc<Signature>], id: u64) -> Arc<Signature> {
    match table.get(id as usize) {
        Some(sig) => Arc::clone(sig),
        None => Signature::unknown(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_index_equals_signature_id() {
        for (i, sig) in X64_TABLE.iter().enumerate() {
            assert_eq!(sig.id, i as u64);
        }
        for (i, sig) in X86_TABLE.iter().enumerate() {
            assert_eq!(sig.id, i as u64);
        }
    }

    #[test]
    fn unknown_id_past_the_table_synthesizes_a_sentinel() {
        let sig = resolve_x64(9999);
        assert_eq!(sig.name, "*UNKNOWN(9999)*");
    }

    #[test]
    fn write_is_present_with_three_args() {
        let sig = resolve_x64(1);
        assert_eq!(sig.name, "write");
        assert_eq!(sig.args.len(), 3);
    }

    #[test]
    fn socketcall_synthetic_range_resolves_by_name() {
        let sig = resolve_x86(401);
        assert_eq!(sig.name, "socket");
    }
}
