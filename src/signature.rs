//! Static description of one system call: its id, name, and argument shape.
//!
//! Signatures are produced once, by the tables under [`crate::syscalls`], and are otherwise
//! immutable. The per-arch tables are a dense array indexed by id; an out-of-range or sparse
//! entry is represented by [`Signature::unknown`].

use std::fmt;
use std::sync::Arc;

/// Closed set of argument type tags.
///
/// Every descriptor carries exactly one of these, so the decoder can be an exhaustive match
/// instead of runtime type inspection. `Ptr` is the canonical way to say "this register holds a
/// tracee address of a value with the wrapped tag" — there is no separate pointer boolean.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum ArgKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    /// Machine word, signed (`long` in the C declaration it was taken from).
    Word,
    /// Machine word, unsigned (`unsigned long` / `size_t`-ish declarations).
    UWord,
    F32,
    F64,
    /// NUL-terminated C string living in tracee memory.
    StringC,
    /// Counted byte string living in tracee memory. The count is conventionally carried by a
    /// sibling argument; this crate does not cross-reference it and instead reads up to the
    /// configured buffer limit.
    StringBuffer,
    /// Opaque byte blob living in tracee memory.
    Buffer,
    /// A struct or union argument this crate does not decode further.
    UnknownStruct,
    /// The register holds the tracee address of a value of the wrapped kind.
    Ptr(Box<ArgKind>),
}

impl ArgKind {
    /// A short name used in the `NOTIMPL=<tag-name>` printable form for tags the default
    /// decoder doesn't special-case.
    pub fn tag_name(&self) -> String {
        match self {
            ArgKind::Ptr(inner) => format!("Ptr<{}>", inner.tag_name()),
            other => format!("{:?}", other),
        }
    }
}

/// One argument descriptor in a [`Signature`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct ArgSpec {
    pub name: &'static str,
    pub kind: ArgKind,
    /// Whether the source C declaration was `const`-qualified. Informational only; the decoder
    /// doesn't branch on it.
    pub is_const: bool,
}

impl ArgSpec {
    pub const fn new(name: &'static str, kind: ArgKind, is_const: bool) -> Self {
        ArgSpec {
            name,
            kind,
            is_const,
        }
    }
}

/// An optional per-call override for how a negative return value's description is produced. None
/// of the shipped tables populate this — it exists so a consumer building a custom table can hook
/// a call-specific describer instead of falling back to the generic errno catalog.
pub type ReturnCodeDescriber = fn(i64) -> Option<String>;

/// Static description of one system call.
#[derive(Clone, serde::Serialize)]
pub struct Signature {
    pub id: u64,
    pub name: String,
    pub args: Vec<ArgSpec>,
    #[serde(skip)]
    pub return_describer: Option<ReturnCodeDescriber>,
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("args", &self.args)
            .finish()
    }
}

impl Signature {
    pub fn new(id: u64, name: &str, args: Vec<ArgSpec>) -> Arc<Signature> {
        Arc::new(Signature {
            id,
            name: name.to_string(),
            args,
            return_describer: None,
        })
    }

    /// Build the synthesized signature for an id that falls outside the table (sparse gap or
    /// past the end), named `*UNKNOWN(<id>)*` so the numeric id survives into logs and dispatch.
    pub fn unknown(id: u64) -> Arc<Signature> {
        Arc::new(Signature {
            id,
            name: format!("*UNKNOWN({})*", id),
            args: Vec::new(),
            return_describer: None,
        })
    }
}

/// Printable form used when a signature declares no arguments.
pub const ARGS_NOT_DEFINED: &str = "*ARGSNOTDEFINED*";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_signature_name_embeds_id() {
        let sig = Signature::unknown(9999);
        assert_eq!(sig.name, "*UNKNOWN(9999)*");
        assert!(sig.args.is_empty());
    }

    #[test]
    fn ptr_tag_name_wraps_inner() {
        let kind = ArgKind::Ptr(Box::new(ArgKind::U64));
        assert_eq!(kind.tag_name(), "Ptr<U64>");
    }
}
