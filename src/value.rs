//! Decoded values handed to consumers: `ArgValue`, `ReturnValue`, `Trace`.

use std::sync::Arc;

use serde::Serialize;

use crate::signature::Signature;

/// The decoded form of one argument: an opaque typed value plus its printable representation.
#[derive(Debug, Clone, Serialize)]
pub enum ArgData {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    /// A string already escaped and quoted (used for `StringC` and `StringBuffer`).
    Text(String),
    /// Raw bytes, for the `Buffer` tag.
    Bytes(Vec<u8>),
    /// The raw register word, for tags the default decoder doesn't know how to interpret
    /// (`UnknownStruct` or anything reached through the `NOTIMPL` fallback).
    Raw(u64),
}

/// One decoded argument: an opaque value plus the string form log-style consumers print.
#[derive(Debug, Clone, Serialize)]
pub struct ArgValue {
    pub value: ArgData,
    /// String representation of the value, for log-style output.
    pub printable: String,
}

impl ArgValue {
    pub fn new(value: ArgData, printable: impl Into<String>) -> Self {
        ArgValue {
            value,
            printable: printable.into(),
        }
    }

    /// The `*ARGSNOTDEFINED*` sentinel emitted for signatures with no declared arguments.
    pub fn args_not_defined() -> Self {
        ArgValue::new(ArgData::Raw(0), crate::signature::ARGS_NOT_DEFINED)
    }
}

impl std::fmt::Display for ArgValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.printable)
    }
}

/// Numeric return code plus, when negative and recognized, a human-readable description.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReturnValue {
    pub code: i64,
    pub description: Option<String>,
}

/// The unit emitted to consumers for one entry or exit stop.
#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    #[serde(serialize_with = "serialize_signature_ref")]
    pub signature: Arc<Signature>,
    /// Present (non-empty) on exit; always empty on entry, since arguments aren't decoded until
    /// the call has actually returned.
    pub args: Vec<ArgValue>,
    pub ret: ReturnValue,
    /// `false` on entry, `true` on exit.
    pub exit: bool,
}

fn serialize_signature_ref<S>(sig: &Arc<Signature>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    Signature::serialize(sig, serializer)
}

impl Trace {
    pub fn entry(signature: Arc<Signature>) -> Self {
        Trace {
            signature,
            args: Vec::new(),
            ret: ReturnValue::default(),
            exit: false,
        }
    }

    pub fn exit(signature: Arc<Signature>, args: Vec<ArgValue>, ret: ReturnValue) -> Self {
        Trace {
            signature,
            args,
            ret,
            exit: true,
        }
    }
}
