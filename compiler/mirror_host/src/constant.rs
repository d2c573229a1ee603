//! Runtime-typed constant values.
//!
//! The host reports the value of a literal, or the folded value of a
//! constant expression, as a [`Constant`]. Integer and floating widths are
//! kept distinct because consumers dispatch on them.
//!
//! Floats compare and hash by bit pattern so `Constant` can be `Eq + Hash`.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A constant value reported by the host.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constant {
    String(String),
    Int(i32),
    Long(i64),
    Short(i16),
    Byte(i8),
    Boolean(bool),
    Char(char),
    Float(f32),
    Double(f64),
    /// The null literal. Not a valid annotation value.
    Null,
}

/// Runtime kind of a [`Constant`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstantKind {
    String,
    Int,
    Long,
    Short,
    Byte,
    Boolean,
    Char,
    Float,
    Double,
    Null,
}

impl Constant {
    /// Get the runtime kind of this value.
    pub const fn kind(&self) -> ConstantKind {
        match self {
            Constant::String(_) => ConstantKind::String,
            Constant::Int(_) => ConstantKind::Int,
            Constant::Long(_) => ConstantKind::Long,
            Constant::Short(_) => ConstantKind::Short,
            Constant::Byte(_) => ConstantKind::Byte,
            Constant::Boolean(_) => ConstantKind::Boolean,
            Constant::Char(_) => ConstantKind::Char,
            Constant::Float(_) => ConstantKind::Float,
            Constant::Double(_) => ConstantKind::Double,
            Constant::Null => ConstantKind::Null,
        }
    }

    /// Borrow the string payload, if this is a string constant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Constant::String(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Constant::String(a), Constant::String(b)) => a == b,
            (Constant::Int(a), Constant::Int(b)) => a == b,
            (Constant::Long(a), Constant::Long(b)) => a == b,
            (Constant::Short(a), Constant::Short(b)) => a == b,
            (Constant::Byte(a), Constant::Byte(b)) => a == b,
            (Constant::Boolean(a), Constant::Boolean(b)) => a == b,
            (Constant::Char(a), Constant::Char(b)) => a == b,
            (Constant::Float(a), Constant::Float(b)) => a.to_bits() == b.to_bits(),
            (Constant::Double(a), Constant::Double(b)) => a.to_bits() == b.to_bits(),
            (Constant::Null, Constant::Null) => true,
            _ => false,
        }
    }
}

impl Eq for Constant {}

impl Hash for Constant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Constant::String(s) => s.hash(state),
            Constant::Int(v) => v.hash(state),
            Constant::Long(v) => v.hash(state),
            Constant::Short(v) => v.hash(state),
            Constant::Byte(v) => v.hash(state),
            Constant::Boolean(v) => v.hash(state),
            Constant::Char(v) => v.hash(state),
            Constant::Float(v) => v.to_bits().hash(state),
            Constant::Double(v) => v.to_bits().hash(state),
            Constant::Null => {}
        }
    }
}

/// Renders the value in source form, e.g. `"a"`, `'c'`, `5L`, `1.5f`.
impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::String(s) => write!(f, "\"{}\"", s.escape_default()),
            Constant::Int(v) => write!(f, "{v}"),
            Constant::Long(v) => write!(f, "{v}L"),
            Constant::Short(v) => write!(f, "{v}"),
            Constant::Byte(v) => write!(f, "{v}"),
            Constant::Boolean(v) => write!(f, "{v}"),
            Constant::Char(c) => write!(f, "'{}'", c.escape_default()),
            Constant::Float(v) => write!(f, "{v:?}f"),
            Constant::Double(v) => write!(f, "{v:?}"),
            Constant::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for Constant {
    fn from(value: &str) -> Self {
        Constant::String(value.to_owned())
    }
}

impl From<String> for Constant {
    fn from(value: String) -> Self {
        Constant::String(value)
    }
}

impl From<i32> for Constant {
    fn from(value: i32) -> Self {
        Constant::Int(value)
    }
}

impl From<i64> for Constant {
    fn from(value: i64) -> Self {
        Constant::Long(value)
    }
}

impl From<i16> for Constant {
    fn from(value: i16) -> Self {
        Constant::Short(value)
    }
}

impl From<i8> for Constant {
    fn from(value: i8) -> Self {
        Constant::Byte(value)
    }
}

impl From<bool> for Constant {
    fn from(value: bool) -> Self {
        Constant::Boolean(value)
    }
}

impl From<char> for Constant {
    fn from(value: char) -> Self {
        Constant::Char(value)
    }
}

impl From<f32> for Constant {
    fn from(value: f32) -> Self {
        Constant::Float(value)
    }
}

impl From<f64> for Constant {
    fn from(value: f64) -> Self {
        Constant::Double(value)
    }
}
