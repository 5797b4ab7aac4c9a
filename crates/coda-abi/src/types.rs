//! ABI type model
//!
//! A [`ParamType`] tree is immutable once parsed and may be shared across any
//! number of encode/decode calls. Static/dynamic classification and word
//! counts are pure recursive functions over the tree.

use std::fmt;

/// One component of a tuple or parameter list: an optional name and a type.
///
/// Names are recorded for documentation and decoded-field lookup; they never
/// participate in selector computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Component name, if the source carried one
    pub name: Option<String>,
    /// Component type
    pub kind: ParamType,
}

impl Param {
    /// Create a named component
    pub fn named(name: impl Into<String>, kind: ParamType) -> Self {
        Self {
            name: Some(name.into()),
            kind,
        }
    }

    /// Create an unnamed component
    pub fn unnamed(kind: ParamType) -> Self {
        Self { name: None, kind }
    }
}

/// Solidity ABI parameter types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// Address (20 bytes, low end of a word)
    Address,
    /// Unsigned integer with bit size (8, 16, ..., 256)
    Uint(usize),
    /// Signed integer with bit size
    Int(usize),
    /// Boolean
    Bool,
    /// Dynamic byte string
    Bytes,
    /// Fixed-size bytes (size 1-32)
    FixedBytes(usize),
    /// UTF-8 string
    String,
    /// Dynamically sized array
    Array(Box<ParamType>),
    /// Fixed-size array
    FixedArray(Box<ParamType>, usize),
    /// Tuple (struct) with ordered components
    Tuple(Vec<Param>),
}

impl ParamType {
    /// Check whether this type is dynamic (variable encoded length).
    ///
    /// `bytes`, `string` and `T[]` are always dynamic; fixed arrays and
    /// tuples are dynamic iff any contained element is, recursively.
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
            ParamType::FixedArray(inner, _) => inner.is_dynamic(),
            ParamType::Tuple(components) => components.iter().any(|p| p.kind.is_dynamic()),
            _ => false,
        }
    }

    /// Number of 32-byte words the in-place encoding of a static type
    /// occupies. Only meaningful for static types; a dynamic type is never
    /// encoded in place.
    pub fn static_words(&self) -> usize {
        match self {
            ParamType::FixedArray(inner, size) => inner.static_words() * size,
            ParamType::Tuple(components) => {
                components.iter().map(|p| p.kind.static_words()).sum()
            }
            _ => 1,
        }
    }

    /// Number of 32-byte words this type occupies in a head region: its
    /// static word count, or a single offset slot when dynamic.
    pub fn head_words(&self) -> usize {
        if self.is_dynamic() {
            1
        } else {
            self.static_words()
        }
    }
}

impl fmt::Display for ParamType {
    /// Renders the canonical (name-stripped) type string, the form that
    /// enters selector computation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => f.write_str("address"),
            ParamType::Uint(bits) => write!(f, "uint{}", bits),
            ParamType::Int(bits) => write!(f, "int{}", bits),
            ParamType::Bool => f.write_str("bool"),
            ParamType::Bytes => f.write_str("bytes"),
            ParamType::FixedBytes(size) => write!(f, "bytes{}", size),
            ParamType::String => f.write_str("string"),
            ParamType::Array(inner) => write!(f, "{}[]", inner),
            ParamType::FixedArray(inner, size) => write!(f, "{}[{}]", inner, size),
            ParamType::Tuple(components) => {
                f.write_str("(")?;
                for (i, p) in components.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", p.kind)?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_dynamic_elementary() {
        assert!(!ParamType::Address.is_dynamic());
        assert!(!ParamType::Uint(256).is_dynamic());
        assert!(!ParamType::Int(8).is_dynamic());
        assert!(!ParamType::Bool.is_dynamic());
        assert!(!ParamType::FixedBytes(32).is_dynamic());

        assert!(ParamType::Bytes.is_dynamic());
        assert!(ParamType::String.is_dynamic());
        assert!(ParamType::Array(Box::new(ParamType::Bool)).is_dynamic());
    }

    #[test]
    fn test_is_dynamic_composite() {
        // Fixed array / tuple are dynamic iff a member is
        let static_arr = ParamType::FixedArray(Box::new(ParamType::Uint(8)), 4);
        assert!(!static_arr.is_dynamic());

        let dynamic_arr = ParamType::FixedArray(Box::new(ParamType::Bytes), 4);
        assert!(dynamic_arr.is_dynamic());

        let static_tuple = ParamType::Tuple(vec![
            Param::unnamed(ParamType::Uint(256)),
            Param::unnamed(ParamType::Bool),
        ]);
        assert!(!static_tuple.is_dynamic());

        let dynamic_tuple = ParamType::Tuple(vec![
            Param::unnamed(ParamType::Uint(256)),
            Param::unnamed(ParamType::String),
        ]);
        assert!(dynamic_tuple.is_dynamic());

        // Dynamism propagates through nesting
        let nested = ParamType::FixedArray(Box::new(dynamic_tuple), 2);
        assert!(nested.is_dynamic());
    }

    #[test]
    fn test_static_words() {
        assert_eq!(ParamType::Uint(8).static_words(), 1);
        assert_eq!(ParamType::FixedBytes(1).static_words(), 1);
        assert_eq!(
            ParamType::FixedArray(Box::new(ParamType::Uint(256)), 5).static_words(),
            5
        );
        let pair = ParamType::Tuple(vec![
            Param::unnamed(ParamType::Uint(256)),
            Param::unnamed(ParamType::FixedArray(Box::new(ParamType::Bool), 3)),
        ]);
        assert_eq!(pair.static_words(), 4);
        assert_eq!(
            ParamType::FixedArray(Box::new(pair), 2).static_words(),
            8
        );
    }

    #[test]
    fn test_head_words() {
        // Dynamic types always take a single offset slot in the head
        assert_eq!(ParamType::Bytes.head_words(), 1);
        assert_eq!(
            ParamType::Array(Box::new(ParamType::Uint(256))).head_words(),
            1
        );
        assert_eq!(
            ParamType::FixedArray(Box::new(ParamType::Uint(256)), 3).head_words(),
            3
        );
    }

    #[test]
    fn test_canonical_rendering() {
        assert_eq!(ParamType::Uint(256).to_string(), "uint256");
        assert_eq!(ParamType::FixedBytes(32).to_string(), "bytes32");
        assert_eq!(
            ParamType::Array(Box::new(ParamType::Address)).to_string(),
            "address[]"
        );
        assert_eq!(
            ParamType::FixedArray(
                Box::new(ParamType::Array(Box::new(ParamType::Uint(8)))),
                3
            )
            .to_string(),
            "uint8[][3]"
        );
        // Names never appear in the canonical form
        let tuple = ParamType::Tuple(vec![
            Param::named("uid", ParamType::FixedBytes(32)),
            Param::unnamed(ParamType::Address),
        ]);
        assert_eq!(tuple.to_string(), "(bytes32,address)");
    }
}
