//! Type string parsing
//!
//! Recursive descent over an explicit cursor. Accepts both canonical type
//! strings (`"uint256[2]"`, `"(bytes32,address)[]"`) and name-annotated
//! parameter lists (`"bytes32 uid, address resolver"`); names are recorded
//! but stripped from the canonical rendering.

use crate::error::AbiError;
use crate::types::{Param, ParamType};

/// Parse a single type string. The whole input must be consumed.
pub fn parse_type(s: &str) -> Result<ParamType, AbiError> {
    let mut cursor = Cursor::new(s);
    cursor.skip_ws();
    let ty = cursor.parse_type()?;
    cursor.skip_ws();
    if !cursor.at_end() {
        return Err(cursor.error("unexpected trailing characters"));
    }
    Ok(ty)
}

/// Parse a comma-separated parameter list, optionally name-annotated.
///
/// An empty (or all-whitespace) input yields an empty list, matching a
/// parameterless signature.
pub fn parse_param_list(s: &str) -> Result<Vec<Param>, AbiError> {
    let mut cursor = Cursor::new(s);
    cursor.skip_ws();
    if cursor.at_end() {
        return Ok(Vec::new());
    }
    let mut params = Vec::new();
    loop {
        params.push(cursor.parse_component()?);
        cursor.skip_ws();
        if cursor.eat(b',') {
            continue;
        }
        break;
    }
    if !cursor.at_end() {
        return Err(cursor.error("unexpected trailing characters"));
    }
    Ok(params)
}

/// Explicit parse position over a type string. All state lives here; the
/// grammar functions thread it through recursion.
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, b: u8) -> Result<(), AbiError> {
        if self.eat(b) {
            Ok(())
        } else {
            Err(self.error(&format!("expected `{}`", b as char)))
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    /// Consume an identifier-shaped word (letters, digits, `_`, `$`)
    fn take_word(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_' || b == b'$')
        {
            self.pos += 1;
        }
        &self.src[start..self.pos]
    }

    fn take_digits(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        &self.src[start..self.pos]
    }

    fn error(&self, msg: &str) -> AbiError {
        AbiError::TypeSyntax(format!("{} at position {} in {:?}", msg, self.pos, self.src))
    }

    /// TYPE := (TUPLE | ELEMENTARY) ("[" [N] "]")*
    fn parse_type(&mut self) -> Result<ParamType, AbiError> {
        let base = if self.peek() == Some(b'(') {
            self.parse_tuple()?
        } else {
            self.parse_elementary()?
        };
        self.parse_array_suffixes(base)
    }

    /// TUPLE := "(" [COMPONENT ("," COMPONENT)*] ")"
    fn parse_tuple(&mut self) -> Result<ParamType, AbiError> {
        self.expect(b'(')?;
        self.skip_ws();
        let mut components = Vec::new();
        if self.eat(b')') {
            return Ok(ParamType::Tuple(components));
        }
        loop {
            components.push(self.parse_component()?);
            self.skip_ws();
            if self.eat(b',') {
                continue;
            }
            self.expect(b')')?;
            break;
        }
        Ok(ParamType::Tuple(components))
    }

    /// COMPONENT := TYPE [NAME]
    fn parse_component(&mut self) -> Result<Param, AbiError> {
        self.skip_ws();
        let kind = self.parse_type()?;
        self.skip_ws();
        let name = match self.peek() {
            Some(b) if b.is_ascii_alphabetic() || b == b'_' || b == b'$' => {
                Some(self.take_word().to_string())
            }
            _ => None,
        };
        Ok(Param { name, kind })
    }

    /// ELEMENTARY := "uint"N | "int"N | "bool" | "address" | "bytes"N
    ///             | "bytes" | "string"
    fn parse_elementary(&mut self) -> Result<ParamType, AbiError> {
        let start = self.pos;
        let word = self.take_word();
        if word.is_empty() {
            return Err(self.error("expected a type"));
        }
        match word {
            "address" => return Ok(ParamType::Address),
            "bool" => return Ok(ParamType::Bool),
            "string" => return Ok(ParamType::String),
            "bytes" => return Ok(ParamType::Bytes),
            // Width aliases, canonicalized on rendering
            "uint" => return Ok(ParamType::Uint(256)),
            "int" => return Ok(ParamType::Int(256)),
            _ => {}
        }
        if let Some(rest) = word.strip_prefix("uint") {
            let bits = self.parse_bits(rest, start)?;
            return Ok(ParamType::Uint(bits));
        }
        if let Some(rest) = word.strip_prefix("int") {
            let bits = self.parse_bits(rest, start)?;
            return Ok(ParamType::Int(bits));
        }
        if let Some(rest) = word.strip_prefix("bytes") {
            let size: usize = rest
                .parse()
                .map_err(|_| self.error_at(start, &format!("unknown type `{}`", word)))?;
            if !(1..=32).contains(&size) {
                return Err(
                    self.error_at(start, &format!("bytes size {} outside [1,32]", size))
                );
            }
            return Ok(ParamType::FixedBytes(size));
        }
        Err(self.error_at(start, &format!("unknown type `{}`", word)))
    }

    /// Integer bit width: a multiple of 8 in [8,256]
    fn parse_bits(&self, digits: &str, start: usize) -> Result<usize, AbiError> {
        let bits: usize = digits
            .parse()
            .map_err(|_| self.error_at(start, &format!("invalid bit width `{}`", digits)))?;
        if bits == 0 || bits % 8 != 0 || bits > 256 {
            return Err(self.error_at(start, &format!("invalid bit width {}", bits)));
        }
        Ok(bits)
    }

    /// Array suffixes wrap left-to-right: `T[a][b]` is an array of `b`
    /// elements of type `T[a]`.
    fn parse_array_suffixes(&mut self, mut ty: ParamType) -> Result<ParamType, AbiError> {
        loop {
            let mark = self.pos;
            self.skip_ws();
            if !self.eat(b'[') {
                self.pos = mark;
                return Ok(ty);
            }
            self.skip_ws();
            let digits = self.take_digits();
            self.skip_ws();
            self.expect(b']')?;
            ty = if digits.is_empty() {
                ParamType::Array(Box::new(ty))
            } else {
                let size: usize = digits
                    .parse()
                    .map_err(|_| self.error(&format!("invalid array length `{}`", digits)))?;
                ParamType::FixedArray(Box::new(ty), size)
            };
        }
    }

    fn error_at(&self, pos: usize, msg: &str) -> AbiError {
        AbiError::TypeSyntax(format!("{} at position {} in {:?}", msg, pos, self.src))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_elementary() {
        assert_eq!(parse_type("address").unwrap(), ParamType::Address);
        assert_eq!(parse_type("bool").unwrap(), ParamType::Bool);
        assert_eq!(parse_type("string").unwrap(), ParamType::String);
        assert_eq!(parse_type("bytes").unwrap(), ParamType::Bytes);
        assert_eq!(parse_type("bytes32").unwrap(), ParamType::FixedBytes(32));
        assert_eq!(parse_type("bytes1").unwrap(), ParamType::FixedBytes(1));
        assert_eq!(parse_type("uint8").unwrap(), ParamType::Uint(8));
        assert_eq!(parse_type("int136").unwrap(), ParamType::Int(136));
        // Bare aliases
        assert_eq!(parse_type("uint").unwrap(), ParamType::Uint(256));
        assert_eq!(parse_type("int").unwrap(), ParamType::Int(256));
    }

    #[test]
    fn test_parse_rejects_bad_widths() {
        for bad in [
            "uint0", "uint7", "uint264", "uint1000", "int12", "int257", "bytes0", "bytes33",
        ] {
            assert!(
                matches!(parse_type(bad), Err(AbiError::TypeSyntax(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_rejects_unknown_and_malformed() {
        for bad in [
            "", "  ", "uint256x", "float", "uint 256", "uint256)", "(uint256", "bytes32]",
            "uint256[", "uint256[]]", "uint256,bool", "(uint256,)",
        ] {
            assert!(parse_type(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_parse_arrays() {
        assert_eq!(
            parse_type("uint256[]").unwrap(),
            ParamType::Array(Box::new(ParamType::Uint(256)))
        );
        assert_eq!(
            parse_type("bool[4]").unwrap(),
            ParamType::FixedArray(Box::new(ParamType::Bool), 4)
        );
        // Suffixes wrap left-to-right
        assert_eq!(
            parse_type("uint8[2][]").unwrap(),
            ParamType::Array(Box::new(ParamType::FixedArray(
                Box::new(ParamType::Uint(8)),
                2
            )))
        );
        assert_eq!(
            parse_type("uint8[][3]").unwrap(),
            ParamType::FixedArray(
                Box::new(ParamType::Array(Box::new(ParamType::Uint(8)))),
                3
            )
        );
    }

    #[test]
    fn test_parse_tuples() {
        assert_eq!(parse_type("()").unwrap(), ParamType::Tuple(vec![]));
        assert_eq!(
            parse_type("(uint256,bool)").unwrap(),
            ParamType::Tuple(vec![
                Param::unnamed(ParamType::Uint(256)),
                Param::unnamed(ParamType::Bool),
            ])
        );
        // Nested, with an array suffix on the tuple itself
        assert_eq!(
            parse_type("(uint256,(bytes32,address))[]").unwrap(),
            ParamType::Array(Box::new(ParamType::Tuple(vec![
                Param::unnamed(ParamType::Uint(256)),
                Param::unnamed(ParamType::Tuple(vec![
                    Param::unnamed(ParamType::FixedBytes(32)),
                    Param::unnamed(ParamType::Address),
                ])),
            ])))
        );
    }

    #[test]
    fn test_parse_named_components() {
        let ty = parse_type("(bytes32 uid, address resolver)").unwrap();
        assert_eq!(
            ty,
            ParamType::Tuple(vec![
                Param::named("uid", ParamType::FixedBytes(32)),
                Param::named("resolver", ParamType::Address),
            ])
        );
        // Canonical rendering strips the names again
        assert_eq!(ty.to_string(), "(bytes32,address)");
    }

    #[test]
    fn test_parse_param_list() {
        assert_eq!(parse_param_list("").unwrap(), vec![]);
        assert_eq!(parse_param_list("   ").unwrap(), vec![]);
        assert_eq!(
            parse_param_list("uint256,bool").unwrap(),
            vec![
                Param::unnamed(ParamType::Uint(256)),
                Param::unnamed(ParamType::Bool),
            ]
        );
        assert_eq!(
            parse_param_list("bytes32 uid, address resolver").unwrap(),
            vec![
                Param::named("uid", ParamType::FixedBytes(32)),
                Param::named("resolver", ParamType::Address),
            ]
        );
        // Array of named tuples
        assert_eq!(
            parse_param_list("(uint256 id, string label)[] entries").unwrap(),
            vec![Param::named(
                "entries",
                ParamType::Array(Box::new(ParamType::Tuple(vec![
                    Param::named("id", ParamType::Uint(256)),
                    Param::named("label", ParamType::String),
                ])))
            )]
        );
    }

    #[test]
    fn test_parse_param_list_rejects_malformed() {
        assert!(parse_param_list("uint256,").is_err());
        assert!(parse_param_list(",uint256").is_err());
        assert!(parse_param_list("uint256 a b").is_err());
        assert!(parse_param_list("(uint256").is_err());
    }

    #[test]
    fn test_roundtrip_canonical() {
        for canonical in [
            "uint256",
            "bytes32",
            "address[]",
            "uint8[2][]",
            "(bytes32,address)",
            "(uint256,(bool,bytes)[],string)",
        ] {
            let ty = parse_type(canonical).unwrap();
            assert_eq!(ty.to_string(), canonical);
            assert_eq!(parse_type(&ty.to_string()).unwrap(), ty);
        }
    }
}
