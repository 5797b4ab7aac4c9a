//! ABI encoding (head/tail)
//!
//! The same head/tail pass applies to every ordered (type, value) sequence:
//! top-level call arguments, tuple components, and array elements. Static
//! values are encoded in place in the head; dynamic values leave a uint256
//! offset in the head and their content in the tail, with offsets measured
//! from the start of the enclosing head+tail region.

use coda_primitives::U256;

use crate::error::AbiError;
use crate::token::{I256, Token};
use crate::types::ParamType;

/// Size of one ABI word in bytes
pub(crate) const WORD: usize = 32;

/// Encode a value sequence against its type sequence.
///
/// Fails with [`AbiError::TypeMismatch`] when a value's variant does not
/// structurally match its type, [`AbiError::NumericRange`] when an integer
/// is negative for an unsigned type or outside its bit width, and
/// [`AbiError::LengthMismatch`] when a `bytesN`/`T[N]` value violates the
/// declared length.
pub fn encode(types: &[ParamType], tokens: &[Token]) -> Result<Vec<u8>, AbiError> {
    if types.len() != tokens.len() {
        return Err(AbiError::TypeMismatch {
            expected: format!("{} values", types.len()),
            got: format!("{} values", tokens.len()),
        });
    }
    let pairs: Vec<(&ParamType, &Token)> = types.iter().zip(tokens.iter()).collect();
    encode_sequence(&pairs)
}

/// Encode a single (type, value) pair
pub fn encode_single(ty: &ParamType, token: &Token) -> Result<Vec<u8>, AbiError> {
    encode_sequence(&[(ty, token)])
}

/// Encode a function call: 4-byte selector followed by the argument body
pub fn encode_function_call(
    selector: [u8; 4],
    types: &[ParamType],
    tokens: &[Token],
) -> Result<Vec<u8>, AbiError> {
    let mut out = selector.to_vec();
    out.extend(encode(types, tokens)?);
    Ok(out)
}

/// One head/tail pass over an ordered element sequence
fn encode_sequence(pairs: &[(&ParamType, &Token)]) -> Result<Vec<u8>, AbiError> {
    let head_size: usize = pairs.iter().map(|(ty, _)| ty.head_words() * WORD).sum();

    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for (ty, token) in pairs {
        if ty.is_dynamic() {
            // Offset to this element's tail content, relative to the start
            // of the head+tail region
            let offset = head_size + tail.len();
            head.extend_from_slice(&u256_word(&U256::from(offset)));
            tail.extend(encode_value(ty, token)?);
        } else {
            head.extend(encode_value(ty, token)?);
        }
    }

    head.extend(tail);
    Ok(head)
}

/// Encode one value: in-place form for static types, tail content for
/// dynamic ones
fn encode_value(ty: &ParamType, token: &Token) -> Result<Vec<u8>, AbiError> {
    match (ty, token) {
        (ParamType::Address, Token::Address(addr)) => {
            let mut word = [0u8; WORD];
            word[12..].copy_from_slice(addr.as_bytes());
            Ok(word.to_vec())
        }
        (ParamType::Uint(bits), Token::Uint(value)) => encode_uint(ty, *bits, value),
        (ParamType::Uint(bits), Token::Int(value)) => {
            // A non-negative signed value fits an unsigned slot; a negative
            // one is a range violation, not a shape violation
            if value.is_negative() {
                return Err(AbiError::NumericRange {
                    ty: ty.to_string(),
                    value: value.to_string(),
                });
            }
            encode_uint(ty, *bits, &value.abs())
        }
        (ParamType::Int(bits), Token::Int(value)) => encode_int(ty, *bits, value),
        (ParamType::Int(bits), Token::Uint(value)) => {
            encode_int(ty, *bits, &I256::new(*value, false))
        }
        (ParamType::Bool, Token::Bool(b)) => {
            let mut word = [0u8; WORD];
            word[WORD - 1] = *b as u8;
            Ok(word.to_vec())
        }
        (ParamType::FixedBytes(size), Token::FixedBytes(data)) => {
            if !(1..=WORD).contains(size) {
                return Err(AbiError::TypeSyntax(format!(
                    "bytes size {} outside [1,32]",
                    size
                )));
            }
            if data.len() != *size {
                return Err(AbiError::LengthMismatch {
                    ty: ty.to_string(),
                    expected: *size,
                    got: data.len(),
                });
            }
            // Left-justified, right-zero-padded: the mirror image of
            // numeric padding
            let mut word = [0u8; WORD];
            word[..data.len()].copy_from_slice(data);
            Ok(word.to_vec())
        }
        (ParamType::Bytes, Token::Bytes(data)) => Ok(encode_byte_slice(data)),
        (ParamType::String, Token::String(s)) => Ok(encode_byte_slice(s.as_bytes())),
        (ParamType::Array(inner), Token::Array(items)) => {
            let mut out = u256_word(&U256::from(items.len())).to_vec();
            let pairs: Vec<(&ParamType, &Token)> =
                items.iter().map(|t| (inner.as_ref(), t)).collect();
            out.extend(encode_sequence(&pairs)?);
            Ok(out)
        }
        (ParamType::FixedArray(inner, size), Token::Array(items)) => {
            if items.len() != *size {
                return Err(AbiError::LengthMismatch {
                    ty: ty.to_string(),
                    expected: *size,
                    got: items.len(),
                });
            }
            // No length prefix: the length is part of the type
            let pairs: Vec<(&ParamType, &Token)> =
                items.iter().map(|t| (inner.as_ref(), t)).collect();
            encode_sequence(&pairs)
        }
        (ParamType::Tuple(components), Token::Tuple(fields)) => {
            if fields.len() != components.len() {
                return Err(AbiError::TypeMismatch {
                    expected: format!("tuple of {} components", components.len()),
                    got: format!("tuple of {} fields", fields.len()),
                });
            }
            // Fields pair with components by position; names are not
            // semantic for encoding
            let pairs: Vec<(&ParamType, &Token)> = components
                .iter()
                .zip(fields.iter())
                .map(|(p, (_, t))| (&p.kind, t))
                .collect();
            encode_sequence(&pairs)
        }
        (ty, token) => Err(AbiError::TypeMismatch {
            expected: ty.to_string(),
            got: token.kind_name().to_string(),
        }),
    }
}

/// Big-endian, right-aligned in 32 bytes, zero-padded on the left
fn encode_uint(ty: &ParamType, bits: usize, value: &U256) -> Result<Vec<u8>, AbiError> {
    check_bits(bits)?;
    if bits < 256 {
        let max = (U256::one() << bits) - 1;
        if *value > max {
            return Err(AbiError::NumericRange {
                ty: ty.to_string(),
                value: value.to_string(),
            });
        }
    }
    Ok(u256_word(value).to_vec())
}

/// 32-byte two's complement with sign extension; range is symmetric:
/// [-2^(bits-1), 2^(bits-1) - 1]
fn encode_int(ty: &ParamType, bits: usize, value: &I256) -> Result<Vec<u8>, AbiError> {
    check_bits(bits)?;
    let half = U256::one() << (bits - 1);
    let in_range = if value.is_negative() {
        value.abs() <= half
    } else {
        value.abs() <= half - 1
    };
    if !in_range {
        return Err(AbiError::NumericRange {
            ty: ty.to_string(),
            value: value.to_string(),
        });
    }
    Ok(value.to_word().to_vec())
}

/// The parser only produces valid widths; this guards hand-built trees
fn check_bits(bits: usize) -> Result<(), AbiError> {
    if bits == 0 || bits % 8 != 0 || bits > 256 {
        return Err(AbiError::TypeSyntax(format!("invalid bit width {}", bits)));
    }
    Ok(())
}

/// Length word followed by the raw bytes, right-zero-padded to a word
/// boundary
fn encode_byte_slice(data: &[u8]) -> Vec<u8> {
    let mut out = u256_word(&U256::from(data.len())).to_vec();
    let padded_len = data.len().div_ceil(WORD) * WORD;
    let mut padded = vec![0u8; padded_len];
    padded[..data.len()].copy_from_slice(data);
    out.extend(padded);
    out
}

pub(crate) fn u256_word(value: &U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}
