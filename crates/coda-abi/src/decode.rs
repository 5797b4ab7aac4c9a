//! ABI decoding
//!
//! Mirrors the encoder: one head slot per element, dynamic slots holding
//! offsets into the tail of the same head+tail frame. Every declared length
//! or element count read from the wire is bounds-checked against the
//! remaining buffer before any storage is allocated for it.

use coda_primitives::{Address, U256};

use crate::encode::WORD;
use crate::error::AbiError;
use crate::token::{I256, Token};
use crate::types::{Param, ParamType};

/// Decode a value sequence from ABI-encoded data.
///
/// Trailing bytes beyond the last consumed tail segment are tolerated and
/// ignored; deployed contracts sometimes return padded or over-length data.
/// Use [`decode_strict`] to reject them.
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, AbiError> {
    let kinds: Vec<&ParamType> = types.iter().collect();
    decode_frame(&kinds, data).map(|(tokens, _)| tokens)
}

/// Decode a value sequence, failing with [`AbiError::TrailingData`] if
/// unconsumed bytes remain after the furthest-consumed tail segment.
pub fn decode_strict(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, AbiError> {
    let kinds: Vec<&ParamType> = types.iter().collect();
    let (tokens, consumed) = decode_frame(&kinds, data)?;
    if data.len() > consumed {
        return Err(AbiError::TrailingData(data.len() - consumed));
    }
    Ok(tokens)
}

/// Decode a single value
pub fn decode_single(ty: &ParamType, data: &[u8]) -> Result<Token, AbiError> {
    let mut tokens = decode(std::slice::from_ref(ty), data)?;
    Ok(tokens.pop().expect("decode yields one token per type"))
}

/// Decode one head+tail frame. All offsets inside `frame` are relative to
/// its start. Returns the tokens and the furthest byte consumed, for
/// trailing-data detection.
fn decode_frame(kinds: &[&ParamType], frame: &[u8]) -> Result<(Vec<Token>, usize), AbiError> {
    let head_size: usize = kinds.iter().map(|ty| ty.head_words() * WORD).sum();
    if frame.len() < head_size {
        return Err(AbiError::BufferTooShort {
            needed: head_size,
            have: frame.len(),
        });
    }

    let mut tokens = Vec::with_capacity(kinds.len());
    let mut slot = 0usize;
    let mut extent = head_size;

    for ty in kinds {
        if ty.is_dynamic() {
            let offset = read_pointer(frame, slot, head_size)?;
            let (token, end) = decode_tail(ty, frame, offset)?;
            tokens.push(token);
            extent = extent.max(end);
            slot += WORD;
        } else {
            tokens.push(decode_static(ty, frame, slot)?);
            slot += ty.static_words() * WORD;
        }
    }

    Ok((tokens, extent))
}

/// Decode a static value in place at `offset`
fn decode_static(ty: &ParamType, frame: &[u8], offset: usize) -> Result<Token, AbiError> {
    match ty {
        ParamType::Address => {
            let word = read_word(frame, offset)?;
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(&word[12..]);
            Ok(Token::Address(Address::from_bytes(bytes)))
        }
        ParamType::Uint(_) => Ok(Token::Uint(U256::from_big_endian(&read_word(frame, offset)?))),
        ParamType::Int(_) => Ok(Token::Int(I256::from_word(read_word(frame, offset)?))),
        ParamType::Bool => Ok(Token::Bool(read_word(frame, offset)?[WORD - 1] != 0)),
        ParamType::FixedBytes(size) => {
            if !(1..=WORD).contains(size) {
                return Err(AbiError::TypeSyntax(format!(
                    "bytes size {} outside [1,32]",
                    size
                )));
            }
            let word = read_word(frame, offset)?;
            Ok(Token::FixedBytes(word[..*size].to_vec()))
        }
        ParamType::FixedArray(inner, size) => {
            check_element_span(
                inner.static_words() * WORD,
                *size,
                frame.len().saturating_sub(offset),
            )?;
            let mut items = Vec::with_capacity(*size);
            let mut cursor = offset;
            for _ in 0..*size {
                items.push(decode_static(inner, frame, cursor)?);
                cursor += inner.static_words() * WORD;
            }
            Ok(Token::Array(items))
        }
        ParamType::Tuple(components) => {
            let mut fields = Vec::with_capacity(components.len());
            let mut cursor = offset;
            for (i, p) in components.iter().enumerate() {
                let token = decode_static(&p.kind, frame, cursor)?;
                cursor += p.kind.static_words() * WORD;
                fields.push((field_name(p, i), token));
            }
            Ok(Token::Tuple(fields))
        }
        ParamType::Bytes | ParamType::String | ParamType::Array(_) => {
            unreachable!("dynamic types decode via their tail pointer")
        }
    }
}

/// Decode a dynamic value's tail content at `offset`, returning the token
/// and the end of the consumed region
fn decode_tail(ty: &ParamType, frame: &[u8], offset: usize) -> Result<(Token, usize), AbiError> {
    match ty {
        ParamType::Bytes => {
            let (bytes, end) = read_length_prefixed(frame, offset)?;
            Ok((Token::Bytes(bytes), end))
        }
        ParamType::String => {
            let (bytes, end) = read_length_prefixed(frame, offset)?;
            let s = String::from_utf8(bytes).map_err(|e| AbiError::InvalidUtf8(e.to_string()))?;
            Ok((Token::String(s), end))
        }
        ParamType::Array(inner) => {
            let count_word = read_word(frame, offset)?;
            let count = word_to_usize(&count_word).ok_or_else(|| {
                AbiError::InvalidLength(format!(
                    "element count {} does not fit in usize",
                    U256::from_big_endian(&count_word)
                ))
            })?;
            let content = &frame[offset + WORD..];
            check_element_span(inner.head_words() * WORD, count, content.len())?;
            let kinds: Vec<&ParamType> = std::iter::repeat(inner.as_ref()).take(count).collect();
            let (items, sub) = decode_frame(&kinds, content)?;
            Ok((Token::Array(items), offset + WORD + sub))
        }
        ParamType::FixedArray(inner, size) => {
            // No count prefix: the length is part of the type. The body is
            // its own head+tail frame.
            let content = &frame[offset..];
            check_element_span(inner.head_words() * WORD, *size, content.len())?;
            let kinds: Vec<&ParamType> = std::iter::repeat(inner.as_ref()).take(*size).collect();
            let (items, sub) = decode_frame(&kinds, content)?;
            Ok((Token::Array(items), offset + sub))
        }
        ParamType::Tuple(components) => {
            let content = &frame[offset..];
            let kinds: Vec<&ParamType> = components.iter().map(|p| &p.kind).collect();
            let (values, sub) = decode_frame(&kinds, content)?;
            let fields = components
                .iter()
                .enumerate()
                .zip(values)
                .map(|((i, p), v)| (field_name(p, i), v))
                .collect();
            Ok((Token::Tuple(fields), offset + sub))
        }
        // Static types never carry a tail pointer
        _ => decode_static(ty, frame, offset).map(|t| (t, offset + ty.static_words() * WORD)),
    }
}

/// Bound an element count against the remaining buffer BEFORE allocating
/// storage sized by it. Counts of zero-sized elements are rejected: no
/// buffer length can bound them.
fn check_element_span(elem_size: usize, count: usize, available: usize) -> Result<(), AbiError> {
    if count == 0 {
        return Ok(());
    }
    if elem_size == 0 {
        return Err(AbiError::InvalidLength(format!(
            "array of {} zero-sized elements",
            count
        )));
    }
    let min_size = count.checked_mul(elem_size).ok_or_else(|| {
        AbiError::InvalidLength(format!("element count {} overflows", count))
    })?;
    if min_size > available {
        return Err(AbiError::InvalidLength(format!(
            "{} elements need at least {} bytes, {} available",
            count, min_size, available
        )));
    }
    Ok(())
}

/// Read a dynamic element's offset word and validate it lands inside the
/// frame's tail region
fn read_pointer(frame: &[u8], slot: usize, head_size: usize) -> Result<usize, AbiError> {
    let word = read_word(frame, slot)?;
    let offset = word_to_usize(&word).ok_or_else(|| {
        AbiError::InvalidOffset(format!(
            "offset {} does not fit in usize",
            U256::from_big_endian(&word)
        ))
    })?;
    if offset < head_size || offset > frame.len() {
        return Err(AbiError::InvalidOffset(format!(
            "offset {} outside tail region {}..{}",
            offset,
            head_size,
            frame.len()
        )));
    }
    Ok(offset)
}

/// Length word followed by that many raw bytes; consumption extends over
/// the right-padding to the next word boundary
fn read_length_prefixed(frame: &[u8], offset: usize) -> Result<(Vec<u8>, usize), AbiError> {
    let len_word = read_word(frame, offset)?;
    let len = word_to_usize(&len_word).ok_or_else(|| {
        AbiError::InvalidLength(format!(
            "declared length {} does not fit in usize",
            U256::from_big_endian(&len_word)
        ))
    })?;
    let start = offset + WORD;
    let available = frame.len() - start;
    if len > available {
        return Err(AbiError::InvalidLength(format!(
            "declared length {} exceeds {} remaining bytes",
            len, available
        )));
    }
    let bytes = frame[start..start + len].to_vec();
    let end = (start + len.div_ceil(WORD) * WORD).min(frame.len());
    Ok((bytes, end))
}

fn read_word(frame: &[u8], offset: usize) -> Result<[u8; WORD], AbiError> {
    let end = offset
        .checked_add(WORD)
        .filter(|&end| end <= frame.len())
        .ok_or(AbiError::BufferTooShort {
            needed: offset.saturating_add(WORD),
            have: frame.len(),
        })?;
    let mut word = [0u8; WORD];
    word.copy_from_slice(&frame[offset..end]);
    Ok(word)
}

/// A word only converts to `usize` when its high bytes are zero
fn word_to_usize(word: &[u8; WORD]) -> Option<usize> {
    let split = WORD - std::mem::size_of::<usize>();
    if word[..split].iter().any(|&b| b != 0) {
        return None;
    }
    let mut value = 0usize;
    for &b in &word[split..] {
        value = (value << 8) | b as usize;
    }
    Some(value)
}

fn field_name(param: &Param, index: usize) -> String {
    param.name.clone().unwrap_or_else(|| index.to_string())
}
