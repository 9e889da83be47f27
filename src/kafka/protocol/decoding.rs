// Primitive decoding for consumer protocol payloads
//
// Readers never panic on short input: every read checks `remaining()` first
// and reports a `CorruptMessage` naming the field being read.

use bytes::{Buf, Bytes};

use crate::kafka::error::{KafkaError, Result};

fn ensure_remaining<B: Buf>(buf: &B, needed: usize, field: &str) -> Result<()> {
    if buf.remaining() < needed {
        return Err(KafkaError::corrupt(format!(
            "Unexpected end of data reading {}: need {} bytes, have {}",
            field,
            needed,
            buf.remaining()
        )));
    }
    Ok(())
}

pub fn read_i16<B: Buf>(buf: &mut B, field: &str) -> Result<i16> {
    ensure_remaining(buf, 2, field)?;
    Ok(buf.get_i16())
}

pub fn read_i32<B: Buf>(buf: &mut B, field: &str) -> Result<i32> {
    ensure_remaining(buf, 4, field)?;
    Ok(buf.get_i32())
}

/// Read an int16 length-prefixed string, `None` for a null (negative length) string
pub fn read_string<B: Buf>(buf: &mut B, field: &str) -> Result<Option<String>> {
    let len = read_i16(buf, field)?;
    if len < 0 {
        return Ok(None);
    }

    let len = len as usize;
    ensure_remaining(buf, len, field)?;

    let mut raw = vec![0u8; len];
    buf.copy_to_slice(&mut raw);

    String::from_utf8(raw)
        .map(Some)
        .map_err(|e| KafkaError::corrupt(format!("Invalid UTF-8 in {}: {}", field, e)))
}

/// Read an int32 length-prefixed byte sequence, `None` for null
pub fn read_bytes<B: Buf>(buf: &mut B, field: &str) -> Result<Option<Bytes>> {
    let len = read_i32(buf, field)?;
    if len < 0 {
        return Ok(None);
    }

    let len = len as usize;
    ensure_remaining(buf, len, field)?;
    Ok(Some(buf.copy_to_bytes(len)))
}

/// Read an int32 array count, `None` for a null array
///
/// `min_element_size` is the smallest encoding of one element; a count that
/// could not possibly fit in the remaining data is rejected up front so a
/// corrupt length never drives a huge allocation.
pub fn read_array_len<B: Buf>(
    buf: &mut B,
    min_element_size: usize,
    field: &str,
) -> Result<Option<usize>> {
    let len = read_i32(buf, field)?;
    if len < 0 {
        return Ok(None);
    }

    let len = len as usize;
    let needed = len.saturating_mul(min_element_size);
    if needed > buf.remaining() {
        return Err(KafkaError::corrupt(format!(
            "{} count {} exceeds remaining data {}",
            field,
            len,
            buf.remaining()
        )));
    }
    Ok(Some(len))
}
