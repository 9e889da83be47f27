// Primitive encoding for consumer protocol payloads
//
// Every writer checks the value against its length prefix first, so a value
// that does not fit fails with `KafkaError::Encoding` before anything
// is written for it.

use bytes::BufMut;

use crate::kafka::constants::{MAX_STRING_LENGTH, NULL_BYTES_LENGTH};
use crate::kafka::error::{KafkaError, Result};

/// Write an int16 length-prefixed string
///
/// `field` names the value in the error message (e.g. "topic name").
pub fn write_string<B: BufMut>(buf: &mut B, value: &str, field: &str) -> Result<()> {
    let bytes = value.as_bytes();
    if bytes.len() > MAX_STRING_LENGTH {
        return Err(KafkaError::Encoding(format!(
            "{} is {} bytes, exceeds int16 length prefix (max {})",
            field,
            bytes.len(),
            MAX_STRING_LENGTH
        )));
    }

    buf.put_i16(bytes.len() as i16);
    buf.put_slice(bytes);
    Ok(())
}

/// Write an int32 length-prefixed byte sequence, `None` encodes as null (-1)
pub fn write_bytes<B: BufMut>(buf: &mut B, data: Option<&[u8]>, field: &str) -> Result<()> {
    match data {
        Some(data) => {
            let len = i32::try_from(data.len()).map_err(|_| {
                KafkaError::Encoding(format!(
                    "{} is {} bytes, exceeds int32 length prefix",
                    field,
                    data.len()
                ))
            })?;
            buf.put_i32(len);
            buf.put_slice(data);
        }
        None => buf.put_i32(NULL_BYTES_LENGTH),
    }
    Ok(())
}

/// Write an int32 array element count
pub fn write_array_len<B: BufMut>(buf: &mut B, len: usize, field: &str) -> Result<()> {
    let len = i32::try_from(len).map_err(|_| {
        KafkaError::Encoding(format!("{} has {} elements, exceeds int32 count", field, len))
    })?;
    buf.put_i32(len);
    Ok(())
}
