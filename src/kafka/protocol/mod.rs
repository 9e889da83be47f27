// Consumer protocol primitives
//
// The consumer protocol payloads (subscription, member assignment) and the
// leader's group assignment are opaque `bytes` to the coordinator, so the
// kafka-protocol crate does not model them. These helpers encode and decode
// the handful of classic (non-flexible) primitives they are made of:
//
//   int16 / int32          big-endian
//   string                 int16 length + UTF-8 bytes
//   bytes                  int32 length + raw bytes (-1 = null)
//   array                  int32 count + elements

pub mod decoding;
pub mod encoding;

pub use decoding::{read_array_len, read_bytes, read_i16, read_i32, read_string};
pub use encoding::{write_array_len, write_bytes, write_string};
