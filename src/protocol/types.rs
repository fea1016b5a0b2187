use std::borrow::Cow;
use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::ProtocolError;

// https://kafka.apache.org/protocol.html#protocol_types

pub trait Serialize {
    fn serialize(&self, dst: &mut BytesMut);
}

pub trait Deserialize: Sized {
    fn deserialize(src: &mut Bytes) -> Result<Self, ProtocolError>;
}

/// Bounds-checked reads. A short buffer is a malformed frame, never a panic.
pub trait CheckedBuf: Buf {
    fn require(&self, len: usize, field: &str) -> Result<(), ProtocolError> {
        if self.remaining() < len {
            return Err(ProtocolError::MalformedFrame(format!(
                "{field}: need {len} bytes, {} left",
                self.remaining()
            )));
        }
        Ok(())
    }

    fn checked_u8(&mut self, field: &str) -> Result<u8, ProtocolError> {
        self.require(1, field)?;
        Ok(self.get_u8())
    }

    fn checked_i8(&mut self, field: &str) -> Result<i8, ProtocolError> {
        self.require(1, field)?;
        Ok(self.get_i8())
    }

    fn checked_i16(&mut self, field: &str) -> Result<i16, ProtocolError> {
        self.require(2, field)?;
        Ok(self.get_i16())
    }

    fn checked_i32(&mut self, field: &str) -> Result<i32, ProtocolError> {
        self.require(4, field)?;
        Ok(self.get_i32())
    }
}

impl<B: Buf> CheckedBuf for B {}

/*
    Tagged fields are used to introduce additional features over time
        (https://cwiki.apache.org/confluence/display/KAFKA/KIP-482%3A+The+Kafka+Protocol+should+Support+Optional+Tagged+Fields).
    No tagged fields are ever present here: an empty tagged field array is a single byte of value 0x00.
*/
pub fn put_tag_buffer(dst: &mut BytesMut) {
    dst.put_u8(0);
}

pub fn skip_tag_buffer(src: &mut Bytes) -> Result<(), ProtocolError> {
    _ = src.checked_u8("tag buffer")?;
    Ok(())
}

/// Represents a sequence of bytes. First the length N + 1 is given as a single byte.
/// Then N bytes follow. The bytes are kept opaque and are never validated as UTF-8.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct CompactString(Bytes);

impl CompactString {
    /// Longest payload whose N + 1 still fits the length byte
    pub const MAX_LEN: usize = u8::MAX as usize - 1;

    pub fn new(bytes: impl Into<Bytes>) -> Result<Self, ProtocolError> {
        let bytes = bytes.into();
        if bytes.len() > Self::MAX_LEN {
            return Err(ProtocolError::MalformedFrame(format!(
                "compact string of {} bytes exceeds {}",
                bytes.len(),
                Self::MAX_LEN
            )));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl fmt::Debug for CompactString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

impl Serialize for CompactString {
    fn serialize(&self, dst: &mut BytesMut) {
        // MAX_LEN is enforced on construction
        dst.put_u8(self.0.len() as u8 + 1);
        dst.put_slice(&self.0);
    }
}

impl Deserialize for CompactString {
    fn deserialize(src: &mut Bytes) -> Result<Self, ProtocolError> {
        let len = src.checked_u8("compact string length")?; // string length + 1
        if len == 0 {
            return Err(ProtocolError::MalformedFrame(
                "null compact string where a value is required".to_string(),
            ));
        }
        let string_len = len as usize - 1;
        src.require(string_len, "compact string bytes")?;
        Ok(Self(src.split_to(string_len)))
    }
}

// Represents a sequence of objects of a given type T. Type T can be either a primitive type (e.g. STRING) or a structure.
// First, the length N + 1 is given as a single byte. Then N instances of type T follow.
// A null array is represented with a length of 0.
pub struct CompactArray;

impl CompactArray {
    /// Callers never hold more than 254 items: every array echoes a decoded one or a static table.
    pub fn serialize<T: Serialize>(items: &[T], dst: &mut BytesMut) {
        // COMPACT ARRAY: N+1, because null array is represented as 0, empty array (actual length of 0) is represented as 1
        dst.put_u8(items.len() as u8 + 1);
        for item in items {
            item.serialize(dst);
        }
    }

    /// Decodes an array of structures, each one followed by its own tag buffer.
    /// A null array decodes as empty.
    pub fn deserialize<T: Deserialize>(src: &mut Bytes) -> Result<Vec<T>, ProtocolError> {
        let len = src.checked_u8("compact array length")?; // array length + 1
        let items_len = if len > 1 { len as usize - 1 } else { 0 };

        let mut items = Vec::with_capacity(items_len);
        for _ in 0..items_len {
            let item = T::deserialize(src)?;
            items.push(item);
            skip_tag_buffer(src)?;
        }

        Ok(items)
    }
}

/// 16-byte topic identifier, all zero when the topic is unknown
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct TopicId([u8; 16]);

impl TopicId {
    pub const ZERO: TopicId = TopicId([0; 16]);

    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = hex::encode(self.0);
        write!(
            f,
            "{}-{}-{}-{}-{}",
            &h[..8],
            &h[8..12],
            &h[12..16],
            &h[16..20],
            &h[20..]
        )
    }
}

impl fmt::Debug for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopicId({self})")
    }
}

impl Serialize for TopicId {
    fn serialize(&self, dst: &mut BytesMut) {
        dst.put_slice(&self.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_string_length_is_n_plus_one() {
        let mut b = BytesMut::new();
        CompactString::new("foo").unwrap().serialize(&mut b);
        assert_eq!(&b[..], b"\x04foo");

        let mut b = BytesMut::new();
        CompactString::default().serialize(&mut b);
        assert_eq!(&b[..], &[1]);
    }

    #[test]
    fn compact_string_reads_exactly_n_bytes() {
        // the byte after the name belongs to the next field
        let mut src = Bytes::from_static(b"\x04foo\x00rest");
        let s = CompactString::deserialize(&mut src).unwrap();
        assert_eq!(s.as_bytes(), b"foo");
        assert_eq!(&src[..], b"\x00rest");
    }

    #[test]
    fn compact_string_length_one_is_empty() {
        let mut src = Bytes::from_static(&[1, 0xAA]);
        let s = CompactString::deserialize(&mut src).unwrap();
        assert!(s.is_empty());
        assert_eq!(&src[..], &[0xAA]);
    }

    #[test]
    fn compact_string_keeps_non_utf8_bytes() {
        let mut src = Bytes::from_static(&[3, 0xFF, 0xFE]);
        let s = CompactString::deserialize(&mut src).unwrap();
        assert_eq!(s.as_bytes(), &[0xFF, 0xFE]);
    }

    #[test]
    fn compact_string_rejects_null_and_truncation() {
        let err = CompactString::deserialize(&mut Bytes::from_static(&[0])).unwrap_err();
        assert!(err.is_malformed());

        let err = CompactString::deserialize(&mut Bytes::from_static(b"\x05ab")).unwrap_err();
        assert!(err.is_malformed());

        let err = CompactString::deserialize(&mut Bytes::new()).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn compact_string_too_long_for_length_byte() {
        assert!(CompactString::new(vec![b'a'; CompactString::MAX_LEN]).is_ok());
        assert!(CompactString::new(vec![b'a'; CompactString::MAX_LEN + 1]).is_err());
    }

    #[test]
    fn compact_array_of_strings() {
        let mut src = Bytes::from_static(b"\x03\x02a\x00\x03bc\x00tail");
        let items = CompactArray::deserialize::<CompactString>(&mut src).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_bytes(), b"a");
        assert_eq!(items[1].as_bytes(), b"bc");
        assert_eq!(&src[..], b"tail");
    }

    #[test]
    fn compact_array_null_and_empty() {
        let items = CompactArray::deserialize::<CompactString>(&mut Bytes::from_static(&[0])).unwrap();
        assert!(items.is_empty());
        let items = CompactArray::deserialize::<CompactString>(&mut Bytes::from_static(&[1])).unwrap();
        assert!(items.is_empty());

        let mut b = BytesMut::new();
        CompactArray::serialize::<CompactString>(&[], &mut b);
        assert_eq!(&b[..], &[1]);
    }

    #[test]
    fn compact_array_missing_entries() {
        let err = CompactArray::deserialize::<CompactString>(&mut Bytes::from_static(b"\x03\x02a\x00"))
            .unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn checked_reads_stop_at_the_end() {
        let mut src = Bytes::from_static(&[0x01, 0x02, 0x03]);
        assert_eq!(src.checked_i16("a").unwrap(), 0x0102);
        assert!(src.checked_i32("b").is_err());
        assert_eq!(src.checked_i8("c").unwrap(), 3);
        assert!(src.checked_u8("d").is_err());
    }

    #[test]
    fn topic_id_formats_as_uuid() {
        assert_eq!(
            TopicId::ZERO.to_string(),
            "00000000-0000-0000-0000-000000000000"
        );
        let id = TopicId::from_bytes([
            0x71, 0xa5, 0x9a, 0x51, 0x00, 0x00, 0x40, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x91,
        ]);
        assert_eq!(id.to_string(), "71a59a51-0000-4000-8000-000000000091");

        let mut b = BytesMut::new();
        id.serialize(&mut b);
        assert_eq!(&b[..4], &[0x71, 0xa5, 0x9a, 0x51]);
        assert_eq!(b.len(), 16);
    }
}
