//! Provides encoding (serialization) and decoding (deserialization) in the
//! SimpleSerialize (SSZ) format, plus lazy zero-copy partial reads over
//! serialized payloads.
//!
//! Types describe their wire layout once, by walking a [`Codec`] over their
//! fields in declaration order, and that single schema drives encoding and
//! decoding alike. Encoding is streaming and allocation-free: fixed-width
//! fields are written directly, dynamic fields emit a 4-byte offset slot in
//! the fixed region and their content afterwards, with the codec tracking
//! the dynamic-region cursor. Decoding mirrors it, validating every offset
//! and enforcing the declared maxima.
//!
//! ## Example
//!
//! ```rust
//! use ssz_codec::{size_of_dynamic_bytes, Codec, DynamicObject, SszObject};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Extra {
//!     epoch: u64,
//!     data: Vec<u8>,
//! }
//!
//! impl SszObject for Extra {
//!     fn ssz_define(&mut self, codec: &mut Codec<'_>) {
//!         codec.define_uint64(&mut self.epoch);
//!         codec.define_dynamic_bytes_offset(&mut self.data);
//!         codec.define_dynamic_bytes_content(&mut self.data, 32);
//!     }
//! }
//!
//! impl DynamicObject for Extra {
//!     fn ssz_size(&self, fixed: bool) -> u32 {
//!         let mut size = 8 + 4;
//!         if !fixed {
//!             size += size_of_dynamic_bytes(&self.data);
//!         }
//!         size
//!     }
//! }
//!
//! let mut value = Extra { epoch: 3, data: vec![1, 2] };
//! let bytes = value.as_ssz_bytes();
//! assert_eq!(bytes, vec![3, 0, 0, 0, 0, 0, 0, 0, 12, 0, 0, 0, 1, 2]);
//! assert_eq!(Extra::from_ssz_bytes(&bytes), Ok(value));
//! ```
//!
//! Partial reads go through [`ReaderSource`]: composite types mirror their
//! schema with a reader struct exposing one accessor per field, and any
//! field at any depth is located through offset arithmetic alone, without
//! materializing the values in between.

mod codec;
mod decode;
mod encode;
mod reader;
mod size;

pub use codec::Codec;
pub use decode::DecodeError;
pub use reader::{
    ByteArrayReader, DynamicBytesReader, ListReader, ReadPos, Reader, ReaderSource, Uint256Reader,
    Uint64Reader,
};
pub use size::{
    size_of_dynamic_bytes, size_of_slice_of_dynamic_bytes, size_of_slice_of_dynamic_objects,
    size_of_slice_of_static_bytes, size_of_slice_of_static_objects, size_of_slice_of_uint64s,
};

use std::io::{self, Write};

/// The number of bytes used to represent an offset.
pub const BYTES_PER_LENGTH_OFFSET: usize = 4;

/// Schema contract shared by every SSZ value: emit the fields, in SSZ
/// declaration order, into whichever coder is live inside the codec.
///
/// The receiver is mutable because the same walk serves both directions:
/// encoding reads through the borrows handed to the `define_*` calls,
/// decoding writes through them.
pub trait SszObject {
    fn ssz_define(&mut self, codec: &mut Codec<'_>);
}

/// An SSZ value whose serialized length is known from the type alone.
pub trait StaticObject: SszObject {
    /// Serialized length in bytes.
    fn ssz_size() -> u32;

    /// Serializes the value into a stream. The first write failure stops
    /// all output and is returned here.
    fn encode_to_stream<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        let mut codec = Codec::to_stream(writer);
        self.ssz_define(&mut codec);
        codec.finish_encode()
    }

    /// Serializes the value into a pre-sized buffer.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is not exactly [`ssz_size`](Self::ssz_size) bytes.
    fn encode_to_bytes(&mut self, buffer: &mut [u8]) {
        assert_eq!(
            buffer.len(),
            Self::ssz_size() as usize,
            "buffer must match the serialized length"
        );
        let mut codec = Codec::to_buffer(buffer);
        self.ssz_define(&mut codec);
    }

    /// Serializes the value into a freshly allocated vector.
    fn as_ssz_bytes(&mut self) -> Vec<u8> {
        let mut bytes = vec![0u8; Self::ssz_size() as usize];
        self.encode_to_bytes(&mut bytes);
        bytes
    }

    /// Deserializes `bytes` into the value. The payload must be exactly the
    /// value's serialized length.
    fn decode_from_bytes(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        let expected = Self::ssz_size() as usize;
        if bytes.len() != expected {
            return Err(DecodeError::InvalidByteLength {
                len: bytes.len(),
                expected,
            });
        }
        let mut codec = Codec::from_payload(bytes);
        self.ssz_define(&mut codec);
        codec.finish_decode()
    }

    /// Deserializes `bytes` into a fresh value.
    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError>
    where
        Self: Default,
    {
        let mut value = Self::default();
        value.decode_from_bytes(bytes)?;
        Ok(value)
    }
}

/// An SSZ value whose serialized length depends on its content.
pub trait DynamicObject: SszObject {
    /// Serialized length in bytes: the fixed region alone when `fixed`, the
    /// whole value otherwise.
    fn ssz_size(&self, fixed: bool) -> u32;

    /// Serializes the value into a stream. The first write failure stops
    /// all output and is returned here.
    fn encode_to_stream<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        let fixed = self.ssz_size(true);
        let mut codec = Codec::to_stream(writer);
        codec.start_dynamics(fixed);
        self.ssz_define(&mut codec);
        codec.finish_encode()
    }

    /// Serializes the value into a pre-sized buffer.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is not exactly `self.ssz_size(false)` bytes.
    fn encode_to_bytes(&mut self, buffer: &mut [u8]) {
        assert_eq!(
            buffer.len(),
            self.ssz_size(false) as usize,
            "buffer must match the serialized length"
        );
        let fixed = self.ssz_size(true);
        let mut codec = Codec::to_buffer(buffer);
        codec.start_dynamics(fixed);
        self.ssz_define(&mut codec);
    }

    /// Serializes the value into a freshly allocated vector.
    fn as_ssz_bytes(&mut self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.ssz_size(false) as usize];
        self.encode_to_bytes(&mut bytes);
        bytes
    }

    /// Deserializes `bytes` into the value, enforcing offset validity and
    /// the declared maxima of every dynamic field.
    fn decode_from_bytes(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        if bytes.len() > u32::MAX as usize {
            return Err(DecodeError::InvalidByteLength {
                len: bytes.len(),
                expected: u32::MAX as usize,
            });
        }
        let fixed = self.ssz_size(true);
        let mut codec = Codec::from_payload(bytes);
        codec.begin_root(bytes.len() as u32, fixed);
        self.ssz_define(&mut codec);
        codec.finish_decode()
    }

    /// Deserializes `bytes` into a fresh value.
    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError>
    where
        Self: Default,
    {
        let mut value = Self::default();
        value.decode_from_bytes(bytes)?;
        Ok(value)
    }
}
