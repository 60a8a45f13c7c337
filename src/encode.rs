use ethereum_types::U256;
use std::io::Write;
use std::{io, mem};

/// Encoder writes SSZ field bytes either straight into an output stream or
/// into a pre-sized buffer. It has the following behaviors:
///
/// 1. The streaming mode does not buffer: every field is written to the
///    wrapped stream the moment it is defined. Callers that want buffering
///    or flushing wrap the stream themselves.
///
/// 2. Individual encoding operations do not report stream errors. The first
///    write failure is latched, all subsequent operations become no-ops, and
///    the error is surfaced once when encoding finishes. This keeps schema
///    bodies free of error plumbing.
///
/// 3. Offsets for dynamic fields are tracked internally: the offset-phase
///    operation of a dynamic field emits the current dynamic-region cursor
///    and advances it by the field's serialized length, so the schema only
///    has to name the field twice (offset slot, then content).
///
/// 4. The contents of dynamic fields are not stashed away to be appended
///    later; the schema provides them again in the content phase. This is
///    what keeps the encoder allocation-free.
///
/// 5. Declared size limits are not enforced while encoding. A caller
///    providing oversized data is a programming error that a runtime check
///    would not fix.
///
/// In buffer mode the buffer must be exactly the serialized length of the
/// value (see the size helpers); writing past its end panics.
pub(crate) struct Encoder<'a> {
    out: Output<'a>,
    err: Option<io::Error>,
    offset: u32,
}

enum Output<'a> {
    Stream(&'a mut dyn Write),
    Buffer(&'a mut [u8]),
}

impl<'a> Encoder<'a> {
    pub(crate) fn to_stream(writer: &'a mut dyn Write) -> Self {
        Encoder {
            out: Output::Stream(writer),
            err: None,
            offset: 0,
        }
    }

    pub(crate) fn to_buffer(buffer: &'a mut [u8]) -> Self {
        Encoder {
            out: Output::Buffer(buffer),
            err: None,
            offset: 0,
        }
    }

    /// Whether a stream write has failed and latched the encoder.
    pub(crate) fn failed(&self) -> bool {
        self.err.is_some()
    }

    /// Consumes the encoder, surfacing the latched write error if any.
    pub(crate) fn finish(self) -> io::Result<()> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        match &mut self.out {
            Output::Stream(writer) => {
                if self.err.is_some() {
                    return;
                }
                if let Err(err) = writer.write_all(bytes) {
                    self.err = Some(err);
                }
            }
            Output::Buffer(buffer) => {
                let taken = mem::take(buffer);
                let (head, rest) = taken.split_at_mut(bytes.len());
                head.copy_from_slice(bytes);
                *buffer = rest;
            }
        }
    }

    pub(crate) fn write_uint64(&mut self, n: u64) {
        self.write_bytes(&n.to_le_bytes());
    }

    /// A missing `uint256` serializes as 32 zero bytes.
    pub(crate) fn write_uint256(&mut self, n: &Option<U256>) {
        let mut bytes = [0u8; 32];
        if let Some(n) = n {
            n.to_little_endian(&mut bytes);
        }
        self.write_bytes(&bytes);
    }

    /// Emits the current dynamic-region cursor as a 4-byte offset slot and
    /// advances the cursor past the content it stands for.
    pub(crate) fn write_offset(&mut self, content_size: u32) {
        let offset = self.offset;
        self.write_bytes(&offset.to_le_bytes());
        self.offset = offset.wrapping_add(content_size);
    }

    /// Re-anchors the dynamic-region cursor at the fixed size of the value
    /// whose dynamic region is about to be emitted. Offsets are relative to
    /// their own container, so every dynamic container and every list of
    /// dynamic items resets the cursor before its content walk.
    pub(crate) fn start_dynamics(&mut self, offset: u32) {
        self.offset = offset;
    }
}
