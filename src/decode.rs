use crate::BYTES_PER_LENGTH_OFFSET;
use ethereum_types::U256;
use smallvec::SmallVec;

/// Returned when SSZ decoding or partial reading fails.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DecodeError {
    /// The bytes available were too short for the slot being read.
    InvalidByteLength { len: usize, expected: usize },
    /// An offset points "backwards" into the fixed portion of the container,
    /// double-decoding bytes that were already read as fixed-length fields.
    OffsetIntoFixedPortion(u32),
    /// The first offset does not point to the byte immediately following the
    /// fixed portion, leaving a gap before the first variable-length field.
    OffsetSkipsVariableBytes(u32),
    /// An offset points to bytes prior to the previous offset, which would
    /// give some field a negative length.
    OffsetsAreDecreasing(u32),
    /// An offset references bytes past the end of its container.
    OffsetOutOfBounds(u32),
    /// The leading offset table of a list of variable-length items is not a
    /// whole number of offset slots.
    InvalidListFixedBytesLen(u32),
    /// A list of fixed-size items whose payload is not a whole number of
    /// items.
    InvalidListItemBytes { len: usize, item_size: usize },
    /// A variable-length field is larger than its declared maximum, counted
    /// in bytes or in items depending on the field.
    SizeExceedsLimit { len: usize, max: usize },
    /// Some item has a fixed length of zero. This is illegal.
    ZeroLengthItem,
    /// A byte index fell outside the payload while resolving a lazy read.
    OutOfBoundsByte { i: usize },
    /// A list index past the end of the list.
    OutOfBounds { i: usize, len: usize },
}

/// One nested container (or list of dynamic items) being decoded. Offsets
/// read during the fixed-region walk are queued here so the content-phase
/// operations can derive each field's length from its neighbor.
struct Frame {
    start: u32,
    end: u32,
    fixed_end: u32,
    offsets: SmallVec<[u32; 8]>,
    consumed: usize,
}

/// Decoder is the mirror of the encoder: it walks the same schema over an
/// input payload, reading fixed-width fields at a cursor and resolving
/// dynamic fields through the offsets queued on the innermost frame.
///
/// Like the encoder it latches its first error; every later operation is a
/// no-op and the error surfaces once from the decoding entry point. All
/// reads are bounded by the innermost frame, so a malformed nested value
/// cannot pull in its sibling's bytes.
pub(crate) struct Decoder<'a> {
    input: &'a [u8],
    pos: u32,
    err: Option<DecodeError>,
    frames: SmallVec<[Frame; 4]>,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(input: &'a [u8]) -> Self {
        Decoder {
            input,
            pos: 0,
            err: None,
            frames: SmallVec::new(),
        }
    }

    /// Consumes the decoder, surfacing the latched error if any.
    pub(crate) fn finish(self) -> Result<(), DecodeError> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn latch(&mut self, err: DecodeError) {
        if self.err.is_none() {
            self.err = Some(err);
        }
    }

    pub(crate) fn seek(&mut self, pos: u32) {
        if self.err.is_none() {
            self.pos = pos;
        }
    }

    /// Reads `len` bytes at the cursor, bounded by the innermost frame.
    fn read_bytes(&mut self, len: u32) -> Option<&'a [u8]> {
        if self.err.is_some() {
            return None;
        }
        let bound = self
            .frames
            .last()
            .map_or(self.input.len() as u32, |frame| frame.end);
        let start = self.pos;
        let end = match start.checked_add(len) {
            Some(end) if end <= bound => end,
            _ => {
                self.latch(DecodeError::InvalidByteLength {
                    len: bound.saturating_sub(start) as usize,
                    expected: len as usize,
                });
                return None;
            }
        };
        self.pos = end;
        Some(&self.input[start as usize..end as usize])
    }

    pub(crate) fn read_uint64(&mut self, n: &mut u64) {
        if let Some(bytes) = self.read_bytes(8) {
            let mut array = [0u8; 8];
            array.copy_from_slice(bytes);
            *n = u64::from_le_bytes(array);
        }
    }

    /// 32 zero bytes deserialize to a present zero value.
    pub(crate) fn read_uint256(&mut self, n: &mut Option<U256>) {
        if let Some(bytes) = self.read_bytes(32) {
            *n = Some(U256::from_little_endian(bytes));
        }
    }

    pub(crate) fn read_static_bytes(&mut self, blob: &mut [u8]) {
        if let Some(bytes) = self.read_bytes(blob.len() as u32) {
            blob.copy_from_slice(bytes);
        }
    }

    pub(crate) fn read_array_of_static_bytes<const N: usize>(&mut self, blobs: &mut [[u8; N]]) {
        for blob in blobs.iter_mut() {
            self.read_static_bytes(blob);
        }
    }

    /// Offset-phase read of a dynamic field: consumes the 4-byte slot and
    /// validates it against the innermost frame before queuing it. The first
    /// offset must land exactly on the end of the fixed region; later ones
    /// must stay within the container and never decrease.
    pub(crate) fn read_offset(&mut self) {
        let Some(bytes) = self.read_bytes(BYTES_PER_LENGTH_OFFSET as u32) else {
            return;
        };
        let mut array = [0u8; BYTES_PER_LENGTH_OFFSET];
        array.copy_from_slice(bytes);
        let offset = u32::from_le_bytes(array);

        let Some(frame) = self.frames.last() else {
            debug_assert!(false, "dynamic field defined outside a dynamic container");
            return;
        };
        let fixed = frame.fixed_end - frame.start;
        let len = frame.end - frame.start;
        let first = frame.offsets.is_empty();
        let last = frame.offsets.last().copied();

        let err = if first && offset < fixed {
            Some(DecodeError::OffsetIntoFixedPortion(offset))
        } else if first && offset > fixed {
            Some(DecodeError::OffsetSkipsVariableBytes(offset))
        } else if offset > len {
            Some(DecodeError::OffsetOutOfBounds(offset))
        } else if last.map_or(false, |last| offset < last) {
            Some(DecodeError::OffsetsAreDecreasing(offset))
        } else {
            None
        };
        if let Some(err) = err {
            self.latch(err);
            return;
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.offsets.push(offset);
        }
    }

    /// Content-phase counterpart of `read_offset`: pops the next queued
    /// offset and derives the field's absolute extent from its neighbor, or
    /// from the container end for the trailing field.
    pub(crate) fn next_content_slot(&mut self) -> Option<(u32, u32)> {
        if self.err.is_some() {
            return None;
        }
        let frame = self.frames.last_mut()?;
        let index = frame.consumed;
        let Some(&local) = frame.offsets.get(index) else {
            debug_assert!(false, "content read without a matching offset read");
            return None;
        };
        frame.consumed += 1;
        let start = frame.start + local;
        let end = match frame.offsets.get(index + 1) {
            Some(&next) => frame.start + next,
            None => frame.end,
        };
        Some((start, end))
    }

    /// Enters a nested dynamic value spanning `start..end` whose fixed
    /// region is `fixed_size` bytes. A frame is pushed even on a latched
    /// error so that every `begin_dynamic` pairs with an `end_dynamic`.
    pub(crate) fn begin_dynamic(&mut self, start: u32, end: u32, fixed_size: u32) {
        if self.err.is_none() {
            if fixed_size > end - start {
                self.latch(DecodeError::InvalidByteLength {
                    len: (end - start) as usize,
                    expected: fixed_size as usize,
                });
            } else {
                self.pos = start;
            }
        }
        self.frames.push(Frame {
            start,
            end,
            fixed_end: start.saturating_add(fixed_size).min(end),
            offsets: SmallVec::new(),
            consumed: 0,
        });
    }

    pub(crate) fn end_dynamic(&mut self) {
        if let Some(frame) = self.frames.pop() {
            debug_assert!(
                self.err.is_some() || frame.consumed == frame.offsets.len(),
                "schema did not consume every dynamic field it defined"
            );
            self.pos = frame.end;
        }
    }

    /// Validates the leading offset table of a list of dynamic items
    /// spanning `start..end` and enters it as a frame of its own. Returns
    /// the item count; the caller re-reads the table through `read_offset`
    /// so every slot gets the usual validation.
    pub(crate) fn read_list_header(&mut self, start: u32, end: u32, max_items: u32) -> Option<u32> {
        if self.err.is_some() {
            return None;
        }
        if start == end {
            return Some(0);
        }
        self.pos = start;
        let bytes = self.read_bytes(BYTES_PER_LENGTH_OFFSET as u32)?;
        let mut array = [0u8; BYTES_PER_LENGTH_OFFSET];
        array.copy_from_slice(bytes);
        let first = u32::from_le_bytes(array);

        let slot = BYTES_PER_LENGTH_OFFSET as u32;
        if first % slot != 0 || first < slot {
            self.latch(DecodeError::InvalidListFixedBytesLen(first));
            return None;
        }
        if first > end - start {
            self.latch(DecodeError::OffsetOutOfBounds(first));
            return None;
        }
        let count = first / slot;
        if count > max_items {
            self.latch(DecodeError::SizeExceedsLimit {
                len: count as usize,
                max: max_items as usize,
            });
            return None;
        }
        self.pos = start;
        self.frames.push(Frame {
            start,
            end,
            fixed_end: start + first,
            offsets: SmallVec::new(),
            consumed: 0,
        });
        Some(count)
    }

    /// Content-phase header of a list of fixed-size items: derives the item
    /// count from the slot length and positions the cursor on the first
    /// item. Returns `None` (latching) when the payload is not a whole
    /// number of items or the count exceeds its maximum.
    pub(crate) fn read_static_list_header(&mut self, item_size: u32, max_items: u32) -> Option<u32> {
        let (start, end) = self.next_content_slot()?;
        if item_size == 0 {
            self.latch(DecodeError::ZeroLengthItem);
            return None;
        }
        let len = end - start;
        if len % item_size != 0 {
            self.latch(DecodeError::InvalidListItemBytes {
                len: len as usize,
                item_size: item_size as usize,
            });
            return None;
        }
        let count = len / item_size;
        if count > max_items {
            self.latch(DecodeError::SizeExceedsLimit {
                len: count as usize,
                max: max_items as usize,
            });
            return None;
        }
        self.pos = start;
        Some(count)
    }

    pub(crate) fn read_dynamic_bytes_content(&mut self, blob: &mut Vec<u8>, max_size: u32) {
        let Some((start, end)) = self.next_content_slot() else {
            return;
        };
        let len = end - start;
        if len > max_size {
            self.latch(DecodeError::SizeExceedsLimit {
                len: len as usize,
                max: max_size as usize,
            });
            return;
        }
        self.pos = start;
        if let Some(bytes) = self.read_bytes(len) {
            blob.clear();
            blob.extend_from_slice(bytes);
        }
    }

    pub(crate) fn read_slice_of_uint64s_content(&mut self, ns: &mut Vec<u64>, max_items: u32) {
        let Some(count) = self.read_static_list_header(8, max_items) else {
            return;
        };
        if let Some(bytes) = self.read_bytes(count * 8) {
            ns.clear();
            ns.reserve(count as usize);
            for chunk in bytes.chunks_exact(8) {
                let mut array = [0u8; 8];
                array.copy_from_slice(chunk);
                ns.push(u64::from_le_bytes(array));
            }
        }
    }

    pub(crate) fn read_slice_of_static_bytes_content<const N: usize>(
        &mut self,
        blobs: &mut Vec<[u8; N]>,
        max_items: u32,
    ) {
        let Some(count) = self.read_static_list_header(N as u32, max_items) else {
            return;
        };
        if let Some(bytes) = self.read_bytes(count * N as u32) {
            blobs.clear();
            blobs.reserve(count as usize);
            for chunk in bytes.chunks_exact(N) {
                let mut array = [0u8; N];
                array.copy_from_slice(chunk);
                blobs.push(array);
            }
        }
    }

    pub(crate) fn read_slice_of_dynamic_bytes_content(
        &mut self,
        blobs: &mut Vec<Vec<u8>>,
        max_items: u32,
        max_size: u32,
    ) {
        let Some((start, end)) = self.next_content_slot() else {
            return;
        };
        let Some(count) = self.read_list_header(start, end, max_items) else {
            return;
        };
        blobs.clear();
        if count == 0 {
            return;
        }
        for _ in 0..count {
            self.read_offset();
        }
        blobs.reserve(count as usize);
        for _ in 0..count {
            let mut blob = Vec::new();
            self.read_dynamic_bytes_content(&mut blob, max_size);
            blobs.push(blob);
        }
        self.end_dynamic();
    }
}
