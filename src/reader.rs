use crate::{DecodeError, BYTES_PER_LENGTH_OFFSET};
use ethereum_types::U256;
use std::marker::PhantomData;

/// Position of a value inside a serialized payload: where the value (or its
/// offset slot) begins, where the following dynamic field's offset slot sits
/// (zero when this is the last dynamic field, in which case the container
/// end bounds the value), and where the enclosing container ends.
///
/// This triple is everything a reader needs to answer "where does my value
/// end?" without walking the fixed region of its parent on every access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadPos {
    pub offset: u32,
    pub next_offset: u32,
    pub container_end: u32,
}

impl ReadPos {
    /// Child position of a static field at `local_offset` into this value.
    pub fn add(self, local_offset: u32) -> ReadPos {
        ReadPos {
            offset: self.offset + local_offset,
            next_offset: 0,
            container_end: self.container_end,
        }
    }

    /// Child position of a dynamic field whose offset slot is at
    /// `local_offset` and whose successor's slot is at `local_next_offset`.
    pub fn add_with_next(self, local_offset: u32, local_next_offset: u32) -> ReadPos {
        ReadPos {
            offset: self.offset + local_offset,
            next_offset: self.offset + local_next_offset,
            container_end: self.container_end,
        }
    }
}

/// Read-only view over a serialized payload. Readers borrow their bytes from
/// here and never allocate; they stay valid exactly as long as the payload.
pub struct ReaderSource<'a> {
    payload: &'a [u8],
}

impl<'a> ReaderSource<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        ReaderSource { payload }
    }

    /// Positions a reader over the whole payload.
    pub fn root<R: Reader>(&self) -> R {
        R::init(
            ReadPos {
                offset: 0,
                next_offset: 0,
                container_end: self.payload.len() as u32,
            },
            0,
        )
    }

    /// Borrows `start..end` of the payload.
    pub(crate) fn bytes(&self, start: u32, end: u32) -> Result<&'a [u8], DecodeError> {
        if start > end {
            return Err(DecodeError::OutOfBoundsByte { i: start as usize });
        }
        self.payload
            .get(start as usize..end as usize)
            .ok_or(DecodeError::OutOfBoundsByte { i: end as usize })
    }

    /// Dereferences the 4-byte offset slot at `at`.
    pub fn offset_at(&self, at: u32) -> Result<u32, DecodeError> {
        let end = at
            .checked_add(BYTES_PER_LENGTH_OFFSET as u32)
            .ok_or(DecodeError::OutOfBoundsByte { i: at as usize })?;
        let bytes = self.bytes(at, end)?;
        let mut array = [0u8; BYTES_PER_LENGTH_OFFSET];
        array.copy_from_slice(bytes);
        Ok(u32::from_le_bytes(array))
    }

    /// Resolves a dynamic value's absolute extent from its offset slot. The
    /// offsets stored in the payload are relative to their container, so the
    /// container's absolute start is needed as `base`. The result is a
    /// position whose `offset` is the content start and whose
    /// `container_end` is the content end.
    pub fn resolve(&self, slot: ReadPos, base: u32) -> Result<ReadPos, DecodeError> {
        let start = base
            .checked_add(self.offset_at(slot.offset)?)
            .ok_or(DecodeError::OffsetOutOfBounds(slot.offset))?;
        let end = if slot.next_offset == 0 {
            slot.container_end
        } else {
            base.checked_add(self.offset_at(slot.next_offset)?)
                .ok_or(DecodeError::OffsetOutOfBounds(slot.next_offset))?
        };
        if start > end || end as usize > self.payload.len() {
            return Err(DecodeError::OutOfBoundsByte { i: end as usize });
        }
        Ok(ReadPos {
            offset: start,
            next_offset: 0,
            container_end: end,
        })
    }
}

/// A lazy reader over one value of a serialized payload. Composite types
/// mirror their schema with a reader struct holding a `ReadPos` and one
/// accessor per field, so any field at any depth can be addressed without
/// decoding its siblings.
pub trait Reader: Sized {
    /// Byte footprint of one element of this type inside a list: its full
    /// size when it is fixed-size, `None` when it is addressed through an
    /// offset slot.
    fn item_size() -> Option<u32>;

    /// Positions a reader. For fixed-size readers `pos.offset` is where the
    /// value's bytes begin; offset-addressed readers receive their slot
    /// position and keep `base`, their container's absolute start, to
    /// dereference it later.
    fn init(pos: ReadPos, base: u32) -> Self;

    /// Positions a reader behind an offset slot. The default keeps the slot
    /// for lazy dereferencing; container readers override this to resolve
    /// their absolute extent immediately, since their field accessors need
    /// their own start position.
    fn init_at_slot(src: &ReaderSource<'_>, slot: ReadPos, base: u32) -> Result<Self, DecodeError> {
        let _ = src;
        Ok(Self::init(slot, base))
    }
}

/// Reads a uint64 field.
#[derive(Debug, Clone, Copy)]
pub struct Uint64Reader {
    pos: ReadPos,
}

impl Reader for Uint64Reader {
    fn item_size() -> Option<u32> {
        Some(8)
    }

    fn init(pos: ReadPos, _base: u32) -> Self {
        Uint64Reader { pos }
    }
}

impl Uint64Reader {
    pub fn read(&self, src: &ReaderSource<'_>) -> Result<u64, DecodeError> {
        let bytes = read_static(src, self.pos, 8)?;
        let mut array = [0u8; 8];
        array.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(array))
    }
}

/// Reads a uint256 field. 32 zero bytes read as zero.
#[derive(Debug, Clone, Copy)]
pub struct Uint256Reader {
    pos: ReadPos,
}

impl Reader for Uint256Reader {
    fn item_size() -> Option<u32> {
        Some(32)
    }

    fn init(pos: ReadPos, _base: u32) -> Self {
        Uint256Reader { pos }
    }
}

impl Uint256Reader {
    pub fn read(&self, src: &ReaderSource<'_>) -> Result<U256, DecodeError> {
        let bytes = read_static(src, self.pos, 32)?;
        Ok(U256::from_little_endian(bytes))
    }
}

/// Reads a static binary blob of `N` bytes, borrowing it from the payload.
#[derive(Debug, Clone, Copy)]
pub struct ByteArrayReader<const N: usize> {
    pos: ReadPos,
}

impl<const N: usize> Reader for ByteArrayReader<N> {
    fn item_size() -> Option<u32> {
        Some(N as u32)
    }

    fn init(pos: ReadPos, _base: u32) -> Self {
        ByteArrayReader { pos }
    }
}

impl<const N: usize> ByteArrayReader<N> {
    pub fn read<'p>(&self, src: &ReaderSource<'p>) -> Result<&'p [u8; N], DecodeError> {
        let bytes = read_static(src, self.pos, N as u32)?;
        bytes.try_into().map_err(|_| DecodeError::InvalidByteLength {
            len: bytes.len(),
            expected: N,
        })
    }
}

/// Reads a dynamic binary blob through its offset slot, borrowing the
/// content from the payload.
#[derive(Debug, Clone, Copy)]
pub struct DynamicBytesReader {
    pos: ReadPos,
    base: u32,
}

impl Reader for DynamicBytesReader {
    fn item_size() -> Option<u32> {
        None
    }

    fn init(pos: ReadPos, base: u32) -> Self {
        DynamicBytesReader { pos, base }
    }
}

impl DynamicBytesReader {
    pub fn read<'p>(&self, src: &ReaderSource<'p>) -> Result<&'p [u8], DecodeError> {
        let resolved = src.resolve(self.pos, self.base)?;
        src.bytes(resolved.offset, resolved.container_end)
    }
}

/// Reads a variable-length list through its offset slot, addressing items
/// lazily: fixed-size items sit back to back, offset-addressed items behind
/// a leading table of one 4-byte slot each.
#[derive(Debug, Clone, Copy)]
pub struct ListReader<R: Reader> {
    pos: ReadPos,
    base: u32,
    _marker: PhantomData<R>,
}

impl<R: Reader> Reader for ListReader<R> {
    fn item_size() -> Option<u32> {
        None
    }

    fn init(pos: ReadPos, base: u32) -> Self {
        ListReader {
            pos,
            base,
            _marker: PhantomData,
        }
    }
}

impl<R: Reader> ListReader<R> {
    pub fn len(&self, src: &ReaderSource<'_>) -> Result<usize, DecodeError> {
        let resolved = src.resolve(self.pos, self.base)?;
        let (start, end) = (resolved.offset, resolved.container_end);
        if start == end {
            return Ok(0);
        }
        match R::item_size() {
            Some(size) => {
                if size == 0 {
                    return Err(DecodeError::ZeroLengthItem);
                }
                let len = end - start;
                if len % size != 0 {
                    return Err(DecodeError::InvalidListItemBytes {
                        len: len as usize,
                        item_size: size as usize,
                    });
                }
                Ok((len / size) as usize)
            }
            None => {
                let first = src.offset_at(start)?;
                let slot = BYTES_PER_LENGTH_OFFSET as u32;
                if first % slot != 0 || first < slot {
                    return Err(DecodeError::InvalidListFixedBytesLen(first));
                }
                if first > end - start {
                    return Err(DecodeError::OffsetOutOfBounds(first));
                }
                Ok((first / slot) as usize)
            }
        }
    }

    pub fn item(&self, src: &ReaderSource<'_>, n: usize) -> Result<R, DecodeError> {
        let len = self.len(src)?;
        if n >= len {
            return Err(DecodeError::OutOfBounds { i: n, len });
        }
        let resolved = src.resolve(self.pos, self.base)?;
        let (start, end) = (resolved.offset, resolved.container_end);
        let n = n as u32;
        match R::item_size() {
            Some(size) => Ok(R::init(
                ReadPos {
                    offset: start + n * size,
                    next_offset: 0,
                    container_end: end,
                },
                start,
            )),
            None => {
                let next_offset = if ((n + 1) as usize) < len {
                    start + 4 * (n + 1)
                } else {
                    0
                };
                R::init_at_slot(
                    src,
                    ReadPos {
                        offset: start + 4 * n,
                        next_offset,
                        container_end: end,
                    },
                    start,
                )
            }
        }
    }
}

fn read_static<'p>(
    src: &ReaderSource<'p>,
    pos: ReadPos,
    size: u32,
) -> Result<&'p [u8], DecodeError> {
    let end = pos
        .offset
        .checked_add(size)
        .ok_or(DecodeError::OutOfBoundsByte {
            i: pos.offset as usize,
        })?;
    if end > pos.container_end {
        return Err(DecodeError::OutOfBoundsByte { i: end as usize });
    }
    src.bytes(pos.offset, end)
}
