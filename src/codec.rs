use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::{DecodeError, DynamicObject, StaticObject};
use ethereum_types::U256;
use std::io::{self, Write};

/// Codec is a unified SSZ encoder and decoder that allows types to define
/// their schemas once and have that drive both operations: each `define_*`
/// call inspects which side is live and forwards to it.
///
/// Fields are defined in SSZ declaration order. A dynamic field is defined
/// twice: its offset-phase call in fixed-region order, and its content-phase
/// call after every fixed-region call, in the same relative order.
pub struct Codec<'a> {
    side: Side<'a>,
}

enum Side<'a> {
    Encode(Encoder<'a>),
    Decode(Decoder<'a>),
}

impl<'a> Codec<'a> {
    pub(crate) fn to_stream(writer: &'a mut dyn Write) -> Self {
        Codec {
            side: Side::Encode(Encoder::to_stream(writer)),
        }
    }

    pub(crate) fn to_buffer(buffer: &'a mut [u8]) -> Self {
        Codec {
            side: Side::Encode(Encoder::to_buffer(buffer)),
        }
    }

    pub(crate) fn from_payload(payload: &'a [u8]) -> Self {
        Codec {
            side: Side::Decode(Decoder::new(payload)),
        }
    }

    fn is_encoding(&self) -> bool {
        matches!(self.side, Side::Encode(_))
    }

    fn enc(&mut self) -> Option<&mut Encoder<'a>> {
        match &mut self.side {
            Side::Encode(enc) => Some(enc),
            Side::Decode(_) => None,
        }
    }

    fn dec(&mut self) -> Option<&mut Decoder<'a>> {
        match &mut self.side {
            Side::Decode(dec) => Some(dec),
            Side::Encode(_) => None,
        }
    }

    /// Anchors the dynamic-region cursor before encoding a dynamic value.
    pub(crate) fn start_dynamics(&mut self, fixed_size: u32) {
        if let Some(enc) = self.enc() {
            enc.start_dynamics(fixed_size);
        }
    }

    /// Enters the root container of a dynamic decode.
    pub(crate) fn begin_root(&mut self, end: u32, fixed_size: u32) {
        if let Some(dec) = self.dec() {
            dec.begin_dynamic(0, end, fixed_size);
        }
    }

    pub(crate) fn finish_encode(self) -> io::Result<()> {
        match self.side {
            Side::Encode(enc) => enc.finish(),
            Side::Decode(_) => Ok(()),
        }
    }

    pub(crate) fn finish_decode(self) -> Result<(), DecodeError> {
        match self.side {
            Side::Decode(dec) => dec.finish(),
            Side::Encode(_) => Ok(()),
        }
    }

    /// Defines the next field as a uint64.
    pub fn define_uint64(&mut self, n: &mut u64) {
        match &mut self.side {
            Side::Encode(enc) => enc.write_uint64(*n),
            Side::Decode(dec) => dec.read_uint64(n),
        }
    }

    /// Defines the next field as a uint256. `None` serializes as zero.
    pub fn define_uint256(&mut self, n: &mut Option<U256>) {
        match &mut self.side {
            Side::Encode(enc) => enc.write_uint256(n),
            Side::Decode(dec) => dec.read_uint256(n),
        }
    }

    /// Defines the next field as a static binary blob.
    pub fn define_static_bytes<const N: usize>(&mut self, blob: &mut [u8; N]) {
        match &mut self.side {
            Side::Encode(enc) => enc.write_bytes(blob),
            Side::Decode(dec) => dec.read_static_bytes(blob),
        }
    }

    /// Defines the next field as a fixed-length array of static binary blobs.
    pub fn define_array_of_static_bytes<const N: usize>(&mut self, blobs: &mut [[u8; N]]) {
        match &mut self.side {
            Side::Encode(enc) => {
                for blob in blobs.iter() {
                    enc.write_bytes(blob);
                }
            }
            Side::Decode(dec) => dec.read_array_of_static_bytes(blobs),
        }
    }

    /// Defines the next field as a static object.
    pub fn define_static_object<T: StaticObject>(&mut self, obj: &mut T) {
        if self.enc().map_or(false, |enc| enc.failed()) {
            return;
        }
        obj.ssz_define(self);
    }

    /// Defines the next field as a dynamic binary blob (offset phase).
    pub fn define_dynamic_bytes_offset(&mut self, blob: &mut Vec<u8>) {
        match &mut self.side {
            Side::Encode(enc) => enc.write_offset(blob.len() as u32),
            Side::Decode(dec) => dec.read_offset(),
        }
    }

    /// Defines the next field as a dynamic binary blob (content phase).
    pub fn define_dynamic_bytes_content(&mut self, blob: &mut Vec<u8>, max_size: u32) {
        match &mut self.side {
            Side::Encode(enc) => enc.write_bytes(blob),
            Side::Decode(dec) => dec.read_dynamic_bytes_content(blob, max_size),
        }
    }

    /// Defines the next field as a dynamic object (offset phase).
    pub fn define_dynamic_object_offset<T: DynamicObject>(&mut self, obj: &mut T) {
        match &mut self.side {
            Side::Encode(enc) => enc.write_offset(obj.ssz_size(false)),
            Side::Decode(dec) => dec.read_offset(),
        }
    }

    /// Defines the next field as a dynamic object (content phase). The
    /// object's own dynamic region is anchored at its fixed size for the
    /// duration of the nested walk.
    pub fn define_dynamic_object_content<T: DynamicObject>(&mut self, obj: &mut T) {
        let fixed = obj.ssz_size(true);
        match &mut self.side {
            Side::Encode(enc) => {
                if enc.failed() {
                    return;
                }
                enc.start_dynamics(fixed);
            }
            Side::Decode(dec) => {
                let Some((start, end)) = dec.next_content_slot() else {
                    return;
                };
                dec.begin_dynamic(start, end, fixed);
            }
        }
        obj.ssz_define(self);
        if let Some(dec) = self.dec() {
            dec.end_dynamic();
        }
    }

    /// Defines the next field as a dynamic slice of uint64s (offset phase).
    pub fn define_slice_of_uint64s_offset(&mut self, ns: &mut Vec<u64>) {
        match &mut self.side {
            Side::Encode(enc) => enc.write_offset(8 * ns.len() as u32),
            Side::Decode(dec) => dec.read_offset(),
        }
    }

    /// Defines the next field as a dynamic slice of uint64s (content phase).
    pub fn define_slice_of_uint64s_content(&mut self, ns: &mut Vec<u64>, max_items: u32) {
        match &mut self.side {
            Side::Encode(enc) => {
                for n in ns.iter() {
                    enc.write_uint64(*n);
                }
            }
            Side::Decode(dec) => dec.read_slice_of_uint64s_content(ns, max_items),
        }
    }

    /// Defines the next field as a dynamic slice of static binary blobs
    /// (offset phase).
    pub fn define_slice_of_static_bytes_offset<const N: usize>(
        &mut self,
        blobs: &mut Vec<[u8; N]>,
    ) {
        match &mut self.side {
            Side::Encode(enc) => enc.write_offset((N * blobs.len()) as u32),
            Side::Decode(dec) => dec.read_offset(),
        }
    }

    /// Defines the next field as a dynamic slice of static binary blobs
    /// (content phase).
    pub fn define_slice_of_static_bytes_content<const N: usize>(
        &mut self,
        blobs: &mut Vec<[u8; N]>,
        max_items: u32,
    ) {
        match &mut self.side {
            Side::Encode(enc) => {
                for blob in blobs.iter() {
                    enc.write_bytes(blob);
                }
            }
            Side::Decode(dec) => dec.read_slice_of_static_bytes_content(blobs, max_items),
        }
    }

    /// Defines the next field as a dynamic slice of dynamic binary blobs
    /// (offset phase).
    pub fn define_slice_of_dynamic_bytes_offset(&mut self, blobs: &mut Vec<Vec<u8>>) {
        match &mut self.side {
            Side::Encode(enc) => {
                let content: u32 = blobs.iter().map(|blob| 4 + blob.len() as u32).sum();
                enc.write_offset(content);
            }
            Side::Decode(dec) => dec.read_offset(),
        }
    }

    /// Defines the next field as a dynamic slice of dynamic binary blobs
    /// (content phase). The list is its own container: a leading offset
    /// table, one slot per blob, followed by the blobs' bytes.
    pub fn define_slice_of_dynamic_bytes_content(
        &mut self,
        blobs: &mut Vec<Vec<u8>>,
        max_items: u32,
        max_size: u32,
    ) {
        match &mut self.side {
            Side::Encode(enc) => {
                enc.start_dynamics(4 * blobs.len() as u32);
                for blob in blobs.iter() {
                    enc.write_offset(blob.len() as u32);
                }
                for blob in blobs.iter() {
                    enc.write_bytes(blob);
                }
            }
            Side::Decode(dec) => {
                dec.read_slice_of_dynamic_bytes_content(blobs, max_items, max_size)
            }
        }
    }

    /// Defines the next field as a dynamic slice of static objects (offset
    /// phase).
    pub fn define_slice_of_static_objects_offset<T: StaticObject>(&mut self, objs: &mut Vec<T>) {
        match &mut self.side {
            Side::Encode(enc) => enc.write_offset(T::ssz_size() * objs.len() as u32),
            Side::Decode(dec) => dec.read_offset(),
        }
    }

    /// Defines the next field as a dynamic slice of static objects (content
    /// phase).
    pub fn define_slice_of_static_objects_content<T: StaticObject + Default>(
        &mut self,
        objs: &mut Vec<T>,
        max_items: u32,
    ) {
        if self.is_encoding() {
            if self.enc().map_or(false, |enc| enc.failed()) {
                return;
            }
            for obj in objs.iter_mut() {
                obj.ssz_define(self);
            }
            return;
        }
        let count = match self
            .dec()
            .and_then(|dec| dec.read_static_list_header(T::ssz_size(), max_items))
        {
            Some(count) => count,
            None => return,
        };
        objs.clear();
        objs.reserve(count as usize);
        for _ in 0..count {
            let mut obj = T::default();
            obj.ssz_define(self);
            objs.push(obj);
        }
    }

    /// Defines the next field as a dynamic slice of dynamic objects (offset
    /// phase).
    pub fn define_slice_of_dynamic_objects_offset<T: DynamicObject>(&mut self, objs: &mut Vec<T>) {
        match &mut self.side {
            Side::Encode(enc) => {
                let content: u32 = objs.iter().map(|obj| 4 + obj.ssz_size(false)).sum();
                enc.write_offset(content);
            }
            Side::Decode(dec) => dec.read_offset(),
        }
    }

    /// Defines the next field as a dynamic slice of dynamic objects (content
    /// phase). Like a slice of dynamic blobs, the list is its own container
    /// with a leading offset table; every item then anchors its own dynamic
    /// region while its schema is walked.
    pub fn define_slice_of_dynamic_objects_content<T: DynamicObject + Default>(
        &mut self,
        objs: &mut Vec<T>,
        max_items: u32,
    ) {
        if self.is_encoding() {
            if let Some(enc) = self.enc() {
                if enc.failed() {
                    return;
                }
                enc.start_dynamics(4 * objs.len() as u32);
                for obj in objs.iter() {
                    enc.write_offset(obj.ssz_size(false));
                }
            }
            for obj in objs.iter_mut() {
                self.start_dynamics(obj.ssz_size(true));
                obj.ssz_define(self);
            }
            return;
        }

        let count = {
            let Some(dec) = self.dec() else {
                return;
            };
            let Some((start, end)) = dec.next_content_slot() else {
                return;
            };
            let Some(count) = dec.read_list_header(start, end, max_items) else {
                return;
            };
            for _ in 0..count {
                dec.read_offset();
            }
            count
        };
        objs.clear();
        if count == 0 {
            return;
        }
        objs.reserve(count as usize);
        for _ in 0..count {
            let mut obj = T::default();
            let fixed = obj.ssz_size(true);
            let entered = self.dec().map_or(false, |dec| {
                match dec.next_content_slot() {
                    Some((start, end)) => {
                        dec.begin_dynamic(start, end, fixed);
                        true
                    }
                    None => false,
                }
            });
            if !entered {
                break;
            }
            obj.ssz_define(self);
            if let Some(dec) = self.dec() {
                dec.end_dynamic();
            }
            objs.push(obj);
        }
        if let Some(dec) = self.dec() {
            dec.end_dynamic();
        }
    }

    /// Runs a dedicated block only when encoding, for types whose two
    /// serialization directions are asymmetric.
    pub fn define_encoder(&mut self, block: impl FnOnce(&mut Codec<'a>)) {
        if self.is_encoding() {
            block(self);
        }
    }

    /// Runs a dedicated block only when decoding, for types whose two
    /// serialization directions are asymmetric.
    pub fn define_decoder(&mut self, block: impl FnOnce(&mut Codec<'a>)) {
        if !self.is_encoding() {
            block(self);
        }
    }
}
