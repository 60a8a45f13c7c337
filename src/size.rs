//! Helpers to pre-compute the serialized length of dynamic shapes, used by
//! the size methods of value types and by the buffered encoding entry
//! points.

use crate::{DynamicObject, StaticObject};

/// Serialized length of a dynamic binary blob.
pub fn size_of_dynamic_bytes(blob: &[u8]) -> u32 {
    blob.len() as u32
}

/// Serialized length of a dynamic slice of uint64s.
pub fn size_of_slice_of_uint64s(ns: &[u64]) -> u32 {
    8 * ns.len() as u32
}

/// Serialized length of a dynamic slice of static binary blobs.
pub fn size_of_slice_of_static_bytes<const N: usize>(blobs: &[[u8; N]]) -> u32 {
    (N * blobs.len()) as u32
}

/// Serialized length of a dynamic slice of dynamic binary blobs: one offset
/// slot per blob plus the blobs themselves.
pub fn size_of_slice_of_dynamic_bytes(blobs: &[Vec<u8>]) -> u32 {
    blobs.iter().map(|blob| 4 + blob.len() as u32).sum()
}

/// Serialized length of a dynamic slice of static objects.
pub fn size_of_slice_of_static_objects<T: StaticObject>(objs: &[T]) -> u32 {
    T::ssz_size() * objs.len() as u32
}

/// Serialized length of a dynamic slice of dynamic objects: one offset slot
/// per object plus the objects themselves.
pub fn size_of_slice_of_dynamic_objects<T: DynamicObject>(objs: &[T]) -> u32 {
    objs.iter().map(|obj| 4 + obj.ssz_size(false)).sum()
}
