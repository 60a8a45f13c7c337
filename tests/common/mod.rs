#![allow(dead_code)]

//! Container types shared by the integration tests, each with its schema,
//! its size method and, where the partial tests need one, a mirror reader.

use ethereum_types::{Bloom, H160, H256, U256};
use ssz_codec::{
    size_of_dynamic_bytes, size_of_slice_of_dynamic_bytes, size_of_slice_of_uint64s,
    ByteArrayReader, Codec, DecodeError, DynamicBytesReader, DynamicObject, ListReader, ReadPos,
    Reader, ReaderSource, SszObject, StaticObject, Uint256Reader, Uint64Reader,
};

#[derive(Debug, Default, PartialEq, Clone)]
pub struct VoluntaryExit {
    pub epoch: u64,
    pub validator_index: u64,
}

impl SszObject for VoluntaryExit {
    fn ssz_define(&mut self, codec: &mut Codec<'_>) {
        codec.define_uint64(&mut self.epoch);
        codec.define_uint64(&mut self.validator_index);
    }
}

impl StaticObject for VoluntaryExit {
    fn ssz_size() -> u32 {
        16
    }
}

pub struct VoluntaryExitReader {
    pos: ReadPos,
}

impl Reader for VoluntaryExitReader {
    fn item_size() -> Option<u32> {
        Some(16)
    }

    fn init(pos: ReadPos, _base: u32) -> Self {
        VoluntaryExitReader { pos }
    }
}

impl VoluntaryExitReader {
    pub fn epoch(&self) -> Uint64Reader {
        Uint64Reader::init(self.pos.add(0), self.pos.offset)
    }

    pub fn validator_index(&self) -> Uint64Reader {
        Uint64Reader::init(self.pos.add(8), self.pos.offset)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct SignedVoluntaryExit {
    pub exit: VoluntaryExit,
    pub signature: [u8; 96],
}

impl Default for SignedVoluntaryExit {
    fn default() -> Self {
        SignedVoluntaryExit {
            exit: VoluntaryExit::default(),
            signature: [0; 96],
        }
    }
}

impl SszObject for SignedVoluntaryExit {
    fn ssz_define(&mut self, codec: &mut Codec<'_>) {
        codec.define_static_object(&mut self.exit);
        codec.define_static_bytes(&mut self.signature);
    }
}

impl StaticObject for SignedVoluntaryExit {
    fn ssz_size() -> u32 {
        112
    }
}

pub struct SignedVoluntaryExitReader {
    pos: ReadPos,
}

impl Reader for SignedVoluntaryExitReader {
    fn item_size() -> Option<u32> {
        Some(112)
    }

    fn init(pos: ReadPos, _base: u32) -> Self {
        SignedVoluntaryExitReader { pos }
    }
}

impl SignedVoluntaryExitReader {
    pub fn exit(&self) -> VoluntaryExitReader {
        VoluntaryExitReader::init(self.pos.add(0), self.pos.offset)
    }

    pub fn signature(&self) -> ByteArrayReader<96> {
        ByteArrayReader::init(self.pos.add(16), self.pos.offset)
    }
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct Checkpoint {
    pub epoch: u64,
    pub root: [u8; 32],
}

impl SszObject for Checkpoint {
    fn ssz_define(&mut self, codec: &mut Codec<'_>) {
        codec.define_uint64(&mut self.epoch);
        codec.define_static_bytes(&mut self.root);
    }
}

impl StaticObject for Checkpoint {
    fn ssz_size() -> u32 {
        40
    }
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct AttestationData {
    pub slot: u64,
    pub index: u64,
    pub beacon_block_root: [u8; 32],
    pub source: Checkpoint,
    pub target: Checkpoint,
}

impl SszObject for AttestationData {
    fn ssz_define(&mut self, codec: &mut Codec<'_>) {
        codec.define_uint64(&mut self.slot);
        codec.define_uint64(&mut self.index);
        codec.define_static_bytes(&mut self.beacon_block_root);
        codec.define_static_object(&mut self.source);
        codec.define_static_object(&mut self.target);
    }
}

impl StaticObject for AttestationData {
    fn ssz_size() -> u32 {
        128
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct IndexedAttestation {
    pub attestation_indices: Vec<u64>,
    pub data: AttestationData,
    pub signature: [u8; 96],
}

impl Default for IndexedAttestation {
    fn default() -> Self {
        IndexedAttestation {
            attestation_indices: Vec::new(),
            data: AttestationData::default(),
            signature: [0; 96],
        }
    }
}

impl SszObject for IndexedAttestation {
    fn ssz_define(&mut self, codec: &mut Codec<'_>) {
        codec.define_slice_of_uint64s_offset(&mut self.attestation_indices);
        codec.define_static_object(&mut self.data);
        codec.define_static_bytes(&mut self.signature);

        codec.define_slice_of_uint64s_content(&mut self.attestation_indices, 2048);
    }
}

impl DynamicObject for IndexedAttestation {
    fn ssz_size(&self, fixed: bool) -> u32 {
        let mut size = 228;
        if !fixed {
            size += size_of_slice_of_uint64s(&self.attestation_indices);
        }
        size
    }
}

pub struct IndexedAttestationReader {
    pos: ReadPos,
}

impl Reader for IndexedAttestationReader {
    fn item_size() -> Option<u32> {
        None
    }

    fn init(pos: ReadPos, _base: u32) -> Self {
        IndexedAttestationReader { pos }
    }

    fn init_at_slot(
        src: &ReaderSource<'_>,
        slot: ReadPos,
        base: u32,
    ) -> Result<Self, DecodeError> {
        Ok(Self::init(src.resolve(slot, base)?, 0))
    }
}

impl IndexedAttestationReader {
    pub fn attestation_indices(&self) -> ListReader<Uint64Reader> {
        ListReader::init(self.pos.add(0), self.pos.offset)
    }

    pub fn signature(&self) -> ByteArrayReader<96> {
        ByteArrayReader::init(self.pos.add(132), self.pos.offset)
    }
}

#[derive(Debug, PartialEq)]
pub struct HistoricalBatch {
    pub block_roots: [[u8; 32]; 8192],
    pub state_roots: [[u8; 32]; 8192],
}

impl Default for HistoricalBatch {
    fn default() -> Self {
        HistoricalBatch {
            block_roots: [[0; 32]; 8192],
            state_roots: [[0; 32]; 8192],
        }
    }
}

impl SszObject for HistoricalBatch {
    fn ssz_define(&mut self, codec: &mut Codec<'_>) {
        codec.define_array_of_static_bytes(&mut self.block_roots);
        codec.define_array_of_static_bytes(&mut self.state_roots);
    }
}

impl StaticObject for HistoricalBatch {
    fn ssz_size() -> u32 {
        2 * 8192 * 32
    }
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct Withdrawal {
    pub index: u64,
    pub validator_index: u64,
    pub address: H160,
    pub amount: u64,
}

impl SszObject for Withdrawal {
    fn ssz_define(&mut self, codec: &mut Codec<'_>) {
        codec.define_uint64(&mut self.index);
        codec.define_uint64(&mut self.validator_index);
        codec.define_static_bytes(self.address.as_fixed_bytes_mut());
        codec.define_uint64(&mut self.amount);
    }
}

impl StaticObject for Withdrawal {
    fn ssz_size() -> u32 {
        44
    }
}

pub struct WithdrawalReader {
    pos: ReadPos,
}

impl Reader for WithdrawalReader {
    fn item_size() -> Option<u32> {
        Some(44)
    }

    fn init(pos: ReadPos, _base: u32) -> Self {
        WithdrawalReader { pos }
    }
}

impl WithdrawalReader {
    pub fn validator_index(&self) -> Uint64Reader {
        Uint64Reader::init(self.pos.add(8), self.pos.offset)
    }

    pub fn amount(&self) -> Uint64Reader {
        Uint64Reader::init(self.pos.add(36), self.pos.offset)
    }
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct Withdrawals {
    pub withdrawals: Vec<Withdrawal>,
}

impl SszObject for Withdrawals {
    fn ssz_define(&mut self, codec: &mut Codec<'_>) {
        codec.define_slice_of_static_objects_offset(&mut self.withdrawals);
        codec.define_slice_of_static_objects_content(&mut self.withdrawals, 16);
    }
}

impl DynamicObject for Withdrawals {
    fn ssz_size(&self, fixed: bool) -> u32 {
        let mut size = 4;
        if !fixed {
            size += ssz_codec::size_of_slice_of_static_objects(&self.withdrawals);
        }
        size
    }
}

pub struct WithdrawalsReader {
    pos: ReadPos,
}

impl Reader for WithdrawalsReader {
    fn item_size() -> Option<u32> {
        None
    }

    fn init(pos: ReadPos, _base: u32) -> Self {
        WithdrawalsReader { pos }
    }

    fn init_at_slot(
        src: &ReaderSource<'_>,
        slot: ReadPos,
        base: u32,
    ) -> Result<Self, DecodeError> {
        Ok(Self::init(src.resolve(slot, base)?, 0))
    }
}

impl WithdrawalsReader {
    pub fn withdrawals(&self) -> ListReader<WithdrawalReader> {
        ListReader::init(self.pos.add(0), self.pos.offset)
    }
}

/// Two variable blobs, both capped at 3 bytes.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct TwoVariableBytes {
    pub first: Vec<u8>,
    pub second: Vec<u8>,
}

impl SszObject for TwoVariableBytes {
    fn ssz_define(&mut self, codec: &mut Codec<'_>) {
        codec.define_dynamic_bytes_offset(&mut self.first);
        codec.define_dynamic_bytes_offset(&mut self.second);

        codec.define_dynamic_bytes_content(&mut self.first, 3);
        codec.define_dynamic_bytes_content(&mut self.second, 3);
    }
}

impl DynamicObject for TwoVariableBytes {
    fn ssz_size(&self, fixed: bool) -> u32 {
        let mut size = 8;
        if !fixed {
            size += size_of_dynamic_bytes(&self.first);
            size += size_of_dynamic_bytes(&self.second);
        }
        size
    }
}

/// Same wire shape as `TwoVariableBytes`, second blob capped at one byte.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct TwoVariableBytesNarrow {
    pub first: Vec<u8>,
    pub second: Vec<u8>,
}

impl SszObject for TwoVariableBytesNarrow {
    fn ssz_define(&mut self, codec: &mut Codec<'_>) {
        codec.define_dynamic_bytes_offset(&mut self.first);
        codec.define_dynamic_bytes_offset(&mut self.second);

        codec.define_dynamic_bytes_content(&mut self.first, 3);
        codec.define_dynamic_bytes_content(&mut self.second, 1);
    }
}

impl DynamicObject for TwoVariableBytesNarrow {
    fn ssz_size(&self, fixed: bool) -> u32 {
        let mut size = 8;
        if !fixed {
            size += size_of_dynamic_bytes(&self.first);
            size += size_of_dynamic_bytes(&self.second);
        }
        size
    }
}

/// A list of 32-byte roots, at most 8 of them.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct RootsList {
    pub roots: Vec<[u8; 32]>,
}

impl SszObject for RootsList {
    fn ssz_define(&mut self, codec: &mut Codec<'_>) {
        codec.define_slice_of_static_bytes_offset(&mut self.roots);
        codec.define_slice_of_static_bytes_content(&mut self.roots, 8);
    }
}

impl DynamicObject for RootsList {
    fn ssz_size(&self, fixed: bool) -> u32 {
        let mut size = 4;
        if !fixed {
            size += ssz_codec::size_of_slice_of_static_bytes(&self.roots);
        }
        size
    }
}

/// A list of variable blobs, at most 4 of them, each at most 8 bytes.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct VariableByteList {
    pub blobs: Vec<Vec<u8>>,
}

impl SszObject for VariableByteList {
    fn ssz_define(&mut self, codec: &mut Codec<'_>) {
        codec.define_slice_of_dynamic_bytes_offset(&mut self.blobs);
        codec.define_slice_of_dynamic_bytes_content(&mut self.blobs, 4, 8);
    }
}

impl DynamicObject for VariableByteList {
    fn ssz_size(&self, fixed: bool) -> u32 {
        let mut size = 4;
        if !fixed {
            size += size_of_slice_of_dynamic_bytes(&self.blobs);
        }
        size
    }
}

/// A list of dynamic objects, at most 4 of them.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct VariableObjectList {
    pub items: Vec<TwoVariableBytes>,
}

impl SszObject for VariableObjectList {
    fn ssz_define(&mut self, codec: &mut Codec<'_>) {
        codec.define_slice_of_dynamic_objects_offset(&mut self.items);
        codec.define_slice_of_dynamic_objects_content(&mut self.items, 4);
    }
}

impl DynamicObject for VariableObjectList {
    fn ssz_size(&self, fixed: bool) -> u32 {
        let mut size = 4;
        if !fixed {
            size += ssz_codec::size_of_slice_of_dynamic_objects(&self.items);
        }
        size
    }
}

/// Serializes through the one-directional hooks instead of the shared path.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct AsymmetricUint {
    pub nonce: u64,
}

impl SszObject for AsymmetricUint {
    fn ssz_define(&mut self, codec: &mut Codec<'_>) {
        codec.define_encoder(|codec| codec.define_uint64(&mut self.nonce));
        codec.define_decoder(|codec| codec.define_uint64(&mut self.nonce));
    }
}

impl StaticObject for AsymmetricUint {
    fn ssz_size() -> u32 {
        8
    }
}

#[derive(Debug, Default, PartialEq, Clone)]
pub struct ExecutionPayload {
    pub parent_hash: H256,
    pub fee_recipient: H160,
    pub state_root: H256,
    pub receipts_root: H256,
    pub logs_bloom: Bloom,
    pub prev_randao: H256,
    pub block_number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub extra_data: Vec<u8>,
    pub base_fee_per_gas: Option<U256>,
    pub block_hash: H256,
    pub transactions: Vec<Vec<u8>>,
}

impl SszObject for ExecutionPayload {
    fn ssz_define(&mut self, codec: &mut Codec<'_>) {
        codec.define_static_bytes(self.parent_hash.as_fixed_bytes_mut());
        codec.define_static_bytes(self.fee_recipient.as_fixed_bytes_mut());
        codec.define_static_bytes(self.state_root.as_fixed_bytes_mut());
        codec.define_static_bytes(self.receipts_root.as_fixed_bytes_mut());
        codec.define_static_bytes(self.logs_bloom.as_fixed_bytes_mut());
        codec.define_static_bytes(self.prev_randao.as_fixed_bytes_mut());
        codec.define_uint64(&mut self.block_number);
        codec.define_uint64(&mut self.gas_limit);
        codec.define_uint64(&mut self.gas_used);
        codec.define_uint64(&mut self.timestamp);
        codec.define_dynamic_bytes_offset(&mut self.extra_data);
        codec.define_uint256(&mut self.base_fee_per_gas);
        codec.define_static_bytes(self.block_hash.as_fixed_bytes_mut());
        codec.define_slice_of_dynamic_bytes_offset(&mut self.transactions);

        codec.define_dynamic_bytes_content(&mut self.extra_data, 32);
        codec.define_slice_of_dynamic_bytes_content(&mut self.transactions, 1_048_576, 1_073_741_824);
    }
}

impl DynamicObject for ExecutionPayload {
    fn ssz_size(&self, fixed: bool) -> u32 {
        let mut size = 508;
        if !fixed {
            size += size_of_dynamic_bytes(&self.extra_data);
            size += size_of_slice_of_dynamic_bytes(&self.transactions);
        }
        size
    }
}

pub struct ExecutionPayloadReader {
    pos: ReadPos,
}

impl Reader for ExecutionPayloadReader {
    fn item_size() -> Option<u32> {
        None
    }

    fn init(pos: ReadPos, _base: u32) -> Self {
        ExecutionPayloadReader { pos }
    }

    fn init_at_slot(
        src: &ReaderSource<'_>,
        slot: ReadPos,
        base: u32,
    ) -> Result<Self, DecodeError> {
        Ok(Self::init(src.resolve(slot, base)?, 0))
    }
}

impl ExecutionPayloadReader {
    pub fn parent_hash(&self) -> ByteArrayReader<32> {
        ByteArrayReader::init(self.pos.add(0), self.pos.offset)
    }

    pub fn fee_recipient(&self) -> ByteArrayReader<20> {
        ByteArrayReader::init(self.pos.add(32), self.pos.offset)
    }

    pub fn state_root(&self) -> ByteArrayReader<32> {
        ByteArrayReader::init(self.pos.add(52), self.pos.offset)
    }

    pub fn receipts_root(&self) -> ByteArrayReader<32> {
        ByteArrayReader::init(self.pos.add(84), self.pos.offset)
    }

    pub fn logs_bloom(&self) -> ByteArrayReader<256> {
        ByteArrayReader::init(self.pos.add(116), self.pos.offset)
    }

    pub fn prev_randao(&self) -> ByteArrayReader<32> {
        ByteArrayReader::init(self.pos.add(372), self.pos.offset)
    }

    pub fn block_number(&self) -> Uint64Reader {
        Uint64Reader::init(self.pos.add(404), self.pos.offset)
    }

    pub fn gas_limit(&self) -> Uint64Reader {
        Uint64Reader::init(self.pos.add(412), self.pos.offset)
    }

    pub fn gas_used(&self) -> Uint64Reader {
        Uint64Reader::init(self.pos.add(420), self.pos.offset)
    }

    pub fn timestamp(&self) -> Uint64Reader {
        Uint64Reader::init(self.pos.add(428), self.pos.offset)
    }

    pub fn extra_data(&self) -> DynamicBytesReader {
        DynamicBytesReader::init(self.pos.add_with_next(436, 504), self.pos.offset)
    }

    pub fn base_fee_per_gas(&self) -> Uint256Reader {
        Uint256Reader::init(self.pos.add(440), self.pos.offset)
    }

    pub fn block_hash(&self) -> ByteArrayReader<32> {
        ByteArrayReader::init(self.pos.add(472), self.pos.offset)
    }

    pub fn transactions(&self) -> ListReader<DynamicBytesReader> {
        ListReader::init(self.pos.add(504), self.pos.offset)
    }
}

/// A fully populated payload with two transactions and two extra-data
/// bytes, shared by the wire-format and partial-read tests.
pub fn sample_payload() -> ExecutionPayload {
    ExecutionPayload {
        parent_hash: H256::repeat_byte(0x01),
        fee_recipient: H160::repeat_byte(0x02),
        state_root: H256::repeat_byte(0x03),
        receipts_root: H256::repeat_byte(0x04),
        logs_bloom: Bloom::repeat_byte(0x05),
        prev_randao: H256::repeat_byte(0x06),
        block_number: 1234,
        gas_limit: 30_000_000,
        gas_used: 21_000,
        timestamp: 1_700_000_000,
        extra_data: vec![1, 2],
        base_fee_per_gas: Some(U256::from(7)),
        block_hash: H256::repeat_byte(0x0C),
        transactions: vec![vec![0x10], vec![0x20, 0x21]],
    }
}

/// A block slot paired with its full payload; the payload is the only
/// dynamic field.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct PayloadEnvelope {
    pub slot: u64,
    pub payload: ExecutionPayload,
}

impl SszObject for PayloadEnvelope {
    fn ssz_define(&mut self, codec: &mut Codec<'_>) {
        codec.define_uint64(&mut self.slot);
        codec.define_dynamic_object_offset(&mut self.payload);

        codec.define_dynamic_object_content(&mut self.payload);
    }
}

impl DynamicObject for PayloadEnvelope {
    fn ssz_size(&self, fixed: bool) -> u32 {
        let mut size = 12;
        if !fixed {
            size += self.payload.ssz_size(false);
        }
        size
    }
}

pub struct PayloadEnvelopeReader {
    pos: ReadPos,
}

impl Reader for PayloadEnvelopeReader {
    fn item_size() -> Option<u32> {
        None
    }

    fn init(pos: ReadPos, _base: u32) -> Self {
        PayloadEnvelopeReader { pos }
    }

    fn init_at_slot(
        src: &ReaderSource<'_>,
        slot: ReadPos,
        base: u32,
    ) -> Result<Self, DecodeError> {
        Ok(Self::init(src.resolve(slot, base)?, 0))
    }
}

impl PayloadEnvelopeReader {
    pub fn slot(&self) -> Uint64Reader {
        Uint64Reader::init(self.pos.add(0), self.pos.offset)
    }

    pub fn payload(&self, src: &ReaderSource<'_>) -> Result<ExecutionPayloadReader, DecodeError> {
        ExecutionPayloadReader::init_at_slot(src, self.pos.add(8), self.pos.offset)
    }
}
