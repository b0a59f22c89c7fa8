//! Shared record types threaded between the index, encoding and root
//! parsers.

use casc_crypto::ContentKey;

/// A resolved `.idx` record: which data blob holds the bytes, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub blob_index: u16,
    pub offset: u32,
    pub size: u32,
}

/// A resolved encoding-file record: a content key's decoded size and the
/// content key that addresses its BLTE-encoded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingEntry {
    pub decoded_size: u32,
    pub content_key: ContentKey,
}

/// Locale bitfield used to filter root-file blocks.
///
/// `ALL` is the sentinel used during CASC handler init, which admits
/// every locale variant rather than filtering to one.
pub mod locale {
    pub const EN_US: u32 = 0x0000_0002;
    pub const KO_KR: u32 = 0x0000_0004;
    pub const FR_FR: u32 = 0x0000_0010;
    pub const DE_DE: u32 = 0x0000_0020;
    pub const ZH_CN: u32 = 0x0000_0040;
    pub const ES_ES: u32 = 0x0000_0080;
    pub const ZH_TW: u32 = 0x0000_0100;
    pub const EN_GB: u32 = 0x0000_0200;
    pub const EN_CN: u32 = 0x0000_0400;
    pub const EN_TW: u32 = 0x0000_0800;
    pub const ES_MX: u32 = 0x0000_1000;
    pub const RU_RU: u32 = 0x0000_2000;
    pub const PT_BR: u32 = 0x0000_4000;
    pub const IT_IT: u32 = 0x0000_8000;
    pub const PT_PT: u32 = 0x0001_0000;
    pub const EN_SG: u32 = 0x2000_0000;
    pub const PL_PL: u32 = 0x4000_0000;

    /// Sentinel admitting every locale variant.
    pub const ALL: u32 = 0xFFFF_FFFF;
}
