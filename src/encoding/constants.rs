/// Magic token opening a headered stream.
pub const MAGIC: [u8; 3] = *b"RJS";
/// Format revision this crate reads and writes. Matching is exact.
pub const CURRENT_VERSION: u16 = 0;

/// Continuation marker in the self-terminating size encoding.
pub(crate) const SIZE_CONT: u8 = 0xFF;
/// Pad byte shielding a leading digit that collides with the marker.
pub(crate) const SIZE_PAD: u8 = 0x00;
