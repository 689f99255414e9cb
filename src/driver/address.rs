//! MAC address value and its two-register form.
//!
//! The controller stores a 6-byte address across two 32-bit registers:
//!
//! | Register | Bits 31:24 | Bits 23:16 | Bits 15:8 | Bits 7:0 |
//! |----------|------------|------------|-----------|----------|
//! | low      | byte 3     | byte 2     | byte 1    | byte 0   |
//! | high     | flags      | flags      | byte 5    | byte 4   |
//!
//! [`MacAddress`] is the only outward representation; the register pair is
//! produced and consumed through explicit conversions.

use core::fmt;

use crate::internal::constants::MAC_ADDR_LEN;

/// Mask of the address bytes within the high register
const HIGH_ADDRESS_MASK: u32 = 0x0000_ffff;

/// A 6-byte Ethernet MAC address
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacAddress([u8; MAC_ADDR_LEN]);

/// The two-register form of a [`MacAddress`], in host byte order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressRegisters {
    /// Bytes 0-3, byte 0 in bits 7:0
    pub low: u32,
    /// Bytes 4-5 in bits 15:0; bits 31:16 are left clear
    pub high: u32,
}

impl MacAddress {
    /// Address length in bytes
    pub const LEN: usize = MAC_ADDR_LEN;

    /// All-zero address
    pub const ZERO: Self = Self([0; MAC_ADDR_LEN]);

    /// Broadcast address
    pub const BROADCAST: Self = Self([0xff; MAC_ADDR_LEN]);

    /// Create an address from raw bytes
    pub const fn new(bytes: [u8; MAC_ADDR_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw bytes, in transmission order
    pub const fn octets(&self) -> [u8; MAC_ADDR_LEN] {
        self.0
    }

    /// Borrow the raw bytes
    pub const fn as_bytes(&self) -> &[u8; MAC_ADDR_LEN] {
        &self.0
    }

    /// Split into the low/high register pair
    pub const fn to_registers(&self) -> AddressRegisters {
        let b = self.0;
        AddressRegisters {
            low: u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
            high: u16::from_le_bytes([b[4], b[5]]) as u32,
        }
    }

    /// Reassemble from a low/high register pair
    ///
    /// Bits above 15 in `high` (validity or other flags) are ignored.
    pub const fn from_registers(low: u32, high: u32) -> Self {
        let l = low.to_le_bytes();
        let h = (high & HIGH_ADDRESS_MASK).to_le_bytes();
        Self([l[0], l[1], l[2], l[3], h[0], h[1]])
    }

    /// Group (multicast or broadcast) address
    pub const fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }

    /// Locally administered address
    pub const fn is_local(&self) -> bool {
        self.0[0] & 0x02 != 0
    }

    /// All bytes zero
    pub const fn is_zero(&self) -> bool {
        let b = self.0;
        (b[0] | b[1] | b[2] | b[3] | b[4] | b[5]) == 0
    }

    /// Usable as a station address: non-zero unicast
    pub const fn is_valid(&self) -> bool {
        !self.is_zero() && !self.is_multicast()
    }
}

impl From<[u8; MAC_ADDR_LEN]> for MacAddress {
    fn from(bytes: [u8; MAC_ADDR_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<MacAddress> for [u8; MAC_ADDR_LEN] {
    fn from(mac: MacAddress) -> Self {
        mac.0
    }
}

impl From<AddressRegisters> for MacAddress {
    fn from(regs: AddressRegisters) -> Self {
        Self::from_registers(regs.low, regs.high)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

impl fmt::Debug for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacAddress({self})")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MacAddress {
    fn format(&self, f: defmt::Formatter<'_>) {
        let b = self.0;
        defmt::write!(
            f,
            "{=u8:02x}:{=u8:02x}:{=u8:02x}:{=u8:02x}:{=u8:02x}:{=u8:02x}",
            b[0],
            b[1],
            b[2],
            b[3],
            b[4],
            b[5]
        );
    }
}
