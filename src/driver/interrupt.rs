//! Interrupt endpoint packets.
//!
//! The controller reports its `INT_STS` register on the USB interrupt
//! endpoint as one little-endian 32-bit word. Bit meanings other than the
//! PHY interrupt are chip-specific and are left to the caller.

use super::error::{ProtocolError, Result};
use crate::internal::constants::INTERRUPT_PACKET_LEN;

// =============================================================================
// Interrupt Status
// =============================================================================

/// Snapshot of the `INT_STS` register
///
/// # Example
///
/// ```ignore
/// let status = device.take_interrupt_status();
/// if status.contains(device.config().phy_interrupt) {
///     device.check_link()?;
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptStatus(u32);

impl InterruptStatus {
    /// Empty status
    pub const NONE: Self = Self(0);

    /// Wrap a raw `INT_STS` value
    #[inline]
    pub const fn from_raw(status: u32) -> Self {
        Self(status)
    }

    /// Raw `INT_STS` value
    #[inline]
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Any of the bits in `mask` are set
    #[inline]
    pub const fn contains(&self, mask: u32) -> bool {
        self.0 & mask != 0
    }

    /// No bit set
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for InterruptStatus {
    fn from(status: u32) -> Self {
        Self(status)
    }
}

// =============================================================================
// Interrupt Packet
// =============================================================================

/// Parser for interrupt endpoint packets
pub struct InterruptPacket;

impl InterruptPacket {
    /// Packet length in bytes
    pub const LEN: usize = INTERRUPT_PACKET_LEN;

    /// Decode one packet into its `INT_STS` value
    ///
    /// Anything but exactly one word is malformed.
    pub fn parse(packet: &[u8]) -> Result<InterruptStatus> {
        let bytes: [u8; INTERRUPT_PACKET_LEN] = packet.try_into().map_err(|_| {
            debug!("malformed interrupt packet ({} bytes)", packet.len());
            ProtocolError::InterruptLength {
                actual: packet.len(),
            }
        })?;

        Ok(InterruptStatus::from_raw(u32::from_le_bytes(bytes)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
