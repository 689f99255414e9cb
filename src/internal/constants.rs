//! Centralized Constants
//!
//! Single source of truth for the fixed numbers shared by the register
//! transport, the EEPROM and MII state machines and the device context.
//!
//! Register bit definitions live in [`register`](super::register) and
//! [`phy_regs`](super::phy_regs).

// =============================================================================
// USB Control Requests
// =============================================================================

/// `bmRequestType` direction: host to device
pub const USB_DIR_OUT: u8 = 0x00;

/// `bmRequestType` direction: device to host
pub const USB_DIR_IN: u8 = 0x80;

/// `bmRequestType` type: vendor
pub const USB_TYPE_VENDOR: u8 = 0x40;

/// `bmRequestType` recipient: device
pub const USB_RECIP_DEVICE: u8 = 0x00;

/// Vendor request: register write
pub const REQUEST_REGISTER_WRITE: u8 = 0xa0;

/// Vendor request: register read
pub const REQUEST_REGISTER_READ: u8 = 0xa1;

/// Vendor request: get statistics
pub const REQUEST_GET_STATISTICS: u8 = 0xa2;

/// Size of one register transfer in bytes
pub const REGISTER_SIZE: usize = 4;

// =============================================================================
// Timing Constants
// =============================================================================

/// Maximum time to wait for the EEPROM controller (milliseconds)
pub const EEPROM_MAX_WAIT_MS: u32 = 100;

/// Maximum time to wait for the MII controller (milliseconds)
pub const MII_MAX_WAIT_MS: u32 = 100;

/// Maximum time to wait for a PHY soft reset to self-clear (milliseconds)
pub const PHY_RESET_MAX_WAIT_MS: u32 = 500;

/// Pause between two busy-bit samples (microseconds)
pub const POLL_INTERVAL_US: u32 = 1_000;

// =============================================================================
// EEPROM Layout
// =============================================================================

/// EEPROM offset of the burned-in MAC address
pub const EEPROM_MAC_OFFSET: u8 = 0x01;

/// Size of the 8-bit EEPROM address space
pub const EEPROM_SIZE: usize = 256;

// =============================================================================
// MAC Address
// =============================================================================

/// MAC address length in bytes
pub const MAC_ADDR_LEN: usize = 6;

// =============================================================================
// Interrupt Endpoint
// =============================================================================

/// Interrupt endpoint packet length (one `INT_STS` word)
pub const INTERRUPT_PACKET_LEN: usize = 4;

/// Interrupt endpoint maximum fill level
///
/// Policy value handed to the interrupt-endpoint refill collaborator.
pub const INTR_MAX_FILL: usize = 2;
