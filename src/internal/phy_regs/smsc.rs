//! SMSC Internal PHY Vendor Registers
//!
//! The interrupt source register latches causes until read; the mask
//! register selects which causes raise the PHY interrupt.

/// PHY interrupt source register
pub const INTR_SOURCE: u8 = 29;

/// PHY interrupt mask register
pub const INTR_MASK: u8 = 30;

/// Interrupt source/mask bits
pub mod intr {
    /// Auto-negotiation complete
    pub const ANEG_DONE: u16 = 0x0040;
    /// Link down
    pub const LINK_DOWN: u16 = 0x0010;
}
