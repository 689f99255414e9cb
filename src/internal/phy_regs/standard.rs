//! IEEE 802.3 PHY Register Definitions
//!
//! The subset of Clause 22 registers the link monitor and PHY helpers touch.

/// Standard PHY register addresses (IEEE 802.3 Clause 22)
pub mod phy_reg {
    /// Basic Mode Control Register
    pub const BMCR: u8 = 0;
    /// Basic Mode Status Register
    pub const BMSR: u8 = 1;
    /// PHY Identifier 1
    pub const PHYIDR1: u8 = 2;
    /// PHY Identifier 2
    pub const PHYIDR2: u8 = 3;
}

/// BMCR (Basic Mode Control Register) bits
pub mod bmcr {
    /// Soft reset (self-clearing)
    pub const RESET: u16 = 1 << 15;
    /// Auto-negotiation enable
    pub const AN_ENABLE: u16 = 1 << 12;
    /// Restart auto-negotiation
    pub const AN_RESTART: u16 = 1 << 9;
}

/// BMSR (Basic Mode Status Register) bits
pub mod bmsr {
    /// Auto-negotiation complete
    pub const AN_COMPLETE: u16 = 1 << 5;
    /// Link status (latched low)
    pub const LINK_STATUS: u16 = 1 << 2;
}

/// Highest valid Clause 22 register index (5-bit field)
pub const MAX_REG_INDEX: u8 = 31;
