//! SMSC USB Vendor Register Definitions
//!
//! Offsets here are relative to a register group base supplied by the chip
//! variant (see [`SmscConfig`](crate::driver::config::SmscConfig)). Only the
//! generic layout shared by the LAN95xx and LAN75xx families lives here.

/// Offset of the second register in every command/data or high/low pair
pub const REGISTER_PAIR_OFFSET: u16 = 0x004;

// =============================================================================
// EEPROM Controller
// =============================================================================

/// EEPROM command register offset
pub const E2P_CMD: u16 = 0x000;

/// EEPROM command: controller busy
pub const E2P_CMD_EPC_BSY: u32 = 0x8000_0000;

/// EEPROM command: READ opcode
pub const E2P_CMD_EPC_CMD_READ: u32 = 0x0000_0000;

/// EEPROM command: address field shift
pub const E2P_CMD_EPC_ADDR_SHIFT: u32 = 0;

/// EEPROM data register offset
pub const E2P_DATA: u16 = 0x004;

/// EEPROM data register: data byte mask
pub const E2P_DATA_MASK: u32 = 0x0000_00ff;

// =============================================================================
// MII Controller
// =============================================================================

/// MII access register offset
pub const MII_ACCESS: u16 = 0x000;

/// MII access: PHY address field (internal PHY at address 1)
pub const MII_ACCESS_PHY_ADDRESS: u32 = 0x0000_0800;

/// MII access: register index shift (MIIRINDA)
pub const MII_ACCESS_MIIRINDA_SHIFT: u32 = 6;

/// MII access: write (MIIWnR)
pub const MII_ACCESS_MIIWNR: u32 = 0x0000_0002;

/// MII access: busy (MIIBZY)
pub const MII_ACCESS_MIIBZY: u32 = 0x0000_0001;

/// MII data register offset
pub const MII_DATA: u16 = 0x004;

/// MII data register: data mask
pub const MII_DATA_MASK: u32 = 0x0000_ffff;

// =============================================================================
// Receive Address and Perfect Filters
// =============================================================================

/// MAC receive address high register offset
pub const RX_ADDRH: u16 = 0x000;

/// MAC receive address low register offset
pub const RX_ADDRL: u16 = 0x004;

/// Perfect filter high register offset within a slot
pub const ADDR_FILTH: u16 = 0x000;

/// Perfect filter low register offset within a slot
pub const ADDR_FILTL: u16 = 0x004;

/// Perfect filter slot stride
pub const ADDR_FILT_STRIDE: u16 = 8;

/// Perfect filter high register: address valid
pub const ADDR_FILTH_VALID: u32 = 0x8000_0000;

// =============================================================================
// Chip Variant Register Groups
// =============================================================================

/// LAN95xx register group bases
pub mod lan95xx {
    /// EEPROM register group base
    pub const E2P_BASE: u16 = 0x030;
    /// Receive address register group base
    pub const RX_ADDR_BASE: u16 = 0x104;
    /// MII register group base
    pub const MII_BASE: u16 = 0x114;
    /// INT_STS: PHY interrupt
    pub const INT_STS_PHY_INT: u32 = 0x0000_8000;
}

/// LAN75xx register group bases
pub mod lan75xx {
    /// EEPROM register group base
    pub const E2P_BASE: u16 = 0x040;
    /// Receive address register group base
    pub const RX_ADDR_BASE: u16 = 0x118;
    /// MII register group base
    pub const MII_BASE: u16 = 0x120;
    /// Perfect filter table base
    pub const ADDR_FILT_BASE: u16 = 0x300;
    /// Number of perfect filter slots
    pub const ADDR_FILT_COUNT: usize = 32;
    /// INT_STS: PHY interrupt
    pub const INT_STS_PHY_INT: u32 = 0x0002_0000;
}
