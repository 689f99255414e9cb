//! Configuration types for the SMSC USB register-access core
//!
//! Everything that differs between controller variants (register group
//! bases, the perfect filter table, the MII access word layout and the
//! `INT_STS` PHY bit) is data in [`SmscConfig`], so the EEPROM and MII state
//! machines never hard-code a chip.

use super::error::{ConfigError, ConfigResult};
use crate::internal::constants::{
    EEPROM_MAC_OFFSET, EEPROM_MAX_WAIT_MS, MII_MAX_WAIT_MS, PHY_RESET_MAX_WAIT_MS,
    POLL_INTERVAL_US,
};
use crate::internal::register::{
    ADDR_FILT_STRIDE, ADDR_FILTH, ADDR_FILTL, MII_ACCESS_MIIBZY, MII_ACCESS_MIIRINDA_SHIFT,
    MII_ACCESS_MIIWNR, MII_ACCESS_PHY_ADDRESS, REGISTER_PAIR_OFFSET, RX_ADDRH, RX_ADDRL, lan75xx,
    lan95xx,
};

// =============================================================================
// MII Access Word Layout
// =============================================================================

/// Bit layout of the MII access register
///
/// The PHY address field is stored pre-shifted, as the hardware expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MiiLayout {
    /// PHY address field, already in position
    pub phy_address: u32,
    /// Shift of the 5-bit register index field
    pub index_shift: u32,
    /// Write flag (clear for reads)
    pub write: u32,
    /// Busy flag, set to start a transaction and cleared by hardware
    pub busy: u32,
}

impl MiiLayout {
    /// Layout shared by the SMSC LAN95xx/LAN75xx internal PHY
    pub const SMSC: Self = Self {
        phy_address: MII_ACCESS_PHY_ADDRESS,
        index_shift: MII_ACCESS_MIIRINDA_SHIFT,
        write: MII_ACCESS_MIIWNR,
        busy: MII_ACCESS_MIIBZY,
    };

    /// Build the access word that starts a transaction on `index`
    pub const fn access_word(&self, index: u8, is_write: bool) -> u32 {
        let mut word = self.phy_address;

        // Register index (5 bits)
        word |= ((index as u32) & 0x1f) << self.index_shift;

        if is_write {
            word |= self.write;
        }

        // Busy flag triggers the operation
        word | self.busy
    }
}

impl Default for MiiLayout {
    fn default() -> Self {
        Self::SMSC
    }
}

// =============================================================================
// Timing
// =============================================================================

/// Busy-poll bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Maximum wait for the EEPROM busy bit (milliseconds)
    pub eeprom_timeout_ms: u32,
    /// Maximum wait for the MII busy bit (milliseconds)
    pub mii_timeout_ms: u32,
    /// Maximum wait for a PHY soft reset (milliseconds)
    pub phy_reset_timeout_ms: u32,
    /// Pause between samples (microseconds)
    pub poll_interval_us: u32,
}

impl Timing {
    /// Hardware-specified defaults
    pub const fn new() -> Self {
        Self {
            eeprom_timeout_ms: EEPROM_MAX_WAIT_MS,
            mii_timeout_ms: MII_MAX_WAIT_MS,
            phy_reset_timeout_ms: PHY_RESET_MAX_WAIT_MS,
            poll_interval_us: POLL_INTERVAL_US,
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Perfect Filter Table
// =============================================================================

/// Location and size of the perfect filter table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FilterTable {
    /// Register offset of slot 0
    pub base: u16,
    /// Number of slots
    pub slots: usize,
    /// Distance between consecutive slots
    pub stride: u16,
}

impl FilterTable {
    /// Table at `base` with `slots` entries and the standard stride
    pub const fn new(base: u16, slots: usize) -> Self {
        Self {
            base,
            slots,
            stride: ADDR_FILT_STRIDE,
        }
    }

    /// High register offset of `slot`
    pub const fn high(&self, slot: usize) -> u16 {
        self.base + ADDR_FILTH + self.stride * slot as u16
    }

    /// Low register offset of `slot`
    pub const fn low(&self, slot: usize) -> u16 {
        self.base + ADDR_FILTL + self.stride * slot as u16
    }
}

// =============================================================================
// Device Configuration
// =============================================================================

/// Complete device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SmscConfig {
    /// EEPROM register group base
    pub eeprom_base: u16,
    /// EEPROM offset of the MAC address
    pub eeprom_mac_offset: u8,
    /// MII register group base
    pub mii_base: u16,
    /// MII access word layout
    pub mii_layout: MiiLayout,
    /// Receive address register group base
    pub rx_addr_base: u16,
    /// Perfect filter table, if the variant has one
    pub filter_table: Option<FilterTable>,
    /// `INT_STS` bit signalling a PHY interrupt
    pub phy_interrupt: u32,
    /// Busy-poll bounds
    pub timing: Timing,
}

impl Default for SmscConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SmscConfig {
    /// Create a configuration with all register groups at offset zero
    ///
    /// Useful as a starting point for variants not covered by a preset.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            eeprom_base: 0,
            eeprom_mac_offset: EEPROM_MAC_OFFSET,
            mii_base: 0,
            mii_layout: MiiLayout::SMSC,
            rx_addr_base: 0,
            filter_table: None,
            phy_interrupt: 0,
            timing: Timing::new(),
        }
    }

    /// LAN9500/LAN9512/LAN9514 family (no perfect filter table)
    #[must_use]
    pub const fn lan95xx() -> Self {
        Self::new()
            .with_eeprom_base(lan95xx::E2P_BASE)
            .with_mii_base(lan95xx::MII_BASE)
            .with_rx_addr_base(lan95xx::RX_ADDR_BASE)
            .with_phy_interrupt(lan95xx::INT_STS_PHY_INT)
    }

    /// LAN7500/LAN7505 family
    #[must_use]
    pub const fn lan75xx() -> Self {
        Self::new()
            .with_eeprom_base(lan75xx::E2P_BASE)
            .with_mii_base(lan75xx::MII_BASE)
            .with_rx_addr_base(lan75xx::RX_ADDR_BASE)
            .with_filter_table(FilterTable::new(
                lan75xx::ADDR_FILT_BASE,
                lan75xx::ADDR_FILT_COUNT,
            ))
            .with_phy_interrupt(lan75xx::INT_STS_PHY_INT)
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the EEPROM register group base
    #[must_use]
    pub const fn with_eeprom_base(mut self, base: u16) -> Self {
        self.eeprom_base = base;
        self
    }

    /// Set the EEPROM offset of the MAC address
    #[must_use]
    pub const fn with_eeprom_mac_offset(mut self, offset: u8) -> Self {
        self.eeprom_mac_offset = offset;
        self
    }

    /// Set the MII register group base
    #[must_use]
    pub const fn with_mii_base(mut self, base: u16) -> Self {
        self.mii_base = base;
        self
    }

    /// Set the MII access word layout
    #[must_use]
    pub const fn with_mii_layout(mut self, layout: MiiLayout) -> Self {
        self.mii_layout = layout;
        self
    }

    /// Set the receive address register group base
    #[must_use]
    pub const fn with_rx_addr_base(mut self, base: u16) -> Self {
        self.rx_addr_base = base;
        self
    }

    /// Set the perfect filter table
    #[must_use]
    pub const fn with_filter_table(mut self, table: FilterTable) -> Self {
        self.filter_table = Some(table);
        self
    }

    /// Set the `INT_STS` PHY interrupt bit
    #[must_use]
    pub const fn with_phy_interrupt(mut self, mask: u32) -> Self {
        self.phy_interrupt = mask;
        self
    }

    /// Set the busy-poll bounds
    #[must_use]
    pub const fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    // =========================================================================
    // Derived Offsets
    // =========================================================================

    /// Receive address high register
    pub const fn rx_addr_high(&self) -> u16 {
        self.rx_addr_base + RX_ADDRH
    }

    /// Receive address low register
    pub const fn rx_addr_low(&self) -> u16 {
        self.rx_addr_base + RX_ADDRL
    }

    /// Check the configuration for values the state machines cannot use
    pub const fn validate(&self) -> ConfigResult<()> {
        let t = &self.timing;
        if t.eeprom_timeout_ms == 0
            || t.mii_timeout_ms == 0
            || t.phy_reset_timeout_ms == 0
            || t.poll_interval_us == 0
        {
            return Err(ConfigError::InvalidTiming);
        }

        // Each group is a command/data (or high/low) pair at base and base + 4
        if !group_fits(self.eeprom_base)
            || !group_fits(self.mii_base)
            || !group_fits(self.rx_addr_base)
        {
            return Err(ConfigError::InvalidRegisterBase);
        }

        if let Some(table) = &self.filter_table {
            if table.slots == 0 {
                return Err(ConfigError::InvalidFilterSlot);
            }
            if table.stride < ADDR_FILTL + 4 {
                return Err(ConfigError::InvalidFilterStride);
            }
            // Last slot's low register must stay inside the 16-bit space
            let last = table.base as usize
                + ADDR_FILTL as usize
                + table.stride as usize * (table.slots - 1);
            if last > u16::MAX as usize - 3 {
                return Err(ConfigError::InvalidFilterSlot);
            }
        }

        Ok(())
    }
}

/// Both registers of a pair at `base` are addressable
const fn group_fits(base: u16) -> bool {
    base as usize + REGISTER_PAIR_OFFSET as usize <= u16::MAX as usize
}

// =============================================================================
// Unit Tests
// =============================================================================
