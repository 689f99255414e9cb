//! Generic PHY Helpers
//!
//! IEEE 802.3 Clause 22 operations shared by any PHY reached through a
//! [`MiiBus`].

use crate::driver::error::Result;
use crate::hal::mdio::MiiBus;

// =============================================================================
// PHY Identifier
// =============================================================================

/// PHY identifier from PHYIDR1/PHYIDR2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyId(u32);

impl PhyId {
    /// Combine the two identifier registers
    pub const fn from_registers(id1: u16, id2: u16) -> Self {
        Self(((id1 as u32) << 16) | id2 as u32)
    }

    /// `(PHYIDR1 << 16) | PHYIDR2`
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Organizationally unique identifier (bits 3-24)
    pub const fn oui(&self) -> u32 {
        let id1 = self.0 >> 16;
        let id2 = self.0 & 0xffff;
        (id1 << 6) | (id2 >> 10)
    }

    /// Manufacturer model number
    pub const fn model(&self) -> u8 {
        ((self.0 >> 4) & 0x3f) as u8
    }

    /// Revision number
    pub const fn revision(&self) -> u8 {
        (self.0 & 0x0f) as u8
    }
}

// =============================================================================
// Default Implementations
// =============================================================================

/// Helper functions using standard IEEE 802.3 registers
pub mod ieee802_3 {
    use super::*;
    use crate::internal::phy_regs::standard::{bmcr, bmsr, phy_reg};

    /// Read BMSR and check link status bit
    pub fn is_link_up<M: MiiBus + ?Sized>(mii: &mut M) -> Result<bool> {
        let bmsr_val = mii.read(phy_reg::BMSR)?;
        Ok((bmsr_val & bmsr::LINK_STATUS) != 0)
    }

    /// Read BMSR and check AN complete bit
    pub fn is_an_complete<M: MiiBus + ?Sized>(mii: &mut M) -> Result<bool> {
        let bmsr_val = mii.read(phy_reg::BMSR)?;
        Ok((bmsr_val & bmsr::AN_COMPLETE) != 0)
    }

    /// Read PHY ID from PHYIDR1 and PHYIDR2
    pub fn read_phy_id<M: MiiBus + ?Sized>(mii: &mut M) -> Result<PhyId> {
        let id1 = mii.read(phy_reg::PHYIDR1)?;
        let id2 = mii.read(phy_reg::PHYIDR2)?;
        Ok(PhyId::from_registers(id1, id2))
    }

    /// Request a soft reset with auto-negotiation enabled
    ///
    /// The reset bit self-clears; poll [`reset_pending`] for completion.
    pub fn start_reset<M: MiiBus + ?Sized>(mii: &mut M) -> Result<()> {
        mii.write(phy_reg::BMCR, bmcr::RESET | bmcr::AN_ENABLE)
    }

    /// Soft reset still in progress
    pub fn reset_pending<M: MiiBus + ?Sized>(mii: &mut M) -> Result<bool> {
        let bmcr_val = mii.read(phy_reg::BMCR)?;
        Ok((bmcr_val & bmcr::RESET) != 0)
    }

    /// Enable auto-negotiation and restart
    pub fn restart_auto_negotiation<M: MiiBus + ?Sized>(mii: &mut M) -> Result<()> {
        let bmcr_val = mii.read(phy_reg::BMCR)?;
        mii.write(phy_reg::BMCR, bmcr_val | bmcr::AN_ENABLE | bmcr::AN_RESTART)
    }
}
