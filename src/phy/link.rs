//! Link-State Derivation
//!
//! The SMSC internal PHY latches link events in its interrupt source
//! register. A link check reads the latched causes, acknowledges them by
//! writing the value back, then reads the current link status from BMSR.
//! [`LinkMonitor`] keeps the previous snapshot so each check can report what
//! changed.

use super::generic::ieee802_3;
use crate::driver::error::Result;
use crate::hal::mdio::MiiBus;
use crate::internal::phy_regs::smsc::{INTR_SOURCE, intr};

// =============================================================================
// Interrupt Causes
// =============================================================================

/// Latched PHY interrupt causes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyInterrupt(u16);

impl PhyInterrupt {
    /// Causes the link monitor unmasks
    pub const LINK_EVENTS: Self = Self(intr::ANEG_DONE | intr::LINK_DOWN);

    /// Wrap a raw interrupt source value
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Raw register value
    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Auto-negotiation completed
    pub const fn aneg_done(&self) -> bool {
        self.0 & intr::ANEG_DONE != 0
    }

    /// Link went down
    pub const fn link_down(&self) -> bool {
        self.0 & intr::LINK_DOWN != 0
    }

    /// No cause latched
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Link Events
// =============================================================================

/// Net effect of one link check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkTransition {
    /// Nothing to report
    Unchanged,
    /// Link came up
    Up,
    /// Link went down
    Down,
    /// Link went down and came back since the last check
    Bounced,
}

/// Result of one link check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkEvent {
    /// Causes latched since the previous check
    pub causes: PhyInterrupt,
    /// Link state after the previous check
    pub was_up: bool,
    /// Link state now
    pub is_up: bool,
}

impl LinkEvent {
    /// Classify the event
    ///
    /// A latched link-down with the link now up means the link dropped and
    /// recovered between two checks. The cause bits alone never override the
    /// BMSR reading for the final state.
    pub const fn transition(&self) -> LinkTransition {
        match (self.was_up, self.is_up) {
            (false, true) => LinkTransition::Up,
            (true, false) => LinkTransition::Down,
            (true, true) if self.causes.link_down() => LinkTransition::Bounced,
            (false, false) if self.causes.link_down() && self.causes.aneg_done() => {
                LinkTransition::Bounced
            }
            _ => LinkTransition::Unchanged,
        }
    }

    /// Link state differs from the previous check
    pub const fn changed(&self) -> bool {
        self.was_up != self.is_up
    }
}

// =============================================================================
// Link Monitor
// =============================================================================

/// Link state tracked across checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkMonitor {
    link_up: bool,
    last_causes: PhyInterrupt,
}

impl LinkMonitor {
    /// Link down, no causes seen
    pub const fn new() -> Self {
        Self {
            link_up: false,
            last_causes: PhyInterrupt(0),
        }
    }

    /// Link state from the latest check
    pub const fn is_up(&self) -> bool {
        self.link_up
    }

    /// Causes latched at the latest check
    pub const fn last_causes(&self) -> PhyInterrupt {
        self.last_causes
    }

    /// Fold one pair of readings into the snapshot
    pub fn apply(&mut self, causes: PhyInterrupt, link_up: bool) -> LinkEvent {
        let event = LinkEvent {
            causes,
            was_up: self.link_up,
            is_up: link_up,
        };

        self.link_up = link_up;
        self.last_causes = causes;
        event
    }

    /// Read, acknowledge and interpret the PHY's latched causes
    pub fn check<M: MiiBus + ?Sized>(&mut self, mii: &mut M) -> Result<LinkEvent> {
        let causes = PhyInterrupt::from_bits(mii.read(INTR_SOURCE)?);

        // Acknowledge exactly what was latched
        mii.write(INTR_SOURCE, causes.bits())?;

        let link_up = ieee802_3::is_link_up(mii)?;
        let event = self.apply(causes, link_up);

        match event.transition() {
            LinkTransition::Up => debug!("link up (causes {:#06x})", causes.bits()),
            LinkTransition::Down => debug!("link down (causes {:#06x})", causes.bits()),
            LinkTransition::Bounced => debug!("link bounced (causes {:#06x})", causes.bits()),
            LinkTransition::Unchanged => {}
        }

        Ok(event)
    }
}
