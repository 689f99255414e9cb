//! Device context
//!
//! [`SmscDevice`] is the per-device state shared by bring-up, link polling
//! and the interrupt path: the register transport, the clock bounding every
//! busy poll, the validated chip configuration, the MII link snapshot and the
//! latest interrupt status.
//!
//! Every operation takes `&mut self`, so one owner serializes all register
//! traffic for the device. Use [`SharedDevice`](crate::sync::SharedDevice)
//! when the interrupt path runs in a different context.
//!
//! # Example
//!
//! ```ignore
//! use ph_smscusb::{MacAddress, SmscConfig, SmscDevice};
//!
//! let mut device = SmscDevice::new(usb, clock, SmscConfig::lan95xx())?;
//!
//! let mac = match device.fetch_mac() {
//!     Ok(mac) => mac,
//!     Err(Error::NoAddress(_)) => MacAddress::new([0x02, 0, 0, 0, 0, 1]),
//!     Err(e) => return Err(e),
//! };
//! device.set_address(mac)?;
//! device.mii_open()?;
//!
//! // From the interrupt endpoint completion
//! device.record_interrupt(&packet)?;
//!
//! // From the poll loop
//! if let Some(event) = device.poll_link()? {
//!     // update carrier from event.is_up
//! }
//! ```

use super::address::MacAddress;
use super::config::SmscConfig;
use super::error::{ConfigResult, Result, TimeoutError};
use super::interrupt::{InterruptPacket, InterruptStatus};
use crate::hal::clock::{BusyPoll, Clock};
use crate::hal::eeprom::Eeprom;
use crate::hal::mdio::{MiiBus, SmscMii};
use crate::hal::usb::{ControlTransfer, Registers};
use crate::internal::phy_regs::smsc::INTR_MASK;
use crate::phy::generic::{PhyId, ieee802_3};
use crate::phy::link::{LinkEvent, LinkMonitor, PhyInterrupt};

/// One attached SMSC USB Ethernet controller
pub struct SmscDevice<U: ControlTransfer, C: Clock> {
    regs: Registers<U>,
    clock: C,
    config: SmscConfig,
    link: LinkMonitor,
    int_sts: InterruptStatus,
}

impl<U: ControlTransfer, C: Clock> SmscDevice<U, C> {
    /// Attach to a device
    ///
    /// No transfer is issued; the configuration is only validated.
    pub fn new(usb: U, clock: C, config: SmscConfig) -> ConfigResult<Self> {
        config.validate()?;

        Ok(Self {
            regs: Registers::new(usb),
            clock,
            config,
            link: LinkMonitor::new(),
            int_sts: InterruptStatus::NONE,
        })
    }

    /// Detach, giving back the transport and the clock
    pub fn release(self) -> (U, C) {
        (self.regs.into_inner(), self.clock)
    }

    /// Chip configuration in use
    pub fn config(&self) -> &SmscConfig {
        &self.config
    }

    /// Raw register transport
    pub fn registers(&mut self) -> &mut Registers<U> {
        &mut self.regs
    }

    /// EEPROM reader borrowing this device
    pub fn eeprom(&mut self) -> Eeprom<'_, U, C> {
        let timing = self.config.timing;
        Eeprom::new(
            &mut self.regs,
            &mut self.clock,
            self.config.eeprom_base,
            self.config.eeprom_mac_offset,
            BusyPoll::new(timing.eeprom_timeout_ms, timing.poll_interval_us),
        )
    }

    /// MII accessor borrowing this device
    pub fn mii(&mut self) -> SmscMii<'_, U, C> {
        self.split_mii().0
    }

    fn split_mii(&mut self) -> (SmscMii<'_, U, C>, &mut LinkMonitor) {
        let timing = self.config.timing;
        let mii = SmscMii::new(
            &mut self.regs,
            &mut self.clock,
            self.config.mii_base,
            self.config.mii_layout,
            BusyPoll::new(timing.mii_timeout_ms, timing.poll_interval_us),
        );
        (mii, &mut self.link)
    }

    // =========================================================================
    // EEPROM
    // =========================================================================

    /// Read the burned-in MAC address from the EEPROM
    pub fn fetch_mac(&mut self) -> Result<MacAddress> {
        self.eeprom().fetch_mac()
    }

    // =========================================================================
    // PHY
    // =========================================================================

    /// Unmask the PHY link interrupts and take an initial link reading
    pub fn mii_open(&mut self) -> Result<LinkEvent> {
        self.mii().write(INTR_MASK, PhyInterrupt::LINK_EVENTS.bits())?;
        self.check_link()
    }

    /// Read, acknowledge and interpret the PHY's latched link causes
    pub fn check_link(&mut self) -> Result<LinkEvent> {
        let (mut mii, link) = self.split_mii();
        link.check(&mut mii)
    }

    /// Soft-reset the PHY and wait for the reset bit to self-clear
    pub fn mii_reset(&mut self) -> Result<()> {
        let timing = self.config.timing;
        let poll = BusyPoll::new(timing.phy_reset_timeout_ms, timing.poll_interval_us);

        ieee802_3::start_reset(&mut self.mii())?;

        let deadline = poll.start(&mut self.clock);
        loop {
            let expired = deadline.expired(&mut self.clock);

            if !ieee802_3::reset_pending(&mut self.mii())? {
                debug!("PHY reset complete");
                return Ok(());
            }
            if expired {
                warn!("PHY reset timed out");
                return Err(TimeoutError::PhyReset.into());
            }

            poll.pause(&mut self.clock);
        }
    }

    /// PHY identifier
    pub fn phy_id(&mut self) -> Result<PhyId> {
        ieee802_3::read_phy_id(&mut self.mii())
    }

    /// Link state from the latest check
    pub fn link_up(&self) -> bool {
        self.link.is_up()
    }

    // =========================================================================
    // Interrupt Endpoint
    // =========================================================================

    /// Store the status carried by an interrupt endpoint packet
    ///
    /// The new value replaces any snapshot not yet taken.
    pub fn record_interrupt(&mut self, packet: &[u8]) -> Result<InterruptStatus> {
        let status = InterruptPacket::parse(packet)?;
        trace!("INT_STS {:#010x}", status.raw());
        self.int_sts = status;
        Ok(status)
    }

    /// Latest interrupt status
    pub fn interrupt_status(&self) -> InterruptStatus {
        self.int_sts
    }

    /// Latest interrupt status, clearing the snapshot
    pub fn take_interrupt_status(&mut self) -> InterruptStatus {
        core::mem::take(&mut self.int_sts)
    }

    /// Handle a pending PHY interrupt, if any
    ///
    /// When the snapshot carries the variant's PHY interrupt bit, that bit is
    /// cleared and the link is checked. Other `INT_STS` bits stay in the
    /// snapshot for the caller.
    pub fn poll_link(&mut self) -> Result<Option<LinkEvent>> {
        let phy = self.config.phy_interrupt;
        if !self.int_sts.contains(phy) {
            return Ok(None);
        }

        self.int_sts = InterruptStatus::from_raw(self.int_sts.raw() & !phy);
        self.check_link().map(Some)
    }
}

impl<U: ControlTransfer, C: Clock> core::fmt::Debug for SmscDevice<U, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SmscDevice")
            .field("config", &self.config)
            .field("link", &self.link)
            .field("int_sts", &self.int_sts)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
