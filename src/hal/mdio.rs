//! MII Accessor
//!
//! PHY registers are reached through an access/data register pair in the
//! vendor register space. A transaction waits for the controller to go idle,
//! stages data (writes only), triggers the access with the busy flag set and
//! waits for the busy flag to clear again:
//!
//! ```text
//! MII_ACCESS (base + 0x000)   PHY address | index << shift | WRITE | BUSY
//! MII_DATA   (base + 0x004)   DATA[15:0]
//! ```
//!
//! The bit layout of the access word comes from the chip variant's
//! [`MiiLayout`].

use super::clock::{BusyPoll, Clock, PollResult};
use super::usb::{ControlTransfer, Registers};
use crate::driver::config::MiiLayout;
use crate::driver::error::{ConfigError, Direction, Result, TimeoutError};
use crate::internal::phy_regs::standard::MAX_REG_INDEX;
use crate::internal::register::{MII_ACCESS, MII_DATA, MII_DATA_MASK};

// =============================================================================
// MII Bus Trait
// =============================================================================

/// Trait for MII management operations on a single PHY
///
/// This is the capability set a PHY management layer consumes. The PHY
/// address is fixed by the implementation.
pub trait MiiBus {
    /// Read a PHY register
    fn read(&mut self, index: u8) -> Result<u16>;

    /// Write a PHY register
    fn write(&mut self, index: u8, value: u16) -> Result<()>;
}

impl<T: MiiBus + ?Sized> MiiBus for &mut T {
    fn read(&mut self, index: u8) -> Result<u16> {
        (**self).read(index)
    }

    fn write(&mut self, index: u8, value: u16) -> Result<()> {
        (**self).write(index, value)
    }
}

// =============================================================================
// SMSC MII Controller
// =============================================================================

/// MII access through a device's vendor registers
///
/// Borrowed from [`SmscDevice::mii`](crate::driver::device::SmscDevice::mii).
pub struct SmscMii<'a, U: ControlTransfer, C: Clock> {
    regs: &'a mut Registers<U>,
    clock: &'a mut C,
    base: u16,
    layout: MiiLayout,
    poll: BusyPoll,
}

impl<'a, U: ControlTransfer, C: Clock> SmscMii<'a, U, C> {
    /// Build an accessor over the MII register group at `base`
    pub fn new(
        regs: &'a mut Registers<U>,
        clock: &'a mut C,
        base: u16,
        layout: MiiLayout,
        poll: BusyPoll,
    ) -> Self {
        Self {
            regs,
            clock,
            base,
            layout,
            poll,
        }
    }

    const fn access(&self) -> u16 {
        self.base + MII_ACCESS
    }

    const fn data(&self) -> u16 {
        self.base + MII_DATA
    }

    /// Sample the busy flag once
    pub fn is_busy(&mut self) -> Result<bool> {
        let access = self.access();
        Ok(self.regs.read(access)? & self.layout.busy != 0)
    }

    /// Wait for MII operation to complete
    fn wait_not_busy(&mut self, index: u8, direction: Direction) -> Result<()> {
        let access = self.access();
        let busy = self.layout.busy;
        let regs = &mut *self.regs;

        match self
            .poll
            .run(self.clock, || Ok(regs.read(access)? & busy != 0))?
        {
            PollResult::Ready => Ok(()),
            PollResult::TimedOut => {
                warn!("MII busy timed out on {} of {}", direction.as_str(), index);
                Err(TimeoutError::MiiBusy { index, direction }.into())
            }
        }
    }

    fn check_index(index: u8) -> Result<()> {
        if index > MAX_REG_INDEX {
            return Err(ConfigError::InvalidRegisterIndex.into());
        }
        Ok(())
    }
}

impl<U: ControlTransfer, C: Clock> MiiBus for SmscMii<'_, U, C> {
    fn read(&mut self, index: u8) -> Result<u16> {
        Self::check_index(index)?;

        // Wait for any pending operation
        self.wait_not_busy(index, Direction::Read)?;

        // Writing the access word triggers the read
        let access = self.access();
        self.regs.write(access, self.layout.access_word(index, false))?;

        self.wait_not_busy(index, Direction::Read)?;

        let data = self.data();
        let value = (self.regs.read(data)? & MII_DATA_MASK) as u16;
        trace!("MII {} => {:#06x}", index, value);
        Ok(value)
    }

    fn write(&mut self, index: u8, value: u16) -> Result<()> {
        Self::check_index(index)?;

        // Wait for any pending operation
        self.wait_not_busy(index, Direction::Write)?;

        // Data first, then the access word triggers the write
        let data = self.data();
        self.regs.write(data, value as u32)?;

        let access = self.access();
        self.regs.write(access, self.layout.access_word(index, true))?;

        self.wait_not_busy(index, Direction::Write)?;
        trace!("MII {} <= {:#06x}", index, value);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
