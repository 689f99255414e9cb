//! EEPROM Reader
//!
//! The serial EEPROM sits behind a two-register command/data interface. A
//! single byte is fetched by waiting for the controller to go idle, issuing a
//! READ command, waiting again and reading the data register:
//!
//! ```text
//! E2P_CMD  (base + 0x000)   BSY[31] | CMD[30:28] | ADDR[7:0]
//! E2P_DATA (base + 0x004)   DATA[7:0]
//! ```
//!
//! Both waits are bounded by time on the device clock.

use super::clock::{BusyPoll, Clock, PollResult};
use super::usb::{ControlTransfer, Registers};
use crate::driver::address::MacAddress;
use crate::driver::error::{ConfigError, Error, Result, TimeoutError};
use crate::internal::constants::{EEPROM_SIZE, MAC_ADDR_LEN};
use crate::internal::register::{
    E2P_CMD, E2P_CMD_EPC_ADDR_SHIFT, E2P_CMD_EPC_BSY, E2P_CMD_EPC_CMD_READ, E2P_DATA,
    E2P_DATA_MASK,
};

/// EEPROM access through a device's vendor registers
///
/// Borrowed from [`SmscDevice::eeprom`](crate::driver::device::SmscDevice::eeprom).
pub struct Eeprom<'a, U: ControlTransfer, C: Clock> {
    regs: &'a mut Registers<U>,
    clock: &'a mut C,
    base: u16,
    mac_offset: u8,
    poll: BusyPoll,
}

impl<'a, U: ControlTransfer, C: Clock> Eeprom<'a, U, C> {
    /// Build a reader over the EEPROM register group at `base`
    pub fn new(
        regs: &'a mut Registers<U>,
        clock: &'a mut C,
        base: u16,
        mac_offset: u8,
        poll: BusyPoll,
    ) -> Self {
        Self {
            regs,
            clock,
            base,
            mac_offset,
            poll,
        }
    }

    const fn cmd(&self) -> u16 {
        self.base + E2P_CMD
    }

    const fn data(&self) -> u16 {
        self.base + E2P_DATA
    }

    /// Wait for the EPC_BSY bit to clear
    fn wait_not_busy(&mut self, address: u8) -> Result<()> {
        let cmd = self.cmd();
        let regs = &mut *self.regs;

        match self
            .poll
            .run(self.clock, || Ok(regs.read(cmd)? & E2P_CMD_EPC_BSY != 0))?
        {
            PollResult::Ready => Ok(()),
            PollResult::TimedOut => {
                warn!("EEPROM busy timed out at {:#x}", address);
                Err(TimeoutError::EepromBusy { address }.into())
            }
        }
    }

    /// Read one byte
    pub fn read_byte(&mut self, address: u8) -> Result<u8> {
        self.wait_not_busy(address)?;

        let command =
            E2P_CMD_EPC_BSY | E2P_CMD_EPC_CMD_READ | ((address as u32) << E2P_CMD_EPC_ADDR_SHIFT);
        let cmd = self.cmd();
        self.regs.write(cmd, command)?;

        self.wait_not_busy(address)?;

        let data = self.data();
        let data = self.regs.read(data)?;
        Ok((data & E2P_DATA_MASK) as u8)
    }

    /// Read `buf.len()` consecutive bytes starting at `address`
    ///
    /// Bytes are fetched in ascending order. On error the contents of `buf`
    /// are unspecified.
    pub fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<()> {
        if address as usize + buf.len() > EEPROM_SIZE {
            return Err(ConfigError::InvalidEepromRange.into());
        }

        for (offset, byte) in buf.iter_mut().enumerate() {
            *byte = self.read_byte(address + offset as u8)?;
        }
        Ok(())
    }

    /// Read the burned-in MAC address
    ///
    /// An all-zero or group address is reported as [`Error::NoAddress`] so
    /// the caller can fall back to a locally administered one.
    pub fn fetch_mac(&mut self) -> Result<MacAddress> {
        let mut bytes = [0u8; MAC_ADDR_LEN];
        self.read(self.mac_offset, &mut bytes)?;

        let mac = MacAddress::new(bytes);
        if !mac.is_valid() {
            debug!("EEPROM holds no usable MAC ({})", mac);
            return Err(Error::NoAddress(mac));
        }

        debug!("EEPROM MAC {}", mac);
        Ok(mac)
    }
}
