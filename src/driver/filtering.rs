//! Receive address and perfect filter programming.
//!
//! This module extends [`SmscDevice`] with the two register-pair writes that
//! consume a [`MacAddress`]:
//!
//! - **Receive address** - the station address the MAC accepts
//! - **Perfect filters** - extra exact-match slots, on variants that have them
//!
//! Both pairs put address bytes 0-3 in the low register and bytes 4-5 in bits
//! 15:0 of the high register. The filter high register also carries the slot
//! valid bit (31), so the high register is always written first: a slot never
//! becomes valid before its address bytes 4-5 are in place, and clearing a
//! slot only touches the high register.
//!
//! No slot bookkeeping happens here. Callers choose the slot index.

use super::address::MacAddress;
use super::config::FilterTable;
use super::device::SmscDevice;
use super::error::{ConfigError, Result};
use crate::hal::clock::Clock;
use crate::hal::usb::ControlTransfer;
use crate::internal::register::ADDR_FILTH_VALID;

impl<U: ControlTransfer, C: Clock> SmscDevice<U, C> {
    /// Program the receive address
    pub fn set_address(&mut self, mac: MacAddress) -> Result<()> {
        let (high, low) = (self.config().rx_addr_high(), self.config().rx_addr_low());
        let pair = mac.to_registers();

        self.registers().write(high, pair.high)?;
        self.registers().write(low, pair.low)?;

        debug!("receive address {}", mac);
        Ok(())
    }

    /// Program or clear perfect filter slot `index`
    ///
    /// `Some(mac)` writes the address with the valid bit set. `None` clears
    /// only the valid bit, leaving the stored address bytes as they were.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::NoFilterTable`] - the variant has no perfect filters
    /// * [`ConfigError::InvalidFilterSlot`] - `index` is past the table
    pub fn set_filter(&mut self, index: usize, mac: Option<MacAddress>) -> Result<()> {
        let table = self.filter_table()?;
        if index >= table.slots {
            return Err(ConfigError::InvalidFilterSlot.into());
        }

        let (high, low) = (table.high(index), table.low(index));

        match mac {
            Some(mac) => {
                let pair = mac.to_registers();
                self.registers().write(high, pair.high | ADDR_FILTH_VALID)?;
                self.registers().write(low, pair.low)?;
                debug!("filter {} = {}", index, mac);
            }
            None => {
                self.registers().modify(high, ADDR_FILTH_VALID, 0)?;
                debug!("filter {} cleared", index);
            }
        }

        Ok(())
    }

    /// Number of perfect filter slots (zero without a table)
    pub fn filter_slots(&self) -> usize {
        self.config().filter_table.map_or(0, |t| t.slots)
    }

    fn filter_table(&self) -> Result<FilterTable> {
        self.config()
            .filter_table
            .ok_or_else(|| ConfigError::NoFilterTable.into())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
