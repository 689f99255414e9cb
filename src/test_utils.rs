//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the register-access
//! core on the host without a USB device.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::vec::Vec;

use crate::driver::config::SmscConfig;
use crate::driver::error::{Result, UsbError};
use crate::hal::clock::Clock;
use crate::hal::mdio::MiiBus;
use crate::hal::usb::{ControlRequest, ControlTransfer};
use crate::internal::constants::{
    REQUEST_GET_STATISTICS, REQUEST_REGISTER_READ, REQUEST_REGISTER_WRITE,
};
use crate::internal::phy_regs::smsc::INTR_SOURCE;
use crate::internal::phy_regs::standard::{bmcr, bmsr, phy_reg};
use crate::internal::register::{
    E2P_CMD, E2P_CMD_EPC_BSY, E2P_DATA, MII_ACCESS, MII_ACCESS_MIIBZY, MII_ACCESS_MIIWNR,
    MII_DATA,
};

// =============================================================================
// Mock Clock
// =============================================================================

/// Simulated monotonic clock
///
/// Time only moves when something delays on it or calls
/// [`advance_us`](Self::advance_us). Clones share the same time line, so a
/// test can keep a handle while the device owns the clock.
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    now_ns: Rc<Cell<u64>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time in microseconds
    pub fn now(&self) -> u64 {
        self.now_ns.get() / 1_000
    }

    pub fn advance_us(&self, us: u64) {
        self.now_ns.set(self.now_ns.get() + us * 1_000);
    }
}

impl embedded_hal::delay::DelayNs for MockClock {
    fn delay_ns(&mut self, ns: u32) {
        self.now_ns.set(self.now_ns.get() + ns as u64);
    }
}

impl Clock for MockClock {
    fn now_us(&mut self) -> u64 {
        self.now()
    }
}

// =============================================================================
// Mock USB Device
// =============================================================================

/// One control transfer seen by [`MockUsb`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    Read { address: u16 },
    Write { address: u16, bytes: [u8; 4] },
    Statistics { index: u16, len: usize },
    Other { request: u8 },
}

#[derive(Debug, Default)]
struct EepromSim {
    base: u16,
    contents: Vec<u8>,
    cmd: u32,
    data: u32,
    reads: Vec<u8>,
    stuck_at: Option<u8>,
    stuck: bool,
    busy_polls: u32,
    busy_remaining: u32,
    violations: u32,
}

impl EepromSim {
    fn busy(&self) -> bool {
        self.stuck || self.busy_remaining > 0
    }
}

#[derive(Debug, Default)]
struct MiiSim {
    base: u16,
    access: u32,
    data: u32,
    phy: HashMap<u8, u16>,
    phy_writes: Vec<(u8, u16)>,
    busy_polls: u32,
    busy_remaining: u32,
    stuck: bool,
    violations: u32,
    reset_polls: u32,
    reset_remaining: Option<u32>,
}

impl MiiSim {
    fn busy(&self) -> bool {
        self.stuck || self.busy_remaining > 0
    }

    fn phy_read(&mut self, index: u8) -> u16 {
        let value = self.phy.get(&index).copied().unwrap_or(0);

        if index == INTR_SOURCE {
            // Clear on read
            self.phy.insert(index, 0);
        }

        if index == phy_reg::BMCR {
            if let Some(remaining) = self.reset_remaining {
                if remaining == 0 {
                    self.reset_remaining = None;
                } else {
                    if remaining != u32::MAX {
                        self.reset_remaining = Some(remaining - 1);
                    }
                    return value | bmcr::RESET;
                }
            }
        }

        value
    }

    fn phy_write(&mut self, index: u8, value: u16) {
        self.phy_writes.push((index, value));

        if index == INTR_SOURCE {
            let current = self.phy.get(&index).copied().unwrap_or(0);
            self.phy.insert(index, current & !value);
        } else if index == phy_reg::BMCR && value & bmcr::RESET != 0 {
            self.reset_remaining = Some(self.reset_polls);
            self.phy.insert(index, value & !bmcr::RESET);
        } else {
            self.phy.insert(index, value);
        }
    }
}

#[derive(Debug, Default)]
struct UsbState {
    registers: HashMap<u16, u32>,
    statistics: HashMap<u16, Vec<u8>>,
    transfers: Vec<Transfer>,
    fail_at: Option<(usize, UsbError)>,
    short_next: Option<usize>,
    eeprom: Option<EepromSim>,
    mii: Option<MiiSim>,
    latency: Option<(MockClock, u64)>,
}

impl UsbState {
    fn read_register(&mut self, address: u16) -> u32 {
        if let Some(e2p) = self.eeprom.as_mut() {
            if address == e2p.base + E2P_CMD {
                let busy = e2p.busy();
                if e2p.busy_remaining > 0 {
                    e2p.busy_remaining -= 1;
                }
                let flag = if busy { E2P_CMD_EPC_BSY } else { 0 };
                return (e2p.cmd & !E2P_CMD_EPC_BSY) | flag;
            }
            if address == e2p.base + E2P_DATA {
                if e2p.busy() {
                    e2p.violations += 1;
                }
                return e2p.data;
            }
        }

        if let Some(mii) = self.mii.as_mut() {
            if address == mii.base + MII_ACCESS {
                let busy = mii.busy();
                if mii.busy_remaining > 0 {
                    mii.busy_remaining -= 1;
                }
                let flag = if busy { MII_ACCESS_MIIBZY } else { 0 };
                return (mii.access & !MII_ACCESS_MIIBZY) | flag;
            }
            if address == mii.base + MII_DATA {
                return mii.data;
            }
        }

        self.registers.get(&address).copied().unwrap_or(0)
    }

    fn write_register(&mut self, address: u16, value: u32) {
        if let Some(e2p) = self.eeprom.as_mut() {
            if address == e2p.base + E2P_CMD {
                if e2p.busy() {
                    e2p.violations += 1;
                }
                e2p.cmd = value;
                if value & E2P_CMD_EPC_BSY != 0 {
                    e2p.busy_remaining = e2p.busy_polls;
                    let offset = (value & 0xff) as u8;
                    e2p.reads.push(offset);
                    if e2p.stuck_at == Some(offset) {
                        e2p.stuck = true;
                    }
                    // Unprogrammed cells read as 0xff
                    e2p.data = e2p.contents.get(offset as usize).copied().unwrap_or(0xff) as u32;
                }
                return;
            }
            if address == e2p.base + E2P_DATA {
                e2p.data = value;
                return;
            }
        }

        if let Some(mii) = self.mii.as_mut() {
            if address == mii.base + MII_ACCESS {
                if mii.busy() {
                    mii.violations += 1;
                }
                mii.access = value;
                if value & MII_ACCESS_MIIBZY != 0 {
                    let index = ((value >> 6) & 0x1f) as u8;
                    if value & MII_ACCESS_MIIWNR != 0 {
                        mii.phy_write(index, (mii.data & 0xffff) as u16);
                    } else {
                        mii.data = mii.phy_read(index) as u32;
                    }
                    mii.busy_remaining = mii.busy_polls;
                }
                return;
            }
            if address == mii.base + MII_DATA {
                if mii.busy() {
                    mii.violations += 1;
                }
                mii.data = value;
                return;
            }
        }

        self.registers.insert(address, value);
    }
}

/// Register-file simulator of an SMSC USB Ethernet controller
///
/// Plain registers behave as memory. When attached, the EEPROM and MII
/// register groups run the command/busy state machines of the real
/// controller, including a PHY register file with a clear-on-read interrupt
/// source and a self-clearing soft reset. Clones share state so a test can
/// inspect the device after handing a clone to the driver.
#[derive(Debug, Clone, Default)]
pub struct MockUsb {
    state: Rc<RefCell<UsbState>>,
}

impl MockUsb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulator with an EEPROM at `base` holding `contents` from address 0
    pub fn with_eeprom(base: u16, contents: &[u8]) -> Self {
        let usb = Self::new();
        usb.attach_eeprom(base, contents);
        usb
    }

    /// Simulator with an MII controller at `base`
    pub fn with_mii(base: u16) -> Self {
        let usb = Self::new();
        usb.attach_mii(base);
        usb
    }

    /// Simulator laid out like `config`, with an EEPROM holding `contents`
    pub fn for_config(config: &SmscConfig, contents: &[u8]) -> Self {
        let usb = Self::new();
        usb.attach_eeprom(config.eeprom_base, contents);
        usb.attach_mii(config.mii_base);
        usb
    }

    pub fn attach_eeprom(&self, base: u16, contents: &[u8]) {
        self.state.borrow_mut().eeprom = Some(EepromSim {
            base,
            contents: contents.to_vec(),
            ..EepromSim::default()
        });
    }

    pub fn attach_mii(&self, base: u16) {
        self.state.borrow_mut().mii = Some(MiiSim {
            base,
            ..MiiSim::default()
        });
    }

    // -------------------------------------------------------------------------
    // Plain registers and transfer log
    // -------------------------------------------------------------------------

    pub fn set_register(&self, address: u16, value: u32) {
        self.state.borrow_mut().registers.insert(address, value);
    }

    pub fn register(&self, address: u16) -> u32 {
        self.state
            .borrow()
            .registers
            .get(&address)
            .copied()
            .unwrap_or(0)
    }

    pub fn set_statistics(&self, index: u16, bytes: &[u8]) {
        self.state
            .borrow_mut()
            .statistics
            .insert(index, bytes.to_vec());
    }

    pub fn transfers(&self) -> Vec<Transfer> {
        self.state.borrow().transfers.clone()
    }

    pub fn transfer_count(&self) -> usize {
        self.state.borrow().transfers.len()
    }

    pub fn clear_transfers(&self) {
        self.state.borrow_mut().transfers.clear();
    }

    /// Register writes only, as `(address, value)`
    pub fn register_writes(&self) -> Vec<(u16, u32)> {
        self.state
            .borrow()
            .transfers
            .iter()
            .filter_map(|t| match *t {
                Transfer::Write { address, bytes } => Some((address, u32::from_le_bytes(bytes))),
                _ => None,
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Fault injection
    // -------------------------------------------------------------------------

    /// Fail the transfer with zero-based sequence number `index`
    pub fn fail_at(&self, index: usize, cause: UsbError) {
        self.state.borrow_mut().fail_at = Some((index, cause));
    }

    /// Fail the next transfer
    pub fn fail_next(&self, cause: UsbError) {
        let mut state = self.state.borrow_mut();
        let next = state.transfers.len();
        state.fail_at = Some((next, cause));
    }

    /// Make the next transfer move only `len` bytes
    pub fn short_next(&self, len: usize) {
        self.state.borrow_mut().short_next = Some(len);
    }

    /// Advance `clock` by `us` on every transfer
    pub fn set_latency(&self, clock: &MockClock, us: u64) {
        self.state.borrow_mut().latency = Some((clock.clone(), us));
    }

    // -------------------------------------------------------------------------
    // EEPROM
    // -------------------------------------------------------------------------

    /// EEPROM addresses commanded so far, in order
    pub fn eeprom_reads(&self) -> Vec<u8> {
        self.state
            .borrow()
            .eeprom
            .as_ref()
            .map(|e| e.reads.clone())
            .unwrap_or_default()
    }

    /// Busy bit never clears once `address` is commanded
    pub fn stick_eeprom_busy_at(&self, address: u8) {
        if let Some(e2p) = self.state.borrow_mut().eeprom.as_mut() {
            e2p.stuck_at = Some(address);
        }
    }

    /// Busy bit stays set for `polls` samples after each command
    pub fn set_eeprom_busy_polls(&self, polls: u32) {
        if let Some(e2p) = self.state.borrow_mut().eeprom.as_mut() {
            e2p.busy_polls = polls;
        }
    }

    /// Commands issued or data read while the controller was still busy
    pub fn eeprom_violations(&self) -> u32 {
        self.state
            .borrow()
            .eeprom
            .as_ref()
            .map_or(0, |e| e.violations)
    }

    // -------------------------------------------------------------------------
    // MII / PHY
    // -------------------------------------------------------------------------

    fn with_mii_sim<R>(&self, f: impl FnOnce(&mut MiiSim) -> R) -> R {
        let mut state = self.state.borrow_mut();
        let mii = state.mii.get_or_insert_with(MiiSim::default);
        f(mii)
    }

    pub fn set_phy_register(&self, index: u8, value: u16) {
        self.with_mii_sim(|mii| {
            mii.phy.insert(index, value);
        });
    }

    pub fn phy_register(&self, index: u8) -> u16 {
        self.with_mii_sim(|mii| mii.phy.get(&index).copied().unwrap_or(0))
    }

    /// PHY register writes seen so far, as `(index, value)`
    pub fn phy_writes(&self) -> Vec<(u8, u16)> {
        self.with_mii_sim(|mii| mii.phy_writes.clone())
    }

    /// Latch interrupt causes in the PHY interrupt source register
    pub fn raise_phy_interrupt(&self, causes: u16) {
        self.with_mii_sim(|mii| {
            let current = mii.phy.get(&INTR_SOURCE).copied().unwrap_or(0);
            mii.phy.insert(INTR_SOURCE, current | causes);
        });
    }

    /// Set or clear link status in BMSR
    pub fn set_link(&self, up: bool) {
        self.with_mii_sim(|mii| {
            let current = mii.phy.get(&phy_reg::BMSR).copied().unwrap_or(0);
            let next = if up {
                current | bmsr::LINK_STATUS | bmsr::AN_COMPLETE
            } else {
                current & !(bmsr::LINK_STATUS | bmsr::AN_COMPLETE)
            };
            mii.phy.insert(phy_reg::BMSR, next);
        });
    }

    /// Busy flag stays set for `polls` samples after each trigger
    pub fn set_mii_busy_polls(&self, polls: u32) {
        self.with_mii_sim(|mii| mii.busy_polls = polls);
    }

    /// Busy flag never clears
    pub fn stick_mii_busy(&self) {
        self.with_mii_sim(|mii| mii.stuck = true);
    }

    /// Accesses issued while the controller was still busy
    pub fn mii_violations(&self) -> u32 {
        self.with_mii_sim(|mii| mii.violations)
    }

    /// Soft reset self-clears after `polls` BMCR reads
    pub fn set_phy_reset_polls(&self, polls: u32) {
        self.with_mii_sim(|mii| mii.reset_polls = polls);
    }

    /// Soft reset never self-clears
    pub fn stick_phy_reset(&self) {
        self.with_mii_sim(|mii| mii.reset_polls = u32::MAX);
    }
}

impl ControlTransfer for MockUsb {
    fn control(
        &mut self,
        request: ControlRequest,
        data: &mut [u8],
    ) -> core::result::Result<usize, UsbError> {
        let mut state = self.state.borrow_mut();

        if let Some((clock, us)) = state.latency.as_ref() {
            clock.advance_us(*us);
        }

        let address = request.index;
        let transfer = match request.request {
            REQUEST_REGISTER_READ => Transfer::Read { address },
            REQUEST_REGISTER_WRITE => {
                let mut bytes = [0u8; 4];
                let n = data.len().min(4);
                bytes[..n].copy_from_slice(&data[..n]);
                Transfer::Write { address, bytes }
            }
            REQUEST_GET_STATISTICS => Transfer::Statistics {
                index: address,
                len: data.len(),
            },
            other => Transfer::Other { request: other },
        };

        let sequence = state.transfers.len();
        state.transfers.push(transfer);

        if let Some((at, cause)) = state.fail_at {
            if at == sequence {
                state.fail_at = None;
                return Err(cause);
            }
        }

        if let Some(len) = state.short_next.take() {
            return Ok(len);
        }

        match transfer {
            Transfer::Read { address } => {
                let value = state.read_register(address);
                let bytes = value.to_le_bytes();
                let n = data.len().min(4);
                data[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
            Transfer::Write { address, bytes } => {
                state.write_register(address, u32::from_le_bytes(bytes));
                Ok(data.len().min(4))
            }
            Transfer::Statistics { index, .. } => {
                let stats = state.statistics.get(&index).cloned().unwrap_or_default();
                let n = data.len().min(stats.len());
                data[..n].copy_from_slice(&stats[..n]);
                Ok(n)
            }
            Transfer::Other { .. } => Err(UsbError::Stall),
        }
    }
}

// =============================================================================
// Mock MII Bus
// =============================================================================

/// Mock MII bus for testing PHY logic without the register transport
///
/// The interrupt source register is clear-on-read like the real PHY.
#[derive(Debug, Default)]
pub struct MockMiiBus {
    /// Register values: index -> value
    registers: RefCell<HashMap<u8, u16>>,
    /// Record of reads, in order
    read_log: RefCell<Vec<u8>>,
    /// Record of writes: (index, value)
    write_log: RefCell<Vec<(u8, u16)>>,
}

impl MockMiiBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_register(&self, index: u8, value: u16) {
        self.registers.borrow_mut().insert(index, value);
    }

    pub fn get_register(&self, index: u8) -> Option<u16> {
        self.registers.borrow().get(&index).copied()
    }

    pub fn get_reads(&self) -> Vec<u8> {
        self.read_log.borrow().clone()
    }

    pub fn get_writes(&self) -> Vec<(u8, u16)> {
        self.write_log.borrow().clone()
    }

    /// Latch interrupt causes
    pub fn raise(&self, causes: u16) {
        let current = self.get_register(INTR_SOURCE).unwrap_or(0);
        self.set_register(INTR_SOURCE, current | causes);
    }

    pub fn simulate_link_up(&self) {
        let bmsr_val = self.get_register(phy_reg::BMSR).unwrap_or(0);
        self.set_register(
            phy_reg::BMSR,
            bmsr_val | bmsr::LINK_STATUS | bmsr::AN_COMPLETE,
        );
    }

    pub fn simulate_link_down(&self) {
        let bmsr_val = self.get_register(phy_reg::BMSR).unwrap_or(0);
        self.set_register(
            phy_reg::BMSR,
            bmsr_val & !(bmsr::LINK_STATUS | bmsr::AN_COMPLETE),
        );
    }
}

impl MiiBus for MockMiiBus {
    fn read(&mut self, index: u8) -> Result<u16> {
        self.read_log.borrow_mut().push(index);

        let value = self.get_register(index).unwrap_or(0);
        if index == INTR_SOURCE {
            self.set_register(index, 0);
        }
        Ok(value)
    }

    fn write(&mut self, index: u8, value: u16) -> Result<()> {
        self.write_log.borrow_mut().push((index, value));

        if index == INTR_SOURCE {
            let current = self.get_register(index).unwrap_or(0);
            self.set_register(index, current & !value);
        } else {
            self.set_register(index, value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec;

    use super::*;
    use crate::internal::phy_regs::smsc::intr;

    #[test]
    fn mock_clock_tracks_delays() {
        let mut clock = MockClock::new();
        let handle = clock.clone();

        embedded_hal::delay::DelayNs::delay_us(&mut clock, 250);
        embedded_hal::delay::DelayNs::delay_ms(&mut clock, 2);
        handle.advance_us(10);

        assert_eq!(clock.now_us(), 2_260);
        assert_eq!(handle.now(), 2_260);
    }

    #[test]
    fn mock_usb_plain_registers_are_memory() {
        let mut usb = MockUsb::new();

        let mut buf = 0xdead_beefu32.to_le_bytes();
        assert_eq!(usb.control(ControlRequest::register_write(0x10), &mut buf), Ok(4));

        let mut out = [0u8; 4];
        assert_eq!(usb.control(ControlRequest::register_read(0x10), &mut out), Ok(4));
        assert_eq!(u32::from_le_bytes(out), 0xdead_beef);
        assert_eq!(usb.register_writes(), vec![(0x10, 0xdead_beef)]);
    }

    #[test]
    fn mock_eeprom_counts_commands_while_busy() {
        let mut usb = MockUsb::with_eeprom(0x030, &[0x11]);
        usb.set_eeprom_busy_polls(2);

        let mut cmd = 0x8000_0000u32.to_le_bytes();
        assert_eq!(usb.control(ControlRequest::register_write(0x030), &mut cmd), Ok(4));
        assert_eq!(usb.eeprom_violations(), 0);

        // Second command before the busy bit was sampled clear
        let mut again = 0x8000_0000u32.to_le_bytes();
        assert_eq!(usb.control(ControlRequest::register_write(0x030), &mut again), Ok(4));
        assert_eq!(usb.eeprom_violations(), 1);
    }

    #[test]
    fn mock_usb_phy_interrupt_clears_on_read() {
        let usb = MockUsb::with_mii(0x114);
        usb.raise_phy_interrupt(intr::ANEG_DONE);

        let value = usb.with_mii_sim(|mii| mii.phy_read(INTR_SOURCE));
        assert_eq!(value, intr::ANEG_DONE);
        assert_eq!(usb.phy_register(INTR_SOURCE), 0);
    }

    #[test]
    fn mock_mii_read_write() {
        let mut mii = MockMiiBus::new();

        // Initially reads 0
        assert_eq!(mii.read(1).unwrap(), 0);

        mii.set_register(1, 0x1234);
        assert_eq!(mii.read(1).unwrap(), 0x1234);

        mii.write(1, 0x5678).unwrap();
        assert_eq!(mii.read(1).unwrap(), 0x5678);

        assert_eq!(mii.get_writes(), vec![(1, 0x5678)]);
        assert_eq!(mii.get_reads(), vec![1, 1, 1]);
    }

    #[test]
    fn mock_mii_link_simulation() {
        let mut mii = MockMiiBus::new();

        mii.simulate_link_up();
        assert!(mii.read(phy_reg::BMSR).unwrap() & bmsr::LINK_STATUS != 0);

        mii.simulate_link_down();
        assert!(mii.read(phy_reg::BMSR).unwrap() & bmsr::LINK_STATUS == 0);
    }
}
