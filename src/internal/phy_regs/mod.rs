//! PHY Register Definitions
//!
//! Registers reached through the MII accessor rather than the vendor
//! register space.
//!
//! - [`standard`] - IEEE 802.3 Clause 22 registers used by this crate
//! - [`smsc`] - SMSC internal PHY vendor registers (interrupt source/mask)

pub mod smsc;
pub mod standard;
