//! SMSC USB Ethernet Register Core
//!
//! A `no_std`, `no_alloc` Rust implementation of the register-access core
//! shared by the SMSC / Microchip LAN95xx and LAN75xx USB Ethernet
//! controllers.
//!
//! The controllers expose a 32-bit vendor register space over USB control
//! transfers. Everything else in this crate is built on top of those two
//! operations:
//!
//! 1. **Transport** ([`hal::usb`]): register read/write, one control transfer each
//! 2. **EEPROM** ([`hal::eeprom`]): polled byte reads to recover the burned-in MAC
//! 3. **MII** ([`hal::mdio`], [`phy`]): polled PHY access and link-state derivation
//! 4. **Addresses** ([`driver::filtering`]): receive address and perfect filters
//!
//! [`SmscDevice`] ties these together for one attached controller.
//!
//! # Supported Variants
//!
//! - [`SmscConfig::lan95xx`]: LAN9500/9512/9514 family
//! - [`SmscConfig::lan75xx`]: LAN7500 family (adds a 32-slot perfect filter table)
//!
//! Other variants supply their own register bases through the `with_*`
//! builder methods on [`SmscConfig`].
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting and logging
//! - `log`: Log through the `log` facade (ignored when `defmt` is enabled)
//! - `critical-section`: Enable the ISR-safe [`SharedDevice`] wrapper
//!
//! # Example
//!
//! ```ignore
//! use ph_smscusb::{MacAddress, SmscConfig, SmscDevice};
//!
//! // `usb` implements ControlTransfer, `timer` implements Clock
//! let mut device = SmscDevice::new(usb, timer, SmscConfig::lan95xx())?;
//!
//! let mac = match device.fetch_mac() {
//!     Ok(mac) => mac,
//!     Err(_) => MacAddress::new([0x02, 0x00, 0x00, 0x12, 0x34, 0x56]),
//! };
//! device.set_address(mac)?;
//!
//! device.mii_reset()?;
//! let event = device.mii_open()?;
//!
//! // Interrupt endpoint completion
//! device.record_interrupt(&packet)?;
//! if let Some(event) = device.poll_link()? {
//!     // carrier on / off
//! }
//! ```

#![no_std]
#![deny(missing_docs)]
#![forbid(unsafe_code)]
// Clippy lint levels live here; the same groups are mirrored in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// Logging macros must be defined before any module that uses them
#[macro_use]
mod fmt;

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod hal;
pub mod phy;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(any(feature = "critical-section", test))]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::address::MacAddress;
pub use driver::config::{FilterTable, MiiLayout, SmscConfig, Timing};
pub use driver::device::SmscDevice;
pub use driver::error::{
    ConfigError, ConfigResult, Error, ProtocolError, Result, TimeoutError, TransportError,
    UsbError,
};
pub use driver::interrupt::{InterruptPacket, InterruptStatus};

// Re-export transport and timing seams
pub use hal::clock::Clock;
pub use hal::mdio::MiiBus;
pub use hal::usb::{ControlRequest, ControlTransfer};

// Re-export PHY types
pub use phy::{LinkEvent, LinkMonitor, LinkTransition, PhyId};

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::SharedDevice;

/// Shared driver constants.
///
/// Fixed protocol numbers and the defaults behind [`Timing`] and
/// [`SmscConfig`].
pub mod constants {
    pub use crate::internal::constants::{
        // EEPROM
        EEPROM_MAC_OFFSET,
        EEPROM_MAX_WAIT_MS,
        EEPROM_SIZE,
        // Interrupt endpoint
        INTERRUPT_PACKET_LEN,
        INTR_MAX_FILL,
        // MAC address
        MAC_ADDR_LEN,
        // Timing
        MII_MAX_WAIT_MS,
        PHY_RESET_MAX_WAIT_MS,
        POLL_INTERVAL_US,
        // Vendor requests
        REQUEST_GET_STATISTICS,
        REQUEST_REGISTER_READ,
        REQUEST_REGISTER_WRITE,
    };
}
