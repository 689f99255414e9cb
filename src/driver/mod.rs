//! Core driver components for SMSC USB Ethernet controllers.
//!
//! This module contains the device context and the types it exchanges with
//! its callers:
//!
//! - [`address`] - MAC address value and its register form
//! - [`config`] - Chip variant configuration and builder methods
//! - [`device`] - The per-device context
//! - [`error`] - Error types and result aliases
//! - [`filtering`] - Receive address and perfect filter programming
//! - [`interrupt`] - Interrupt endpoint packets
//!
//! # Example
//!
//! ```ignore
//! use ph_smscusb::driver::{SmscConfig, SmscDevice, Timing};
//!
//! let config = SmscConfig::lan75xx().with_timing(Timing {
//!     eeprom_timeout_ms: 200,
//!     ..Timing::new()
//! });
//! let device = SmscDevice::new(usb, clock, config)?;
//! ```

// Submodules
pub mod address;
pub mod config;
pub mod device;
pub mod error;
pub mod filtering;
pub mod interrupt;

// Re-exports for convenience
pub use address::{AddressRegisters, MacAddress};
pub use config::{FilterTable, MiiLayout, SmscConfig, Timing};
pub use device::SmscDevice;
pub use error::{
    ConfigError, ConfigResult, Direction, Error, ProtocolError, Result, TimeoutError,
    TransportError, UsbError,
};
pub use interrupt::{InterruptPacket, InterruptStatus};
