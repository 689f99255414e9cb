//! Hardware Abstraction Layer
//!
//! The register transport and the two polled protocols built on it.
//!
//! # Modules
//!
//! - [`usb`]: Vendor register read/write over USB control transfers
//! - [`clock`]: Monotonic clock and time-bounded busy polling
//! - [`eeprom`]: Serial EEPROM reader
//! - [`mdio`]: MII accessor for the PHY
//!
//! # Delay Integration
//!
//! Busy polls pause through `embedded_hal::delay::DelayNs`. The [`Clock`]
//! trait adds a monotonic timestamp on top, which bounds every wait.

pub mod clock;
pub mod eeprom;
pub mod mdio;
pub mod usb;

// Re-export commonly used types
pub use clock::{BusyPoll, Clock, Deadline, PollResult};
pub use eeprom::Eeprom;
pub use mdio::{MiiBus, SmscMii};
pub use usb::{ControlRequest, ControlTransfer, Registers, decode_le, encode_le};
