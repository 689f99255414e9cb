//! PHY Management
//!
//! Everything here talks to the PHY only through the [`MiiBus`] trait, so it
//! works the same over [`SmscMii`](crate::hal::mdio::SmscMii) and over a mock
//! in tests.
//!
//! - [`generic`]: IEEE 802.3 Clause 22 helpers (link, identifier, reset)
//! - [`link`]: link-state derivation from the SMSC interrupt source register
//!
//! # Example
//!
//! ```ignore
//! use ph_smscusb::phy::{LinkMonitor, LinkTransition};
//!
//! let mut monitor = LinkMonitor::new();
//! let mut mii = device.mii();
//!
//! match monitor.check(&mut mii)?.transition() {
//!     LinkTransition::Up => { /* carrier on */ }
//!     LinkTransition::Down => { /* carrier off */ }
//!     LinkTransition::Bounced | LinkTransition::Unchanged => {}
//! }
//! ```

pub mod generic;
pub mod link;

pub use generic::{PhyId, ieee802_3};
pub use link::{LinkEvent, LinkMonitor, LinkTransition, PhyInterrupt};

pub use crate::hal::mdio::MiiBus;
