//! Synchronization and Concurrency Support
//!
//! When the interrupt-endpoint completion and the control path run in
//! different execution contexts, they share one device through a
//! critical-section mutex:
//!
//! - [`CriticalSectionCell`] - ISR-safe interior mutability
//! - [`SharedDevice`] - critical-section protected [`SmscDevice`](crate::SmscDevice)
//!
//! # Feature Flags
//!
//! - `critical-section`: Enables this module
//!
//! # Example
//!
//! ```ignore
//! use ph_smscusb::sync::SharedDevice;
//!
//! static DEVICE: SharedDevice<Usb, Timer> = SharedDevice::new();
//!
//! fn on_interrupt_complete(packet: &[u8]) {
//!     DEVICE.record_interrupt(packet);
//! }
//!
//! fn poll() {
//!     DEVICE.with(|dev| dev.poll_link());
//! }
//! ```

mod primitives;

pub use primitives::CriticalSectionCell;

mod shared;

pub use shared::SharedDevice;
