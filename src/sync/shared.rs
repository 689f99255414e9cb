//! ISR-safe device wrapper using critical sections.
//!
//! Provides [`SharedDevice`] for reaching one [`SmscDevice`] from the
//! interrupt-endpoint completion and from the control path.

use super::primitives::CriticalSectionCell;
use crate::driver::device::SmscDevice;
use crate::driver::error::Result;
use crate::driver::interrupt::InterruptStatus;
use crate::hal::clock::Clock;
use crate::hal::usb::ControlTransfer;

/// ISR-safe device wrapper using critical sections.
///
/// All access goes through `critical_section::with()`, so the interrupt
/// snapshot and the results of EEPROM and MII operations are protected by
/// the same exclusion. Starts empty so it can live in a `static`; the
/// device is attached once it has been created.
///
/// # Example
///
/// ```ignore
/// static DEVICE: SharedDevice<Usb, Timer> = SharedDevice::new();
///
/// DEVICE.attach(SmscDevice::new(usb, timer, SmscConfig::lan95xx())?);
///
/// // Interrupt endpoint completion
/// DEVICE.record_interrupt(&packet);
///
/// // Poll loop
/// if let Some(Ok(Some(event))) = DEVICE.with(|dev| dev.poll_link()) {
///     // ...
/// }
/// ```
pub struct SharedDevice<U: ControlTransfer, C: Clock> {
    inner: CriticalSectionCell<Option<SmscDevice<U, C>>>,
}

impl<U: ControlTransfer, C: Clock> SharedDevice<U, C> {
    /// Create an empty wrapper (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            inner: CriticalSectionCell::new(None),
        }
    }

    /// Wrap an existing device.
    pub const fn from_device(device: SmscDevice<U, C>) -> Self {
        Self {
            inner: CriticalSectionCell::new(Some(device)),
        }
    }

    /// Attach a device, returning the one it replaces.
    pub fn attach(&self, device: SmscDevice<U, C>) -> Option<SmscDevice<U, C>> {
        self.inner.with(|slot| slot.replace(device))
    }

    /// Detach the device.
    pub fn detach(&self) -> Option<SmscDevice<U, C>> {
        self.inner.with(Option::take)
    }

    /// A device is attached.
    pub fn is_attached(&self) -> bool {
        self.inner.with_ref(Option::is_some)
    }

    /// Execute a closure with exclusive access to the device.
    ///
    /// Returns `None` when no device is attached. Interrupts are disabled
    /// for the duration of the closure, including any busy polls it runs.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut SmscDevice<U, C>) -> R,
    {
        self.inner.with(|slot| slot.as_mut().map(f))
    }

    /// Try to execute a closure, returning `None` if already borrowed or
    /// no device is attached.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut SmscDevice<U, C>) -> R,
    {
        self.inner
            .try_with(|slot| slot.as_mut().map(f))
            .flatten()
    }

    /// Store an interrupt endpoint packet on the attached device.
    ///
    /// Meant for the interrupt-endpoint completion; never waits on the
    /// device if another context holds it.
    pub fn record_interrupt(&self, packet: &[u8]) -> Option<Result<InterruptStatus>> {
        self.try_with(|dev| dev.record_interrupt(packet))
    }

    /// Unwrap the device.
    pub fn into_inner(self) -> Option<SmscDevice<U, C>> {
        self.inner.into_inner()
    }
}

impl<U: ControlTransfer, C: Clock> Default for SharedDevice<U, C> {
    fn default() -> Self {
        Self::new()
    }
}
