//! Register Transport
//!
//! Every vendor register access is exactly one USB control transfer moving a
//! single 32-bit little-endian word. [`Registers`] wraps the USB collaborator
//! (anything implementing [`ControlTransfer`]) and performs the byte-order
//! conversion, so everything above this module only ever sees host-order
//! `u32` values.

use crate::driver::error::{Direction, ProtocolError, Result, TransportError, UsbError};
use crate::internal::constants::{
    REGISTER_SIZE, REQUEST_GET_STATISTICS, REQUEST_REGISTER_READ, REQUEST_REGISTER_WRITE,
    USB_DIR_IN, USB_DIR_OUT, USB_RECIP_DEVICE, USB_TYPE_VENDOR,
};

// =============================================================================
// Control Requests
// =============================================================================

/// Setup stage of a control transfer
///
/// The transfer length is the length of the buffer passed alongside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlRequest {
    /// `bmRequestType`
    pub request_type: u8,
    /// `bRequest`
    pub request: u8,
    /// `wValue`
    pub value: u16,
    /// `wIndex`
    pub index: u16,
}

impl ControlRequest {
    /// Vendor register write to `address`
    pub const fn register_write(address: u16) -> Self {
        Self {
            request_type: USB_DIR_OUT | USB_TYPE_VENDOR | USB_RECIP_DEVICE,
            request: REQUEST_REGISTER_WRITE,
            value: 0,
            index: address,
        }
    }

    /// Vendor register read from `address`
    pub const fn register_read(address: u16) -> Self {
        Self {
            request_type: USB_DIR_IN | USB_TYPE_VENDOR | USB_RECIP_DEVICE,
            request: REQUEST_REGISTER_READ,
            value: 0,
            index: address,
        }
    }

    /// Statistics set `index`
    pub const fn statistics(index: u16) -> Self {
        Self {
            request_type: USB_DIR_IN | USB_TYPE_VENDOR | USB_RECIP_DEVICE,
            request: REQUEST_GET_STATISTICS,
            value: 0,
            index,
        }
    }

    /// Data stage flows device to host
    pub const fn is_in(&self) -> bool {
        self.request_type & USB_DIR_IN != 0
    }

    /// Direction of the data stage
    pub const fn direction(&self) -> Direction {
        if self.is_in() {
            Direction::Read
        } else {
            Direction::Write
        }
    }
}

// =============================================================================
// USB Collaborator
// =============================================================================

/// Blocking USB control transfers on the default pipe
///
/// Implemented by whatever owns the USB host controller. For an IN request
/// the implementation fills `data`; for an OUT request it sends it. The
/// return value is the number of bytes actually moved.
pub trait ControlTransfer {
    /// Execute one control transfer
    fn control(
        &mut self,
        request: ControlRequest,
        data: &mut [u8],
    ) -> core::result::Result<usize, UsbError>;
}

impl<T: ControlTransfer + ?Sized> ControlTransfer for &mut T {
    fn control(
        &mut self,
        request: ControlRequest,
        data: &mut [u8],
    ) -> core::result::Result<usize, UsbError> {
        (**self).control(request, data)
    }
}

// =============================================================================
// Byte Order
// =============================================================================

/// Wire form of a register value
#[inline]
pub const fn encode_le(value: u32) -> [u8; REGISTER_SIZE] {
    value.to_le_bytes()
}

/// Host form of a register value received on the wire
#[inline]
pub const fn decode_le(bytes: [u8; REGISTER_SIZE]) -> u32 {
    u32::from_le_bytes(bytes)
}

// =============================================================================
// Register Access
// =============================================================================

/// 32-bit vendor register access over a [`ControlTransfer`]
#[derive(Debug)]
pub struct Registers<U> {
    usb: U,
}

impl<U: ControlTransfer> Registers<U> {
    /// Wrap a USB collaborator
    pub const fn new(usb: U) -> Self {
        Self { usb }
    }

    /// Read the register at `address`
    pub fn read(&mut self, address: u16) -> Result<u32> {
        let mut buf = [0u8; REGISTER_SIZE];
        self.transfer(ControlRequest::register_read(address), &mut buf)?;

        let value = decode_le(buf);
        trace!("[{:#06x}] => {:#010x}", address, value);
        Ok(value)
    }

    /// Write `value` to the register at `address`
    pub fn write(&mut self, address: u16, value: u32) -> Result<()> {
        let mut buf = encode_le(value);
        self.transfer(ControlRequest::register_write(address), &mut buf)?;

        trace!("[{:#06x}] <= {:#010x}", address, value);
        Ok(())
    }

    /// Read-modify-write: clear `clear` bits then set `set` bits
    pub fn modify(&mut self, address: u16, clear: u32, set: u32) -> Result<u32> {
        let value = (self.read(address)? & !clear) | set;
        self.write(address, value)?;
        Ok(value)
    }

    /// Fetch statistics set `index` into `buf`
    ///
    /// The device must fill the whole buffer.
    pub fn get_statistics(&mut self, index: u16, buf: &mut [u8]) -> Result<()> {
        self.transfer(ControlRequest::statistics(index), buf)?;
        trace!("stats[{}] => {} bytes", index, buf.len());
        Ok(())
    }

    /// Borrow the USB collaborator
    pub fn inner(&self) -> &U {
        &self.usb
    }

    /// Mutably borrow the USB collaborator
    pub fn inner_mut(&mut self) -> &mut U {
        &mut self.usb
    }

    /// Give back the USB collaborator
    pub fn into_inner(self) -> U {
        self.usb
    }

    fn transfer(&mut self, request: ControlRequest, data: &mut [u8]) -> Result<()> {
        let address = request.index;
        let direction = request.direction();
        let expected = data.len();

        let actual = self.usb.control(request, data).map_err(|cause| {
            debug!("could not {} {:#06x}: {:?}", direction.as_str(), address, cause);
            TransportError {
                address,
                direction,
                cause,
            }
        })?;

        if actual != expected {
            debug!(
                "{} of {:#06x} moved {} of {} bytes",
                direction.as_str(),
                address,
                actual,
                expected
            );
            return Err(ProtocolError::ShortTransfer {
                address,
                direction,
                expected,
                actual,
            }
            .into());
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
