//! Error types for the SMSC USB register-access core
//!
//! Errors are organized by domain for better diagnostics:
//! - [`TransportError`]: a USB control transfer failed
//! - [`TimeoutError`]: a hardware busy bit did not clear in time
//! - [`ProtocolError`]: a response had an unexpected shape
//! - [`ConfigError`]: a request was rejected before touching the hardware
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by every fallible operation. Nothing in this crate retries; each error
//! carries the register address, EEPROM address or MII index involved so
//! the caller can log it and decide what to do.

use core::fmt;

use super::address::MacAddress;

// =============================================================================
// Transfer Direction
// =============================================================================

/// Direction of a register or PHY access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Device to host
    Read,
    /// Host to device
    Write,
}

impl Direction {
    /// Returns a human-readable name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Direction::Read => "read",
            Direction::Write => "write",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Transport Errors
// =============================================================================

/// Failure reported by the USB control-transfer collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsbError {
    /// The device stalled the control pipe
    Stall,
    /// The device is gone
    Disconnected,
    /// Bus or host-controller error
    Bus,
    /// Any other failure of the transport
    Other,
}

impl UsbError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            UsbError::Stall => "endpoint stalled",
            UsbError::Disconnected => "device disconnected",
            UsbError::Bus => "bus error",
            UsbError::Other => "transfer failed",
        }
    }
}

impl fmt::Display for UsbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A register transfer that failed in the USB layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransportError {
    /// Register address (or statistics set index)
    pub address: u16,
    /// Direction of the failed transfer
    pub direction: Direction,
    /// Underlying cause
    pub cause: UsbError,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not {} {:#05x}: {}",
            self.direction, self.address, self.cause
        )
    }
}

// =============================================================================
// Timeout Errors
// =============================================================================

/// A busy-poll bound was exceeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeoutError {
    /// EEPROM controller stayed busy
    EepromBusy {
        /// EEPROM address being fetched
        address: u8,
    },
    /// MII controller stayed busy
    MiiBusy {
        /// MII register index being accessed
        index: u8,
        /// Direction of the access
        direction: Direction,
    },
    /// PHY soft reset did not self-clear
    PhyReset,
}

impl TimeoutError {
    /// Returns a human-readable description of the stalled site
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TimeoutError::EepromBusy { .. } => "EEPROM busy",
            TimeoutError::MiiBusy { .. } => "MII busy",
            TimeoutError::PhyReset => "PHY reset",
        }
    }
}

impl fmt::Display for TimeoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeoutError::EepromBusy { address } => {
                write!(f, "{} timed out at address {:#04x}", self.as_str(), address)
            }
            TimeoutError::MiiBusy { index, direction } => {
                write!(f, "{} timed out on {} of register {}", self.as_str(), direction, index)
            }
            TimeoutError::PhyReset => write!(f, "{} timed out", self.as_str()),
        }
    }
}

// =============================================================================
// Protocol Errors
// =============================================================================

/// A response did not have the expected shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// A control transfer moved a different number of bytes than requested
    ShortTransfer {
        /// Register address (or statistics set index)
        address: u16,
        /// Direction of the transfer
        direction: Direction,
        /// Bytes requested
        expected: usize,
        /// Bytes actually moved
        actual: usize,
    },
    /// An interrupt packet was not exactly one status word
    InterruptLength {
        /// Received packet length
        actual: usize,
    },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::ShortTransfer {
                address,
                direction,
                expected,
                actual,
            } => write!(
                f,
                "{direction} of {address:#05x} moved {actual} of {expected} bytes"
            ),
            ProtocolError::InterruptLength { actual } => {
                write!(f, "malformed interrupt packet ({actual} bytes)")
            }
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Requests rejected before any transfer is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// MII register index outside 0-31
    InvalidRegisterIndex,
    /// Perfect filter slot outside the variant's table
    InvalidFilterSlot,
    /// The chip variant has no perfect filter table
    NoFilterTable,
    /// EEPROM read would run past the 8-bit address space
    InvalidEepromRange,
    /// Zero timeout or poll interval
    InvalidTiming,
    /// Filter slot stride smaller than one register pair
    InvalidFilterStride,
    /// Register group base leaves no room for the group's registers
    InvalidRegisterBase,
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidRegisterIndex => "invalid MII register index",
            ConfigError::InvalidFilterSlot => "invalid address filter slot",
            ConfigError::NoFilterTable => "no address filter table",
            ConfigError::InvalidEepromRange => "invalid EEPROM range",
            ConfigError::InvalidTiming => "invalid timing configuration",
            ConfigError::InvalidFilterStride => "invalid filter stride",
            ConfigError::InvalidRegisterBase => "invalid register group base",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match device.fetch_mac() {
///     Ok(mac) => { /* ... */ }
///     Err(Error::NoAddress(_)) => { /* fall back to a local address */ }
///     Err(Error::Timeout(TimeoutError::EepromBusy { address })) => { /* ... */ }
///     Err(e) => return Err(e),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// USB control transfer failed
    Transport(TransportError),
    /// Busy bit never cleared
    Timeout(TimeoutError),
    /// Malformed response
    Protocol(ProtocolError),
    /// Request rejected up front
    Config(ConfigError),
    /// The EEPROM does not hold a usable station address
    NoAddress(MacAddress),
}

impl Error {
    /// Transport failure or malformed response
    ///
    /// Both mean the device did not answer as a working controller would and
    /// are propagated alike.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Protocol(_))
    }

    /// Busy-poll bound exceeded
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "transport: {e}"),
            Error::Timeout(e) => write!(f, "timeout: {e}"),
            Error::Protocol(e) => write!(f, "protocol: {e}"),
            Error::Config(e) => write!(f, "config: {e}"),
            Error::NoAddress(mac) => write!(f, "no valid MAC address (read {mac})"),
        }
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Transport(e)
    }
}

impl From<TimeoutError> for Error {
    fn from(e: TimeoutError) -> Self {
        Error::Timeout(e)
    }
}

impl From<ProtocolError> for Error {
    fn from(e: ProtocolError) -> Self {
        Error::Protocol(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

/// Result type alias for device operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration validation
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================
