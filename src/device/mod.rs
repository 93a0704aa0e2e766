//! Instrument abstraction for luminance/chromaticity colorimeters.
//!
//! This module defines the [`Colorimeter`] trait, the capability set the
//! command server needs from a device backend, together with the vocabulary
//! types shared between the protocol layer and the backends: driver result
//! codes, measurement status, luminance units, the Lv/x/y reading, and the
//! integration-time setting.
//!
//! # Overview
//!
//! The vendor driver for the CS-150/CS-160 family is a proprietary SDK with
//! no Rust binding; the bridge therefore talks to it through this trait. A
//! backend wraps one driver session and exposes the seven operations the
//! line protocol is built on:
//!
//! - `connect` / `disconnect`: open and tear down the instrument link.
//! - `start_measurement` / `poll_status` / `read_latest`: the three-step
//!   measurement sequence driven by the measurement controller.
//! - `set_integration_time` / `set_backlight`: persisted instrument
//!   configuration, owned by the device rather than the session.
//!
//! Every fallible operation returns a [`DeviceError`], which keeps the two
//! failure shapes of the original driver apart: a call that completed but
//! reported a non-success result code, and a call that failed outright.
//!
//! # See Also
//! - [`sim`]: hardware-free backend used by the shipped binaries and tests.
//! - [`protocol`](crate::protocol): the line protocol served on top of this
//!   capability set.
use std::fmt;

use thiserror::Error;

#[cfg(test)]
pub(crate) mod mock;
pub mod sim;

/// Result codes a driver call can report instead of succeeding.
///
/// Rendered verbatim into `ERROR,<code>` responses, so the names are part
/// of the wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    DeviceNotFound,
    NotConnected,
    InvalidParameter,
    CommunicationError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::DeviceNotFound => "DeviceNotFound",
            ErrorCode::NotConnected => "NotConnected",
            ErrorCode::InvalidParameter => "InvalidParameter",
            ErrorCode::CommunicationError => "CommunicationError",
            ErrorCode::InternalError => "InternalError",
        };
        f.write_str(name)
    }
}

/// List of possible errors a device operation can produce.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The driver completed the call but reported a non-success result code.
    #[error("{0}")]
    Code(ErrorCode),
    /// The driver failed in an unexpected way, outside its result-code
    /// vocabulary.
    #[error("{0}")]
    Fault(String),
}

/// Instrument state reported while a measurement is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasStatus {
    /// Still integrating; keep polling.
    Measuring,
    /// A reading is available.
    Ready,
    /// The instrument gave up on the exposure. A read is still attempted;
    /// the driver decides whether stale data is acceptable.
    Aborted,
}

/// Unit requested when reading the latest measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LuminanceUnit {
    /// cd/m^2
    CandelaPerSquareMeter,
    /// fL
    FootLambert,
}

/// One measurement: luminance plus CIE 1931 x, y chromaticity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lvxy {
    pub lv: f64,
    pub x: f64,
    pub y: f64,
}

/// Exposure setting applied by the `INTEG` command.
///
/// Constructed transiently per command and handed to the device; the device
/// owns the persisted configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntegrationTime {
    Auto,
    /// Manual exposure in seconds.
    Manual(f64),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid integration time '{0}'")]
pub struct IntegrationTimeError(String);

impl TryFrom<&str> for IntegrationTime {
    type Error = IntegrationTimeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.eq_ignore_ascii_case("AUTO") {
            return Ok(IntegrationTime::Auto);
        }
        // f64 parsing is always dot-decimal, independent of host locale
        value
            .parse::<f64>()
            .map(IntegrationTime::Manual)
            .map_err(|_| IntegrationTimeError(value.to_string()))
    }
}

impl fmt::Display for IntegrationTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationTime::Auto => f.write_str("AUTO"),
            IntegrationTime::Manual(seconds) => write!(f, "{seconds}"),
        }
    }
}

/// Backlight state of the instrument display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BacklightMode {
    On,
    Off,
}

/// Capability set of a colorimeter backend.
///
/// One implementation wraps one long-lived driver session. All operations
/// are blocking; the server guarantees a single command is in flight at a
/// time, so implementations need no internal locking.
pub trait Colorimeter {
    /// Open the instrument link.
    fn connect(&mut self) -> Result<(), DeviceError>;

    /// Tear the link down. Best-effort; the caller ignores failures.
    fn disconnect(&mut self);

    /// Ask the instrument to begin a measurement.
    fn start_measurement(&mut self) -> Result<(), DeviceError>;

    /// Query the state of the in-flight measurement.
    fn poll_status(&mut self) -> Result<MeasStatus, DeviceError>;

    /// Fetch the most recent completed reading in the requested unit.
    fn read_latest(&mut self, unit: LuminanceUnit) -> Result<Lvxy, DeviceError>;

    /// Persist an exposure setting on the instrument.
    fn set_integration_time(&mut self, time: IntegrationTime) -> Result<(), DeviceError>;

    /// Switch the display backlight.
    fn set_backlight(&mut self, mode: BacklightMode) -> Result<(), DeviceError>;
}

/// Lets a device be driven through a mutable borrow, so callers can keep
/// ownership of the backend.
impl<C: Colorimeter + ?Sized> Colorimeter for &mut C {
    fn connect(&mut self) -> Result<(), DeviceError> {
        (**self).connect()
    }

    fn disconnect(&mut self) {
        (**self).disconnect()
    }

    fn start_measurement(&mut self) -> Result<(), DeviceError> {
        (**self).start_measurement()
    }

    fn poll_status(&mut self) -> Result<MeasStatus, DeviceError> {
        (**self).poll_status()
    }

    fn read_latest(&mut self, unit: LuminanceUnit) -> Result<Lvxy, DeviceError> {
        (**self).read_latest(unit)
    }

    fn set_integration_time(&mut self, time: IntegrationTime) -> Result<(), DeviceError> {
        (**self).set_integration_time(time)
    }

    fn set_backlight(&mut self, mode: BacklightMode) -> Result<(), DeviceError> {
        (**self).set_backlight(mode)
    }
}
