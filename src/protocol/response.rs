use std::fmt;

use thiserror::Error;

use crate::device::{DeviceError, Lvxy};

use super::measure::MeasureError;

/// Reason carried by an `ERROR` response line.
///
/// The `Display` texts are wire-exact: existing host-side parsers match on
/// them, so they are part of the protocol.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResponseError {
    #[error("Unknown command")]
    UnknownCommand,

    #[error("Not connected")]
    NotConnected,

    #[error("{0}")]
    Connect(DeviceError),

    #[error(transparent)]
    Measure(#[from] MeasureError),

    #[error("Integration time value is missing. Use 'INTEG AUTO' or 'INTEG <seconds>'.")]
    MissingIntegrationTime,

    #[error("Invalid time value. It must be 'AUTO' or a number.")]
    InvalidIntegrationTime,

    #[error("Failed to set integration time with code: {0}")]
    SetIntegrationTime(DeviceError),

    #[error("{0}")]
    Backlight(DeviceError),
}

/// Single-line outcome written back to the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Connected { device: String },
    AlreadyConnected,
    Measurement(Lvxy),
    IntegrationTimeSet,
    BacklightOn,
    BacklightOff,
    Failed(ResponseError),
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Connected { device } => write!(f, "SUCCESS,Connected to {device}"),
            Response::AlreadyConnected => f.write_str("SUCCESS,Already connected"),
            // `{}` on f64 is always dot-decimal, independent of host locale
            Response::Measurement(reading) => {
                write!(f, "SUCCESS,{},{},{}", reading.lv, reading.x, reading.y)
            }
            Response::IntegrationTimeSet => f.write_str("SUCCESS,Integration time set"),
            // the space after the comma is part of the wire format
            Response::BacklightOn => f.write_str("SUCCESS, Backlight ON"),
            Response::BacklightOff => f.write_str("SUCCESS, Backlight OFF"),
            Response::Failed(reason) => write!(f, "ERROR,{reason}"),
        }
    }
}

impl From<ResponseError> for Response {
    fn from(reason: ResponseError) -> Self {
        Response::Failed(reason)
    }
}
