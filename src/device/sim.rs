//! Hardware-free colorimeter backend.
//!
//! Stands in for the vendor driver so the bridge can run and be exercised
//! without an instrument attached. Deterministic: a measurement reports
//! `Measuring` for a fixed number of polls and then always yields the
//! configured reading.
use log::debug;

use super::{
    BacklightMode, Colorimeter, DeviceError, ErrorCode, IntegrationTime, LuminanceUnit, Lvxy,
    MeasStatus,
};

/// Simulated instrument session.
#[derive(Debug)]
pub struct SimulatedColorimeter {
    connected: bool,
    busy_polls: u32,
    remaining: u32,
    measuring: bool,
    reading: Lvxy,
    integration: IntegrationTime,
    backlight: BacklightMode,
}

impl SimulatedColorimeter {
    pub fn new() -> Self {
        Self {
            connected: false,
            busy_polls: 2,
            remaining: 0,
            measuring: false,
            // D65 white point chromaticity at a plausible display luminance
            reading: Lvxy {
                lv: 42.5,
                x: 0.3127,
                y: 0.329,
            },
            integration: IntegrationTime::Auto,
            backlight: BacklightMode::On,
        }
    }

    /// Number of status polls that report `Measuring` before a reading
    /// becomes available.
    pub fn with_busy_polls(mut self, polls: u32) -> Self {
        self.busy_polls = polls;
        self
    }

    /// Reading returned by every measurement.
    pub fn with_reading(mut self, reading: Lvxy) -> Self {
        self.reading = reading;
        self
    }

    pub fn integration_time(&self) -> IntegrationTime {
        self.integration
    }

    pub fn backlight(&self) -> BacklightMode {
        self.backlight
    }

    fn require_connected(&self) -> Result<(), DeviceError> {
        if self.connected {
            Ok(())
        } else {
            Err(DeviceError::Code(ErrorCode::NotConnected))
        }
    }
}

impl Default for SimulatedColorimeter {
    fn default() -> Self {
        Self::new()
    }
}

impl Colorimeter for SimulatedColorimeter {
    fn connect(&mut self) -> Result<(), DeviceError> {
        self.connected = true;
        debug!("simulated instrument connected");
        Ok(())
    }

    fn disconnect(&mut self) {
        self.connected = false;
        self.measuring = false;
        debug!("simulated instrument disconnected");
    }

    fn start_measurement(&mut self) -> Result<(), DeviceError> {
        self.require_connected()?;
        self.measuring = true;
        self.remaining = self.busy_polls;
        debug!("simulated measurement started, busy for {} polls", self.busy_polls);
        Ok(())
    }

    fn poll_status(&mut self) -> Result<MeasStatus, DeviceError> {
        self.require_connected()?;
        if !self.measuring {
            return Ok(MeasStatus::Ready);
        }
        if self.remaining > 0 {
            self.remaining -= 1;
            Ok(MeasStatus::Measuring)
        } else {
            self.measuring = false;
            Ok(MeasStatus::Ready)
        }
    }

    fn read_latest(&mut self, _unit: LuminanceUnit) -> Result<Lvxy, DeviceError> {
        self.require_connected()?;
        if self.measuring {
            return Err(DeviceError::Code(ErrorCode::InternalError));
        }
        Ok(self.reading)
    }

    fn set_integration_time(&mut self, time: IntegrationTime) -> Result<(), DeviceError> {
        self.require_connected()?;
        if let IntegrationTime::Manual(seconds) = time {
            if !seconds.is_finite() || seconds < 0.0 {
                return Err(DeviceError::Code(ErrorCode::InvalidParameter));
            }
        }
        self.integration = time;
        debug!("integration time set to {time}");
        Ok(())
    }

    fn set_backlight(&mut self, mode: BacklightMode) -> Result<(), DeviceError> {
        self.require_connected()?;
        self.backlight = mode;
        debug!("backlight set to {mode:?}");
        Ok(())
    }
}
