//! Scripted colorimeter double for protocol tests.
use std::collections::VecDeque;

use super::{
    BacklightMode, Colorimeter, DeviceError, IntegrationTime, LuminanceUnit, Lvxy, MeasStatus,
};

/// Device whose answers are scripted up front and whose calls are recorded.
///
/// Each `*_error` slot fails the next matching call once; `statuses` is
/// popped per poll and falls back to `Ready` when exhausted.
#[derive(Debug, Default)]
pub(crate) struct MockColorimeter {
    pub connect_error: Option<DeviceError>,
    pub start_error: Option<DeviceError>,
    pub poll_error: Option<DeviceError>,
    pub read_error: Option<DeviceError>,
    pub integ_error: Option<DeviceError>,
    pub backlight_error: Option<DeviceError>,
    pub statuses: VecDeque<MeasStatus>,
    pub reading: Lvxy,

    pub connects: u32,
    pub disconnects: u32,
    pub starts: u32,
    pub polls: u32,
    pub reads: u32,
    pub integration_times: Vec<IntegrationTime>,
    pub backlights: Vec<BacklightMode>,
}

impl MockColorimeter {
    pub(crate) fn with_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = MeasStatus>,
    {
        Self {
            statuses: statuses.into_iter().collect(),
            ..Self::default()
        }
    }

    pub(crate) fn total_calls(&self) -> usize {
        (self.connects + self.disconnects + self.starts + self.polls + self.reads) as usize
            + self.integration_times.len()
            + self.backlights.len()
    }
}

impl Colorimeter for MockColorimeter {
    fn connect(&mut self) -> Result<(), DeviceError> {
        self.connects += 1;
        match self.connect_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn disconnect(&mut self) {
        self.disconnects += 1;
    }

    fn start_measurement(&mut self) -> Result<(), DeviceError> {
        self.starts += 1;
        match self.start_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn poll_status(&mut self) -> Result<MeasStatus, DeviceError> {
        self.polls += 1;
        if let Some(e) = self.poll_error.take() {
            return Err(e);
        }
        Ok(self.statuses.pop_front().unwrap_or(MeasStatus::Ready))
    }

    fn read_latest(&mut self, _unit: LuminanceUnit) -> Result<Lvxy, DeviceError> {
        self.reads += 1;
        match self.read_error.take() {
            Some(e) => Err(e),
            None => Ok(self.reading),
        }
    }

    fn set_integration_time(&mut self, time: IntegrationTime) -> Result<(), DeviceError> {
        self.integration_times.push(time);
        match self.integ_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn set_backlight(&mut self, mode: BacklightMode) -> Result<(), DeviceError> {
        self.backlights.push(mode);
        match self.backlight_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
