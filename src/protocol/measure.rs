//! The blocking measurement sequence: start, poll until the instrument
//! leaves `Measuring`, then read the latest reading.
use std::thread;
use std::time::{Duration, Instant};

use log::debug;
use thiserror::Error;

use crate::device::{Colorimeter, DeviceError, LuminanceUnit, Lvxy, MeasStatus};

/// Pacing for the status-poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between consecutive status queries.
    pub interval: Duration,
    /// Upper bound on the poll phase; a measurement still running at the
    /// deadline is abandoned.
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            timeout: Duration::from_secs(30),
        }
    }
}

/// One failure exit per stage of the sequence. The `Display` texts are part
/// of the wire protocol.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeasureError {
    #[error("Measure command failed")]
    Start(#[source] DeviceError),

    #[error("Polling failed")]
    Poll(#[source] DeviceError),

    #[error("Measurement timed out")]
    Timeout(Duration),

    #[error("ReadLatestData failed")]
    Read(#[source] DeviceError),
}

/// Drive one full measurement. Blocks the calling thread for the whole
/// sequence; any failure is terminal for this measurement only.
pub fn run<D: Colorimeter>(device: &mut D, poll: &PollConfig) -> Result<Lvxy, MeasureError> {
    device.start_measurement().map_err(MeasureError::Start)?;

    let deadline = Instant::now() + poll.timeout;
    loop {
        thread::sleep(poll.interval);
        let status = device.poll_status().map_err(MeasureError::Poll)?;
        debug!("measurement status: {status:?}");
        if status != MeasStatus::Measuring {
            break;
        }
        if Instant::now() >= deadline {
            return Err(MeasureError::Timeout(poll.timeout));
        }
    }

    device
        .read_latest(LuminanceUnit::CandelaPerSquareMeter)
        .map_err(MeasureError::Read)
}
