//! Connection state between the bridge and the instrument.
//!
//! The session owns the device handle and the connected flag, and every
//! device-touching handler goes through it: [`Session::device_mut`] yields
//! the handle only while the link is established.
use crate::device::{Colorimeter, DeviceError};

/// One logical instrument link for the life of the server process.
#[derive(Debug)]
pub struct Session<D> {
    device: D,
    connected: bool,
}

impl<D: Colorimeter> Session<D> {
    /// Wrap a device backend; the session starts disconnected.
    pub fn new(device: D) -> Self {
        Self {
            device,
            connected: false,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Open the instrument link. The flag flips only when the driver
    /// reports success.
    pub fn connect(&mut self) -> Result<(), DeviceError> {
        self.device.connect()?;
        self.connected = true;
        Ok(())
    }

    /// Best-effort teardown. While disconnected this is a silent no-op and
    /// the driver is not called.
    pub fn disconnect(&mut self) {
        if self.connected {
            self.device.disconnect();
            self.connected = false;
        }
    }

    /// Instrument handle, available only while connected.
    pub fn device_mut(&mut self) -> Option<&mut D> {
        self.connected.then_some(&mut self.device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::mock::MockColorimeter;
    use crate::device::{DeviceError, ErrorCode};

    #[test]
    fn connect_sets_flag_on_success() {
        let mut session = Session::new(MockColorimeter::default());
        assert!(!session.is_connected());

        session.connect().unwrap();
        assert!(session.is_connected());
        assert!(session.device_mut().is_some());
    }

    #[test]
    fn connect_failure_leaves_session_disconnected() {
        let mut session = Session::new(MockColorimeter {
            connect_error: Some(DeviceError::Code(ErrorCode::DeviceNotFound)),
            ..MockColorimeter::default()
        });

        assert!(session.connect().is_err());
        assert!(!session.is_connected());
        assert!(session.device_mut().is_none());
    }

    #[test]
    fn disconnect_skips_driver_when_not_connected() {
        let mut device = MockColorimeter::default();
        let mut session = Session::new(&mut device);
        session.disconnect();
        drop(session);

        assert_eq!(device.disconnects, 0);
    }

    #[test]
    fn disconnect_calls_driver_once_when_connected() {
        let mut device = MockColorimeter::default();
        let mut session = Session::new(&mut device);
        session.connect().unwrap();
        session.disconnect();
        session.disconnect();
        drop(session);

        assert_eq!(device.disconnects, 1);
    }
}
