pub mod client;
pub mod device;
pub mod protocol;
pub mod session;

pub use client::{BridgeClient, ClientError};
pub use device::sim::SimulatedColorimeter;
pub use device::{BacklightMode, Colorimeter, DeviceError, IntegrationTime, Lvxy};
pub use protocol::{Command, CommandServer, PollConfig, Response, ServerConfig};
pub use session::Session;
