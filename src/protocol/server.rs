use std::io::{self, BufRead, Write};

use log::{debug, info, warn};

use crate::device::{BacklightMode, Colorimeter, IntegrationTime};
use crate::session::Session;

use super::command::{Command, CommandError};
use super::measure::{self, PollConfig};
use super::response::{Response, ResponseError};

/// Operator-facing configuration of the bridge.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Name reported by `SUCCESS,Connected to <device>`.
    pub device_name: String,
    pub poll: PollConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            device_name: "CS-150".to_string(),
            poll: PollConfig::default(),
        }
    }
}

/// The read/dispatch/respond loop and its command handlers.
pub struct CommandServer<D: Colorimeter> {
    session: Session<D>,
    config: ServerConfig,
}

impl<D: Colorimeter> CommandServer<D> {
    pub fn new(device: D, config: ServerConfig) -> Self {
        Self {
            session: Session::new(device),
            config,
        }
    }

    /// Read commands line by line until `EXIT` or end of input, answering
    /// each with at most one response line. Every response is flushed
    /// immediately so a host blocked on a pipe read never stalls.
    pub fn serve<R: BufRead, W: Write>(&mut self, reader: R, mut writer: W) -> io::Result<()> {
        for line in reader.lines() {
            let line = line?;
            let command = match Command::try_from(line.as_str()) {
                Ok(command) => command,
                Err(CommandError::Empty) => continue,
                Err(CommandError::Unrecognized(keyword)) => {
                    warn!("unrecognized command keyword '{keyword}'");
                    writeln!(writer, "{}", Response::from(ResponseError::UnknownCommand))?;
                    writer.flush()?;
                    continue;
                }
            };

            debug!("dispatching {command:?}");
            if command == Command::Exit {
                break;
            }
            if let Some(response) = self.dispatch(command) {
                writeln!(writer, "{response}")?;
                writer.flush()?;
            }
        }

        // EXIT and end of input share the cleanup: never leave the
        // instrument connected to a vanished operator.
        self.session.disconnect();
        Ok(())
    }

    /// Route one command to its handler. `DISCONNECT` answers with no
    /// line; `EXIT` is handled by the read loop.
    pub fn dispatch(&mut self, command: Command) -> Option<Response> {
        match command {
            Command::Connect => Some(self.handle_connect()),
            Command::Measure => Some(self.handle_measure()),
            Command::SetIntegrationTime(argument) => Some(self.handle_integration_time(argument)),
            Command::BacklightOn => Some(self.handle_backlight(BacklightMode::On)),
            Command::BacklightOff => Some(self.handle_backlight(BacklightMode::Off)),
            Command::Disconnect => {
                self.session.disconnect();
                None
            }
            Command::Exit => None,
        }
    }

    fn handle_connect(&mut self) -> Response {
        if self.session.is_connected() {
            return Response::AlreadyConnected;
        }
        match self.session.connect() {
            Ok(()) => {
                info!("connected to {}", self.config.device_name);
                Response::Connected {
                    device: self.config.device_name.clone(),
                }
            }
            Err(e) => {
                warn!("connect failed: {e}");
                Response::Failed(ResponseError::Connect(e))
            }
        }
    }

    fn handle_measure(&mut self) -> Response {
        let poll = &self.config.poll;
        let Some(device) = self.session.device_mut() else {
            return Response::Failed(ResponseError::NotConnected);
        };
        match measure::run(device, poll) {
            Ok(reading) => Response::Measurement(reading),
            Err(e) => {
                warn!("measurement aborted: {e}");
                Response::Failed(e.into())
            }
        }
    }

    fn handle_integration_time(&mut self, argument: Option<String>) -> Response {
        let Some(device) = self.session.device_mut() else {
            return Response::Failed(ResponseError::NotConnected);
        };
        let Some(argument) = argument else {
            return Response::Failed(ResponseError::MissingIntegrationTime);
        };
        let Ok(time) = IntegrationTime::try_from(argument.as_str()) else {
            return Response::Failed(ResponseError::InvalidIntegrationTime);
        };
        match device.set_integration_time(time) {
            Ok(()) => Response::IntegrationTimeSet,
            Err(e) => Response::Failed(ResponseError::SetIntegrationTime(e)),
        }
    }

    fn handle_backlight(&mut self, mode: BacklightMode) -> Response {
        let Some(device) = self.session.device_mut() else {
            return Response::Failed(ResponseError::NotConnected);
        };
        match device.set_backlight(mode) {
            Ok(()) => match mode {
                BacklightMode::On => Response::BacklightOn,
                BacklightMode::Off => Response::BacklightOff,
            },
            Err(e) => Response::Failed(ResponseError::Backlight(e)),
        }
    }
}
