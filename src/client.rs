//! Host-side wrapper around a bridge server process.
//!
//! This module is the Rust counterpart of the MATLAB/Python host shims: it
//! launches `luxbridge_server` as a child process, speaks the line protocol
//! over its stdio pipes, and exposes typed operations instead of raw
//! command strings. One request/response exchange is in flight at a time,
//! matching the server's single-command model.
//!
//! Shutdown sends `EXIT`, waits for the child to leave on its own, and
//! kills it after a grace period. Dropping a [`BridgeClient`] performs the
//! same shutdown best-effort.
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use thiserror::Error;

use crate::device::{BacklightMode, IntegrationTime, Lvxy};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// List of possible errors when driving a bridge server.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to launch bridge server: {0}")]
    Spawn(#[source] io::Error),

    #[error("bridge i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("bridge server closed its output stream")]
    ServerClosed,

    /// The bridge answered with a non-`SUCCESS` line.
    #[error("bridge refused the command: {0}")]
    Rejected(String),

    #[error("malformed bridge response '{0}'")]
    Malformed(String),
}

/// Drives a `luxbridge_server` child over its stdio pipes.
pub struct BridgeClient {
    child: Child,
    writer: ChildStdin,
    reader: BufReader<ChildStdout>,
    exited: bool,
}

impl BridgeClient {
    /// Launch the server executable with the given extra arguments. Stderr
    /// is inherited so server diagnostics stay visible on the host console.
    pub fn spawn(program: &Path, args: &[&str]) -> Result<Self, ClientError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(ClientError::Spawn)?;

        let writer = child.stdin.take().expect("stdin is piped");
        let reader = BufReader::new(child.stdout.take().expect("stdout is piped"));
        info!("bridge server started (pid {})", child.id());

        Ok(Self {
            child,
            writer,
            reader,
            exited: false,
        })
    }

    /// `CONNECT`.
    pub fn connect(&mut self) -> Result<(), ClientError> {
        let line = self.exchange("CONNECT")?;
        expect_success(line).map(drop)
    }

    /// `MEASURE`. Blocks for the whole instrument measurement.
    pub fn measure(&mut self) -> Result<Lvxy, ClientError> {
        let line = self.exchange("MEASURE")?;
        let line = expect_success(line)?;
        parse_measurement(&line)
    }

    /// `INTEG AUTO` / `INTEG <seconds>`.
    pub fn set_integration_time(&mut self, time: IntegrationTime) -> Result<(), ClientError> {
        let line = self.exchange(&format!("INTEG {time}"))?;
        expect_success(line).map(drop)
    }

    /// `BACKLIGHTON` / `BACKLIGHTOFF`.
    pub fn set_backlight(&mut self, mode: BacklightMode) -> Result<(), ClientError> {
        let command = match mode {
            BacklightMode::On => "BACKLIGHTON",
            BacklightMode::Off => "BACKLIGHTOFF",
        };
        let line = self.exchange(command)?;
        expect_success(line).map(drop)
    }

    /// `DISCONNECT`. The server answers with no line, so nothing is read.
    pub fn disconnect(&mut self) -> Result<(), ClientError> {
        self.send("DISCONNECT")
    }

    /// Send `EXIT` and reap the server, killing it if it ignores the
    /// request past the grace period.
    pub fn close(mut self) -> Result<(), ClientError> {
        self.shutdown()
    }

    fn exchange(&mut self, command: &str) -> Result<String, ClientError> {
        self.send(command)?;
        self.read_line()
    }

    fn send(&mut self, command: &str) -> Result<(), ClientError> {
        debug!("-> {command}");
        writeln!(self.writer, "{command}")?;
        self.writer.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, ClientError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(ClientError::ServerClosed);
        }
        let line = line.trim_end().to_string();
        debug!("<- {line}");
        Ok(line)
    }

    fn shutdown(&mut self) -> Result<(), ClientError> {
        if self.exited {
            return Ok(());
        }
        self.exited = true;

        // a dead server cannot take EXIT; reaping below still applies
        let _ = self.send("EXIT");

        let deadline = Instant::now() + SHUTDOWN_GRACE;
        loop {
            match self.child.try_wait()? {
                Some(status) => {
                    info!("bridge server exited with {status}");
                    return Ok(());
                }
                None if Instant::now() >= deadline => {
                    warn!("bridge server ignored EXIT; killing it");
                    self.child.kill()?;
                    self.child.wait()?;
                    return Ok(());
                }
                None => thread::sleep(Duration::from_millis(50)),
            }
        }
    }
}

impl Drop for BridgeClient {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!("failed to shut down bridge server: {e}");
        }
    }
}

fn expect_success(line: String) -> Result<String, ClientError> {
    if line.starts_with("SUCCESS") {
        Ok(line)
    } else {
        Err(ClientError::Rejected(line))
    }
}

fn parse_measurement(line: &str) -> Result<Lvxy, ClientError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 4 {
        return Err(ClientError::Malformed(line.to_string()));
    }

    let parse = |raw: &str| {
        raw.parse::<f64>()
            .map_err(|_| ClientError::Malformed(line.to_string()))
    };
    Ok(Lvxy {
        lv: parse(fields[1])?,
        x: parse(fields[2])?,
        y: parse(fields[3])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_measurement_line() {
        let reading = parse_measurement("SUCCESS,12.5,0.3127,0.329").unwrap();
        assert_eq!(
            reading,
            Lvxy {
                lv: 12.5,
                x: 0.3127,
                y: 0.329
            }
        );
    }

    #[test]
    fn rejects_short_and_garbled_measurement_lines() {
        for line in [
            "SUCCESS,12.5,0.31",
            "SUCCESS,12.5,0.31,0.32,extra",
            "SUCCESS,twelve,0.31,0.32",
            "SUCCESS",
        ] {
            assert!(
                matches!(parse_measurement(line), Err(ClientError::Malformed(_))),
                "accepted '{line}'"
            );
        }
    }

    #[test]
    fn non_success_lines_are_rejections() {
        let err = expect_success("ERROR,Not connected".to_string()).unwrap_err();
        match err {
            ClientError::Rejected(line) => assert_eq!(line, "ERROR,Not connected"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn integration_time_formats_into_commands() {
        assert_eq!(format!("INTEG {}", IntegrationTime::Auto), "INTEG AUTO");
        assert_eq!(format!("INTEG {}", IntegrationTime::Manual(0.5)), "INTEG 0.5");
    }
}
