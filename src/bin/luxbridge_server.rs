use std::time::Duration;
use std::{error::Error, io};

use clap::Parser;
use luxbridge::{CommandServer, PollConfig, ServerConfig, SimulatedColorimeter};

/// Stdio command bridge for CS-150/CS-160 colorimeters.
///
/// Reads one command per line on stdin, answers one comma-delimited line on
/// stdout. Diagnostics go to stderr (RUST_LOG).
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Device name reported on a successful CONNECT
    #[arg(long, default_value = "CS-150")]
    device_name: String,

    /// Delay between measurement status polls, in milliseconds
    #[arg(long, default_value_t = 100)]
    poll_interval_ms: u64,

    /// Abandon a measurement still running after this many milliseconds
    #[arg(long, default_value_t = 30_000)]
    poll_timeout_ms: u64,

    /// Status polls the simulated instrument reports busy before a reading
    #[arg(long, default_value_t = 2)]
    sim_busy_polls: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize env_logger; diagnostics go to stderr so stdout stays
    // machine-parseable
    env_logger::init();

    let cli = Cli::parse();
    ctrlc::set_handler(|| {
        log::warn!("interrupted; exiting");
        std::process::exit(130);
    })?;

    let device = SimulatedColorimeter::new().with_busy_polls(cli.sim_busy_polls);
    let config = ServerConfig {
        device_name: cli.device_name,
        poll: PollConfig {
            interval: Duration::from_millis(cli.poll_interval_ms),
            timeout: Duration::from_millis(cli.poll_timeout_ms),
        },
    };

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let mut server = CommandServer::new(device, config);
    server.serve(stdin, stdout)?;
    Ok(())
}
