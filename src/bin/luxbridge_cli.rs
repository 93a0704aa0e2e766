use std::{error::Error, path::PathBuf};

use clap::Parser;
use luxbridge::{BridgeClient, IntegrationTime};

/// Take readings through a bridge server and print them as CSV lines.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the luxbridge_server executable
    server: PathBuf,

    /// Integration time: 'AUTO' or seconds
    #[arg(long)]
    integration: Option<String>,

    /// Number of measurements to take
    #[arg(long, default_value_t = 1)]
    samples: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let mut client = BridgeClient::spawn(&cli.server, &[])?;
    client.connect()?;

    if let Some(raw) = cli.integration.as_deref() {
        let time = IntegrationTime::try_from(raw)?;
        client.set_integration_time(time)?;
    }

    for _ in 0..cli.samples {
        let reading = client.measure()?;
        println!("{},{},{}", reading.lv, reading.x, reading.y);
    }

    client.disconnect()?;
    client.close()?;
    Ok(())
}
