extern crate error_chain;

#[macro_use]
extern crate log;
extern crate env_logger;

use env_logger::{Builder, Target};

use error_chain::ChainedError;

extern crate amumu_balancer_ms;
extern crate amumu_common;

use amumu_balancer_ms::engine::{run_service, BalancerService};

use amumu_common::errors::{Result, ResultExt};

use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

fn run() -> Result<()>
{
    let ledger_path = env::var("AMUMU_LEDGER").ok().map(PathBuf::from);
    let mut service = BalancerService::load(ledger_path.clone())
        .chain_err(|| format!("Failed to load ledger: {:?}", ledger_path))?;

    let stdout = io::stdout();
    let mut output = stdout.lock();

    match env::var("AMUMU_REQUESTS")
    {
        Ok(path) =>
        {
            info!("Reading requests from: {}", path);
            let file = File::open(&path)
                .chain_err(|| format!("Failed to open requests: {}", path))?;
            run_service(&mut service, BufReader::new(file), &mut output)
        },
        Err(_) =>
        {
            info!("Reading requests from stdin");
            let stdin = io::stdin();
            let input = stdin.lock();
            run_service(&mut service, input, &mut output)
        },
    }
}

fn main() {
    /* Log, stdout only carries responses */
    let mut builder = Builder::new();
    builder.target(Target::Stderr);
    if let Ok(filter) = env::var("RUST_LOG") {
        builder.parse(&filter);
    }
    builder.init();

    if let Err(error) = run()
    {
        error!("Balancer stopped: {}", error.display_chain());
        ::std::process::exit(1);
    }
}
