use chrono::Utc;

use serde_json;

use amumu_common::api::{Request, Response, BalanceResponse};
use amumu_common::balance;
use amumu_common::ranking::RatingLedger;

use amumu_common::errors::{Error, Result};

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct BalancerService
{
    ledger: RatingLedger,
    ledger_path: Option<PathBuf>,
}

impl BalancerService
{
    pub fn new(ledger: RatingLedger, ledger_path: Option<PathBuf>) -> BalancerService
    {
        BalancerService {
            ledger,
            ledger_path,
        }
    }

    /// Starts from the ledger stored at `ledger_path` if there is one
    pub fn load(ledger_path: Option<PathBuf>) -> Result<BalancerService>
    {
        let ledger = match ledger_path
        {
            Some(ref path) if path.exists() =>
            {
                let file = File::open(path)?;
                let ledger: RatingLedger = serde_json::from_reader(BufReader::new(file))?;

                info!("Loaded ledger from: {:?}", path);
                ledger
            },
            _ => RatingLedger::new(),
        };

        Ok(BalancerService::new(ledger, ledger_path))
    }

    pub fn ledger(&self) -> &RatingLedger
    {
        &self.ledger
    }

    pub fn handle(&mut self, request: Request) -> Result<Response>
    {
        match request
        {
            Request::Balance { players } =>
            {
                debug!("Balancing {} players", players.len());

                let balanced = balance::balance_teams(players)?;
                Ok(Response::Balance(BalanceResponse::from(balanced)))
            },
            Request::MatchResult(result) =>
            {
                /* The match only counts once the ledger is on disk */
                let mut ledger = self.ledger.clone();
                ledger.record_match(result, Utc::now())?;
                self.save_ledger(&ledger)?;
                self.ledger = ledger;

                Ok(Response::Rankings { rankings: self.ledger.leaderboard() })
            },
            Request::Rankings => Ok(Response::Rankings { rankings: self.ledger.leaderboard() }),
        }
    }

    /// Never fails, anything that goes wrong is answered with `Response::Error`
    pub fn handle_line(&mut self, line: &str) -> Response
    {
        let request: Request = match serde_json::from_str(line)
        {
            Err(error) =>
            {
                error!("Failed to parse request: {:?} because {}", line, error);
                return Response::Error { message: format!("Malformed request: {}", error) };
            },
            Ok(request) => request,
        };

        match self.handle(request)
        {
            Err(error) =>
            {
                error!("Failed to handle request because {}", error);
                Response::Error { message: format!("{}", error) }
            },
            Ok(response) => response,
        }
    }

    /// Writes a sibling file then renames it over the ledger
    fn save_ledger(&self, ledger: &RatingLedger) -> Result<()>
    {
        if let Some(ref path) = self.ledger_path
        {
            let mut staging = path.clone().into_os_string();
            staging.push(".tmp");
            let staging = PathBuf::from(staging);

            let written = write_ledger(&staging, ledger)
                .and_then(|_| fs::rename(&staging, path).map_err(Error::from));

            if let Err(error) = written
            {
                let _ = fs::remove_file(&staging);
                return Err(error);
            }

            trace!("Saved ledger to: {:?}", path);
        }

        Ok(())
    }
}

fn write_ledger(path: &Path, ledger: &RatingLedger) -> Result<()>
{
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, ledger)?;
    writer.flush()?;

    Ok(())
}

/// One request per line in, one response per line out. Blank lines are skipped.
pub fn run_service<R, W>(service: &mut BalancerService, input: R, output: &mut W) -> Result<()>
    where R: BufRead, W: Write
{
    for line in input.lines()
    {
        let line = line?;
        if line.trim().is_empty()
        {
            continue;
        }

        let response = service.handle_line(&line);

        let serialized = serde_json::to_string(&response)?;
        writeln!(output, "{}", serialized)?;
        output.flush()?;
    }

    Ok(())
}
