use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info, warn};

use trio::candidate::{self, Candidate};
use trio::decision::{self, Decision};
use trio::display::DisplaySlice;
use trio::file::{read_odds, WriteJsonFile};
use trio::marks::Marks;
use trio::odds::OddsTable;
use trio::payload;
use trio::print::{tabulate_candidates, tabulate_marks, tabulate_plan, tabulate_required, tabulate_trail};
use trio::stake::Budget;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// five-digit marks code, ◎○▲△☓ in order (e.g., 32547)
    #[clap(short = 'm', long)]
    marks: String,

    /// base64url-encoded odds payload
    #[clap(short = 'o', long)]
    odds: Option<String>,

    /// JSON file to source the odds from
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// total budget
    #[clap(long, default_value_t = Budget::DEFAULT_TOTAL)]
    total: u64,

    /// purchase unit
    #[clap(long, default_value_t = Budget::DEFAULT_UNIT)]
    unit: u64,

    /// minimum return required of every ticket
    #[clap(long, default_value_t = Budget::DEFAULT_TARGET_RETURN)]
    target: u64,

    /// show why earlier candidates were passed over
    #[clap(long)]
    debug: bool,

    /// print the decision as JSON
    #[clap(long)]
    json: bool,

    /// also write the decision as JSON to this file
    #[clap(long)]
    out: Option<PathBuf>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.total == 0 || self.unit == 0 || self.target == 0 {
            bail!("--total, --unit and --target must be positive");
        }
        if self.total % self.unit != 0 {
            warn!(
                "total {} is not a multiple of unit {}; the remainder will not be staked",
                self.total, self.unit
            );
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let budget = Budget::new(args.total, args.unit, args.target)?;
    let odds = read_odds_sources(&args)?;
    debug!("sourced {} quotes", odds.len());

    let decision = match Marks::from_str(&args.marks) {
        Ok(marks) => {
            let candidates = candidate::build(&marks)?;
            describe(&marks, &candidates, &odds, args.json)?;
            decision::select(&marks, candidates, &odds, &budget)
        }
        Err(_) => decision::decide(&args.marks, &odds, &budget)?,
    };
    if let Some(path) = args.out.as_ref() {
        decision.write_json_file(path)?;
        debug!("wrote decision to {}", path.display());
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
        return Ok(());
    }

    match &decision {
        Decision::Invalid { message, .. } => {
            warn!("invalid marks: {message}");
        }
        Decision::Skip { .. } => {
            info!("SKIP: no candidate set is both priced and affordable");
        }
        Decision::Purchase(purchase) => {
            info!(
                "OK: purchasing set {} ({})\n{}",
                purchase.label,
                DisplaySlice::plus(&purchase.tickets),
                Console::default().render(&tabulate_plan(purchase))
            );
        }
    }
    if args.debug && !decision.trail().is_empty() {
        info!(
            "passed over:\n{}",
            Console::default().render(&tabulate_trail(decision.trail()))
        );
    }
    Ok(())
}

/// Merges odds from the file (if given) with the payload (if given), the payload taking
/// precedence. A malformed payload is reported and ignored.
fn read_odds_sources(args: &Args) -> anyhow::Result<OddsTable> {
    let mut odds = OddsTable::default();
    if let Some(path) = args.file.as_ref() {
        odds.merge(read_odds(path)?);
    }
    if let Some(encoded) = args.odds.as_ref() {
        match payload::decode(encoded) {
            Ok(decoded) => odds.merge(decoded),
            Err(err) => warn!("ignoring odds payload: {err}"),
        }
    }
    Ok(odds)
}

fn describe(marks: &Marks, candidates: &[Candidate], odds: &OddsTable, quiet: bool) -> anyhow::Result<()> {
    let required = candidate::required_tickets(marks)?;
    let missing: Vec<_> = required
        .iter()
        .filter(|ticket| !odds.contains(ticket))
        .collect();
    if !missing.is_empty() {
        warn!("no odds for required tickets {}", DisplaySlice::comma(&missing));
    }
    if !quiet {
        info!("marks:\n{}", Console::default().render(&tabulate_marks(marks)));
        info!(
            "candidates (priority A to D):\n{}",
            Console::default().render(&tabulate_candidates(candidates))
        );
        info!(
            "odds:\n{}",
            Console::default().render(&tabulate_required(&required, odds))
        );
    }
    Ok(())
}
