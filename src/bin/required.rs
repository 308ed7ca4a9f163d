use std::env;
use std::error::Error;
use std::str::FromStr;

use clap::Parser;
use tracing::debug;

use trio::candidate;
use trio::marks::Marks;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// five-digit marks code, ◎○▲△☓ in order (e.g., 32547)
    marks: String,

    /// print the tickets as a JSON array
    #[clap(long)]
    json: bool,
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
    debug!("args: {args:?}");

    let marks = Marks::from_str(&args.marks)?;
    let required = candidate::required_tickets(&marks)?;
    if args.json {
        println!("{}", serde_json::to_string(&required)?);
    } else {
        for ticket in required {
            println!("{ticket}");
        }
    }
    Ok(())
}
