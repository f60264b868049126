//! quorumchain CLI entry point.
//!
//! Drives a synthetic workload of block submissions through the
//! mine-vote-append pipeline and prints the resulting chain.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use quorumchain_chain::{Ledger, Submission};
use quorumchain_consensus::{Byzantine, Faulty, Honest, Quorum, Validate};
use tracing_subscriber::EnvFilter;

mod report;

#[derive(Parser)]
#[command(name = "quorumchain")]
#[command(about = "An in-memory proof-of-work ledger with quorum admission", long_about = None)]
struct Cli {
    /// Honest validators in the quorum
    #[arg(long, default_value_t = 6)]
    validators: usize,

    /// Crashed validators that never agree
    #[arg(long, default_value_t = 0)]
    faulty: usize,

    /// Adversarial validators that invert the honest verdict
    #[arg(long, default_value_t = 0)]
    byzantine: usize,

    /// Leading zero hex characters required of each submitted block
    #[arg(long, default_value_t = 4)]
    difficulty: u32,

    /// Print the final chain as JSON instead of the textual report
    #[arg(long)]
    json: bool,

    /// Payloads to submit; runs the built-in demo workload when omitted
    payloads: Vec<String>,
}

/// The demo workload: varied payloads and difficulties, so a default run
/// shows both quick and visibly expensive mining.
fn demo_workload() -> Vec<(String, u32)> {
    [
        ("I just woke up", 4),
        ("Kevin proposed a strong idea", 5),
        ("Third Block", 4),
        ("Fourth Block", 2),
        ("I am alarmed by the spending", 4),
        ("Sixth Block", 1),
        ("Seventh Block", 5),
        ("Eighth Block", 1),
        ("Ninth Block", 3),
        ("Tenth Block", 4),
    ]
    .into_iter()
    .map(|(payload, difficulty)| (payload.to_owned(), difficulty))
    .collect()
}

fn build_quorum(cli: &Cli) -> Result<Quorum> {
    let mut participants: Vec<Box<dyn Validate>> = Vec::new();
    participants.extend((0..cli.validators).map(|_| Box::new(Honest) as Box<dyn Validate>));
    participants.extend((0..cli.faulty).map(|_| Box::new(Faulty) as Box<dyn Validate>));
    participants.extend((0..cli.byzantine).map(|_| Box::new(Byzantine) as Box<dyn Validate>));
    Ok(Quorum::new(participants)?)
}

fn run(cli: Cli) -> Result<()> {
    let quorum = build_quorum(&cli)?;
    println!(
        "quorum: {} participants, acceptance needs more than {} agreements",
        quorum.participant_count(),
        quorum.threshold()
    );

    let mut ledger = Ledger::new(quorum);

    let workload: Vec<(String, u32)> = if cli.payloads.is_empty() {
        demo_workload()
    } else {
        cli.payloads
            .iter()
            .map(|payload| (payload.clone(), cli.difficulty))
            .collect()
    };

    for (payload, difficulty) in workload {
        println!("mining {:?} at difficulty {difficulty}...", payload);
        match ledger.submit(payload, difficulty)? {
            Submission::Accepted { hash, index } => {
                println!("{} block {index}: {hash}", "accepted".green());
            }
            Submission::Rejected { vote } => {
                println!(
                    "{} with {} of {} agreements",
                    "rejected".red(),
                    vote.agreements,
                    vote.participants
                );
            }
        }
    }

    ledger.verify()?;

    if cli.json {
        println!("{}", report::to_json(&ledger)?);
    } else {
        report::print_chain(&ledger);
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
