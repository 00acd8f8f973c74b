// votechain CLI - cast, audit and tally votes on a local ledger

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use votechain::ledger::VoteLedger;
use votechain::storage::{FileStore, SledStore, SnapshotStore};
use votechain::voting::{candidate_key, election_key, DuplicatePolicy, VoteDesk, VoteRequest};
use votechain::{LedgerConfig, SharedLedger};

#[derive(Parser, Debug)]
#[command(name = "votechain", version, about = "Tamper-evident vote ledger")]
struct Cli {
    /// Directory holding the ledger store
    #[arg(long, env = "VOTECHAIN_STORE", default_value = "./votechain-data")]
    store: PathBuf,

    /// Storage backend
    #[arg(long, env = "VOTECHAIN_BACKEND", value_enum, default_value_t = Backend::Sled)]
    backend: Backend,

    /// Secret mixed into voter hashes
    #[arg(long, env = "VOTECHAIN_PEPPER", hide_env_values = true)]
    pepper: Option<String>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Backend {
    Sled,
    File,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cast a vote
    Vote {
        #[arg(long)]
        voter_id: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        election: u32,
        #[arg(long)]
        candidate: u32,
        /// Refuse the vote if this voter already voted in the election
        #[arg(long)]
        reject_duplicates: bool,
    },
    /// Check whether a voter has voted in an election
    HasVoted {
        #[arg(long)]
        voter_id: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        election: u32,
    },
    /// Verify chain integrity
    Verify,
    /// Show per-candidate results for an election
    Results {
        #[arg(long)]
        election: u32,
        /// Roster of candidate numbers to include even with zero votes
        #[arg(long, value_delimiter = ',')]
        candidates: Vec<u32>,
    },
    /// Show the number of votes on the chain
    Total,
    /// Print the chain
    Chain {
        /// Print raw JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
    /// Show chain statistics
    Stats,
    /// Discard every vote and start from a new genesis block
    Reset,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_store(backend: Backend, path: &Path) -> Result<Box<dyn SnapshotStore>> {
    let store: Box<dyn SnapshotStore> = match backend {
        Backend::Sled => Box::new(
            SledStore::open(path)
                .with_context(|| format!("opening sled store at {}", path.display()))?,
        ),
        Backend::File => Box::new(
            FileStore::open(path)
                .with_context(|| format!("opening file store at {}", path.display()))?,
        ),
    };
    Ok(store)
}

fn run<S: SnapshotStore>(ledger: VoteLedger<S>, command: Command) -> Result<()> {
    match command {
        Command::Vote {
            voter_id,
            phone,
            election,
            candidate,
            reject_duplicates,
        } => {
            let policy = if reject_duplicates {
                DuplicatePolicy::Reject
            } else {
                DuplicatePolicy::Allow
            };
            let desk = VoteDesk::new(SharedLedger::new(ledger), policy);
            let receipt = desk.cast(&VoteRequest::new(voter_id, phone, election, candidate))?;
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        }
        Command::HasVoted {
            voter_id,
            phone,
            election,
        } => {
            println!(
                "{}",
                ledger.has_voted(&voter_id, &phone, &election_key(election))
            );
        }
        Command::Verify => match ledger.verify_chain() {
            Ok(()) => println!("Chain Valid ({} blocks)", ledger.chain().len()),
            Err(e) => anyhow::bail!("Chain Invalid: {}", e),
        },
        Command::Results {
            election,
            candidates,
        } => {
            let tally = ledger
                .election_results(&election_key(election))
                .with_candidates(candidates.into_iter().map(candidate_key));
            for (candidate, count) in tally.ranked() {
                println!("{:<20} {:>8}", candidate, count);
            }
        }
        Command::Total => println!("{}", ledger.total_votes()),
        Command::Chain { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(ledger.chain())?);
            } else {
                for block in ledger.chain() {
                    println!(
                        "#{:<5} {}  {:<14} {:<16} {}",
                        block.index,
                        block.timestamp,
                        block.election_id,
                        block.candidate_id,
                        block.abbreviated_hash()
                    );
                }
            }
        }
        Command::Stats => println!("{}", serde_json::to_string_pretty(&ledger.stats())?),
        Command::Reset => {
            let mut ledger = ledger;
            ledger.reset_chain();
            println!("Ledger reset to genesis");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let store = open_store(cli.backend, &cli.store)?;
    let config = match cli.pepper {
        Some(pepper) => LedgerConfig::new().with_voter_pepper(pepper),
        None => LedgerConfig::new(),
    };

    run(VoteLedger::open(store, config), cli.command)
}
