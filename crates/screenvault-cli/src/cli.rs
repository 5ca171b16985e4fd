use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "screenvault", version, about = "Crypto app UI pattern library tooling")]
pub struct Cli {
    /// Override the configured log level
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every statically generated page path
    Routes {
        /// Emit JSON with route kinds
        #[arg(long)]
        json: bool,
    },
    /// Match the pattern library against the catalog
    Patterns {
        /// Only patterns in this section
        #[arg(long)]
        section: Option<String>,
        /// Print matching screens for one pattern
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Bucket an adoption rate into dominant/common/emerging/outlier
    Classify {
        /// Share of apps using the pattern, 0.0 to 1.0
        rate: f64,
        /// Label recorded alongside the rate
        #[arg(long, default_value = "common")]
        label: String,
    },
    /// Generate the skill bundle from the intelligence directory
    Package(PackageArgs),
    /// Waitlist signups
    Waitlist {
        #[command(subcommand)]
        action: WaitlistAction,
    },
    /// Agent directory
    Agents {
        #[command(subcommand)]
        action: AgentsAction,
    },
    /// Bounty board
    Bounties {
        #[command(subcommand)]
        action: BountiesAction,
    },
    /// Admin overview and money-movement tables
    Dashboard {
        /// Show one table instead of the counts
        #[arg(long, value_enum)]
        table: Option<Table>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Load a JSON array of documents into a collection
    Import {
        collection: String,
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct PackageArgs {
    /// Intelligence directory (defaults to the configured one)
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Bundle output directory (defaults to the configured one)
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Check an existing bundle instead of generating one
    #[arg(long)]
    pub validate: bool,
}

#[derive(Args, Debug, Default)]
pub struct PageArgs {
    /// Resume after the document with this id
    #[arg(long)]
    pub after: Option<String>,
    /// Rows per page
    #[arg(long)]
    pub limit: Option<usize>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum WaitlistAction {
    /// Sign up an email address
    Add {
        email: String,
        #[arg(long)]
        source: Option<String>,
    },
    /// Number of signups
    Count,
}

#[derive(Subcommand, Debug)]
pub enum AgentsAction {
    List {
        #[arg(long)]
        verified: bool,
        #[arg(long)]
        skill: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum BountiesAction {
    List {
        #[arg(long)]
        status: Option<String>,
        /// newest or reward
        #[arg(long, default_value = "newest")]
        sort: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Claims submitted for one bounty
    Claims {
        bounty_id: String,
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Table {
    Escrows,
    Deposits,
    Withdrawals,
}
