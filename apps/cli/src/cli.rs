//! Command-line arguments

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rxboard_models::{ClaimStatus, DEFAULT_PER_PAGE};

#[derive(Debug, Parser)]
#[command(name = "rxboard")]
#[command(version, about = "PBM administrative dashboard for the terminal")]
pub struct Cli {
    /// Configuration file (default: ./rxboard.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding configuration and environment
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pharmacy claims
    #[command(subcommand)]
    Claims(ClaimsCommand),
    /// Plan members
    #[command(subcommand)]
    Members(MembersCommand),
    /// Drug formulary
    #[command(subcommand)]
    Drugs(DrugsCommand),
    /// Pharmacy network
    #[command(subcommand)]
    Pharmacies(PharmaciesCommand),
    /// Summary, status breakdown, top drugs, trends, utilizers and savings
    Dashboard(Days),
    /// Daily claims and cost with 7-day moving averages
    Trends(Days),
    /// Members with the most claims, bucketed by risk
    Utilizers {
        #[command(flatten)]
        days: Days,
        /// Minimum claims to be listed
        #[arg(long)]
        min_claims: Option<u32>,
    },
    /// Generic substitution opportunities
    Savings(Days),
    /// Cost totals by status and month
    CostSummary {
        /// First fill date (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,
        /// Last fill date (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
    },
    /// One member's claims, spend and most used drugs
    MemberSummary {
        /// Member record id
        id: i64,
        #[command(flatten)]
        days: Days,
    },
    /// Claims, cost and denial rate per pharmacy
    PharmacyPerformance(Days),
    /// Claims and cost per therapeutic class
    TherapeuticClasses(Days),
}

#[derive(Debug, Clone, Copy, Args)]
pub struct Days {
    /// Reporting window in days (server default when omitted)
    #[arg(long)]
    pub days: Option<u32>,
}

#[derive(Debug, Clone, Copy, Args)]
pub struct Paging {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
    pub per_page: u32,
}

#[derive(Debug, Subcommand)]
pub enum ClaimsCommand {
    /// List claims, newest first
    List {
        #[command(flatten)]
        paging: Paging,
        #[arg(long, value_parser = parse_status)]
        status: Option<ClaimStatus>,
        /// Member record id
        #[arg(long)]
        member: Option<i64>,
        /// Earliest fill date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Latest fill date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Show one claim
    Get { id: i64 },
    /// Change a claim's adjudication status
    SetStatus {
        id: i64,
        #[arg(value_parser = parse_status)]
        status: ClaimStatus,
    },
}

#[derive(Debug, Subcommand)]
pub enum MembersCommand {
    List {
        #[command(flatten)]
        paging: Paging,
        /// Name or member id fragment
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    Get {
        id: i64,
    },
    /// A member's claims
    Claims {
        id: i64,
        #[command(flatten)]
        paging: Paging,
    },
    /// Enroll a member
    Create(NewMember),
}

#[derive(Debug, Clone, Args)]
pub struct NewMember {
    #[arg(long)]
    pub member_id: String,
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date_of_birth: Option<NaiveDate>,
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub plan_type: Option<String>,
    #[arg(long)]
    pub group_id: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum DrugsCommand {
    List {
        #[command(flatten)]
        paging: Paging,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        generic: Option<bool>,
        #[arg(long)]
        therapeutic_class: Option<String>,
    },
    Get {
        id: i64,
    },
    /// Quick lookup by name or NDC
    Search {
        query: String,
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Debug, Subcommand)]
pub enum PharmaciesCommand {
    List {
        #[command(flatten)]
        paging: Paging,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        city: Option<String>,
        /// Two-letter state code
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        in_network: Option<bool>,
    },
    Get {
        id: i64,
    },
}

fn parse_status(value: &str) -> Result<ClaimStatus, String> {
    value.parse::<ClaimStatus>().map_err(|e| e.to_string())
}
