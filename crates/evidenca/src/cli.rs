//! Clap derive structures for the `evidenca` CLI.
//!
//! Also compiled by `build.rs` for man pages, so this module depends on
//! clap and clap_complete only.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// evidenca -- bay reservations, projects and vehicles from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "evidenca",
    version,
    about = "Book service bays and track workshop projects from the command line",
    long_about = "Command-line front end for the Evidenca back end.\n\n\
        Sign in once with `evidenca login`; the session is kept in the system\n\
        keyring and reused by every other command.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "EVIDENCA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Back-end URL (overrides profile)
    #[arg(long, env = "EVIDENCA_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format [default: table, or `defaults.output` from the config]
    #[arg(long, short = 'o', env = "EVIDENCA_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "EVIDENCA_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "EVIDENCA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Color if stdout is a terminal and NO_COLOR is unset
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Domain value enums ───────────────────────────────────────────────

/// Service bay (resource calendar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BayArg {
    #[value(name = "Bay-1", alias = "1")]
    Bay1,
    #[value(name = "Bay-2", alias = "2")]
    Bay2,
    #[value(name = "Bay-3", alias = "3")]
    Bay3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Month,
    Week,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    High,
    Normal,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Pending,
    InProgress,
    Completed,
    Canceled,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session
    Login(LoginArgs),

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Book, edit and cancel bay reservations
    #[command(alias = "ev", alias = "e")]
    Events(EventsArgs),

    /// Manage workshop projects
    #[command(alias = "proj")]
    Projects(ProjectsArgs),

    /// Register vehicles and browse the catalogue
    #[command(alias = "veh")]
    Vehicles(VehiclesArgs),

    /// Browse user accounts
    Users(UsersArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account e-mail
    #[arg(long, short = 'e', env = "EVIDENCA_EMAIL")]
    pub email: String,

    /// Password (prompted when omitted)
    #[arg(long, env = "EVIDENCA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EVENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EventsArgs {
    #[command(subcommand)]
    pub command: EventsCommand,
}

#[derive(Debug, Subcommand)]
pub enum EventsCommand {
    /// List reservations on a bay for a month, week or day
    #[command(alias = "ls")]
    List {
        /// Bay to show [default: profile's default_calendar]
        #[arg(long, short = 'c', ignore_case = true)]
        calendar: Option<BayArg>,

        /// Period to show
        #[arg(long, value_enum, default_value = "month")]
        view: ViewArg,

        /// Any day inside the period (YYYY-MM-DD) [default: today]
        #[arg(long, short = 'd')]
        date: Option<String>,
    },

    /// Book a bay
    Add {
        #[arg(long, short = 'c', ignore_case = true)]
        calendar: BayArg,

        #[arg(long, short = 't')]
        title: String,

        /// Start, e.g. 2024-05-01T09:00
        #[arg(long)]
        start: String,

        /// End, e.g. 2024-05-01T11:00
        #[arg(long)]
        end: String,
    },

    /// Change a reservation; omitted fields keep their current value
    Edit {
        /// Reservation ID
        id: String,

        /// Bay the reservation is on
        #[arg(long, short = 'c', ignore_case = true)]
        calendar: BayArg,

        #[arg(long, short = 't')]
        title: Option<String>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,
    },

    /// Cancel a reservation
    #[command(alias = "rm")]
    Delete {
        /// Reservation ID
        id: String,

        /// Bay the reservation is on
        #[arg(long, short = 'c', ignore_case = true)]
        calendar: BayArg,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PROJECTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ProjectsArgs {
    #[command(subcommand)]
    pub command: ProjectsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    /// List projects
    #[command(alias = "ls")]
    List {
        /// Only projects still open
        #[arg(long, conflicts_with = "closed")]
        active: bool,

        /// Only completed or canceled projects
        #[arg(long)]
        closed: bool,
    },

    /// Start a project at 0% progress
    Add {
        #[arg(long, short = 'n')]
        name: String,

        #[arg(long, value_enum, default_value = "normal")]
        priority: PriorityArg,

        /// Starting status: pending or in-progress
        #[arg(long, value_enum, default_value = "pending")]
        status: StatusArg,
    },

    /// Change priority, status or progress
    Update {
        /// Project ID
        id: String,

        #[arg(long, value_enum)]
        priority: Option<PriorityArg>,

        #[arg(long, value_enum)]
        status: Option<StatusArg>,

        /// Progress in percent (0-100)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        progress: Option<u8>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VEHICLES & USERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct VehiclesArgs {
    #[command(subcommand)]
    pub command: VehiclesCommand,
}

#[derive(Debug, Subcommand)]
pub enum VehiclesCommand {
    /// List registered vehicles
    #[command(alias = "ls")]
    List {
        /// Owner [default: the signed-in user]
        #[arg(long, short = 'u')]
        user: Option<String>,
    },

    /// List vehicle brands
    Brands,

    /// List vehicle models
    Models {
        /// Only models of this brand
        #[arg(long, short = 'b')]
        brand: Option<String>,
    },

    /// Register a vehicle
    Add {
        /// Brand ID
        #[arg(long, short = 'b')]
        brand: String,

        /// Model ID (must belong to the brand)
        #[arg(long, short = 'm')]
        model: String,

        #[arg(long)]
        year: String,

        /// License plate
        #[arg(long)]
        plate: String,

        /// Owner ID (super-admins only) [default: the signed-in user]
        #[arg(long, short = 'u')]
        user: Option<String>,

        /// Model name as it should be stored [default: the catalogue name]
        #[arg(long)]
        model_name: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List user accounts
    #[command(alias = "ls")]
    List,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or extend the config file with guided setup
    Init,

    /// Display the resolved configuration
    Show,

    /// Print the config file location
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
