//! # Toolbox CLI Entry Point
//!
//! Command-line front end for the tool catalog.
//!
//! ## Usage
//!
//! ```bash
//! # Browse the catalog
//! toolbox list
//! toolbox list --query json --category developer
//! toolbox categories
//!
//! # Run a tool (input from the argument or stdin)
//! toolbox run text-formatter -o mode=uppercase "hello"
//! echo '{"a":1}' | toolbox run json-formatter -o indent=4
//!
//! # Favorites and recently used tools
//! toolbox favorite calculator
//! toolbox recent
//! toolbox stats
//!
//! # Identity used for favorites and premium tools
//! toolbox login --email ada@example.com --provider google.com
//! toolbox whoami
//! toolbox logout
//! ```
//!
//! ## Logging
//!
//! Diagnostics go to stderr. The filter is read from `TOOLBOX_LOG`
//! (e.g. `TOOLBOX_LOG=toolbox=debug`) and defaults to `warn`; `--verbose`
//! switches it to `debug`.

use toolbox::access::has_premium_access;
use toolbox::app::{Toolbox, ToolRun};
use toolbox::catalog::{self, Catalog, CategoryFilter, ToolDescriptor};
use toolbox::config::Config;
use toolbox::identity::{CurrentUser, Provider, Session};
use toolbox::tools::ToolInput;
use toolbox::usage::{FileStore, UsageTracker};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Toolbox - a catalog of handy text utilities
#[derive(Parser, Debug)]
#[command(name = "toolbox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run everyday text, developer and conversion utilities", long_about = None)]
struct Args {
    /// Directory for favorites and recent-tool data
    #[arg(long, global = true, value_name = "DIR", env = "TOOLBOX_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Session file holding the signed-in identity
    #[arg(long, global = true, value_name = "FILE", env = "TOOLBOX_SESSION")]
    session_file: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tools, optionally filtered
    List {
        /// Case-insensitive text to find in tool names and descriptions
        #[arg(short, long, default_value = "")]
        query: String,

        /// Category id, or "all"
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show categories with their tool counts
    Categories,
    /// Show details and options for one tool
    Info { id: String },
    /// Run a tool
    Run {
        id: String,

        /// Tool option as key=value (repeatable)
        #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
        options: Vec<String>,

        /// Input text; read from stdin when omitted
        input: Option<String>,
    },
    /// Toggle a tool as favorite (requires login)
    Favorite { id: String },
    /// List favorite tools
    Favorites,
    /// List recently used tools, newest first
    Recent,
    /// Show usage statistics
    Stats,
    /// Clear favorites or recent tools
    Clear { target: ClearTarget },
    /// Record the identity to use for favorites and premium tools
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        name: Option<String>,

        /// Sign-in provider id, e.g. "password" or "google.com"
        #[arg(long, default_value = "password")]
        provider: String,

        /// Mark the email address as verified
        #[arg(long)]
        verified: bool,
    },
    /// Forget the signed-in identity
    Logout,
    /// Show the signed-in identity
    Whoami,
    /// Show or change saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the current settings and the config file path
    Show,
    /// Change a setting: data_dir or default_category
    Set { key: String, value: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ClearTarget {
    Favorites,
    Recent,
}

fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("toolbox=debug")
    } else {
        EnvFilter::try_from_env("TOOLBOX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;
    run_application(args)
}

fn session_path(args: &Args) -> Result<PathBuf> {
    match &args.session_file {
        Some(path) => Ok(path.clone()),
        None => Session::session_path(),
    }
}

fn load_session(args: &Args) -> Session {
    match session_path(args).and_then(|path| Session::load_from(&path)) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("Ignoring unreadable session: {:#}", e);
            Session::default()
        }
    }
}

fn run_application(args: Args) -> Result<()> {
    let mut config = Config::load();
    let catalog = Catalog::builtin().context("Built-in catalog is invalid")?;

    // Identity commands don't touch usage data
    match &args.command {
        Command::Login {
            email,
            name,
            provider,
            verified,
        } => {
            let mut user = CurrentUser::new(email, Provider::from_id(provider), *verified);
            user.display_name = name.clone();
            let session = Session { user: Some(user) };
            session.save_to(&session_path(&args)?)?;
            println!("Signed in as {}", email);
            return Ok(());
        }
        Command::Logout => {
            Session::clear(&session_path(&args)?)?;
            println!("Signed out");
            return Ok(());
        }
        Command::Whoami => {
            print_identity(load_session(&args).user.as_ref());
            return Ok(());
        }
        Command::Config { action } => {
            match action {
                ConfigAction::Show => {
                    println!("Config file: {}", Config::config_path()?.display());
                    println!(
                        "data_dir: {}",
                        config
                            .data_dir
                            .as_ref()
                            .map_or_else(|| "(default)".to_string(), |d| d.display().to_string())
                    );
                    println!("default_category: {}", config.default_category);
                }
                ConfigAction::Set { key, value } => {
                    config.set(key, value)?;
                    config.save()?;
                    println!("Saved {}", key);
                }
            }
            return Ok(());
        }
        _ => {}
    }

    let data_dir = args.data_dir.clone().or_else(|| config.data_dir.clone());
    let tracker = match data_dir {
        Some(dir) => UsageTracker::load(FileStore::with_dir(dir)?),
        None => UsageTracker::open_default()?,
    };
    debug!(dir = %tracker.store().dir().display(), "usage storage");

    let user = load_session(&args).user;
    let mut toolbox = Toolbox::new(catalog, tracker, user);

    match args.command {
        Command::List { query, category } => {
            let filter = match category {
                Some(c) => c.parse::<CategoryFilter>()?,
                None => config.category_filter(),
            };
            print_listing(&toolbox, &query, filter);
        }
        Command::Categories => {
            for summary in catalog::category_summaries(toolbox.catalog()) {
                let name = toolbox
                    .catalog()
                    .category(summary.category)
                    .map_or("", |c| c.name);
                println!(
                    "{:<10} {:<16} {:>2} tools ({} free, {} premium)",
                    summary.category.id(),
                    name,
                    summary.total,
                    summary.free,
                    summary.premium
                );
            }
        }
        Command::Info { id } => {
            let tool = toolbox
                .catalog()
                .find(&id)
                .with_context(|| format!("Tool not found: {}", id))?;
            println!("{} ({})", tool.name, tool.id);
            println!("{}", tool.description);
            println!("Category: {}", tool.category);
            println!("Premium: {}", if tool.is_premium { "yes" } else { "no" });
            println!("Access: {}", toolbox.access(&id)?);
            let options = tool.kind.options();
            if !options.is_empty() {
                println!("Options:");
                for option in options {
                    println!("  {:<18} {}", option.key, option.help);
                }
            }
        }
        Command::Run { id, options, input } => {
            let tool = toolbox
                .catalog()
                .find(&id)
                .with_context(|| format!("Tool not found: {}", id))?;

            let text = match input {
                Some(text) => text,
                None if tool.kind.takes_input() && !io::stdin().is_terminal() => read_stdin()?,
                None => String::new(),
            };
            let mut tool_input = ToolInput::new(text);
            for option in &options {
                tool_input.push_option(option)?;
            }

            match toolbox.open(&id, &tool_input)? {
                ToolRun::Output(output) => println!("{}", output),
                ToolRun::Denied(access) => bail!("{}", access),
            }
        }
        Command::Favorite { id } => match toolbox.toggle_favorite(&id)? {
            Some(true) => println!("Added {} to favorites", id),
            Some(false) => println!("Removed {} from favorites", id),
            None => bail!("Sign in to save favorites (toolbox login)"),
        },
        Command::Favorites => print_tools("Favorites", &toolbox.favorite_tools()),
        Command::Recent => print_tools("Recently used", &toolbox.recent_tools()),
        Command::Stats => {
            let dashboard = toolbox.dashboard();
            println!("Favorites: {}", dashboard.stats.favorites_count);
            println!("Recent: {}", dashboard.stats.recent_count);
            println!("Total interactions: {}", dashboard.stats.total_interactions);
            println!(
                "Catalog: {} free, {} premium",
                dashboard.free_tools, dashboard.premium_tools
            );
            let premium = has_premium_access(toolbox.user());
            println!(
                "Premium access: {}",
                if premium.is_granted() { "yes" } else { "no" }
            );
        }
        Command::Clear { target } => match target {
            ClearTarget::Favorites => {
                toolbox.clear_favorites();
                println!("Favorites cleared");
            }
            ClearTarget::Recent => {
                toolbox.clear_recent();
                println!("Recent tools cleared");
            }
        },
        Command::Login { .. } | Command::Logout | Command::Whoami | Command::Config { .. } => {}
    }

    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut text = io::read_to_string(io::stdin()).context("Failed to read input from stdin")?;
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    Ok(text)
}

fn tool_line(tool: &ToolDescriptor, favorite: bool) -> String {
    format!(
        "{} {:<28} {:<10} {}",
        if favorite { "★" } else { " " },
        tool.id,
        tool.category.id(),
        tool.name
    )
}

fn print_listing(toolbox: &Toolbox, query: &str, filter: CategoryFilter) {
    let matches = toolbox.search(query, filter);
    if matches.is_empty() {
        println!("No tools found. Try adjusting your search or filter criteria.");
        return;
    }

    let (free, premium) = catalog::partition_premium(&matches);
    let tracker = toolbox.tracker();
    for (title, tools) in [("Free Tools", free), ("Premium Tools", premium)] {
        if tools.is_empty() {
            continue;
        }
        println!("{} ({})", title, tools.len());
        for tool in tools {
            println!("{}", tool_line(tool, tracker.is_favorite(tool.id)));
        }
        println!();
    }
}

fn print_tools(title: &str, tools: &[&ToolDescriptor]) {
    if tools.is_empty() {
        println!("{}: none", title);
        return;
    }
    println!("{}:", title);
    for tool in tools {
        println!("{}", tool_line(tool, false));
    }
}

fn print_identity(user: Option<&CurrentUser>) {
    match user {
        None => println!("Not signed in"),
        Some(user) => {
            println!("Hello, {}", user.first_name());
            println!("Email: {}", user.email);
            println!("Account type: {}", user.account_type());
            println!(
                "Email verified: {}",
                if user.email_verified { "yes" } else { "no" }
            );
            println!(
                "Premium access: {}",
                if has_premium_access(Some(user)).is_granted() {
                    "yes"
                } else {
                    "no"
                }
            );
        }
    }
}
