//! ipsetcmd - typed front-end for the ipset utility.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use ipsetcmd::cli::{Cli, Commands};
use ipsetcmd::commands::create::CreateArgs;
use ipsetcmd::commands::exit_status;
use ipsetcmd::commands::list::ListMode;
use ipsetcmd::system::check_root;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:?}", e);
        std::process::exit(exit_status(&e));
    }
}

fn run(cli: Cli) -> Result<()> {
    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if cli.command.needs_privileges() && !cli.skip_root_check {
        check_root()?;
    }

    let config = cli.config.as_path();
    match cli.command {
        Commands::Create {
            name,
            set_type,
            family,
            hashsize,
            maxelem,
            timeout,
            opts,
        } => {
            let args = CreateArgs {
                family,
                hash_size: hashsize,
                max_elem: maxelem,
                timeout,
            };
            ipsetcmd::commands::create::run(&name, &set_type, &args, &opts, config)
        }
        Commands::Add { name, entry, opts } => {
            ipsetcmd::commands::entry::add(&name, &entry, &opts, config)
        }
        Commands::Del { name, entry, opts } => {
            ipsetcmd::commands::entry::del(&name, &entry, &opts, config)
        }
        Commands::Test { name, entry } => {
            if !ipsetcmd::commands::entry::test(&name, &entry, config)? {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Destroy { name, all } => {
            ipsetcmd::commands::destroy::run(name.as_deref(), all, config)
        }
        Commands::List {
            name,
            sorted,
            info,
            json,
        } => {
            let mode = if info {
                ListMode::Info
            } else if sorted {
                ListMode::Sorted
            } else {
                ListMode::Members
            };
            ipsetcmd::commands::list::run(name.as_deref(), mode, json, config)
        }
        Commands::Flush { name, all } => ipsetcmd::commands::flush::run(name.as_deref(), all, config),
        Commands::Swap { from, to } => ipsetcmd::commands::swap::run(&from, &to, config),
        Commands::Replace {
            name,
            entries,
            file,
        } => ipsetcmd::commands::replace::run(&name, entries, file.as_deref(), config),
        Commands::Save { name, output } => {
            ipsetcmd::commands::save::run(name.as_deref(), output.as_deref(), config)
        }
        Commands::Restore { file } => ipsetcmd::commands::restore::run(file.as_deref(), config),
        Commands::Version => ipsetcmd::commands::version::run(config),
        Commands::Init { force } => ipsetcmd::commands::init::run(config, force),
    }
}
