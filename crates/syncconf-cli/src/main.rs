mod commands;

use clap::Parser;
use std::path::PathBuf;
use syncconf_core::coerce::parse_strict_bool;
use syncconf_core::constants;
use syncconf_core::{Assignment, MutationSet};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "syncconf",
    version,
    about = "Edit the sync agent's sync.conf and optionally restart the agent",
    long_about = "syncconf reads a sync.conf JSON document, applies the requested\n\
        parameter changes, writes the result back as pretty-printed JSON, and can\n\
        restart the agent through launchd or by signaling the process directly.\n\n\
        Examples:\n  \
        syncconf --config sync.conf --host 192.168.0.1 --use_gui true\n  \
        syncconf --config sync.conf -p use_gui=True folders_storage_path=/data\n  \
        syncconf --config sync.conf -d bootstrap_token --restart_agent"
)]
struct Cli {
    /// Path to sync.conf
    #[arg(long, value_name = "path_to_sync.conf")]
    config: PathBuf,

    /// Set parameters, e.g. --parameter host=192.168.0.1 use_gui=True
    #[arg(
        short = 'p',
        long,
        value_name = "NAME=VALUE",
        num_args = 1..,
        value_parser = Assignment::parse
    )]
    parameter: Vec<Assignment>,

    /// Delete a parameter
    #[arg(short = 'd', long, value_name = "NAME")]
    delete: Option<String>,

    /// Restart the agent after applying the config
    #[arg(long = "restart_agent")]
    restart_agent: bool,

    /// Value to set to host
    #[arg(long, value_name = "VALUE")]
    host: Option<String>,

    /// Value to set to cert_authority_fingerprint
    #[arg(long, value_name = "VALUE")]
    fingerprint: Option<String>,

    /// Value to set to disable_cert_check (boolean only)
    #[arg(long = "disable_cert_check", value_name = "VALUE", value_parser = parse_strict_bool)]
    disable_cert_check: Option<bool>,

    /// Value to set to bootstrap_token
    #[arg(long = "bootstrap_token", value_name = "VALUE")]
    bootstrap_token: Option<String>,

    /// Value to set to tags
    #[arg(long, value_name = "VALUE")]
    tags: Option<String>,

    /// Value to set to folders_storage_path
    #[arg(long = "folders_storage_path", value_name = "VALUE")]
    folders_storage_path: Option<String>,

    /// Value to set to use_gui (boolean only)
    #[arg(long = "use_gui", value_name = "VALUE", value_parser = parse_strict_bool)]
    use_gui: Option<bool>,

    /// Write log output to update-syncconf.log instead of the console
    #[arg(long)]
    log: bool,

    /// Enable verbose logging (set log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn mutations(&self) -> MutationSet {
        MutationSet {
            assignments: self.parameter.clone(),
            bootstrap_token: self.bootstrap_token.clone(),
            disable_cert_check: self.disable_cert_check,
            fingerprint: self.fingerprint.clone(),
            folders_storage_path: self.folders_storage_path.clone(),
            host: self.host.clone(),
            tags: self.tags.clone(),
            use_gui: self.use_gui,
            delete: self.delete.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log, cli.verbose)?;

    commands::update::run(&cli.config, &cli.mutations())?;

    if cli.restart_agent {
        commands::restart::run()?;
    }

    Ok(())
}

/// Set up tracing. The console writer keeps ANSI severity colors; the
/// `--log` file writer appends with colors disabled.
fn init_logging(log_to_file: bool, verbose: bool) -> anyhow::Result<()> {
    let fallback = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    if log_to_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(constants::LOG_FILE_NAME)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(false)
            .with_writer(std::sync::Arc::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    Ok(())
}
