use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

use ss_sub_update::{GuiConfig, RunSummary, UpdateConfig, Updater};

/// Refresh a shadowsocks client config from Surge subscriptions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Provider list and remark filters
    #[arg(long, value_name = "FILE", default_value = "update.json")]
    update_config: PathBuf,

    /// Client configuration to update
    #[arg(long, value_name = "FILE", default_value = "gui-config.json")]
    gui_config: PathBuf,

    /// User-Agent sent to providers
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Pretty-print the written configuration
    #[arg(long)]
    pretty: bool,

    /// Print the summary without writing the configuration
    #[arg(long)]
    dry_run: bool,
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = UpdateConfig::from_file(&args.update_config)?;
    if let Some(user_agent) = args.user_agent {
        config.user_agent = user_agent;
    }
    let gui = GuiConfig::load(&args.gui_config)?;

    println!(
        "Loaded {} subscription(s), downloading...",
        config.providers.len()
    );

    let updater = Updater::new(config);
    let result = updater.run().await;

    println!("{}", RunSummary::new(&updater.config.filters, &result));

    if args.dry_run {
        println!("Dry run, {} left unchanged", args.gui_config.display());
        return Ok(());
    }

    gui.merge_servers(&result.servers)
        .save(&args.gui_config, args.pretty)
        .context("configuration write-back failed")?;

    println!(
        "Updated {} with {} servers",
        args.gui_config.display(),
        result.servers.len()
    );
    println!("Restart the shadowsocks client or reopen its server list to apply the update");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
