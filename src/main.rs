mod summary;

use clap::{Parser, Subcommand};
use tgpoll_client::{HttpFetcher, Poller, PollingConfig};
use tgpoll_core::config::{self, ConfigOrigin};
use tracing::info;

#[derive(Parser)]
#[command(name = "tgpoll", version, about = "Long-polling Telegram Bot API client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll for updates and log each one until Ctrl-C.
    Run {
        /// Resume from this offset instead of 0.
        #[arg(long)]
        offset: Option<i64>,
    },
    /// Validate the config and print the effective polling settings.
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (cfg, origin) = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.log.level)),
        )
        .init();

    if origin == ConfigOrigin::Defaults {
        info!("Config file not found at {}, using defaults", cli.config);
    }

    match cli.command {
        Commands::Run { offset } => {
            cfg.validate()?;

            let fetcher = HttpFetcher::from_settings(&cfg.bot);
            let mut poller = Poller::new(fetcher, PollingConfig::from(&cfg.polling));
            if let Some(off) = offset {
                poller = poller.with_offset(off);
            }

            let (mut rx, handle) = poller.spawn(64);
            let shutdown = tokio::signal::ctrl_c();
            tokio::pin!(shutdown);
            loop {
                tokio::select! {
                    update = rx.recv() => match update {
                        Some(update) => info!("{}", summary::describe(&update)),
                        None => break,
                    },
                    _ = &mut shutdown => {
                        info!("Received shutdown signal");
                        handle.stop();
                        // Drain what was already handed off before the stop.
                        while let Some(update) = rx.recv().await {
                            info!("{}", summary::describe(&update));
                        }
                        break;
                    }
                }
            }

            let last = handle.join().await?;
            info!("stopped; resume with --offset {last}");
        }
        Commands::Check => {
            cfg.validate()?;
            let p = PollingConfig::from(&cfg.polling);
            println!("tgpoll: config OK ({})", cli.config);
            println!("  api_base:        {}", cfg.bot.api_base);
            println!("  timeout:         {:?}", p.timeout);
            println!("  backoff:         {:?} .. {:?}", p.backoff_base, p.backoff_max);
            println!("  batch_limit:     {:?}", p.batch_limit);
            match &p.allowed_updates {
                Some(kinds) => {
                    let names: Vec<&str> = kinds.iter().map(|k| k.as_str()).collect();
                    println!("  allowed_updates: {}", names.join(", "));
                }
                None => println!("  allowed_updates: (service default)"),
            }
            println!("  ack_mode:        {:?}", p.ack_mode);
            println!("  decode_policy:   {:?}", p.decode_policy);
        }
    }

    Ok(())
}
