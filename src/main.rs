use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use feather_bot::application::context::Services;
use feather_bot::application::coordinator::PluginLoadCoordinator;
use feather_bot::application::errors::BotError;
use feather_bot::application::services::BotService;
use feather_bot::domain::traits::Transport;
use feather_bot::infrastructure::adapters::ConsoleTransport;
use feather_bot::infrastructure::config::Config;
use feather_bot::infrastructure::loaders::{
    DirectoryCommandLoader, DirectoryFeatherLoader, DirectoryModuleLoader,
};
use feather_bot::infrastructure::utilities::StandardUtilities;

#[derive(Parser)]
#[command(name = "feather-bot")]
#[command(about = "A chat bot built from command, module and feather plugins", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Transport token (overrides config)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => run_bot(cli.config, cli.token),
        Commands::Version => {
            println!("feather-bot v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Commands::InitConfig => init_config(&cli.config),
    }
}

fn init_logging(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(level.into()),
        )
        .init();
}

fn load_config(config_path: &str, token_override: Option<String>) -> Result<Config, BotError> {
    let mut config = if std::path::Path::new(config_path).exists() {
        let mut config = Config::load(config_path)?;
        config.apply_env();
        config
    } else {
        Config::load_env()
    };

    if let Some(token) = token_override {
        config.transport.token = Some(token);
    }

    config.validate()?;
    Ok(config)
}

fn run_bot(config_path: String, token_override: Option<String>) -> ExitCode {
    let config = match load_config(&config_path, token_override) {
        Ok(config) => config,
        Err(e) => {
            init_logging(false);
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(config.bot.debug);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = rt.block_on(async move {
        let transport: Arc<dyn Transport> = Arc::new(ConsoleTransport::new(
            config.bot.name.clone(),
            config.transport.console_user_id.clone(),
        ));
        let utilities = Arc::new(StandardUtilities::new(&config, Arc::clone(&transport)));
        let coordinator = PluginLoadCoordinator::new(
            Arc::new(DirectoryCommandLoader::new(config.plugins.commands.clone())),
            Arc::new(DirectoryModuleLoader::new(config.plugins.modules.clone())),
            Arc::new(DirectoryFeatherLoader::new(config.plugins.feathers.clone())),
        );

        let bot = BotService::new(config, Services::new(utilities, transport), coordinator);
        let kill_switch = bot.kill_switch();

        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                match kill_switch.kill().await {
                    Ok(true) => {}
                    Ok(false) => tracing::info!("Shutdown already in progress"),
                    Err(e) => tracing::warn!("Failed to disconnect, press ctrl-c to retry: {}", e),
                }
            }
        });

        bot.run().await
    });
    rt.shutdown_timeout(Duration::from_secs(1));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        // Logged by the coordinator, and only in debug mode
        Err(BotError::Boot(_)) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_config(path: &str) -> ExitCode {
    if std::path::Path::new(path).exists() {
        eprintln!("{} already exists", path);
        return ExitCode::FAILURE;
    }

    let mut config = Config::default();
    config.transport.token = Some("change-me".to_string());

    let written = config
        .to_yaml()
        .map_err(|e| e.to_string())
        .and_then(|yaml| std::fs::write(path, yaml).map_err(|e| e.to_string()));

    match written {
        Ok(()) => {
            println!("Wrote default config to {}", path);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to write config: {}", e);
            ExitCode::FAILURE
        }
    }
}
