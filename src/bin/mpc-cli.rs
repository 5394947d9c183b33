use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use mpc_sdk::config::{load_config, Environment, SdkConfig};
use mpc_sdk::observability::logging::{self, LogFormat};
use mpc_sdk::services::{
    CreateAccountRequest, CreateAssetRequest, CreateTransactionRequest, CreateWalletRequest,
    ListAccountsRequest, ListAssetsRequest, ListTransactionsRequest, ListWalletsRequest,
    TransactionStatus, WalletStatus,
};
use mpc_sdk::MpcClient;

#[derive(Parser)]
#[command(name = "mpc-cli")]
#[command(about = "Command-line client for the MPC wallet gateway", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// sandbox, production, or a base URL
    #[arg(short, long, env = "MPC_ENVIRONMENT")]
    env: Option<String>,

    /// Overrides the base URL from --env or --config
    #[arg(long, env = "MPC_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "MPC_API_KEY")]
    api_key: String,

    #[arg(long, env = "MPC_API_SECRET", hide_env_values = true)]
    api_secret: String,

    #[arg(long, default_value = "mpc_sdk=info")]
    log_level: String,

    /// pretty or json
    #[arg(long, default_value = "pretty")]
    log_format: LogFormat,

    /// Invalidate the session on the gateway before exiting
    #[arg(long)]
    logout: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Exchange the credentials for a token and report success
    Login,
    /// Wallet operations
    #[command(subcommand)]
    Wallet(WalletCommand),
    /// Account operations
    #[command(subcommand)]
    Account(AccountCommand),
    /// Asset operations
    #[command(subcommand)]
    Asset(AssetCommand),
    /// Transaction operations
    #[command(subcommand)]
    Transaction(TransactionCommand),
}

#[derive(Args)]
struct PageArgs {
    #[arg(long, default_value_t = 0)]
    page: u32,
    #[arg(long, default_value_t = 0)]
    page_size: u32,
}

#[derive(Subcommand)]
enum WalletCommand {
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        chain: String,
        #[arg(long)]
        network: String,
        #[arg(long)]
        description: Option<String>,
    },
    Get {
        wallet_id: String,
    },
    List {
        #[arg(long)]
        status: Option<WalletStatus>,
        #[command(flatten)]
        paging: PageArgs,
    },
}

#[derive(Subcommand)]
enum AccountCommand {
    Create {
        #[arg(long)]
        wallet_id: String,
        #[arg(long)]
        chain: String,
        #[arg(long)]
        network: String,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        account_type: Option<String>,
    },
    Get {
        account_id: String,
    },
    List {
        #[arg(long)]
        wallet_id: Option<String>,
        #[command(flatten)]
        paging: PageArgs,
    },
}

#[derive(Subcommand)]
enum AssetCommand {
    Create {
        #[arg(long)]
        account_id: String,
        #[arg(long)]
        symbol: String,
    },
    Get {
        asset_id: String,
    },
    List {
        #[arg(long)]
        wallet_id: Option<String>,
        #[arg(long)]
        account_id: Option<String>,
        #[command(flatten)]
        paging: PageArgs,
    },
}

#[derive(Subcommand)]
enum TransactionCommand {
    Create {
        #[arg(long)]
        wallet_id: String,
        #[arg(long)]
        account_id: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        asset_id: Option<String>,
        #[arg(long)]
        memo: Option<String>,
    },
    Get {
        tx_id: String,
    },
    List {
        #[arg(long)]
        wallet_id: Option<String>,
        #[arg(long)]
        account_id: Option<String>,
        #[arg(long)]
        status: Option<TransactionStatus>,
        #[command(flatten)]
        paging: PageArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_format)?;

    let client = MpcClient::new(&cli.api_key, &cli.api_secret, resolve_config(&cli)?)?;

    match cli.command {
        Commands::Login => {
            client.api().token_manager().token().await?;
            println!("Authenticated against {}", client.config().base_url);
        }
        Commands::Wallet(cmd) => run_wallet(&client, cmd).await?,
        Commands::Account(cmd) => run_account(&client, cmd).await?,
        Commands::Asset(cmd) => run_asset(&client, cmd).await?,
        Commands::Transaction(cmd) => run_transaction(&client, cmd).await?,
    }

    if cli.logout {
        client.logout().await?;
    }
    Ok(())
}

/// Config file first, then --env, then --base-url.
fn resolve_config(cli: &Cli) -> Result<SdkConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SdkConfig::sandbox(),
    };
    if let Some(env) = &cli.env {
        config.base_url = Environment::from_name(env).base_url().to_string();
    }
    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    Ok(config)
}

async fn run_wallet(client: &MpcClient, cmd: WalletCommand) -> Result<(), Box<dyn std::error::Error>> {
    let wallets = client.wallet();
    match cmd {
        WalletCommand::Create { name, chain, network, description } => {
            let request = CreateWalletRequest {
                wallet_name: name,
                description,
                chain,
                network,
            };
            print_json(&wallets.create(&request).await?)
        }
        WalletCommand::Get { wallet_id } => print_json(&wallets.get(&wallet_id).await?),
        WalletCommand::List { status, paging } => {
            let request = ListWalletsRequest {
                status,
                page: paging.page,
                page_size: paging.page_size,
            };
            print_json(&wallets.list(&request).await?)
        }
    }
}

async fn run_account(client: &MpcClient, cmd: AccountCommand) -> Result<(), Box<dyn std::error::Error>> {
    let accounts = client.account();
    match cmd {
        AccountCommand::Create { wallet_id, chain, network, label, account_type } => {
            let request = CreateAccountRequest {
                wallet_id,
                chain,
                network,
                label,
                account_type,
            };
            print_json(&accounts.create(&request).await?)
        }
        AccountCommand::Get { account_id } => print_json(&accounts.get(&account_id).await?),
        AccountCommand::List { wallet_id, paging } => {
            let request = ListAccountsRequest {
                wallet_id,
                page: paging.page,
                page_size: paging.page_size,
            };
            print_json(&accounts.list(&request).await?)
        }
    }
}

async fn run_asset(client: &MpcClient, cmd: AssetCommand) -> Result<(), Box<dyn std::error::Error>> {
    let assets = client.asset();
    match cmd {
        AssetCommand::Create { account_id, symbol } => {
            print_json(&assets.create(&CreateAssetRequest { account_id, symbol }).await?)
        }
        AssetCommand::Get { asset_id } => print_json(&assets.get(&asset_id).await?),
        AssetCommand::List { wallet_id, account_id, paging } => {
            let request = ListAssetsRequest {
                wallet_id,
                account_id,
                page: paging.page,
                page_size: paging.page_size,
            };
            print_json(&assets.list(&request).await?)
        }
    }
}

async fn run_transaction(client: &MpcClient, cmd: TransactionCommand) -> Result<(), Box<dyn std::error::Error>> {
    let transactions = client.transaction();
    match cmd {
        TransactionCommand::Create { wallet_id, account_id, to, amount, asset_id, memo } => {
            let request = CreateTransactionRequest {
                wallet_id,
                account_id,
                asset_id,
                to_address: to,
                amount,
                memo,
            };
            print_json(&transactions.create(&request).await?)
        }
        TransactionCommand::Get { tx_id } => print_json(&transactions.get(&tx_id).await?),
        TransactionCommand::List { wallet_id, account_id, status, paging } => {
            let request = ListTransactionsRequest {
                wallet_id,
                account_id,
                status,
                page: paging.page,
                page_size: paging.page_size,
            };
            print_json(&transactions.list(&request).await?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
