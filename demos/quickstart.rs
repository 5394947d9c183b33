use mpc_sdk::observability::logging::{self, LogFormat};
use mpc_sdk::services::{CreateAccountRequest, CreateWalletRequest, ListTransactionsRequest};
use mpc_sdk::MpcClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("mpc_sdk=debug", LogFormat::Pretty)?;

    // MPC_API_KEY, MPC_API_SECRET and optionally MPC_ENVIRONMENT / MPC_BASE_URL
    let client = MpcClient::from_env()?;

    // 1. Create a wallet
    println!("Creating wallet...");
    let wallet = client
        .wallet()
        .create(&CreateWalletRequest {
            wallet_name: "quickstart".to_string(),
            description: Some("created by the quickstart demo".to_string()),
            chain: "ETH".to_string(),
            network: "testnet".to_string(),
        })
        .await?;
    println!("Wallet {} ({})", wallet.wallet_id, wallet.status);

    // 2. Derive an account in it
    let account = client
        .account()
        .create(&CreateAccountRequest {
            wallet_id: wallet.wallet_id.clone(),
            chain: wallet.chain.clone(),
            network: wallet.network.clone(),
            label: Some("primary".to_string()),
            ..Default::default()
        })
        .await?;
    println!("Account {} at {}", account.account_id, account.address);

    // 3. List the wallet's transactions
    let transactions = client
        .transaction()
        .list(&ListTransactionsRequest {
            wallet_id: Some(wallet.wallet_id.clone()),
            page: 1,
            page_size: 20,
            ..Default::default()
        })
        .await?;
    for tx in &transactions.items {
        println!("{} {} -> {} [{}]", tx.tx_id, tx.amount, tx.to_address, tx.status);
    }
    if let Some(pagination) = transactions.pagination {
        println!("{} transactions in total", pagination.total_count);
    }

    client.logout().await?;
    Ok(())
}
