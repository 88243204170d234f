//! subswap gateway
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use log::{error, info, warn};
use subswap_core::accounts::{load_substrate_key, AccountProvider, Keyring};
use subswap_core::chain::ChainHandle;
use subswap_core::substrate::{Confirmation, SubstrateClient};
use subswap_gateway::api;
use subswap_gateway::state::GatewayState;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Subswap Gateway CLI
#[derive(Parser, Debug)]
#[command(
    name = "subswap-gateway",
    about = "HTTP gateway for the Subswap token, market and oracle modules"
)]
struct Cli {
    /// URL of the Subswap node (e.g. ws://localhost:9944)
    #[arg(long, env = "NODE_URL", help = "URL of the Subswap node")]
    node_url: String,

    /// Paths of hex encoded sr25519 secret seeds to sign with
    #[arg(
        long = "key-file",
        env = "KEY_FILES",
        value_delimiter = ',',
        help = "Key file to sign transactions with; may be repeated"
    )]
    key_files: Vec<String>,

    /// Secret URIs to sign with (e.g. //Alice)
    #[arg(
        long = "dev-account",
        env = "DEV_ACCOUNTS",
        value_delimiter = ',',
        help = "Secret URI to sign transactions with; may be repeated"
    )]
    dev_accounts: Vec<String>,

    /// Address and port to bind the HTTP server (default: 127.0.0.1:3000)
    #[arg(
        long,
        env = "BIND_ADDR",
        default_value = "127.0.0.1:3000",
        help = "Address to bind the Axum HTTP server"
    )]
    bind_addr: String,

    /// Resolve outcomes only from finalized blocks
    #[arg(
        long,
        env = "WAIT_FOR_FINALIZED",
        help = "Only resolve outcomes once the including block is finalized"
    )]
    wait_for_finalized: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logger with fallback to info if RUST_LOG is not set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    info!("🚀 Starting Subswap Gateway...");

    // ──────────────── ACCOUNTS ────────────────
    let keyring = Arc::new(Keyring::from_uris(&cli.dev_accounts)?);
    for path in &cli.key_files {
        let account = keyring.insert(load_substrate_key(path).await?);
        info!("🔑 Loaded key for {account} from {path}");
    }
    if keyring.accounts().is_empty() {
        warn!("⚠️ No signing accounts configured; submissions will be rejected.");
    }

    // ──────────────── CHAIN ────────────────
    let confirmation = if cli.wait_for_finalized {
        Confirmation::Finalized
    } else {
        Confirmation::InBlock
    };
    let chain = ChainHandle::new();
    tokio::spawn({
        let chain = chain.clone();
        let node_url = cli.node_url.clone();
        async move {
            match SubstrateClient::connect(&node_url, confirmation).await {
                Ok(client) => {
                    if let Err(e) = chain.install(Arc::new(client)) {
                        error!("❌ {e}");
                    }
                }
                Err(e) => error!("❌ {e}"),
            }
        }
    });

    let state = Arc::new(GatewayState::new(chain, keyring));

    // ──────────────── ROUTING ────────────────
    info!("🔧 Setting up routing...");
    let swagger = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());

    let token_routes = Router::new()
        .route("/issue", post(api::token::issue))
        .route("/mint", post(api::token::mint))
        .route("/burn", post(api::token::burn))
        .route("/transfer", post(api::token::transfer))
        .route("/destroy", post(api::token::destroy))
        .route("/total_supply", get(api::token::total_supply))
        .route("/next_asset_id", get(api::token::next_asset_id))
        .route("/balances", get(api::token::balances))
        .route("/creator", get(api::token::creator));

    let market_routes = Router::new()
        .route("/mint_liquidity", post(api::market::mint_liquidity))
        .route("/burn_liquidity", post(api::market::burn_liquidity))
        .route("/swap", post(api::market::swap))
        .route("/pairs", get(api::market::pairs))
        .route("/reserves", get(api::market::reserves))
        .route("/rewards", get(api::market::rewards))
        .route(
            "/last_accumulative_price",
            get(api::market::last_accumulative_price),
        );

    let oracle_routes = Router::new()
        .route(
            "/register_operator",
            post(api::oracle::register_operator),
        )
        .route(
            "/unregister_operator",
            post(api::oracle::unregister_operator),
        )
        .route("/report", post(api::oracle::report))
        .route("/operators", get(api::oracle::operators))
        .route("/prices", get(api::oracle::prices));

    let api_routes = Router::new()
        .nest("/token", token_routes)
        .nest("/market", market_routes)
        .nest("/oracle", oracle_routes)
        .route("/accounts", get(api::accounts::list_accounts))
        .route("/accounts/select", post(api::accounts::select_account))
        .route("/submissions", get(api::submissions::list_submissions))
        .with_state(state);

    let app = Router::new()
        .nest("/api", api_routes)
        .merge(swagger)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any));

    info!("🟢 Routes set up successfully.");
    info!("🔵 Binding to {}", cli.bind_addr);

    let listener = TcpListener::bind(&cli.bind_addr).await?;
    info!("🚀 Server running on http://{}", cli.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(OpenApi)]
#[openapi(paths(
    api::token::issue,
    api::token::mint,
    api::token::burn,
    api::token::transfer,
    api::token::destroy,
    api::token::total_supply,
    api::token::next_asset_id,
    api::token::balances,
    api::token::creator,
    api::market::mint_liquidity,
    api::market::burn_liquidity,
    api::market::swap,
    api::market::pairs,
    api::market::reserves,
    api::market::rewards,
    api::market::last_accumulative_price,
    api::oracle::register_operator,
    api::oracle::unregister_operator,
    api::oracle::report,
    api::oracle::operators,
    api::oracle::prices,
    api::accounts::list_accounts,
    api::accounts::select_account,
    api::submissions::list_submissions,
))]
struct ApiDoc;
