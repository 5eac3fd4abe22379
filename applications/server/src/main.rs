/// Dottify Server - music catalog web service
use clap::{Parser, Subcommand};
use dottify_core::{CatalogStore, Role};
use dottify_server::{
    config::ServerConfig,
    create_router,
    services::{
        accounts::{self, NewAccount},
        AuthService, Links,
    },
    state::AppState,
};
use dottify_storage::SqliteCatalog;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dottify-server")]
#[command(about = "Dottify music catalog server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "DOTTIFY_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user with a profile
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Name shown on the profile page
        #[arg(short, long)]
        display_name: String,
        /// Add the user to the Artist group
        #[arg(long)]
        artist: bool,
        /// Add the user to the DottifyAdmin group
        #[arg(long)]
        admin: bool,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dottify_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load_from(&cli.config)?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::AddUser {
            username,
            password,
            display_name,
            artist,
            admin,
        } => {
            let mut roles = Vec::new();
            if artist {
                roles.push(Role::Artist);
            }
            if admin {
                roles.push(Role::Admin);
            }
            add_user(
                config,
                NewAccount {
                    username,
                    password,
                    display_name,
                    roles,
                },
            )
            .await?;
        }
        Commands::ListUsers => {
            list_users(config).await?;
        }
    }

    Ok(())
}

fn auth_service(config: &ServerConfig) -> AuthService {
    AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    )
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Dottify Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let db = Arc::new(SqliteCatalog::open(&config.storage.database_url).await?);
    tracing::info!("Database connected");

    let auth_service = Arc::new(auth_service(&config));
    let links = Arc::new(Links::new(
        config.server.public_url.clone(),
        config.storage.media_url.clone(),
    ));

    let app = create_router(AppState::new(db, auth_service, links));

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(config: ServerConfig, new: NewAccount) -> anyhow::Result<()> {
    let db = SqliteCatalog::open(&config.storage.database_url).await?;
    let auth_service = auth_service(&config);

    let (account, profile) = accounts::register(&db, &auth_service, new).await?;

    println!(
        "Created user {} (account {}, profile {})",
        account.username, account.id, profile.id
    );

    Ok(())
}

async fn list_users(config: ServerConfig) -> anyhow::Result<()> {
    let db = SqliteCatalog::open(&config.storage.database_url).await?;

    println!("Users:");
    for account in db.get_all_accounts().await? {
        let profile = db.get_profile_by_account(account.id).await?;
        let roles = db.get_roles(account.id).await?;
        let roles: Vec<&str> = roles.iter().map(Role::group_name).collect();

        println!(
            "  {} - {} ({}) [{}]",
            account.id,
            account.username,
            profile.map_or_else(|| "no profile".to_string(), |p| p.display_name),
            roles.join(", ")
        );
    }

    Ok(())
}
