use agrohub_cli::credentials::{self, Verdict};
use agrohub_cli::smoke::{self, SmokeTestConfig};
use agrohub_config::DatabaseConfig;
use agrohub_core::password::DEFAULT_COST;
use agrohub_db::{diagnose_and_close, init_db_pool, redact_url};
use agrohub_observability::init_console_logging;
use clap::{Parser, Subcommand};
use dialoguer::Password;
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "agrohub-cli")]
#[command(about = "AgroHub CLI - Operator tools for the AgroHub backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a bcrypt hash for a password
    HashPassword {
        /// Password to hash (will be prompted securely if not provided)
        password: Option<String>,

        /// bcrypt cost factor (4-31)
        #[arg(short = 'c', long, default_value_t = DEFAULT_COST)]
        cost: u32,
    },
    /// Check a password against a stored bcrypt hash
    VerifyPassword {
        /// Password to check (will be prompted securely if not provided)
        password: Option<String>,

        /// Stored bcrypt hash
        #[arg(long)]
        hash: String,
    },
    /// Check database connectivity and print server information
    CheckDb {
        /// Connection string (defaults to DATABASE_URL)
        #[arg(long)]
        database_url: Option<String>,
    },
    /// Log in and fetch one listing page from a running API
    SmokeTest {
        /// API base URL (defaults to API_BASE_URL or http://localhost:3000)
        #[arg(short = 'u', long)]
        base_url: Option<String>,

        /// Login email (defaults to SMOKE_EMAIL)
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Login password (defaults to SMOKE_PASSWORD, prompted if unset)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Page to request
        #[arg(long, default_value = "1")]
        page: u64,

        /// Items per page
        #[arg(long, default_value = "10")]
        page_size: u64,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_console_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::HashPassword { password, cost } => handle_hash_password(password, cost),
        Commands::VerifyPassword { password, hash } => handle_verify_password(password, &hash),
        Commands::CheckDb { database_url } => handle_check_db(database_url).await,
        Commands::SmokeTest {
            base_url,
            email,
            password,
            page,
            page_size,
        } => handle_smoke_test(base_url, email, password, page, page_size).await,
    }
}

fn prompt_password(confirm: bool) -> String {
    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords don't match");
    }

    match prompt.interact() {
        Ok(password) => password,
        Err(e) => {
            eprintln!("❌ Failed to read password: {}", e);
            std::process::exit(1);
        }
    }
}

fn handle_hash_password(password: Option<String>, cost: u32) {
    let password = password.unwrap_or_else(|| prompt_password(true));

    match credentials::generate_hash(&password, cost) {
        Ok(hash) => {
            println!("{}", hash);
            eprintln!("✅ Hash generated (cost {}) and verified", cost);
        }
        Err(e) => {
            eprintln!("❌ Error generating hash: {}", e);
            std::process::exit(1);
        }
    }
}

fn handle_verify_password(password: Option<String>, hash: &str) {
    let password = password.unwrap_or_else(|| prompt_password(false));

    match credentials::check_hash(&password, hash) {
        Ok(Verdict::Match) => println!("✅ Password matches hash"),
        Ok(Verdict::Mismatch) => {
            println!("❌ Password does not match hash");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ Error verifying password: {}", e);
            std::process::exit(2);
        }
    }
}

async fn handle_check_db(database_url: Option<String>) {
    let mut config = DatabaseConfig::from_env();
    if let Some(url) = database_url {
        config.url = Some(url);
    }

    let target = config.url().map(redact_url).unwrap_or_default();

    let pool = match init_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    };

    match diagnose_and_close(&pool).await {
        Ok(report) => {
            println!("✅ Connected to {}", target);
            println!("{}", report);
        }
        Err(e) => {
            eprintln!("❌ Connected to {} but diagnostics failed: {}", target, e);
            std::process::exit(1);
        }
    }
}

async fn handle_smoke_test(
    base_url: Option<String>,
    email: Option<String>,
    password: Option<String>,
    page: u64,
    page_size: u64,
) {
    let mut config = SmokeTestConfig::from_env();
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    if let Some(email) = email {
        config.email = email;
    }
    if let Some(password) = password {
        config.password = password;
    }
    if config.password.is_empty() {
        config.password = prompt_password(false);
    }
    config.page = page;
    config.page_size = page_size;

    match smoke::run(&reqwest::Client::new(), &config).await {
        Ok(report) => {
            println!("✅ Smoke test passed against {}", config.base_url);
            println!("{}", report);
        }
        Err(e) => {
            eprintln!("❌ Smoke test failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
