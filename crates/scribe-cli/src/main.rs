use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use scribe_cli::admin;
use scribe_cli::seeder::{self, SeedConfig};
use scribe_config::DatabaseConfig;
use scribe_db::{PgPool, Storage, init_db_pool};

#[derive(Parser)]
#[command(name = "scribe-cli")]
#[command(about = "Scribe CLI - Administrative tools for Scribe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an active administrator account
    CreateAdmin {
        /// Username
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Change the role of an existing user
    SetRole {
        /// Username of the account to change
        username: String,

        /// One of: user, moderator, admin
        role: String,
    },
    /// Seed the database with fake users, posts and comments
    Seed {
        /// Number of users to create
        #[arg(short = 'u', long, default_value = "10")]
        users: usize,

        /// Number of posts per user
        #[arg(long, default_value = "3")]
        posts: usize,

        /// Number of comments per post
        #[arg(long, default_value = "2")]
        comments: usize,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = DatabaseConfig::from_env();
    let pool = init_db_pool(&config)
        .await
        .context("failed to connect to database")?;

    let storage = Storage::postgres(pool.clone(), config.query_timeout);

    match cli.command {
        Commands::CreateAdmin {
            username,
            email,
            password,
        } => handle_create_admin(&storage, username, email, password).await,
        Commands::SetRole { username, role } => handle_set_role(&storage, &username, &role).await,
        Commands::Seed {
            users,
            posts,
            comments,
        } => {
            let config = SeedConfig::new(users)
                .with_posts_per_user(posts)
                .with_comments_per_post(comments);
            seeder::seed_all(&storage, config).await.map(|_| ())
        }
        Commands::Migrate => handle_migrate(&pool).await,
    }
}

fn prompt(value: Option<String>, label: &str) -> anyhow::Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Input::new()
            .with_prompt(label)
            .interact_text()
            .with_context(|| format!("failed to read {}", label.to_lowercase())),
    }
}

async fn handle_create_admin(
    storage: &Storage,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = prompt(username, "Username")?;
    let email = prompt(email, "Email address")?;
    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("failed to read password")?,
    };

    let user = admin::create_admin(storage, &username, &email, &password).await?;

    println!("\n✅ Admin created successfully!");
    println!("   ID: {}", user.id);
    println!("   Username: {}", user.username);
    println!("   Email: {}", user.email);
    Ok(())
}

async fn handle_set_role(storage: &Storage, username: &str, role: &str) -> anyhow::Result<()> {
    let user = admin::set_role(storage, username, role).await?;

    println!("\n✅ {} is now {}", user.username, user.role.name);
    Ok(())
}

async fn handle_migrate(pool: &PgPool) -> anyhow::Result<()> {
    println!("🔄 Running migrations...");
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .context("failed to run migrations")?;
    println!("✅ Migrations applied");
    Ok(())
}
