use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use eduextra_cli::{CliError, DEFAULT_SECRET_BYTES, create_admin, generate_secret};
use eduextra_db::{init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "eduextra-cli")]
#[command(about = "EduExtra CLI - Administrative tools for EduExtra", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new ADMIN account
    CreateAdmin {
        /// Full name of the administrator
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Print a random value suitable for JWT_SECRET
    GenerateSecret {
        /// Number of random bytes before encoding
        #[arg(short = 'b', long, default_value_t = DEFAULT_SECRET_BYTES)]
        bytes: usize,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::CreateAdmin {
            full_name,
            email,
            password,
        } => handle_create_admin(full_name, email, password).await,
        Commands::GenerateSecret { bytes } => generate_secret(bytes).map(|secret| {
            println!("{}", secret);
        }),
    };

    if let Err(e) = result {
        eprintln!("\n❌ {}", e);
        std::process::exit(1);
    }
}

async fn handle_create_admin(
    full_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<(), CliError> {
    let full_name = match full_name {
        Some(name) => name,
        None => prompt_text("Full name")?,
    };

    let email = match email {
        Some(email) => email,
        None => prompt_text("Email address")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .map_err(|e| CliError::InvalidInput(format!("Failed to read password: {}", e)))?,
    };

    let pool = init_db_pool().await;
    run_migrations(&pool).await?;

    let user_id = create_admin(&pool, &full_name, &email, &password).await?;

    println!("\n✅ Admin created successfully!");
    println!("   Id: {}", user_id);
    println!("   Email: {}", email.trim());
    println!("   Name: {}", full_name.trim());

    Ok(())
}

fn prompt_text(prompt: &str) -> Result<String, CliError> {
    Input::<String>::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(|e| CliError::InvalidInput(format!("Failed to read {}: {}", prompt, e)))
}
