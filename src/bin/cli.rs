use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use k12::cli::{SeedConfig, seed_students};
use k12::state::init_app_state;
use k12_models::{RegisterRequest, UserRole};
use k12_observability::{init_metrics, init_tracing, render_metrics};

#[derive(Parser)]
#[command(name = "k12-cli")]
#[command(about = "K12 CLI - Administrative tools for K12", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Parent,
    Teacher,
}

impl From<RoleArg> for UserRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Parent => UserRole::Parent,
            RoleArg::Teacher => UserRole::Teacher,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and its profile
    CreateAccount {
        /// Full name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        #[arg(short = 'r', long, value_enum, default_value = "teacher")]
        role: RoleArg,

        /// Class taught (teachers only)
        #[arg(short = 'c', long, default_value = "")]
        class_name: String,
    },
    /// Seed generated students through the batch writer.
    /// With the memory backend the data only lives for this run.
    SeedStudents {
        /// Number of classes
        #[arg(short = 'c', long, default_value = "5")]
        classes: usize,

        /// Number of students per class
        #[arg(short = 's', long, default_value = "20")]
        per_class: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();
    let _metrics_handle = init_metrics();

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAccount {
            name,
            email,
            phone,
            password,
            role,
            class_name,
        } => handle_create_account(name, email, phone, password, role.into(), class_name).await,
        Commands::SeedStudents { classes, per_class } => {
            handle_seed_students(classes, per_class).await
        }
    }
}

fn prompt(value: Option<String>, label: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Input::new()
            .with_prompt(label)
            .interact_text()
            .with_context(|| format!("Failed to read {}", label.to_lowercase())),
    }
}

async fn handle_create_account(
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    password: Option<String>,
    role: UserRole,
    class_name: String,
) -> anyhow::Result<()> {
    let name = prompt(name, "Full name")?;
    let email = prompt(email, "Email address")?;
    let phone_number = prompt(phone, "Phone number")?;
    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let state = init_app_state().await.map_err(|e| anyhow::anyhow!(e))?;
    let request = RegisterRequest {
        name: name.clone(),
        email: email.clone(),
        phone_number,
        confirm_password: password.clone(),
        password,
        role,
        class_name,
        student_ids: Vec::new(),
    };

    let result = state.session.register(request).await;
    state.session.logout();

    match result {
        Ok(user) => {
            println!("\n✅ Account created successfully!");
            println!("   Email: {}", email);
            println!("   Name: {} ({})", name, role);
            println!("   Id: {}", user.uid);
            Ok(())
        }
        Err(e) => {
            eprintln!("\n❌ Error creating account: {}", e.user_message());
            std::process::exit(1);
        }
    }
}

async fn handle_seed_students(classes: usize, per_class: usize) -> anyhow::Result<()> {
    let state = init_app_state().await.map_err(|e| anyhow::anyhow!(e))?;
    let config = SeedConfig::new(classes, per_class);

    let report = seed_students(state.store.as_ref(), &state.batch, &config).await;
    if let Some(snapshot) = render_metrics() {
        tracing::debug!(metrics = %snapshot, "Seeding metrics");
    }
    if !report.is_complete_success() {
        std::process::exit(1);
    }
    Ok(())
}
