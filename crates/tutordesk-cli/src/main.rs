use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use tutordesk_cli::seeder;
use tutordesk_core::{hash_password, normalize_identifier};
use tutordesk_db::{PgCredentialStore, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "tutordesk-cli")]
#[command(about = "Tutordesk CLI - Account administration for Tutordesk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// Login handle
        #[arg(short = 'u', long)]
        user: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Full name
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Create a teacher account
    CreateTeacher {
        /// Login handle
        #[arg(short = 'u', long)]
        user: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Full name
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Mark the teacher approved; leave unset to store no approval flag
        #[arg(long)]
        approved: Option<bool>,
    },
    /// Approve (or, with --revoke, unapprove) a teacher by handle or email
    ApproveTeacher {
        identifier: String,

        #[arg(long)]
        revoke: bool,
    },
    /// Seed fake teacher accounts
    SeedTeachers {
        /// Number of teachers to create
        #[arg(short = 'c', long, default_value = "10")]
        count: usize,

        /// Password shared by every seeded teacher
        #[arg(short = 'p', long, default_value = "password123")]
        password: String,

        /// Approval flag stored on the seeded teachers
        #[arg(long)]
        approved: Option<bool>,
    },
}

fn prompt(value: Option<String>, label: &str) -> String {
    value.unwrap_or_else(|| {
        Input::new()
            .with_prompt(label)
            .interact_text()
            .unwrap_or_else(|e| fail(&format!("Failed to read {}", label.to_lowercase()), e))
    })
}

fn prompt_password(value: Option<String>) -> String {
    value.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| fail("Failed to read password", e))
    })
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {context}: {err}");
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = init_db_pool().await;
    if let Err(e) = run_migrations(&pool).await {
        fail("Error running migrations", e);
    }
    let store = PgCredentialStore::new(pool);

    match cli.command {
        Commands::CreateAdmin {
            user,
            email,
            full_name,
            password,
        } => handle_create_admin(&store, user, email, full_name, password).await,
        Commands::CreateTeacher {
            user,
            email,
            full_name,
            phone,
            password,
            approved,
        } => {
            handle_create_teacher(&store, user, email, full_name, phone, password, approved).await
        }
        Commands::ApproveTeacher { identifier, revoke } => {
            handle_approve_teacher(&store, &identifier, !revoke).await
        }
        Commands::SeedTeachers {
            count,
            password,
            approved,
        } => {
            if let Err(e) = seeder::seed_teachers(&store, count, &password, approved).await {
                fail("Error seeding teachers", e);
            }
        }
    }
}

async fn handle_create_admin(
    store: &PgCredentialStore,
    user: Option<String>,
    email: Option<String>,
    full_name: Option<String>,
    password: Option<String>,
) {
    let user = prompt(user, "Login handle");
    let email = prompt(email, "Email address");
    let full_name = prompt(full_name, "Full name");
    let password = prompt_password(password);

    let password_hash = hash_password(&password).unwrap_or_else(|e| fail("Error hashing password", e.error));

    match store
        .create_admin(user.trim(), &normalize_identifier(&email), full_name.trim(), &password_hash)
        .await
    {
        Ok(admin) => {
            println!("\n✅ Admin created successfully!");
            println!("   Handle: {}", admin.user);
            println!("   Email: {}", admin.email);
        }
        Err(e) => fail("Error creating admin", e),
    }
}

#[allow(clippy::too_many_arguments)]
async fn handle_create_teacher(
    store: &PgCredentialStore,
    user: Option<String>,
    email: Option<String>,
    full_name: Option<String>,
    phone: Option<String>,
    password: Option<String>,
    approved: Option<bool>,
) {
    let user = prompt(user, "Login handle");
    let email = prompt(email, "Email address");
    let full_name = prompt(full_name, "Full name");
    let password = prompt_password(password);

    let password_hash = hash_password(&password).unwrap_or_else(|e| fail("Error hashing password", e.error));

    match store
        .create_teacher(
            user.trim(),
            &normalize_identifier(&email),
            full_name.trim(),
            phone.as_deref(),
            &password_hash,
            approved,
        )
        .await
    {
        Ok(teacher) => {
            println!("\n✅ Teacher created successfully!");
            println!("   Handle: {}", teacher.user);
            println!("   Email: {}", teacher.email);
            println!("   Eligible: {}", teacher.is_eligible());
        }
        Err(e) => fail("Error creating teacher", e),
    }
}

async fn handle_approve_teacher(store: &PgCredentialStore, identifier: &str, approved: bool) {
    match store.set_teacher_approval(identifier, approved).await {
        Ok(true) => {
            let verb = if approved { "approved" } else { "unapproved" };
            println!("✅ Teacher {identifier} {verb}");
        }
        Ok(false) => fail("No such teacher", identifier),
        Err(e) => fail("Error updating teacher", e),
    }
}
