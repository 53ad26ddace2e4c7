use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use dotenvy::dotenv;
use registrar::cli::seed::seed_students;
use registrar::cli::{ListArgs, list_students, render_student, render_table};
use registrar::modules::students::service::StudentService;
use registrar_client::build_client;
use registrar_config::{SessionConfig, StoreBackend, StoreConfig};
use registrar_models::{StudentField, StudentId, StudentStatus, StudentYear};
use registrar_observability::init_basic_console_logging;

#[derive(Parser)]
#[command(name = "registrar-cli")]
#[command(about = "Registrar CLI - Administrative tools for student records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create fake students in the record store
    Seed {
        /// Number of students to create
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },
    /// List students with optional filters
    List {
        /// Substring matched against name, email and program
        #[arg(short = 's', long)]
        search: Option<String>,

        /// active or inactive
        #[arg(long, value_parser = parse_status)]
        status: Option<StudentStatus>,

        /// Freshman, Sophomore, Junior or Senior
        #[arg(long, value_parser = parse_year)]
        year: Option<StudentYear>,

        /// Field to sort by, e.g. lastName or enrollmentDate
        #[arg(long, value_parser = parse_field)]
        sort: Option<StudentField>,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        #[arg(short = 'p', long, default_value = "1")]
        page: u64,

        #[arg(short = 'l', long, default_value = "10")]
        limit: u64,
    },
    /// Show one student
    Show { id: StudentId },
    /// Delete a student
    Delete {
        id: StudentId,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Print the effective configuration
    CheckConfig,
}

fn parse_status(value: &str) -> Result<StudentStatus, String> {
    StudentStatus::ALL
        .into_iter()
        .find(|s| s.as_str().eq_ignore_ascii_case(value))
        .ok_or_else(|| format!("unknown status '{value}'"))
}

fn parse_year(value: &str) -> Result<StudentYear, String> {
    StudentYear::ALL
        .into_iter()
        .find(|y| y.as_str().eq_ignore_ascii_case(value))
        .ok_or_else(|| format!("unknown year '{value}'"))
}

fn parse_field(value: &str) -> Result<StudentField, String> {
    StudentField::from_name(value).ok_or_else(|| format!("unknown field '{value}'"))
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {message}");
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_basic_console_logging();

    let cli = Cli::parse();
    let config = StoreConfig::from_env();

    if let Commands::CheckConfig = cli.command {
        handle_check_config(&config);
        return;
    }

    let service = match build_client(&config) {
        Ok(client) => StudentService::new(client),
        Err(e) => fail(format!("Failed to initialize record store client: {e}")),
    };

    match cli.command {
        Commands::Seed { count } => {
            if let Err(e) = seed_students(&service, count).await {
                fail(format!("Error seeding students: {e}"));
            }
        }
        Commands::List {
            search,
            status,
            year,
            sort,
            desc,
            page,
            limit,
        } => {
            let args = ListArgs {
                search,
                status,
                year,
                sort,
                descending: desc,
                page,
                limit,
            };
            match list_students(service, &args).await {
                Ok(state) => println!("{}", render_table(&state)),
                Err(e) => fail(e),
            }
        }
        Commands::Show { id } => {
            let response = service.get_student_by_id(id).await;
            match response.data {
                Some(student) if response.success => println!("{}", render_student(&student)),
                _ => fail(format!("Failed to load student {id}: {}", response.error_message())),
            }
        }
        Commands::Delete { id, yes } => handle_delete(&service, id, yes).await,
        Commands::CheckConfig => {}
    }
}

async fn handle_delete(service: &StudentService, id: StudentId, yes: bool) {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete student {id}? This action cannot be undone."))
            .default(false)
            .interact()
            .unwrap_or(false);
        if !confirmed {
            println!("Aborted.");
            return;
        }
    }

    let response = service.delete_student(id).await;
    if response.success {
        println!("\n✅ Student {id} deleted");
    } else {
        fail(format!("Failed to delete student: {}", response.error_message()));
    }
}

fn handle_check_config(store: &StoreConfig) {
    let session = SessionConfig::from_env();
    let set = |value: &Option<String>| if value.is_some() { "set" } else { "missing" };

    println!("Record store");
    match store.backend {
        StoreBackend::Remote => {
            println!("  backend:     remote ({})", store.base_url);
            println!("  project id:  {}", set(&store.project_id));
            println!("  public key:  {}", set(&store.public_key));
            println!("  timeout:     {:?}", store.timeout);
        }
        StoreBackend::Memory => println!("  backend:     in-memory"),
    }

    println!("Session");
    println!("  cookie:      {}", session.cookie_name);
    println!("  ttl:         {}s", session.ttl_secs);
    println!(
        "  secret:      {}",
        if session.uses_default_secret() { "default (change in production)" } else { "set" }
    );
    println!(
        "  identity:    {}",
        session.identity_url.as_deref().unwrap_or("not configured")
    );

    if store.backend == StoreBackend::Remote {
        if let Err(e) = store.credentials() {
            fail(e);
        }
    }
    println!("\n✅ Configuration looks good");
}
