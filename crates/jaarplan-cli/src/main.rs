use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input};
use dotenvy::dotenv;
use jaarplan_auth::{PERMISSION_IMPORT, create_access_token};
use jaarplan_cli::report::{render_report, render_week_index};
use jaarplan_cli::seeder::{self, SeedConfig};
use jaarplan_config::{CalendarConfig, JwtConfig};
use jaarplan_db::DocumentStore;
use jaarplan_engine::{AcademicYear, Calendar};
use jaarplan_models::calendar::{ActiveFilterSelection, FilterDimension};

#[derive(Parser)]
#[command(name = "jaarplan-cli")]
#[command(about = "Jaarplan CLI - Administrative tools for the activity calendar", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill the store with a generated academic year
    Seed {
        /// Number of activities to create
        #[arg(short = 'a', long, default_value = "100")]
        activities: usize,

        /// Teaching weeks per semester
        #[arg(short = 'w', long, default_value = "18")]
        weeks: usize,

        /// First calendar year of the academic year (defaults to ACADEMIC_YEAR_START)
        #[arg(short = 'y', long)]
        year: Option<i32>,

        /// Append activities instead of replacing both collections
        #[arg(long)]
        append: bool,
    },
    /// Print instance counts per week for a filter selection
    Report {
        #[arg(long, value_delimiter = ',')]
        role: Vec<String>,

        #[arg(long, value_delimiter = ',')]
        phase: Vec<String>,

        #[arg(long, value_delimiter = ',')]
        subject: Vec<String>,

        #[arg(long, value_delimiter = ',')]
        process: Vec<String>,

        #[arg(long, value_delimiter = ',')]
        semester: Vec<String>,
    },
    /// Print the normalized week index
    WeekIndex,
    /// Issue a bearer token allowed to import activities and weeks
    IssueToken {
        /// Token holder (prompted if not provided)
        #[arg(short = 's', long)]
        subject: Option<String>,

        /// Lifetime in seconds (defaults to JWT_ACCESS_EXPIRY)
        #[arg(short = 'e', long)]
        expiry: Option<i64>,
    },
    /// Remove all activities and weeks
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let calendar_config = CalendarConfig::from_env();

    match cli.command {
        Commands::Seed {
            activities,
            weeks,
            year,
            append,
        } => {
            let year = year.unwrap_or(calendar_config.first_academic_year);
            handle_seed(activities, weeks, year, append).await
        }
        Commands::Report {
            role,
            phase,
            subject,
            process,
            semester,
        } => {
            let selection = ActiveFilterSelection::new()
                .with(FilterDimension::Role, role)
                .with(FilterDimension::Phase, phase)
                .with(FilterDimension::Subject, subject)
                .with(FilterDimension::Process, process)
                .with(FilterDimension::Semester, semester);
            handle_report(&calendar_config, &selection).await
        }
        Commands::WeekIndex => handle_week_index(&calendar_config).await,
        Commands::IssueToken { subject, expiry } => handle_issue_token(subject, expiry),
        Commands::Clear { yes } => handle_clear(yes).await,
    }
}

async fn connect_store() -> DocumentStore {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("❌ DATABASE_URL must be set");
        std::process::exit(1);
    };

    match jaarplan_db::connect(&database_url).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    }
}

async fn load_calendar(calendar_config: &CalendarConfig) -> Calendar {
    let store = connect_store().await;
    match store.snapshot().await {
        Ok(snapshot) => Calendar::build(
            &snapshot.activities,
            &snapshot.weeks,
            &AcademicYear::new(calendar_config.first_academic_year),
        )
        .with_undecodable_documents(snapshot.undecodable),
        Err(e) => {
            eprintln!("❌ Failed to read collections: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(activities: usize, weeks: usize, year: i32, append: bool) {
    let store = connect_store().await;
    let mut config = SeedConfig::new(year)
        .with_weeks(weeks)
        .with_activities(activities);
    if append {
        config = config.appending();
    }

    match seeder::seed_all(&store, &config).await {
        Ok(summary) => {
            println!("\n✅ Seeding complete");
            println!("   Week rows: {}", summary.week_rows);
            println!("   Activities: {}", summary.activities);
        }
        Err(e) => {
            eprintln!("\n❌ Error seeding database: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_report(calendar_config: &CalendarConfig, selection: &ActiveFilterSelection) {
    let calendar = load_calendar(calendar_config).await;
    print!("{}", render_report(&calendar, selection));
}

async fn handle_week_index(calendar_config: &CalendarConfig) {
    let calendar = load_calendar(calendar_config).await;
    if calendar.weeks().is_empty() {
        println!("No weeks stored. Run `seed` or import weeks first.");
        return;
    }
    print!("{}", render_week_index(&calendar));
}

fn handle_issue_token(subject: Option<String>, expiry: Option<i64>) {
    let subject = subject.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Token holder")
            .interact_text()
            .unwrap_or_else(|e| {
                eprintln!("❌ Failed to read token holder: {}", e);
                std::process::exit(1);
            })
    });

    let mut jwt_config = JwtConfig::from_env();
    if let Some(expiry) = expiry {
        jwt_config.access_token_expiry = expiry;
    }

    match create_access_token(&subject, vec![PERMISSION_IMPORT.to_string()], &jwt_config) {
        Ok(token) => {
            println!("\n✅ Import token for {}", subject);
            println!("   Expires in: {}s", jwt_config.access_token_expiry);
            println!("\n{}", token);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating token: {}", e.error);
            std::process::exit(1);
        }
    }
}

async fn handle_clear(yes: bool) {
    let confirmed = yes
        || Confirm::new()
            .with_prompt("Remove all activities and weeks?")
            .default(false)
            .interact()
            .unwrap_or(false);
    if !confirmed {
        println!("Aborted");
        return;
    }

    let store = connect_store().await;
    if let Err(e) = seeder::clear_all(&store).await {
        eprintln!("\n❌ Error clearing collections: {}", e);
        std::process::exit(1);
    }
}
