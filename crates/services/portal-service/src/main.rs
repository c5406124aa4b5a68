//! Portal Service - command line access to the student portal.

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use domain::CourseQuery;
use portal_service_lib::config::PortalConfig;
use portal_service_lib::{build_portal_service, PortalService};

#[derive(Parser)]
#[command(name = "portal-service")]
#[command(about = "Student portal curriculum client")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Credentials {
    /// Student ID used to log in
    #[arg(long = "student-id", env = "PORTAL_STUDENT_ID")]
    student_id: String,
    /// Portal password
    #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Log into the portal
    Login {
        #[command(flatten)]
        credentials: Credentials,
    },
    /// List the terms a student has courses in
    Curriculums {
        #[command(flatten)]
        credentials: Credentials,
        /// Student to look up (defaults to the logged-in student)
        #[arg(long)]
        target: Option<String>,
    },
    /// List the courses of one term
    Courses {
        #[command(flatten)]
        credentials: Credentials,
        /// Student to look up (defaults to the logged-in student)
        #[arg(long)]
        target: Option<String>,
        /// Academic year, e.g. 114 (defaults to the current term)
        #[arg(long)]
        year: Option<String>,
        /// Semester within the year
        #[arg(long)]
        semester: Option<String>,
    },
    /// Check that the portal answers
    Status,
}

fn build_query(credentials: &Credentials, target: Option<String>) -> CourseQuery {
    let mut query = CourseQuery::new(&credentials.student_id);
    if let Some(target) = target {
        query = query.with_target(target);
    }
    query
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing (--verbose wins over RUST_LOG)
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let service = build_portal_service(PortalConfig::from_env())?;

    let result = match cli.command {
        Commands::Login { credentials } => {
            service
                .login(&credentials.student_id, &credentials.password)
                .await?
        }
        Commands::Curriculums {
            credentials,
            target,
        } => {
            let query = build_query(&credentials, target);
            service.curriculums(&query, &credentials.password).await?
        }
        Commands::Courses {
            credentials,
            target,
            year,
            semester,
        } => {
            let mut query = build_query(&credentials, target);
            query.year = year;
            query.semester = semester;
            service.courses(&query, &credentials.password).await?
        }
        Commands::Status => {
            service.portal_status().await?;
            println!("portal is reachable");
            return Ok(());
        }
    };

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
