use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use jobtrack::effects::{Navigator, Notice, NoticeLevel, Notifier};
use jobtrack::filters::{ApplicationFilter, upcoming_reminders};
use jobtrack::gateway::ApiRequest;
use jobtrack::models::ApplicationStatus;
use jobtrack::storage::FileStorage;
use jobtrack::users::InMemoryUserRepository;
use jobtrack::{AuthState, FixtureMode, Gateway, GatewayConfig, GatewayError, Session, SessionError, SessionManager};

/// Log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] jobtrack::config::ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("{}", .0.user_message())]
    Gateway(#[from] GatewayError),
    #[error("invalid HTTP method: {0}")]
    Method(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "jobtrack", about = "Job application tracker client")]
struct Cli {
    /// API base URL.
    #[arg(long, env = "JOBTRACK_BASE_URL")]
    base_url: Option<String>,

    /// Session file.
    #[arg(long, env = "JOBTRACK_STATE_PATH")]
    state_path: Option<PathBuf>,

    /// `fallback` or `disabled`.
    #[arg(long, env = "JOBTRACK_FIXTURES")]
    fixtures: Option<FixtureMode>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Log the new account in right after registering.
        #[arg(long, default_value_t = false)]
        login: bool,
    },
    Logout,
    Whoami,
    Applications {
        #[arg(long)]
        status: Option<ApplicationStatus>,
        #[arg(long)]
        query: Option<String>,
    },
    Resumes,
    Reminders {
        /// Only incomplete reminders from today on, soonest first.
        #[arg(long, default_value_t = false)]
        upcoming: bool,
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    Stats,
    Analytics,
    /// Raw request through the gateway.
    Api {
        method: String,
        path: String,
        #[arg(long)]
        data: Option<String>,
    },
}

struct ConsoleEffects;

impl Notifier for ConsoleEffects {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => eprintln!("{}", notice.message),
            NoticeLevel::Error => eprintln!("error: {}", notice.message),
        }
    }
}

impl Navigator for ConsoleEffects {
    fn redirect(&self, route: &str) {
        tracing::debug!(%route, "redirect");
        eprintln!("session expired; run `jobtrack login` again");
    }
}

fn load_config(cli: &Cli) -> Result<GatewayConfig, CliError> {
    let mut config = GatewayConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = jobtrack::config::normalize_base_url(base_url)?;
    }
    if let Some(path) = &cli.state_path {
        config.state_path.clone_from(path);
    }
    if let Some(mode) = cli.fixtures {
        config.fixtures = mode;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    tracing::debug!(base_url = %config.base_url, state = %config.state_path.display(), "config loaded");

    let effects = Arc::new(ConsoleEffects);
    let session = Session::new(Arc::new(FileStorage::new(&config.state_path)));
    let gateway = Gateway::with_reqwest(&config, session.clone(), effects.clone())?;
    let manager = SessionManager::new(session, InMemoryUserRepository::seeded(), effects);
    manager.restore();

    run(cli.command, &manager, &gateway).await
}

async fn run(
    command: Command,
    manager: &SessionManager<InMemoryUserRepository>,
    gateway: &Gateway,
) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => {
            let user = manager.login(&email, &password)?;
            print_json(&user)
        }
        Command::Register { name, email, password, login } => {
            let user = manager.register(&name, &email, &password)?;
            if login {
                manager.login(&email, &password)?;
            }
            print_json(&user)
        }
        Command::Logout => {
            manager.logout();
            eprintln!("logged out");
            Ok(())
        }
        Command::Whoami => match manager.session().state() {
            AuthState::Authenticated(user) => print_json(&user),
            AuthState::Unauthenticated => {
                eprintln!("not logged in");
                Ok(())
            }
        },
        Command::Applications { status, query } => {
            let applications = gateway.list_applications().await?;
            let filter = ApplicationFilter { status, query };
            print_json(&filter.apply(&applications))
        }
        Command::Resumes => print_json(&gateway.list_resumes().await?),
        Command::Reminders { upcoming, limit } => {
            let reminders = gateway.list_reminders().await?;
            if upcoming {
                let today = time::OffsetDateTime::now_utc().date();
                print_json(&upcoming_reminders(&reminders, today, limit))
            } else {
                print_json(&reminders)
            }
        }
        Command::Stats => print_json(&gateway.dashboard_stats().await?),
        Command::Analytics => print_json(&gateway.analytics().await?),
        Command::Api { method, path, data } => {
            let method = reqwest::Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                .map_err(|_| CliError::Method(method))?;
            let mut request = ApiRequest::new(method, path);
            if let Some(data) = data {
                request = request.with_body(serde_json::from_str::<Value>(&data)?);
            }
            let response = gateway.send(request).await?;
            if response.is_fixture() {
                eprintln!("(backend unreachable; sample data)");
            }
            print_json(&response.body)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
