//! `openlab-cli`: sign in to the `OpenLab` API and manage its records from a
//! terminal. The session token is kept in a file between invocations.

mod http;
mod token_file;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use records::{AccessError, DataAccess, Device, Lab, LabTest, Record, Schedule, UserAccount};
use serde::Serialize;
use serde_json::{Value, json};
use session::{Credentials, SessionError, SessionStore, TokenStore};

use crate::http::{ApiAuth, ApiClient, ApiRecords};
use crate::token_file::{FileTokenStore, default_token_path};

type CliSession = SessionStore<ApiAuth, FileTokenStore>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("health check failed: HTTP {0}")]
    Unhealthy(u16),
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("not signed in{}", .0.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    NotSignedIn(Option<String>),
    #[error("{0}")]
    Access(#[from] AccessError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "openlab-cli", about = "OpenLab management API CLI")]
struct Cli {
    #[arg(long, env = "OPENLAB_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Where the session token is kept. Defaults to `$HOME/.openlab/token`.
    #[arg(long, env = "OPENLAB_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    #[arg(long, env = "OPENLAB_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Log session and HTTP activity to stderr.
    #[arg(long, short, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "OPENLAB_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    Whoami,
    Dashboard,
    List {
        kind: Kind,
    },
    Get {
        kind: Kind,
        id: u64,
    },
    Create {
        kind: Kind,
        /// JSON body of the new record.
        #[arg(long)]
        data: String,
    },
    Update {
        kind: Kind,
        id: u64,
        /// JSON body replacing the record.
        #[arg(long)]
        data: String,
    },
    Delete {
        kind: Kind,
        id: u64,
    },
    Questions {
        test_id: u64,
    },
}

/// Entity collections addressable from the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Labs,
    Devices,
    Schedules,
    Tests,
    Users,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RecordAction {
    List,
    Get(u64),
    Create(String),
    Update(u64, String),
    Delete(u64),
}

struct CliContext {
    client: ApiClient,
    tokens: FileTokenStore,
    session: CliSession,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let client = ApiClient::new(&cli.base_url, Duration::from_secs(cli.timeout_secs))?;
    let tokens = FileTokenStore::new(cli.token_file.unwrap_or_else(default_token_path));
    tracing::debug!(base_url = %cli.base_url, token_file = %tokens.path().display(), "starting");
    let session = SessionStore::new(ApiAuth::new(client.clone()), tokens.clone());
    let ctx = CliContext { client, tokens, session };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Login { email, password } => run_login(&ctx, Credentials::new(email, password)).await,
        Command::Logout => run_logout(&ctx).await,
        Command::Whoami => run_whoami(&ctx).await,
        Command::Dashboard => run_dashboard(&ctx).await,
        Command::Questions { test_id } => run_questions(&ctx, test_id).await,
        Command::List { kind } => run_records(&ctx, kind, RecordAction::List).await,
        Command::Get { kind, id } => run_records(&ctx, kind, RecordAction::Get(id)).await,
        Command::Create { kind, data } => run_records(&ctx, kind, RecordAction::Create(data)).await,
        Command::Update { kind, id, data } => run_records(&ctx, kind, RecordAction::Update(id, data)).await,
        Command::Delete { kind, id } => run_records(&ctx, kind, RecordAction::Delete(id)).await,
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

async fn run_ping(ctx: &CliContext) -> Result<(), CliError> {
    let status = ctx.client.ping().await?;
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

async fn run_login(ctx: &CliContext, credentials: Credentials) -> Result<(), CliError> {
    let user = ctx.session.login(&credentials).await?;
    println!("Signed in as {} <{}>", user.display_name, user.email);
    Ok(())
}

async fn run_logout(ctx: &CliContext) -> Result<(), CliError> {
    let stored = ctx.tokens.load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not read token file");
        None
    });
    if let Some(token) = stored {
        let auth = ApiAuth::new(ctx.client.clone());
        match auth.revoke(&token).await {
            Ok(status) => tracing::debug!(status = status.as_u16(), "server session revoked"),
            Err(e) => tracing::warn!(error = %e, "could not reach server to revoke session"),
        }
    }
    ctx.session.logout();
    println!("Signed out");
    Ok(())
}

async fn run_whoami(ctx: &CliContext) -> Result<(), CliError> {
    require_session(ctx).await?;
    let user = ctx.session.current_user().ok_or(CliError::NotSignedIn(None))?;
    print_json(&user)
}

async fn run_dashboard(ctx: &CliContext) -> Result<(), CliError> {
    let access = require_session(ctx).await?;
    let counts = records::load_dashboard_counts(&access).await;
    print_json(&expire_on_unauthorized(ctx, counts)?)
}

async fn run_questions(ctx: &CliContext, test_id: u64) -> Result<(), CliError> {
    let access = require_session(ctx).await?;
    let questions = access.questions(test_id).await;
    print_json(&expire_on_unauthorized(ctx, questions)?)
}

async fn run_records(ctx: &CliContext, kind: Kind, action: RecordAction) -> Result<(), CliError> {
    let access = require_session(ctx).await?;
    let outcome = match kind {
        Kind::Labs => record_action::<Lab>(&access, action).await,
        Kind::Devices => record_action::<Device>(&access, action).await,
        Kind::Schedules => record_action::<Schedule>(&access, action).await,
        Kind::Tests => record_action::<LabTest>(&access, action).await,
        Kind::Users => record_action::<UserAccount>(&access, action).await,
    };
    let value = match outcome {
        Err(CliError::Access(err)) => expire_on_unauthorized(ctx, Err(err))?,
        other => other?,
    };
    print_json(&value)
}

/// Run one CRUD action for `R`; the result is rendered as JSON.
async fn record_action<R: Record>(access: &ApiRecords, action: RecordAction) -> Result<Value, CliError> {
    let value = match action {
        RecordAction::List => serde_json::to_value(access.list::<R>().await?)?,
        RecordAction::Get(id) => serde_json::to_value(access.get::<R>(id).await?)?,
        RecordAction::Create(data) => {
            let record = parse_record::<R>(&data, None)?;
            serde_json::to_value(access.create(&record).await?)?
        }
        RecordAction::Update(id, data) => {
            let record = parse_record::<R>(&data, Some(id))?;
            serde_json::to_value(access.update(&record).await?)?
        }
        RecordAction::Delete(id) => {
            access.delete::<R>(id).await?;
            json!({ "deleted": id, "collection": R::COLLECTION })
        }
    };
    Ok(value)
}

/// Decode a `--data` payload; `id` overrides any id in the body.
fn parse_record<R: Record>(data: &str, id: Option<u64>) -> Result<R, CliError> {
    let mut record = serde_json::from_str::<R>(data)?;
    if let Some(id) = id {
        record.set_id(id);
    }
    Ok(record)
}

/// Resolve the stored token into a signed-in session and a data client.
async fn require_session(ctx: &CliContext) -> Result<ApiRecords, CliError> {
    if !ctx.session.restore_session().await {
        return Err(CliError::NotSignedIn(ctx.session.last_error()));
    }
    Ok(ApiRecords::new(ctx.client.clone(), ctx.session.token()))
}

/// An unauthorized data call means the token died mid-session: expire it.
fn expire_on_unauthorized<T>(ctx: &CliContext, result: Result<T, AccessError>) -> Result<T, CliError> {
    match result {
        Err(err) if err.is_unauthorized() => {
            ctx.session.expire();
            Err(CliError::NotSignedIn(ctx.session.last_error()))
        }
        other => Ok(other?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
