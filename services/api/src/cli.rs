use crate::server;
use clap::{Args, Parser, Subcommand};
use homeservices::access::{AccessDecisionEngine, GuardState, Role, RouteGuardRequest};
use homeservices::config::AppConfig;
use homeservices::error::AppError;
use homeservices::status::{EntityType, StatusRegistry};

#[derive(Parser, Debug)]
#[command(
    name = "Home Services Marketplace",
    about = "Run the marketplace API or inspect its status and access rules from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Show the badge for a status, or every badge of an entity
    Status(StatusArgs),
    /// Evaluate the route guard for a single navigation attempt
    Guard(GuardArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct StatusArgs {
    /// One of order, booking, payment, payout
    #[arg(long)]
    entity: String,
    /// Raw status code, e.g. IN_PROGRESS
    #[arg(long)]
    status: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct GuardArgs {
    /// Role the route requires
    #[arg(long)]
    required: Option<Role>,
    /// Role of the current principal; omit for an anonymous visitor
    #[arg(long)]
    current: Option<Role>,
    /// Path the visitor tried to open
    #[arg(long)]
    path: Option<String>,
    /// Pretend the auth session is still resolving
    #[arg(long)]
    loading: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Status(args) => {
            let config = AppConfig::load()?;
            let lines = describe_status(&StatusRegistry::new(config.locale), &args)?;
            println!("{}", lines.join("\n"));
            Ok(())
        }
        Command::Guard(args) => {
            let config = AppConfig::load()?;
            let state = evaluate_guard(&AccessDecisionEngine::new(config.access), args);
            println!("{}", render_guard_state(&state)?);
            Ok(())
        }
    }
}

fn describe_status(registry: &StatusRegistry, args: &StatusArgs) -> Result<Vec<String>, AppError> {
    let entity = EntityType::parse(&args.entity).ok_or_else(|| {
        AppError::Input(format!(
            "unknown entity '{}' (expected order, booking, payment or payout)",
            args.entity
        ))
    })?;

    let badges = match args.status.as_deref() {
        Some(status) => vec![registry.badge(entity, status)],
        None => registry.catalog(entity),
    };

    Ok(badges
        .into_iter()
        .map(|badge| format!("{:<28} {:<40} {}", badge.status, badge.label, badge.variant))
        .collect())
}

fn evaluate_guard(engine: &AccessDecisionEngine, args: GuardArgs) -> GuardState {
    engine.decide(&RouteGuardRequest {
        current_role: args.current,
        required_role: args.required,
        is_auth_loading: args.loading,
        requested_path: args.path,
    })
}

fn render_guard_state(state: &GuardState) -> Result<String, AppError> {
    serde_json::to_string_pretty(state)
        .map_err(|err| AppError::Input(format!("failed to render guard decision: {err}")))
}
