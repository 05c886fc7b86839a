mod config;
mod error;
mod host;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use capture::{Broker, CaptureDecision, CaptureRequest, WindowId};
use clap::{Parser, Subcommand};
use policy::{CallSite, Decision, PermissionKind};
use runtime::{DisplayMediaResponder, PermissionHandlers, PermissionResponder, Shell, WindowOpenAction};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use error::{Error, Result};
use host::TerminalHost;

const CONFIG_FILE: &str = "webshell.toml";
const MAIN_WINDOW: WindowId = WindowId(1);

#[derive(Parser)]
#[command(name = "webshell")]
#[command(about = "Permission and screen-share broker for a wrapped web app", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./webshell.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a synchronous permission check
    Check {
        /// Permission name (camera, pointerLock, display-capture, ...)
        permission: String,
        /// Requesting origin
        origin: String,
        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },
    /// Evaluate an active permission request
    Request {
        /// Permission name (camera, pointerLock, display-capture, ...)
        permission: String,
        /// URL of the requesting page
        url: String,
        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a screen-share request against the configured sources
    Share {
        /// Request system audio alongside video
        #[arg(long)]
        audio: bool,
        /// Do not request video
        #[arg(long)]
        no_video: bool,
        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show how a new-window request would be handled
    Open {
        /// URL the page tries to open
        url: String,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Check {
            permission,
            origin,
            json,
        } => cmd_permission(config, CallSite::Check, &permission, &origin, json).await,
        Commands::Request {
            permission,
            url,
            json,
        } => cmd_permission(config, CallSite::Request, &permission, &url, json).await,
        Commands::Share {
            audio,
            no_video,
            json,
        } => cmd_share(config, CaptureRequest::new(!no_video, audio), json).await,
        Commands::Open { url } => cmd_open(config, &url),
        Commands::Config => cmd_config(&config),
    }
}

/// Log to stderr. `RUST_LOG` overrides `--debug`.
fn init_logging(debug: bool) {
    let default_directive = if debug {
        "debug"
    } else {
        "warn,policy=info,capture=info,runtime=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) if !path.exists() => Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        }),
        Some(path) => {
            info!(path = %path.display(), "loading config");
            Ok(Config::load(path)?)
        }
        None if Path::new(CONFIG_FILE).exists() => {
            info!(path = CONFIG_FILE, "loading config");
            Ok(Config::load(CONFIG_FILE)?)
        }
        None => Ok(Config::default()),
    }
}

async fn cmd_permission(
    config: Config,
    site: CallSite,
    permission: &str,
    origin: &str,
    json: bool,
) -> Result<()> {
    let permission = PermissionKind::from(permission);
    let handlers = PermissionHandlers::new(config.permissions);

    let (decision, allowed) = match site {
        CallSite::Check => {
            let decision = handlers.decide(site, &permission, origin);
            let allowed = decision.is_allowed();
            (decision, allowed)
        }
        CallSite::Request => {
            let (responder, rx) = PermissionResponder::channel();
            let decision = handlers.request_permission(&permission, origin, &responder);
            (decision, rx.await.map_err(|_| Error::NoDecision)?)
        }
    };

    if json {
        let out = json!({
            "site": site.to_string(),
            "permission": permission,
            "origin": origin,
            "allowed": allowed,
            "reason": reason(&decision),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{site} {permission} for {origin:?}: {decision}");
    }
    Ok(())
}

fn reason(decision: &Decision) -> String {
    use policy::{AllowReason, DenyReason};
    match decision {
        Decision::Allow {
            reason: AllowReason::AlwaysAllowed,
        } => "always_allowed".to_string(),
        Decision::Allow {
            reason: AllowReason::TrustedDomain { suffix },
        } => format!("trusted_domain:{suffix}"),
        Decision::Deny {
            reason: DenyReason::InvalidOrigin,
        } => "invalid_origin".to_string(),
        Decision::Deny {
            reason: DenyReason::UntrustedHost { .. },
        } => "untrusted_host".to_string(),
    }
}

async fn cmd_share(config: Config, request: CaptureRequest, json: bool) -> Result<()> {
    if config.capture.sources.is_empty() {
        warn!("no [[capture.sources]] configured; the request will be denied");
    }

    let host = Arc::new(TerminalHost::new(config.capture.sources.clone()));
    let broker = Broker::new(host, MAIN_WINDOW).with_config(config.capture.broker_config());
    let shell = Shell::new(config.shell, config.permissions, broker)?;

    let (responder, rx) = DisplayMediaResponder::channel();
    let pending = shell.on_display_media_request(request, responder);

    // Ctrl+C denies the request; the decision still arrives through `rx`.
    let interrupt = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("interrupted, denying share request");
                pending.cancel();
            }
            Err(e) => warn!(error = %e, "cannot listen for Ctrl+C"),
        }
        std::future::pending::<()>().await
    };

    let decision = tokio::select! {
        decision = rx => decision.map_err(|_| Error::NoDecision)?,
        () = interrupt => return Err(Error::NoDecision),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
    } else {
        match &decision {
            CaptureDecision::Selected { source, audio } => {
                println!("Sharing {} ({}), audio: {audio:?}", source.label(), source.id)
            }
            CaptureDecision::Denied => println!("Share request denied"),
        }
    }
    Ok(())
}

fn cmd_open(config: Config, url: &str) -> Result<()> {
    let navigation = runtime::NavigationPolicy::from_config(&config.shell)?;
    match navigation.window_open(url) {
        WindowOpenAction::Allow => println!("open in app: {url}"),
        WindowOpenAction::OpenExternally(target) => println!("open in system browser: {target}"),
        WindowOpenAction::Deny => println!("blocked: {url}"),
    }
    Ok(())
}

fn cmd_config(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
