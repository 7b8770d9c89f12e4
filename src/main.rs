use std::io::{self, BufRead, Write};
use std::num::NonZeroU32;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use clap::Parser;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use steamid_lookup::client::Client;
use steamid_lookup::config::Config;
use steamid_lookup::controller::{LookupController, Trigger};
use steamid_lookup::presenter::{LEFT_COLUMN, Notification, Presenter, RIGHT_COLUMN, UiState};
use steamid_lookup::utils::open_in_browser;

/// One presentation loop iteration
const TICK: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(name = "steamid-lookup", version, about = "Look up a SteamID64 on the Steam Web API")]
struct Args {
    /// Steam Web API key, overrides STEAM_API_KEY
    #[arg(long)]
    api_key: Option<String>,

    /// Overrides STEAM_API_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request timeout in seconds, overrides STEAM_API_TIMEOUT_SECS
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Outbound requests per second, overrides STEAM_API_RPS
    #[arg(long)]
    rps: Option<NonZeroU32>,

    /// Look this SteamID64 up right away
    #[arg(long)]
    steam_id: Option<String>,
}

enum Input {
    Lookup(String),
    Open,
    Redraw,
    Quit,
}

impl Input {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "" => Input::Redraw,
            "open" => Input::Open,
            "quit" | "exit" => Input::Quit,
            other => Input::Lookup(other.to_string()),
        }
    }
}

fn main() -> ExitCode {
    dotenv().ok();

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var("STEAMID_LOOKUP_LOG")
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(env_filter)
        .init();

    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(config, args.steam_id) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<Config, String> {
    let mut config = Config::from_env().map_err(|e| e.to_string())?;

    if let Some(api_key) = &args.api_key {
        config.api_key = api_key.clone();
    }
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(secs) = args.timeout_secs {
        if secs == 0 {
            return Err("--timeout-secs must be at least 1".to_string());
        }
        config.request_timeout = Duration::from_secs(secs);
    }
    if let Some(rps) = args.rps {
        config.requests_per_second = rps;
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn run(config: Config, initial: Option<String>) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("lookup-worker")
        .enable_all()
        .build()
        .map_err(|e| format!("Unable to start runtime: {}", e))?;

    let client = Client::new(&config).map_err(|e| e.to_string())?;
    let mut controller = LookupController::new(Arc::new(client), runtime.handle().clone());
    let mut presenter = Presenter::new();

    let input = spawn_input_reader();
    let mut stdin_closed = false;
    // Notification on screen, input is blocked until it is acknowledged
    let mut modal: Option<Notification> = None;

    if let Some(steam_id) = initial {
        controller.trigger(&mut presenter, &steam_id);
    }

    loop {
        if stdin_closed {
            if !controller.is_in_flight() {
                break;
            }
            thread::sleep(TICK);
        } else {
            match input.recv_timeout(TICK) {
                Ok(line) => match route_input(&mut modal, &line) {
                    None => draw(presenter.ui()),
                    Some(Input::Quit) => break,
                    Some(Input::Redraw) => draw(presenter.ui()),
                    Some(Input::Open) => match presenter.profile_url() {
                        Some(url) => {
                            if let Err(e) = open_in_browser(url) {
                                tracing::warn!(error = %e, "unable to open profile");
                            }
                        }
                        None => println!("No profile to open yet."),
                    },
                    Some(Input::Lookup(text)) => {
                        if controller.trigger(&mut presenter, &text) == Trigger::Ignored {
                            println!("A lookup is already running.");
                        }
                    }
                },
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => stdin_closed = true,
            }
        }

        controller.poll(&mut presenter);

        if modal.is_none() {
            if let Some(notification) = presenter.take_notification() {
                show_modal(&notification);
                modal = Some(notification);
            }
        }
        if modal.is_none() && presenter.take_dirty() {
            draw(presenter.ui());
        }
    }

    // Worker tasks hold no state worth waiting for once the window is gone
    runtime.shutdown_background();
    Ok(())
}

/// Swallows the line that acknowledges an open notification
fn route_input(modal: &mut Option<Notification>, line: &str) -> Option<Input> {
    match modal.take() {
        Some(_) => None,
        None => Some(Input::parse(line)),
    }
}

// stdin blocks, so it gets its own thread and feeds the loop line by line
fn spawn_input_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn show_modal(notification: &Notification) {
    println!();
    println!("[{}] {}", notification.title, notification.message);
    println!("Press Enter to continue.");
}

fn draw(ui: &UiState) {
    let mut out = io::stdout().lock();
    if let Err(e) = write_card(&mut out, ui).and_then(|_| out.flush()) {
        tracing::debug!(error = %e, "unable to draw to stdout");
    }
}

fn write_card(out: &mut impl Write, ui: &UiState) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=============== SteamID Lookup ===============")?;

    match &ui.avatar {
        Some(avatar) => writeln!(out, "  [avatar {}x{}]", avatar.width, avatar.height)?,
        None => writeln!(out, "  [no avatar]")?,
    }
    if !ui.display_name.is_empty() {
        writeln!(out, "  {}", ui.display_name)?;
    }
    match (&ui.profile_url, ui.profile_enabled) {
        (Some(url), true) => writeln!(out, "  View Steam Profile: {} (type `open`)", url)?,
        _ => writeln!(out, "  View Steam Profile: -")?,
    }
    writeln!(out)?;

    for (left, right) in LEFT_COLUMN.iter().zip(RIGHT_COLUMN.iter()) {
        let left_value = ui.field(left).unwrap_or_default();
        let right_value = ui.field(right).unwrap_or_default();
        writeln!(
            out,
            "  {:<12} {:<12} {:<12} {}",
            format!("{}:", left),
            left_value,
            format!("{}:", right),
            right_value
        )?;
    }

    writeln!(out)?;
    if let Some(updated_at) = ui.updated_at {
        writeln!(out, "  Updated {}", updated_at.format("%Y-%m-%d %H:%M:%S"))?;
    }
    writeln!(out, "  Powered by Steam Web API")?;

    if ui.lookup_enabled {
        write!(out, "Enter SteamID64: ")?;
    } else {
        writeln!(out, "Looking up...")?;
    }
    Ok(())
}
