use clap::Parser;
use menu_backend::core::config::{self, ConfigError};
use menu_backend::{Action, Direction, Effect, LogLevel, MenuBackend, update};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "menu-shell", about = "Drive a menu_backend menu from stdin")]
struct Args {
    /// Menu layout file (defaults to $MENU_BACKEND_CONFIG or ~/.menu_backend/menu.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log verbosity
    #[arg(long, default_value_t, value_enum)]
    log_level: LogLevel,

    /// Where to write the log file
    #[arg(long, default_value = "menu_shell.log")]
    log_file: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize file logger; stdout belongs to the menu.
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(args.log_level.filter(), log_config, log_file);
    }

    let mut backend = match load_backend(args.config.as_deref()) {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("menu-shell: {e}");
            return ExitCode::FAILURE;
        }
    };
    install_hooks(&mut backend);

    log::info!("menu-shell starting at '{}'", backend.current_item().name());

    match run(&mut backend) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("menu-shell: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_backend(cli_path: Option<&std::path::Path>) -> Result<MenuBackend, ConfigError> {
    let menu = match config::resolve_config_path(cli_path) {
        Some(path) => config::load_config(&path)?,
        None => {
            log::warn!("Could not determine home directory, using sample menu");
            config::sample_config()?
        }
    };
    config::build_backend(&menu)
}

fn install_hooks(backend: &mut MenuBackend) {
    backend
        .on_menu_use(|e| println!("* used {}", e.item.name()))
        .on_menu_change(|e| log::info!("{} -> {}", e.from.name(), e.to.name()))
        .on_item_change(|e| println!("* {} = {}", e.item.name(), e.item.value()));
}

fn run(backend: &mut MenuBackend) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    render(backend, &mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Action>() {
            Ok(action) => {
                if update(backend, action) == Effect::Quit {
                    break;
                }
            }
            Err(e) => writeln!(stdout, "? {e}")?,
        }
        render(backend, &mut stdout)?;
    }
    Ok(())
}

/// One status line: the current item and which ways lead somewhere.
fn render(backend: &MenuBackend, out: &mut impl Write) -> io::Result<()> {
    let item = backend.current_item();
    let name_of = |id| backend.item(id).map(|i| i.name()).unwrap_or("?");

    write!(out, "[{}] {}", item.level(), item.name())?;
    if let Some(key) = item.shortkey() {
        write!(out, " ({key})")?;
    }
    if item.value() != 0 || item.is_registered() {
        write!(out, " = {}", item.value())?;
    }
    for (label, direction) in [
        ("up", Direction::Before),
        ("down", Direction::After),
        ("left", Direction::Left),
        ("right", Direction::Right),
    ] {
        if let Some(id) = item.neighbor(direction) {
            write!(out, "  {label}:{}", name_of(id))?;
        }
    }
    if let Some(id) = item.exit() {
        write!(out, "  exit:{}", name_of(id))?;
    }
    writeln!(out)?;
    out.flush()
}
