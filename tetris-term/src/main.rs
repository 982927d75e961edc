use anyhow::Context;
use clap::Parser;
use console::Term;
use std::path::PathBuf;
use tetris_engine::{DriverCommand, EngineConfig, GameDriver, GameState, StepResult};
use tetris_term::{AnsiTermStyle, CONTROLS, GameScreen, PlainTermStyle, TermRender, TermStyle, command_for_key};

/// tetris-term - falling blocks in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Interval between automatic descends, in milliseconds
    #[arg(short, long)]
    tick_ms: Option<u64>,

    /// Seed for piece selection
    #[arg(short, long)]
    seed: Option<u64>,

    /// Path to JSON engine config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render without colors and box-drawing characters
    #[arg(long)]
    plain: bool,
}

#[tokio::main(flavor = "multi_thread", worker_threads = 1)]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Warnings only unless RUST_LOG asks for more
    tetris_term::logging::init();

    // Command line flags override the config file
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(tick_ms) = args.tick_ms {
        config = config.with_tick_interval_ms(tick_ms);
    }
    if args.seed.is_some() {
        config = config.with_seed(args.seed);
    }

    tracing::info!(tick_ms = config.tick_interval_ms, seed = ?config.seed, plain = args.plain, "starting tetris-term");
    let mut driver = GameDriver::new(config).context("Failed to start game")?;

    // Keyboard reader on a detached thread: read_key cannot be cancelled, so
    // the runtime must not wait for it on shutdown
    let keyboard_sender = driver.sender();
    std::thread::spawn(move || {
        let input_term = Term::stdout();
        loop {
            let Ok(key) = input_term.read_key() else {
                let _ = keyboard_sender.send(DriverCommand::Stop);
                break;
            };
            let Some(command) = command_for_key(&key) else {
                continue;
            };
            if keyboard_sender.send(command).is_err() || command == DriverCommand::Stop {
                break;
            }
        }
    });

    let render_term = Term::stdout();
    render_term.hide_cursor()?;
    let result = run(&mut driver, &render_term, args.plain).await;
    // Restore the cursor even when rendering failed
    render_term.show_cursor()?;
    result?;

    let state = driver.state();
    tracing::info!(score = state.score(), lines = state.lines(), "session finished");
    println!("Final score: {}", state.score());
    Ok(())
}

// Main step loop - applies ticks and commands, renders every new state
async fn run(driver: &mut GameDriver, term: &Term, plain: bool) -> anyhow::Result<()> {
    term.clear_screen()?;
    render_game(term, driver.state(), plain)?;
    while let StepResult::State(state) = driver.step().await {
        render_game(term, &state, plain)?;
    }
    Ok(())
}

fn render_game(term: &Term, state: &GameState, plain: bool) -> anyhow::Result<()> {
    let message = CONTROLS.iter().map(|line| line.to_string()).collect();
    let screen = GameScreen::new(state, message);
    if plain {
        write_lines(term, &screen, &PlainTermStyle)
    } else {
        write_lines(term, &screen, &AnsiTermStyle)
    }
}

fn write_lines(term: &Term, screen: &GameScreen, style: &impl TermStyle) -> anyhow::Result<()> {
    term.move_cursor_to(0, 0)?;
    for line in screen.render(style) {
        term.write_line(&line)?;
    }
    term.flush()?;
    Ok(())
}
