#![allow(clippy::format_in_format_args)]

mod app;
mod campaign;
mod celebration;
mod leaderboard;
mod render;
mod sound;
mod storage;
mod theme;

use app::App;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use queens_core::{analyze, search_space_size, DifficultyRating, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use storage::Store;
use theme::ThemeId;

/// N-Queens puzzle for the terminal
#[derive(Parser)]
#[command(name = "queens", version, about)]
struct Args {
    /// Start directly on an n-sized board (4-12)
    #[arg(short, long, value_name = "N")]
    size: Option<usize>,

    /// Allow attacked placements; validity is checked only at victory
    #[arg(short, long)]
    permissive: bool,

    /// Color theme for this run (not persisted)
    #[arg(short, long, value_enum)]
    theme: Option<ThemeId>,

    /// Print solution statistics for an n-sized board and exit
    #[arg(long, value_name = "N", conflicts_with = "size")]
    analyze: Option<usize>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    for &n in args.size.iter().chain(args.analyze.iter()) {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&n) {
            eprintln!(
                "Board size must be between {} and {}",
                MIN_BOARD_SIZE, MAX_BOARD_SIZE
            );
            std::process::exit(2);
        }
    }

    if let Some(n) = args.analyze {
        print_analysis(n);
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Run the app
    let result = run_app(&mut stdout, &args);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

/// Headless analytics report for `--analyze`
fn print_analysis(n: usize) {
    let analysis = analyze(n);
    println!("{0}x{0} board", n);
    println!("Solutions: {}", analysis.total_solutions);
    println!("Difficulty: {}", DifficultyRating::for_size(n));
    println!(
        "Search space: {:.2e} candidate boards",
        search_space_size(n)
    );
    if analysis.total_solutions > 0 {
        println!();
        println!("Placements per cell across all solutions:");
        for row in &analysis.grid {
            let cells: Vec<String> = row.iter().map(|count| format!("{:>6}", count)).collect();
            println!("{}", cells.join(""));
        }
    }
}

fn run_app(stdout: &mut io::Stdout, args: &Args) -> io::Result<()> {
    let mut app = App::new(Store::auto());

    if let Some(id) = args.theme {
        app.set_theme(id, false);
    }
    app.default_permissive = args.permissive;
    if let Some(n) = args.size {
        app.start_free_play(n);
    }

    let mut last_tick = Instant::now();

    loop {
        // Determine tick rate based on screen mode
        let tick_rate = app.get_tick_rate();

        // Render
        render::render(stdout, &mut app)?;
        if app.sound.take_bell() {
            write!(stdout, "\x07")?;
        }
        stdout.flush()?;

        // Handle input with timeout for animation updates
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            match event::read()? {
                Event::Key(key) => {
                    // Handle Ctrl+C
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }

                    match app.handle_key(key) {
                        app::AppAction::Continue => {}
                        app::AppAction::Quit => break,
                    }
                }
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        app.handle_mouse_click(mouse.column, mouse.row);
                    }
                }
                _ => {}
            }
        }

        // Tick animations and timer
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
