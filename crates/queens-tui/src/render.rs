use crate::app::{App, ScreenState};
use crate::campaign::CAMPAIGN_LEVELS;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use queens_core::{
    is_attacked, search_space_size, DifficultyRating, Position, MAX_BOARD_SIZE, MIN_BOARD_SIZE,
};
use std::collections::HashSet;
use std::io;

/// Glyph drawn on occupied cells
const QUEEN: char = '♛';

pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide)?;
    execute!(stdout, Clear(ClearType::All))?;

    match app.screen_state {
        ScreenState::Levels => render_levels_screen(stdout, app, term_width, term_height)?,
        ScreenState::Campaign => render_campaign_screen(stdout, app, term_width, term_height)?,
        ScreenState::Playing => render_game_screen(stdout, app, term_width, term_height)?,
        ScreenState::Analysis => render_analysis_screen(stdout, app, term_width, term_height)?,
        ScreenState::Leaderboard => {
            render_leaderboard_screen(stdout, app, term_width, term_height)?;
        }
    }

    execute!(stdout, Show)?;
    Ok(())
}

/// Cell raster for an n-sized board. Big boards drop to single-row cells
/// so a 12x12 still fits a standard terminal.
fn cell_metrics(n: usize) -> (u16, u16) {
    if n <= 8 {
        (5, 2)
    } else {
        (3, 1)
    }
}

// ==================== Playing ====================

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &mut App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let n = app.session.board_size() as u16;
    let (cell_w, cell_h) = cell_metrics(n as usize);
    let board_w = n * cell_w + 2;
    let board_h = n * cell_h + 2;

    // Center the board horizontally, leave room for the info panel
    let total_width = board_w + 27;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y = if term_height > board_h + 12 { 2 } else { 1 };

    // The click handler maps terminal cells back through these
    app.board_origin = (start_x + 1, start_y + 1);
    app.cell_size = (cell_w, cell_h);
    app.celebration.resize(term_width, term_height);

    render_board(stdout, app, start_x, start_y)?;

    let info_x = start_x + board_w + 3;
    render_info_panel(stdout, app, info_x, start_y)?;

    let controls_y = start_y + board_h + 1;
    render_controls(stdout, app, start_x, controls_y)?;

    // Overlays, back to front
    for particle in app.celebration.particles() {
        if particle.is_visible(term_width, term_height) {
            execute!(
                stdout,
                MoveTo(particle.x as u16, particle.y as u16),
                SetForegroundColor(particle.color),
                SetBackgroundColor(app.theme.bg),
                Print(particle.char)
            )?;
        }
    }

    if app.session.is_won() {
        render_victory_panel(stdout, app, term_width, term_height)?;
    }

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    Ok(())
}

fn render_board(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let n = app.session.board_size();
    let (cell_w, cell_h) = cell_metrics(n);
    let inner_w = n as u16 * cell_w;
    let inner_h = n as u16 * cell_h;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    // Frame
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.border),
        Print(format!("┌{}┐", "─".repeat(inner_w as usize)))
    )?;
    for row in 0..inner_h {
        execute!(stdout, MoveTo(x, y + 1 + row), Print("│"))?;
        execute!(stdout, MoveTo(x + 1 + inner_w, y + 1 + row), Print("│"))?;
    }
    execute!(
        stdout,
        MoveTo(x, y + 1 + inner_h),
        Print(format!("└{}┘", "─".repeat(inner_w as usize)))
    )?;

    let attacked = app.session.attacked();
    // Hidden queens come back for the reveal: playback and the win both show
    // the full board.
    let hide_queens =
        app.ruleset.queens_hidden() && !app.session.is_won() && !app.session.is_solving();
    let glyph_row = (cell_h - 1) / 2;

    for row in 0..n {
        for sub in 0..cell_h {
            let cell_y = y + 1 + row as u16 * cell_h + sub;
            execute!(stdout, MoveTo(x + 1, cell_y))?;
            for col in 0..n {
                let pos = Position::new(row, col);
                render_cell(stdout, app, pos, &attacked, hide_queens, sub == glyph_row)?;
            }
        }
    }

    Ok(())
}

fn render_cell(
    stdout: &mut io::Stdout,
    app: &App,
    pos: Position,
    attacked: &HashSet<Position>,
    hide_queens: bool,
    glyph_row: bool,
) -> io::Result<()> {
    let theme = &app.theme;
    let (cell_w, _) = cell_metrics(app.session.board_size());
    let occupied = app.session.occupied(pos);
    let show_overlays = !hide_queens;

    let bg = if app.session.invalid_marker() == Some(pos) {
        theme.error
    } else if pos == app.cursor {
        theme.cursor_bg
    } else if app.session.hint_marker() == Some(pos) {
        theme.hint_bg
    } else if show_overlays && !occupied && attacked.contains(&pos) {
        theme.attack_bg
    } else if app.ruleset.safe_cells_highlighted() && !occupied && !attacked.contains(&pos) {
        theme.safe_bg
    } else if (pos.row + pos.col) % 2 == 0 {
        theme.cell_light
    } else {
        theme.cell_dark
    };

    execute!(stdout, SetBackgroundColor(bg))?;

    if occupied && !hide_queens && glyph_row {
        // Attacked queens only exist in permissive mode; flag them
        let others = app
            .session
            .placements()
            .iter()
            .copied()
            .filter(|&q| q != pos);
        let fg = if is_attacked(pos, others) {
            theme.error
        } else {
            theme.queen
        };
        execute!(
            stdout,
            SetForegroundColor(fg),
            Print(format!("{:^1$}", QUEEN, cell_w as usize))
        )?;
    } else {
        execute!(stdout, Print(" ".repeat(cell_w as usize)))?;
    }

    Ok(())
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let session = &app.session;
    let n = session.board_size();

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    // Title
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print("═══ N-QUEENS ═══")
    )?;

    let queens_color = if session.is_won() {
        theme.success
    } else {
        theme.info
    };
    execute!(
        stdout,
        MoveTo(x, y + 2),
        SetForegroundColor(queens_color),
        Print(format!("Queens: {:>7}", format!("{}/{}", session.placements().len(), n)))
    )?;
    execute!(
        stdout,
        MoveTo(x, y + 3),
        SetForegroundColor(theme.info),
        Print(format!("Moves: {:>8}", session.move_count()))
    )?;
    execute!(
        stdout,
        MoveTo(x, y + 4),
        SetForegroundColor(theme.info),
        Print(format!("Time: {:>9}", session.elapsed_string()))
    )?;

    // Campaign levels show their name, free play the size rating
    match app.campaign_title() {
        Some(title) => {
            execute!(
                stdout,
                MoveTo(x, y + 6),
                SetForegroundColor(theme.accent),
                Print(title)
            )?;
        }
        None => {
            execute!(
                stdout,
                MoveTo(x, y + 6),
                SetForegroundColor(theme.info),
                Print(format!("Level: {:>9}", format!("{}", DifficultyRating::for_size(n))))
            )?;
        }
    }
    execute!(
        stdout,
        MoveTo(x, y + 7),
        SetForegroundColor(theme.info),
        Print(format!("Rules: {:>9}", app.ruleset.name()))
    )?;

    if session.is_permissive() {
        execute!(
            stdout,
            MoveTo(x, y + 9),
            SetForegroundColor(Color::Yellow),
            Print("Permissive placement")
        )?;
    }
    if session.is_solving() {
        execute!(
            stdout,
            MoveTo(x, y + 10),
            SetForegroundColor(theme.accent),
            Print("Solving...")
        )?;
    }

    execute!(
        stdout,
        MoveTo(x, y + 12),
        SetForegroundColor(theme.info),
        Print(format!("Cell: Row {} Col {}", app.cursor.row + 1, app.cursor.col + 1))
    )?;

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let controls = [
        ("Arrows", "Move"),
        ("Space", "Place"),
        ("u", "Undo"),
        ("^r", "Redo"),
        ("?", "Hint"),
        ("s", "Auto-solve"),
        ("c", "Clear"),
        ("p", "Permissive"),
        ("a", "Analysis"),
        ("b", "Scores"),
        ("S", "Save"),
        ("L", "Load"),
        ("t", "Theme"),
        ("m", "Mute"),
        ("Esc", "Back"),
        ("q", "Quit"),
    ];

    // Display in 4 columns (4 items each)
    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 4;
        let row = i % 4;
        let cx = x + (col as u16) * 18;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>6}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.len() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.bg),
        SetBackgroundColor(theme.accent),
        Print(&padded)
    )?;

    Ok(())
}

fn render_victory_panel(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let n = app.session.board_size();

    let mut lines: Vec<(String, Color)> = Vec::new();
    if app.session.solver_assisted() {
        lines.push(("Solved!".to_string(), theme.accent));
        lines.push((
            format!("The engine conquered the {0}x{0} board.", n),
            theme.fg,
        ));
    } else {
        lines.push(("Level Completed!".to_string(), theme.accent));
        if app.last_placement.is_some_and(|p| p.is_new_best) {
            lines.push(("★ NEW HIGH SCORE! ★".to_string(), theme.key));
        }
        lines.push((
            format!(
                "You conquered the {0}x{0} board in {1}.",
                n,
                app.session.elapsed_string()
            ),
            theme.fg,
        ));
        if let Some(placement) = app.last_placement {
            lines.push((format!("Leaderboard rank: #{}", placement.rank), theme.info));
        }
    }
    lines.push((String::new(), theme.info));
    lines.push(("c New board   Esc Back".to_string(), theme.key));

    let content_w = lines
        .iter()
        .map(|(text, _)| text.chars().count())
        .max()
        .unwrap_or(0) as u16;
    let panel_w = content_w + 6;
    let panel_h = lines.len() as u16 + 2;
    let x = term_width.saturating_sub(panel_w) / 2;
    let y = term_height.saturating_sub(panel_h) / 2;

    let bg = Color::Rgb {
        r: 30,
        g: 30,
        b: 40,
    };

    // Background
    for row in 0..panel_h {
        execute!(
            stdout,
            MoveTo(x, y + row),
            SetBackgroundColor(bg),
            Print(" ".repeat(panel_w as usize))
        )?;
    }

    // Border
    execute!(stdout, SetForegroundColor(theme.success), SetBackgroundColor(bg))?;
    execute!(
        stdout,
        MoveTo(x, y),
        Print("┌"),
        Print("─".repeat(panel_w as usize - 2)),
        Print("┐")
    )?;
    for row in 1..panel_h - 1 {
        execute!(stdout, MoveTo(x, y + row), Print("│"))?;
        execute!(stdout, MoveTo(x + panel_w - 1, y + row), Print("│"))?;
    }
    execute!(
        stdout,
        MoveTo(x, y + panel_h - 1),
        Print("└"),
        Print("─".repeat(panel_w as usize - 2)),
        Print("┘")
    )?;

    for (i, (text, color)) in lines.iter().enumerate() {
        let text_x = x + (panel_w.saturating_sub(text.chars().count() as u16)) / 2;
        execute!(
            stdout,
            MoveTo(text_x, y + 1 + i as u16),
            SetForegroundColor(*color),
            SetBackgroundColor(bg),
            Print(text)
        )?;
    }

    Ok(())
}

// ==================== Levels ====================

fn render_levels_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    // Title
    let title = "═══ N-QUEENS ═══";
    let title_x = term_width.saturating_sub(title.chars().count() as u16) / 2;
    execute!(
        stdout,
        MoveTo(title_x, 1),
        SetForegroundColor(theme.accent),
        Print(title)
    )?;

    let subtitle = "Select a board";
    let subtitle_x = term_width.saturating_sub(subtitle.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(subtitle_x, 2),
        SetForegroundColor(theme.info),
        Print(subtitle)
    )?;

    // 3x3 tile grid, one tile per board size
    let tile_w: u16 = 16;
    let tile_h: u16 = 5;
    let grid_w = tile_w * 3 + 4;
    let grid_x = term_width.saturating_sub(grid_w) / 2;
    let grid_y = 4;

    for idx in 0..9 {
        let tile_x = grid_x + (idx as u16 % 3) * (tile_w + 2);
        let tile_y = grid_y + (idx as u16 / 3) * tile_h;
        render_level_tile(stdout, app, idx, tile_x, tile_y)?;
    }

    // Navigation help
    let nav_y = term_height.saturating_sub(3);
    execute!(
        stdout,
        MoveTo(4, nav_y),
        SetForegroundColor(theme.border),
        Print("─".repeat(60))
    )?;
    execute!(
        stdout,
        MoveTo(4, nav_y + 1),
        SetForegroundColor(theme.key),
        Print("Enter"),
        SetForegroundColor(theme.info),
        Print(" Play  "),
        SetForegroundColor(theme.key),
        Print("c"),
        SetForegroundColor(theme.info),
        Print(" Campaign  "),
        SetForegroundColor(theme.key),
        Print("a"),
        SetForegroundColor(theme.info),
        Print(" Analysis  "),
        SetForegroundColor(theme.key),
        Print("b"),
        SetForegroundColor(theme.info),
        Print(" Scores  "),
        SetForegroundColor(theme.key),
        Print("t"),
        SetForegroundColor(theme.info),
        Print(" Theme  "),
        SetForegroundColor(theme.key),
        Print("m"),
        SetForegroundColor(theme.info),
        Print(" Mute  "),
        SetForegroundColor(theme.key),
        Print("L"),
        SetForegroundColor(theme.info),
        Print(" Load  "),
        SetForegroundColor(theme.key),
        Print("q"),
        SetForegroundColor(theme.info),
        Print(" Quit")
    )?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    Ok(())
}

fn render_level_tile(
    stdout: &mut io::Stdout,
    app: &App,
    idx: usize,
    x: u16,
    y: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let size = MIN_BOARD_SIZE + idx;
    let unlocked = app.progress.is_unlocked(size);
    let completed = app.progress.is_completed(size);
    let selected = idx == app.level_selection;

    let border_color = if selected { theme.key } else { theme.border };
    let text_color = if unlocked { theme.fg } else { Color::DarkGrey };

    execute!(
        stdout,
        SetBackgroundColor(theme.bg),
        SetForegroundColor(border_color)
    )?;
    execute!(stdout, MoveTo(x, y), Print(format!("┌{}┐", "─".repeat(14))))?;
    for row in 1..4 {
        execute!(stdout, MoveTo(x, y + row), Print("│"))?;
        execute!(stdout, MoveTo(x + 15, y + row), Print("│"))?;
    }
    execute!(
        stdout,
        MoveTo(x, y + 4),
        Print(format!("└{}┘", "─".repeat(14)))
    )?;

    execute!(
        stdout,
        MoveTo(x + 1, y + 1),
        SetForegroundColor(text_color),
        Print(format!("{:^14}", format!("Level {}", idx + 1)))
    )?;
    execute!(
        stdout,
        MoveTo(x + 1, y + 2),
        SetForegroundColor(if unlocked { theme.info } else { Color::DarkGrey }),
        Print(format!("{:^14}", format!("{0} x {0}", size)))
    )?;

    let (status, status_color) = if completed {
        (format!("{} cleared", QUEEN), theme.success)
    } else if !unlocked {
        ("locked".to_string(), Color::DarkGrey)
    } else {
        (String::new(), theme.info)
    };
    let pad = 14usize.saturating_sub(status.chars().count());
    execute!(
        stdout,
        MoveTo(x + 1, y + 3),
        SetForegroundColor(status_color),
        Print(format!(
            "{}{}{}",
            " ".repeat(pad / 2),
            status,
            " ".repeat(pad - pad / 2)
        ))
    )?;

    Ok(())
}

// ==================== Campaign ====================

fn render_campaign_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let current = app.progress.campaign_current();

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    // Title
    let title = "═══ CAMPAIGN ═══";
    let title_x = term_width.saturating_sub(title.chars().count() as u16) / 2;
    execute!(
        stdout,
        MoveTo(title_x, 1),
        SetForegroundColor(theme.accent),
        Print(title)
    )?;

    let list_x = term_width.saturating_sub(50) / 2;
    for (i, level) in CAMPAIGN_LEVELS.iter().enumerate() {
        let y = 3 + i as u16;
        let locked = level.id > current;
        let completed = level.id < current;
        let selected = i == app.campaign_selection;

        let prefix = if selected { "▶ " } else { "  " };
        let row_color = if locked {
            Color::DarkGrey
        } else if selected {
            theme.key
        } else if completed {
            theme.info
        } else {
            theme.fg
        };

        execute!(
            stdout,
            MoveTo(list_x, y),
            SetForegroundColor(theme.key),
            Print(prefix),
            SetForegroundColor(row_color),
            Print(format!(
                "{:>2}. {:<22} {:>5}  {:<10}",
                level.id,
                level.title,
                format!("{0}x{0}", level.board_size),
                level.ruleset.name()
            ))
        )?;

        if completed {
            execute!(stdout, SetForegroundColor(theme.success), Print(" ✓"))?;
        } else if locked {
            execute!(stdout, SetForegroundColor(Color::DarkGrey), Print(" 🔒"))?;
        }
    }

    // Selected level details
    let level = &CAMPAIGN_LEVELS[app.campaign_selection];
    let desc_y = 3 + CAMPAIGN_LEVELS.len() as u16 + 1;
    let desc_x = term_width.saturating_sub(level.description.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(desc_x, desc_y),
        SetForegroundColor(theme.fg),
        Print(level.description)
    )?;
    let rules = format!("{} rules: {}", level.ruleset.name(), level.ruleset.description());
    let rules_x = term_width.saturating_sub(rules.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(rules_x, desc_y + 1),
        SetForegroundColor(theme.info),
        Print(rules)
    )?;

    // Navigation help
    let nav_y = term_height.saturating_sub(3);
    execute!(
        stdout,
        MoveTo(4, nav_y),
        SetForegroundColor(theme.border),
        Print("─".repeat(60))
    )?;
    execute!(
        stdout,
        MoveTo(4, nav_y + 1),
        SetForegroundColor(theme.key),
        Print("j/k"),
        SetForegroundColor(theme.info),
        Print(" Select  "),
        SetForegroundColor(theme.key),
        Print("Enter"),
        SetForegroundColor(theme.info),
        Print(" Play  "),
        SetForegroundColor(theme.key),
        Print("t"),
        SetForegroundColor(theme.info),
        Print(" Theme  "),
        SetForegroundColor(theme.key),
        Print("m"),
        SetForegroundColor(theme.info),
        Print(" Mute  "),
        SetForegroundColor(theme.key),
        Print("Esc"),
        SetForegroundColor(theme.info),
        Print(" Back")
    )?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    Ok(())
}

// ==================== Analysis ====================

fn render_analysis_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let n = app.analysis_size;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    // Title
    let title = "═══ BOARD ANALYSIS ═══";
    let title_x = term_width.saturating_sub(title.chars().count() as u16) / 2;
    execute!(
        stdout,
        MoveTo(title_x, 1),
        SetForegroundColor(theme.accent),
        Print(title)
    )?;

    render_size_selector(stdout, app, n, 3, term_width)?;

    let analysis = match app.analysis() {
        Some(analysis) => analysis,
        None => {
            // Computed on the next tick; show this frame so the wait is visible
            let working = format!("Enumerating solutions for the {0}x{0} board...", n);
            let working_x = term_width.saturating_sub(working.len() as u16) / 2;
            execute!(
                stdout,
                MoveTo(working_x, 10),
                SetForegroundColor(theme.info),
                Print(working)
            )?;
            render_subscreen_nav(stdout, app, term_height)?;
            return Ok(());
        }
    };

    let stats = format!(
        "Solutions: {}   Difficulty: {}",
        analysis.total_solutions,
        DifficultyRating::for_size(n)
    );
    let stats_x = term_width.saturating_sub(stats.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(stats_x, 5),
        SetForegroundColor(theme.fg),
        Print(stats)
    )?;

    let space = format!("Search space: {:.2e} candidate boards", search_space_size(n));
    let space_x = term_width.saturating_sub(space.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(space_x, 6),
        SetForegroundColor(theme.info),
        Print(space)
    )?;

    // Heatmap: how often each square hosts a queen across all solutions
    let heat_x = term_width.saturating_sub(n as u16 * 5) / 2;
    for (row, counts) in analysis.grid.iter().enumerate() {
        execute!(stdout, MoveTo(heat_x, 8 + row as u16))?;
        for &count in counts {
            let ratio = if analysis.max_cell_count == 0 {
                0.0
            } else {
                count as f32 / analysis.max_cell_count as f32
            };
            let cell = if count == 0 {
                "     ".to_string()
            } else {
                format!("{:^5}", count)
            };
            execute!(
                stdout,
                SetBackgroundColor(blend(theme.cell_dark, theme.accent, ratio)),
                SetForegroundColor(theme.bg),
                Print(cell)
            )?;
        }
    }
    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let legend = "Brighter squares host more solutions";
    let legend_x = term_width.saturating_sub(legend.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(legend_x, 8 + n as u16 + 1),
        SetForegroundColor(theme.border),
        Print(legend)
    )?;

    render_subscreen_nav(stdout, app, term_height)?;

    Ok(())
}

/// Linear blend between two RGB colors; non-RGB inputs snap to `to`
fn blend(from: Color, to: Color, t: f32) -> Color {
    match (from, to) {
        (
            Color::Rgb {
                r: r1,
                g: g1,
                b: b1,
            },
            Color::Rgb {
                r: r2,
                g: g2,
                b: b2,
            },
        ) => Color::Rgb {
            r: (r1 as f32 + (r2 as f32 - r1 as f32) * t) as u8,
            g: (g1 as f32 + (g2 as f32 - g1 as f32) * t) as u8,
            b: (b1 as f32 + (b2 as f32 - b1 as f32) * t) as u8,
        },
        _ => to,
    }
}

// ==================== Leaderboard ====================

fn render_leaderboard_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let n = app.leaderboard_size;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    // Title
    let title = "═══ LEADERBOARD ═══";
    let title_x = term_width.saturating_sub(title.chars().count() as u16) / 2;
    execute!(
        stdout,
        MoveTo(title_x, 1),
        SetForegroundColor(theme.accent),
        Print(title)
    )?;

    render_size_selector(stdout, app, n, 3, term_width)?;

    // Header
    let table_x = term_width.saturating_sub(36) / 2;
    let header_y = 5;
    execute!(
        stdout,
        MoveTo(table_x, header_y),
        SetForegroundColor(theme.fg),
        Print(format!(
            "{:>4}  {:>9}  {:>6}  {:>9}",
            "Rank", "Time", "Moves", "When"
        ))
    )?;
    execute!(
        stdout,
        MoveTo(table_x, header_y + 1),
        SetForegroundColor(theme.border),
        Print("─".repeat(36))
    )?;

    let entries = app.scores.top(n);
    for (i, entry) in entries.iter().enumerate() {
        let y = header_y + 2 + i as u16;
        let rank_color = match i {
            0 => Color::Yellow, // Gold
            1 => Color::Grey,   // Silver
            2 => Color::Rgb {
                r: 205,
                g: 127,
                b: 50,
            }, // Bronze
            _ => theme.info,
        };

        execute!(
            stdout,
            MoveTo(table_x, y),
            SetForegroundColor(rank_color),
            Print(format!("{:>4}", i + 1)),
            SetForegroundColor(theme.key),
            Print(format!("  {:>9}", entry.time_string())),
            SetForegroundColor(theme.info),
            Print(format!("  {:>6}", entry.moves)),
            Print(format!("  {:>9}", age_string(entry.timestamp)))
        )?;
    }

    if entries.is_empty() {
        execute!(
            stdout,
            MoveTo(table_x, header_y + 3),
            SetForegroundColor(theme.border),
            Print("No entries yet. Win some games!")
        )?;
    }

    render_subscreen_nav(stdout, app, term_height)?;

    Ok(())
}

// ==================== Shared pieces ====================

/// Board size picker row shared by the analysis and leaderboard screens
fn render_size_selector(
    stdout: &mut io::Stdout,
    app: &App,
    current: usize,
    y: u16,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let row_w = 4 + (MAX_BOARD_SIZE - MIN_BOARD_SIZE + 1) as u16 * 6;
    let x = term_width.saturating_sub(row_w) / 2;

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.info),
        Print("◀ ")
    )?;
    for n in MIN_BOARD_SIZE..=MAX_BOARD_SIZE {
        let color = if n == current { theme.key } else { theme.border };
        execute!(
            stdout,
            SetForegroundColor(color),
            Print(format!("{:^6}", format!("{0}x{0}", n)))
        )?;
    }
    execute!(stdout, SetForegroundColor(theme.info), Print(" ▶"))?;

    Ok(())
}

fn render_subscreen_nav(stdout: &mut io::Stdout, app: &App, term_height: u16) -> io::Result<()> {
    let theme = &app.theme;
    let nav_y = term_height.saturating_sub(3);

    execute!(
        stdout,
        MoveTo(4, nav_y),
        SetForegroundColor(theme.border),
        Print("─".repeat(60))
    )?;
    execute!(
        stdout,
        MoveTo(4, nav_y + 1),
        SetForegroundColor(theme.key),
        Print("←/→"),
        SetForegroundColor(theme.info),
        Print(" Change size  "),
        SetForegroundColor(theme.key),
        Print("Esc"),
        SetForegroundColor(theme.info),
        Print(" Back")
    )?;

    Ok(())
}

/// Record age for the score table, in whole days
fn age_string(timestamp: u64) -> String {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let days = now.saturating_sub(timestamp) / 86_400;
    if days == 0 {
        "today".to_string()
    } else {
        format!("{}d ago", days)
    }
}
