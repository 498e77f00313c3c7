use crate::campaign::{campaign_level, Progression, Ruleset, CAMPAIGN_LEVELS};
use crate::celebration::Celebration;
use crate::leaderboard::{Leaderboard, ScorePlacement, ScoreRecord};
use crate::sound::SoundPlayer;
use crate::storage::Store;
use crate::theme::{Theme, ThemeId};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use queens_core::{
    analyze, Analysis, Position, SavedSession, Session, SessionEvent, VictoryReport,
    MAX_BOARD_SIZE, MIN_BOARD_SIZE,
};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Delay between auto-solve playback placements
pub const AUTO_SOLVE_STEP: Duration = Duration::from_millis(300);

const THEME_KEY: &str = "theme";
const SAVED_SESSION_KEY: &str = "saved_session";

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Free play size selection
    Levels,
    /// Campaign ladder
    Campaign,
    /// Board gameplay
    Playing,
    /// Solution statistics and heatmap for a size
    Analysis,
    /// Score tables per size
    Leaderboard,
}

/// The main application state
pub struct App {
    /// Active puzzle session
    pub session: Session,
    /// Currently selected cell position
    pub cursor: Position,
    /// Color theme
    pub theme: Theme,
    /// Persisted theme identity
    pub theme_id: ThemeId,
    /// Current screen state
    pub screen_state: ScreenState,
    /// Selected tile on the levels screen (0-based, size = 4 + index)
    pub level_selection: usize,
    /// Selected rung on the campaign screen
    pub campaign_selection: usize,
    /// Rules in force on the current board
    pub ruleset: Ruleset,
    /// Start every new board in permissive mode
    pub default_permissive: bool,
    /// Campaign level being played, None in free play
    pub campaign_level_id: Option<u32>,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Size shown on the analysis screen
    pub analysis_size: usize,
    /// Heatmaps already computed this run
    analysis_cache: HashMap<usize, Analysis>,
    /// Size whose heatmap gets computed on the next tick, after a
    /// "working" frame has rendered
    analysis_pending: Option<usize>,
    /// Size filter on the leaderboard screen
    pub leaderboard_size: usize,
    /// Where the last unassisted win landed on the score table
    pub last_placement: Option<ScorePlacement>,
    /// Next auto-solve step deadline and the board generation it belongs to
    autoplay: Option<(Instant, u64)>,
    /// Victory confetti
    pub celebration: Celebration,
    /// Screen to return to from analysis/leaderboard
    subscreen_return: ScreenState,
    /// Board top-left cell on screen, set by the renderer for mouse mapping
    pub board_origin: (u16, u16),
    /// Cell raster size on screen, set by the renderer
    pub cell_size: (u16, u16),
    /// Score tables
    pub scores: Leaderboard,
    /// Unlocks and campaign progress
    pub progress: Progression,
    /// Sound cues and mute state
    pub sound: SoundPlayer,
    /// Settings and saved-session store
    store: Store,
}

impl App {
    pub fn new(store: Store) -> Self {
        let theme_id = store.get::<ThemeId>(THEME_KEY).unwrap_or(ThemeId::Classic);
        Self {
            session: Session::new(MIN_BOARD_SIZE),
            cursor: Position::new(0, 0),
            theme: theme_id.theme(),
            theme_id,
            screen_state: ScreenState::Levels,
            level_selection: 0,
            campaign_selection: 0,
            ruleset: Ruleset::Standard,
            default_permissive: false,
            campaign_level_id: None,
            message: None,
            message_timer: 0,
            analysis_size: MIN_BOARD_SIZE,
            analysis_cache: HashMap::new(),
            analysis_pending: None,
            leaderboard_size: MIN_BOARD_SIZE,
            last_placement: None,
            autoplay: None,
            celebration: Celebration::new(),
            subscreen_return: ScreenState::Levels,
            board_origin: (0, 0),
            cell_size: (0, 0),
            scores: Leaderboard::new(store.clone()),
            progress: Progression::new(store.clone()),
            sound: SoundPlayer::new(store.clone()),
            store,
        }
    }

    /// Get the tick rate based on current screen
    pub fn get_tick_rate(&self) -> Duration {
        match self.screen_state {
            // 30 FPS while animating or playing back a solution
            ScreenState::Playing
                if self.celebration.is_active() || self.session.is_solving() =>
            {
                Duration::from_millis(33)
            }
            _ => Duration::from_millis(100),
        }
    }

    /// Update timers, playback, and animations (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        self.celebration.update();
        self.step_autoplay();

        if let Some(n) = self.analysis_pending.take() {
            let analysis = analyze(n);
            self.analysis_cache.insert(n, analysis);
        }

        for event in self.session.take_events() {
            match event {
                SessionEvent::Sound(tag) => self.sound.play(tag),
                SessionEvent::Completed(report) => self.on_victory(report),
            }
        }
    }

    fn step_autoplay(&mut self) {
        if let Some((deadline, generation)) = self.autoplay {
            if Instant::now() < deadline {
                return;
            }
            match self.session.auto_solve_step(generation) {
                Some(_) if self.session.is_solving() => {
                    self.autoplay = Some((Instant::now() + AUTO_SOLVE_STEP, generation));
                }
                _ => self.autoplay = None,
            }
        }
    }

    fn on_victory(&mut self, report: VictoryReport) {
        self.celebration.start();

        if report.solver_assisted {
            // Engine wins earn nothing: no score, no unlocks.
            self.last_placement = None;
            return;
        }

        let record = ScoreRecord::now(report.elapsed.as_millis() as u64, report.move_count);
        match self.scores.submit(report.board_size, record) {
            Ok(placement) => self.last_placement = placement,
            Err(e) => {
                self.last_placement = None;
                self.show_message(&format!("Score not saved: {}", e));
            }
        }

        let advanced = match self.campaign_level_id {
            Some(level_id) => self.progress.record_campaign_win(level_id),
            None => self.progress.record_free_play_win(report.board_size),
        };
        match advanced {
            Ok(true) => match self.campaign_level_id {
                Some(_) => self.show_message("Campaign level cleared!"),
                None => {
                    let next = report.board_size + 1;
                    self.show_message(&format!("Unlocked the {}x{} board!", next, next));
                }
            },
            Ok(false) => {}
            Err(e) => self.show_message(&format!("Progress not saved: {}", e)),
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    /// Cached heatmap for the analysis screen, if computed
    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis_cache.get(&self.analysis_size)
    }

    /// Start a free-play session on an `n`-sized board
    pub fn start_free_play(&mut self, n: usize) {
        self.start_session(n, Ruleset::Standard, None);
    }

    fn start_session(&mut self, n: usize, ruleset: Ruleset, campaign_level_id: Option<u32>) {
        self.session = Session::new(n);
        self.session.set_permissive(self.default_permissive);
        self.ruleset = ruleset;
        self.campaign_level_id = campaign_level_id;
        self.cursor = Position::new(n / 2, n / 2);
        self.autoplay = None;
        self.last_placement = None;
        self.celebration.stop();
        self.screen_state = ScreenState::Playing;
    }

    /// Apply a theme, optionally persisting the choice
    pub fn set_theme(&mut self, id: ThemeId, persist: bool) {
        self.theme_id = id;
        self.theme = id.theme();
        if persist {
            if let Err(e) = self.store.set(THEME_KEY, &id) {
                self.show_message(&format!("Theme not saved: {}", e));
            }
        }
    }

    fn open_analysis(&mut self, n: usize) {
        self.analysis_size = n;
        if !self.analysis_cache.contains_key(&n) {
            self.analysis_pending = Some(n);
        }
        self.subscreen_return = self.screen_state;
        self.screen_state = ScreenState::Analysis;
    }

    fn open_leaderboard(&mut self, n: usize) {
        self.leaderboard_size = n;
        self.subscreen_return = self.screen_state;
        self.screen_state = ScreenState::Leaderboard;
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Levels => self.handle_levels_key(key),
            ScreenState::Campaign => self.handle_campaign_key(key),
            ScreenState::Playing => self.handle_game_key(key),
            ScreenState::Analysis => self.handle_analysis_key(key),
            ScreenState::Leaderboard => self.handle_leaderboard_key(key),
        }
    }

    fn handle_levels_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,

            // Navigation across the 3x3 tile grid
            KeyCode::Left | KeyCode::Char('h') => {
                self.level_selection = self.level_selection.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.level_selection = (self.level_selection + 1).min(8);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.level_selection = self.level_selection.saturating_sub(3);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.level_selection = (self.level_selection + 3).min(8);
            }

            KeyCode::Enter | KeyCode::Char(' ') => {
                let size = MIN_BOARD_SIZE + self.level_selection;
                if self.progress.is_unlocked(size) {
                    self.start_free_play(size);
                    self.show_message(&format!("{0}x{0} board", size));
                } else {
                    self.show_message(&format!("Beat {0}x{0} first!", self.progress.unlocked_max()));
                }
            }

            KeyCode::Char('c') => {
                self.campaign_selection = self.progress.campaign_current() as usize - 1;
                self.screen_state = ScreenState::Campaign;
            }
            KeyCode::Char('b') => {
                self.open_leaderboard(MIN_BOARD_SIZE + self.level_selection);
            }
            KeyCode::Char('a') => {
                self.open_analysis(MIN_BOARD_SIZE + self.level_selection);
            }
            KeyCode::Char('t') => self.cycle_theme(),
            KeyCode::Char('m') => self.toggle_mute(),
            KeyCode::Char('L') if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.load_session();
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_campaign_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.screen_state = ScreenState::Levels;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.campaign_selection = self.campaign_selection.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.campaign_selection = (self.campaign_selection + 1).min(CAMPAIGN_LEVELS.len() - 1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let level = CAMPAIGN_LEVELS[self.campaign_selection];
                if level.id <= self.progress.campaign_current() {
                    self.start_session(level.board_size, level.ruleset, Some(level.id));
                    self.show_message(&format!("{}: {}", level.title, level.ruleset.description()));
                } else {
                    self.show_message("Clear the earlier levels first!");
                }
            }
            KeyCode::Char('t') => self.cycle_theme(),
            KeyCode::Char('m') => self.toggle_mute(),
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Esc => {
                self.screen_state = match self.campaign_level_id {
                    Some(_) => ScreenState::Campaign,
                    None => ScreenState::Levels,
                };
            }

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),

            // Place or remove a queen
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.session.place_or_remove(self.cursor);
            }

            // Undo/Redo
            KeyCode::Char('u') => {
                if self.session.undo() {
                    self.show_message("Undo");
                }
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.session.redo() {
                    self.show_message("Redo");
                }
            }

            // Hint
            KeyCode::Char('?') => {
                if !self.ruleset.hints_allowed() {
                    self.show_message(&format!("No hints in {} rules", self.ruleset));
                } else if self.session.hint().is_none() {
                    self.show_message("No safe square to suggest");
                }
            }

            // Auto-solve playback
            KeyCode::Char('s') => match self.session.begin_auto_solve() {
                Some(generation) => {
                    self.autoplay = Some((Instant::now(), generation));
                    self.celebration.stop();
                    self.last_placement = None;
                    self.show_message("Watch closely...");
                }
                None => {
                    if self.session.is_solving() {
                        self.show_message("Already solving");
                    } else {
                        self.show_message("No solution for this board");
                    }
                }
            },

            // Clear board
            KeyCode::Char('c') => {
                self.session.clear();
                self.autoplay = None;
                self.last_placement = None;
                self.celebration.stop();
                self.show_message("Board cleared");
            }

            // Permissive mode
            KeyCode::Char('p') => {
                let on = !self.session.is_permissive();
                self.session.set_permissive(on);
                self.show_message(if on {
                    "Permissive mode on"
                } else {
                    "Permissive mode off"
                });
            }

            KeyCode::Char('b') => self.open_leaderboard(self.session.board_size()),
            KeyCode::Char('a') => self.open_analysis(self.session.board_size()),
            KeyCode::Char('t') => self.cycle_theme(),
            KeyCode::Char('m') => self.toggle_mute(),

            // Save/Load
            KeyCode::Char('S') if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.save_session();
            }
            KeyCode::Char('L') if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.load_session();
            }

            _ => {}
        }
        AppAction::Continue
    }

    fn handle_analysis_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.screen_state = self.subscreen_return;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                let n = self.prev_size(self.analysis_size);
                self.analysis_size = n;
                if !self.analysis_cache.contains_key(&n) {
                    self.analysis_pending = Some(n);
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let n = self.next_size(self.analysis_size);
                self.analysis_size = n;
                if !self.analysis_cache.contains_key(&n) {
                    self.analysis_pending = Some(n);
                }
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_leaderboard_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.screen_state = self.subscreen_return;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.leaderboard_size = self.prev_size(self.leaderboard_size);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.leaderboard_size = self.next_size(self.leaderboard_size);
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn prev_size(&self, n: usize) -> usize {
        if n <= MIN_BOARD_SIZE {
            MAX_BOARD_SIZE
        } else {
            n - 1
        }
    }

    fn next_size(&self, n: usize) -> usize {
        if n >= MAX_BOARD_SIZE {
            MIN_BOARD_SIZE
        } else {
            n + 1
        }
    }

    fn cycle_theme(&mut self) {
        let next = self.theme_id.next();
        self.set_theme(next, true);
        self.show_message(&format!("{} theme", next.name()));
    }

    fn toggle_mute(&mut self) {
        match self.sound.toggle_muted() {
            Ok(true) => self.show_message("Sound off"),
            Ok(false) => self.show_message("Sound on"),
            Err(e) => self.show_message(&format!("Setting not saved: {}", e)),
        }
    }

    fn move_cursor(&mut self, row_delta: i32, col_delta: i32) {
        let max = self.session.board_size() as i32 - 1;
        let new_row = (self.cursor.row as i32 + row_delta).clamp(0, max) as usize;
        let new_col = (self.cursor.col as i32 + col_delta).clamp(0, max) as usize;
        self.cursor = Position::new(new_row, new_col);
    }

    /// Handle a left click: on the playing screen, map it through the
    /// renderer's board metrics to a cell toggle.
    pub fn handle_mouse_click(&mut self, column: u16, row: u16) {
        if self.screen_state != ScreenState::Playing {
            return;
        }
        let (ox, oy) = self.board_origin;
        let (cw, ch) = self.cell_size;
        if cw == 0 || ch == 0 || column < ox || row < oy {
            return;
        }

        let cell_col = ((column - ox) / cw) as usize;
        let cell_row = ((row - oy) / ch) as usize;
        let n = self.session.board_size();
        if cell_row < n && cell_col < n {
            self.cursor = Position::new(cell_row, cell_col);
            self.session.place_or_remove(self.cursor);
        }
    }

    /// Save the current board
    fn save_session(&mut self) {
        match self.store.set(SAVED_SESSION_KEY, &self.session.to_saved()) {
            Ok(_) => self.show_message("Game saved"),
            Err(e) => self.show_message(&format!("Failed to save: {}", e)),
        }
    }

    /// Load the saved board into a free-play session
    fn load_session(&mut self) {
        match self.store.get::<SavedSession>(SAVED_SESSION_KEY) {
            Some(saved) => match Session::from_saved(&saved) {
                Some(session) => {
                    let n = session.board_size();
                    self.session = session;
                    self.ruleset = Ruleset::Standard;
                    self.campaign_level_id = None;
                    self.cursor = Position::new(n / 2, n / 2);
                    self.autoplay = None;
                    self.last_placement = None;
                    self.celebration.stop();
                    self.screen_state = ScreenState::Playing;
                    self.show_message("Game restored");
                }
                None => self.show_message("Invalid save data"),
            },
            None => self.show_message("No saved game"),
        }
    }

    /// Campaign title for the HUD, when playing a campaign level
    pub fn campaign_title(&self) -> Option<&'static str> {
        self.campaign_level_id
            .and_then(campaign_level)
            .map(|level| level.title)
    }
}
