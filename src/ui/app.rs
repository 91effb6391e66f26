//! Full-screen terminal UI.
//!
//! Single-threaded event loop: keys and the tick timer drive all state;
//! a `notify` watcher thread only posts reload messages over a channel
//! when the store file changes under us (another `ht` process, an
//! editor). All mutations run on this thread through the same store
//! operations the CLI uses.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::interp;
use crate::store::TaskStore;
use crate::task::{Priority, TaskFilters};

use super::view;

const EVENT_POLL_MS: u64 = 120;
const WATCH_DEBOUNCE_MS: u64 = 200;

/// Characters of the banner revealed per tick.
const TYPING_STEP: usize = 2;

pub(crate) const BANNER_TITLE: &str = "HACKER TASK MANAGER";
const HISTORY_SEED: [&str; 2] = [
    "> HACKER TASK MANAGER v2.0 INITIALIZED",
    "> Type \"help\" for available commands",
];

enum UiMsg {
    StoreChanged,
    WatchError(String),
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Error,
    Info,
}

pub struct AppState {
    pub(crate) store: TaskStore,
    pub(crate) filters: TaskFilters,
    pub(crate) selected: Option<usize>,
    pub(crate) command_mode: bool,
    pub(crate) command_input: String,
    pub(crate) history: Vec<String>,
    pub(crate) status: Option<(String, StatusKind)>,
    pub(crate) banner_revealed: usize,
    should_quit: bool,
}

impl AppState {
    fn new(config: Config, store: TaskStore) -> Self {
        Self {
            store,
            filters: TaskFilters {
                show_completed: config.show_completed,
                priority: None,
            },
            selected: None,
            command_mode: false,
            command_input: String::new(),
            history: HISTORY_SEED.iter().map(|s| s.to_string()).collect(),
            status: None,
            banner_revealed: 0,
            should_quit: false,
        }
    }

    /// Indices into the store's collection that pass the current filters.
    pub(crate) fn visible(&self) -> Vec<usize> {
        self.store
            .tasks()
            .iter()
            .enumerate()
            .filter(|(_, task)| self.filters.matches(task))
            .map(|(idx, _)| idx)
            .collect()
    }

    fn selected_task_id(&self) -> Option<String> {
        let visible = self.visible();
        let pos = self.selected?;
        visible
            .get(pos)
            .map(|&idx| self.store.tasks()[idx].id.clone())
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = match (self.selected, len) {
            (_, 0) => None,
            (None, _) => None,
            (Some(pos), len) => Some(pos.min(len - 1)),
        };
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.visible().len();
        if len == 0 {
            self.selected = None;
            return;
        }
        let current = self.selected.unwrap_or(0) as isize;
        let next = if self.selected.is_none() && delta >= 0 {
            0
        } else {
            (current + delta).clamp(0, len as isize - 1) as usize
        };
        self.selected = Some(next);
    }

    fn set_status(&mut self, message: impl Into<String>, kind: StatusKind) {
        self.status = Some((message.into(), kind));
    }

    fn tick(&mut self) {
        if self.banner_revealed < BANNER_TITLE.len() {
            self.banner_revealed = (self.banner_revealed + TYPING_STEP).min(BANNER_TITLE.len());
        }
    }

    fn reload(&mut self) {
        self.store = TaskStore::open(self.store.path().to_path_buf());
        self.clamp_selection();
        self.set_status("store reloaded", StatusKind::Info);
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        match self.store.toggle_complete(&id) {
            Ok(Some(true)) => self.set_status("task completed", StatusKind::Info),
            Ok(Some(false)) => self.set_status("task reopened", StatusKind::Info),
            Ok(None) => {}
            Err(err) => self.set_status(err.to_string(), StatusKind::Error),
        }
        self.clamp_selection();
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        match self.store.delete(&id) {
            Ok(()) => self.set_status("task deleted", StatusKind::Info),
            Err(err) => self.set_status(err.to_string(), StatusKind::Error),
        }
        self.clamp_selection();
    }

    fn cycle_priority_filter(&mut self) {
        self.filters.priority = match self.filters.priority {
            None => Some(Priority::High),
            Some(Priority::High) => Some(Priority::Medium),
            Some(Priority::Medium) => Some(Priority::Low),
            Some(Priority::Low) => None,
        };
        self.clamp_selection();
    }

    fn run_command(&mut self) {
        let line = std::mem::take(&mut self.command_input);
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }

        self.history.push(format!("> {trimmed}"));
        let result = interp::execute(trimmed, &mut self.store);

        let is_clear = trimmed
            .split_whitespace()
            .next()
            .map(|cmd| cmd.eq_ignore_ascii_case("clear"))
            .unwrap_or(false);
        if is_clear {
            self.history.clear();
        } else {
            for line in result.lines() {
                self.history.push(line.to_string());
            }
        }
        self.clamp_selection();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.status = None;

        if self.command_mode {
            match key.code {
                KeyCode::Esc => {
                    self.command_mode = false;
                    self.command_input.clear();
                }
                KeyCode::Enter => self.run_command(),
                KeyCode::Backspace => {
                    self.command_input.pop();
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.command_mode = false;
                    self.command_input.clear();
                }
                KeyCode::Char(c) => self.command_input.push(c),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('c') | KeyCode::Char(':') => {
                self.command_mode = true;
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('h') => {
                self.filters.show_completed = !self.filters.show_completed;
                self.clamp_selection();
            }
            KeyCode::Char('p') => self.cycle_priority_filter(),
            _ => {}
        }
    }
}

/// Run the full-screen UI until the user quits.
pub fn run(store_flag: Option<PathBuf>) -> Result<()> {
    let config = Config::load_default()?;
    let path = config.store_path(store_flag)?;
    let store = TaskStore::open(path);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, AppState::new(config, store));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: AppState,
) -> Result<()> {
    let (tx, rx): (Sender<UiMsg>, Receiver<UiMsg>) = mpsc::channel();

    // Watch the store's directory: atomic saves rename a temp file over
    // the real one, so watching the file itself would lose the inode.
    let _watcher = app
        .store
        .path()
        .parent()
        .map(Path::to_path_buf)
        .and_then(|dir| spawn_watcher(dir, tx).ok());

    let mut last_reload = Instant::now();

    loop {
        terminal.draw(|frame| view::render(frame, &mut app))?;

        if app.should_quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        } else {
            app.tick();
        }

        while let Ok(msg) = rx.try_recv() {
            match msg {
                UiMsg::StoreChanged => {
                    if last_reload.elapsed() >= Duration::from_millis(WATCH_DEBOUNCE_MS) {
                        app.reload();
                        last_reload = Instant::now();
                    }
                }
                UiMsg::WatchError(message) => app.set_status(message, StatusKind::Error),
            }
        }
    }
}

fn spawn_watcher(dir: PathBuf, tx: Sender<UiMsg>) -> Result<RecommendedWatcher> {
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        let msg = match res {
            Ok(_) => UiMsg::StoreChanged,
            Err(err) => UiMsg::WatchError(format!("watch error: {err}")),
        };
        let _ = tx.send(msg);
    })
    .map_err(|err| Error::OperationFailed(format!("failed to start watcher: {err}")))?;

    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .map_err(|err| Error::OperationFailed(format!("failed to watch {}: {err}", dir.display())))?;

    Ok(watcher)
}
