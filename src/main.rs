pub mod ui;

use circuit::{
    config::{Config, ConfigStore, FileConfigStore},
    cue::{self, CueKind},
    logging,
    plan::Plan,
    runtime::{CrosstermEventSource, FixedTicker, Runner, Ticker, TimerEvent, TimerEventSource},
    session::{format_time, Session, Transition},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};

/// terminal interval timer for a full body dumbbell workout
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal interval timer that walks you through a fixed 16 step dumbbell routine, counting down each exercise and rest and sounding a cue at every transition."
)]
pub struct Cli {
    /// sound played on every step change (overrides the saved setting)
    #[clap(short = 'c', long, value_enum)]
    cue: Option<CueKind>,

    /// start the countdown as soon as the screen opens
    #[clap(short = 'a', long)]
    autostart: bool,

    /// remember the effective settings as the new defaults, including a cue
    /// picked with `m` during the workout
    #[clap(long)]
    save: bool,

    /// print the workout plan and exit
    #[clap(long)]
    list: bool,
}

impl Cli {
    /// Layer command line flags over the stored configuration
    fn settings(&self, stored: Config) -> Config {
        Config {
            cue: self.cue.unwrap_or(stored.cue),
            autostart: self.autostart || stored.autostart,
        }
    }

    /// Settings to write back when the app closes. Only the cue can change at
    /// runtime, and it is kept only with `--save`.
    fn settings_on_exit(&self, opened: &Config, current: &Config) -> Option<Config> {
        (self.save && current.cue != opened.cue).then(|| current.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Workout,
    Tips,
}

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// start, pause or resume depending on the phase
    Toggle,
    Skip,
    Reset,
    ToggleTips,
    CycleCue,
    Quit,
}

impl Action {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Toggle),
            KeyCode::Char('s') | KeyCode::Right => Some(Action::Skip),
            KeyCode::Char('r') => Some(Action::Reset),
            KeyCode::Char('t') => Some(Action::ToggleTips),
            KeyCode::Char('m') => Some(Action::CycleCue),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Flow {
    Continue,
    /// the interval must restart from a full period
    Rearm,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub view: View,
    pub settings: Config,
}

impl App {
    pub fn new(plan: Plan, settings: Config) -> Self {
        let mut session = Session::new(plan, cue::build(settings.cue));
        if settings.autostart {
            session.start();
        }

        Self {
            session,
            view: View::Workout,
            settings,
        }
    }

    fn apply(&mut self, action: Action) -> Flow {
        match action {
            Action::Toggle => {
                if self.session.is_running() {
                    self.session.pause();
                    tracing::info!(step = self.session.current_step_index(), "paused");
                } else if self.session.start() {
                    tracing::info!(step = self.session.current_step_index(), "running");
                }
            }
            Action::Skip => {
                if !self.session.has_started() {
                    return Flow::Continue;
                }
                if let Some(transition) = self.session.skip() {
                    log_transition(transition, "skip");
                    return Flow::Rearm;
                }
            }
            Action::Reset => {
                if self.session.has_started() {
                    self.session.reset();
                    tracing::info!("reset");
                }
            }
            Action::ToggleTips => {
                self.view = match self.view {
                    View::Workout => View::Tips,
                    View::Tips => View::Workout,
                };
            }
            Action::CycleCue => {
                self.settings.cue = self.settings.cue.cycle();
                self.session.set_cue(cue::build(self.settings.cue));
                tracing::debug!(cue = %self.settings.cue, "cue changed");
            }
            Action::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn on_second(&mut self) {
        if let Some(transition) = self.session.tick() {
            log_transition(transition, "timer");
        }
    }
}

fn log_transition(transition: Transition, cause: &str) {
    match transition {
        Transition::Advanced { from, to } => tracing::info!(from, to, cause, "next step"),
        Transition::Completed => tracing::info!(cause, "workout completed"),
    }
}

/// Plain text listing for `--list`
fn plan_listing(plan: &Plan) -> String {
    let mut out = String::new();
    for (i, step) in plan.steps().iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. {:<34} {:>5}  {}\n",
            i + 1,
            step.name,
            format_time(step.duration_secs),
            step.reps
        ));
    }
    out.push_str(&format!(
        "    {:<34} {:>5}\n",
        "Total",
        format_time(plan.total_duration_secs())
    ));
    out
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.list {
        print!("{}", plan_listing(&Plan::full_body()));
        return Ok(());
    }

    let _log_guard = logging::init();

    let store = FileConfigStore::new();
    let stored = store.load();
    let settings = cli.settings(stored);

    if cli.save {
        store.save(&settings)?;
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(Plan::full_body(), settings.clone());
    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::seconds());
    let result = start_tui(&mut terminal, &mut app, &mut runner);

    // restore the terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(updated) = cli.settings_on_exit(&settings, &app.settings) {
        if let Err(err) = store.save(&updated) {
            tracing::warn!(%err, "could not save settings");
        }
    }

    result
}

fn start_tui<B: Backend, E: TimerEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        // the interval exists exactly while the session runs
        runner.sync(app.session.is_running());
        terminal.draw(|f| ui(app, f))?;

        let event = runner.step();
        if handle_event(app, runner, event) == Flow::Quit {
            break;
        }
    }

    runner.disarm();
    Ok(())
}

fn handle_event<E: TimerEventSource, T: Ticker>(
    app: &mut App,
    runner: &mut Runner<E, T>,
    event: TimerEvent,
) -> Flow {
    match event {
        TimerEvent::Second => app.on_second(),
        TimerEvent::Key(key) => {
            let Some(action) = Action::from_key(key) else {
                return Flow::Continue;
            };
            match app.apply(action) {
                Flow::Rearm => runner.disarm(),
                flow => return flow,
            }
        }
        TimerEvent::Disconnected => {
            tracing::warn!("terminal input closed, leaving");
            return Flow::Quit;
        }
        TimerEvent::Resize | TimerEvent::Idle => {}
    }
    Flow::Continue
}

fn ui(app: &App, f: &mut Frame) {
    ui::screen::current_screen(&app.view).render(app, f);
}
