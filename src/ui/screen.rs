use ratatui::Frame;

use crate::{ui::tips::render_tips, App, View};

/// A UI Screen boundary: responsible for rendering one view of the app
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Timer, progress and exercise list
pub struct WorkoutScreen;

impl Screen for WorkoutScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }
}

/// Static training tips
pub struct TipsScreen;

impl Screen for TipsScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_tips(app, f);
    }
}

/// Helper to construct the appropriate screen for the current view
pub fn current_screen(view: &View) -> Box<dyn Screen> {
    match view {
        View::Workout => Box::new(WorkoutScreen),
        View::Tips => Box::new(TipsScreen),
    }
}
