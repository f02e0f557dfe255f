//! Session controller: the timer state machine for one pass through a [`Plan`].
//!
//! The controller never schedules anything itself. Whoever hosts it must call
//! [`Session::tick`] once per elapsed second while [`Session::is_running`]
//! reports true, and stop as soon as it turns false.

use crate::cue::Cue;
use crate::plan::{Plan, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    #[strum(serialize = "Ready")]
    NotStarted,
    Running,
    Paused,
    #[strum(serialize = "Complete")]
    Completed,
}

/// A change of step caused by a tick or a skip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Advanced { from: usize, to: usize },
    Completed,
}

/// Mutable progress through the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub current_step_index: usize,
    pub time_remaining: u32,
    pub is_running: bool,
    pub has_started: bool,
}

impl SessionState {
    pub fn initial(plan: &Plan) -> Self {
        Self {
            current_step_index: 0,
            time_remaining: plan.step(0).duration_secs,
            is_running: false,
            has_started: false,
        }
    }
}

pub struct Session {
    plan: Plan,
    state: SessionState,
    cue: Box<dyn Cue>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("plan", &self.plan)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(plan: Plan, cue: Box<dyn Cue>) -> Self {
        let state = SessionState::initial(&plan);
        Self { plan, state, cue }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_step_index(&self) -> usize {
        self.state.current_step_index
    }

    pub fn current_step(&self) -> &Step {
        self.plan.step(self.state.current_step_index)
    }

    pub fn time_remaining(&self) -> u32 {
        self.state.time_remaining
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn has_started(&self) -> bool {
        self.state.has_started
    }

    /// Swap the cue, e.g. when the user mutes the timer mid-workout
    pub fn set_cue(&mut self, cue: Box<dyn Cue>) {
        self.cue = cue;
    }

    fn at_last_step(&self) -> bool {
        self.state.current_step_index >= self.plan.last_index()
    }

    pub fn phase(&self) -> Phase {
        let s = &self.state;
        if s.is_running {
            Phase::Running
        } else if !s.has_started {
            Phase::NotStarted
        } else if self.at_last_step() && s.time_remaining == 0 {
            Phase::Completed
        } else {
            Phase::Paused
        }
    }

    pub fn is_completed(&self) -> bool {
        self.phase() == Phase::Completed
    }

    /// Paused somewhere before the final step
    pub fn can_resume(&self) -> bool {
        self.phase() == Phase::Paused && !self.at_last_step()
    }

    pub fn can_skip(&self) -> bool {
        !self.at_last_step()
    }

    /// Start from NotStarted or resume from Paused. Returns whether the
    /// session is now running.
    pub fn start(&mut self) -> bool {
        match self.phase() {
            Phase::Running => true,
            Phase::NotStarted => {
                self.state.is_running = true;
                self.state.has_started = true;
                true
            }
            Phase::Paused if self.can_resume() => {
                self.state.is_running = true;
                true
            }
            Phase::Paused | Phase::Completed => false,
        }
    }

    pub fn resume(&mut self) -> bool {
        self.start()
    }

    /// Stop the countdown without touching step or time remaining
    pub fn pause(&mut self) {
        self.state.is_running = false;
    }

    pub fn reset(&mut self) {
        self.state = SessionState::initial(&self.plan);
    }

    /// Jump to the next step right away. No-op on the last step.
    pub fn skip(&mut self) -> Option<Transition> {
        if self.at_last_step() {
            return None;
        }
        Some(self.advance())
    }

    /// One elapsed second. Reaching zero moves to the next step in the same
    /// tick, or completes the session on the last step.
    pub fn tick(&mut self) -> Option<Transition> {
        if !self.state.is_running {
            return None;
        }

        self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
        if self.state.time_remaining > 0 {
            return None;
        }

        if self.at_last_step() {
            self.cue.play();
            self.state.is_running = false;
            Some(Transition::Completed)
        } else {
            Some(self.advance())
        }
    }

    fn advance(&mut self) -> Transition {
        self.cue.play();
        let from = self.state.current_step_index;
        let to = from + 1;
        self.state.current_step_index = to;
        self.state.time_remaining = self.plan.step(to).duration_secs;
        Transition::Advanced { from, to }
    }

    pub fn total_duration_secs(&self) -> u32 {
        self.plan.total_duration_secs()
    }

    pub fn elapsed_secs(&self) -> u32 {
        let done_in_step = self.current_step().duration_secs - self.state.time_remaining;
        self.plan.duration_before(self.state.current_step_index) + done_in_step
    }

    /// Fraction of the whole plan already done, in [0, 1]
    pub fn progress(&self) -> f64 {
        f64::from(self.elapsed_secs()) / f64::from(self.total_duration_secs())
    }

    pub fn formatted_time_remaining(&self) -> String {
        format_time(self.state.time_remaining)
    }

    /// "Exercise n of N", one-based
    pub fn exercise_position(&self) -> (usize, usize) {
        (self.state.current_step_index + 1, self.plan.len())
    }
}

/// Render seconds as `m:ss`
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Step;
    use assert_matches::assert_matches;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct CountingCue(Rc<Cell<usize>>);

    impl Cue for CountingCue {
        fn play(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn three_step_session() -> (Session, Rc<Cell<usize>>) {
        let plan = Plan::new(vec![
            Step::new("A", 45, "10 reps", "go"),
            Step::new("Rest", 15, "Recovery", "breathe"),
            Step::new("B", 30, "10 reps", "go"),
        ])
        .unwrap();
        let cue = CountingCue::default();
        let count = cue.0.clone();
        (Session::new(plan, Box::new(cue)), count)
    }

    fn tick_n(session: &mut Session, n: u32) {
        for _ in 0..n {
            session.tick();
        }
    }

    #[test]
    fn new_session_is_not_started() {
        let (session, _) = three_step_session();
        assert_eq!(session.phase(), Phase::NotStarted);
        assert_eq!(
            session.state(),
            SessionState {
                current_step_index: 0,
                time_remaining: 45,
                is_running: false,
                has_started: false,
            }
        );
        assert_eq!(session.formatted_time_remaining(), "0:45");
    }

    #[test]
    fn three_step_scenario_runs_to_completion() {
        let (mut session, cues) = three_step_session();
        assert!(session.start());

        tick_n(&mut session, 45);
        assert_eq!(session.current_step_index(), 1);
        assert_eq!(session.time_remaining(), 15);

        tick_n(&mut session, 15);
        assert_eq!(session.current_step_index(), 2);
        assert_eq!(session.time_remaining(), 30);

        tick_n(&mut session, 30);
        assert_eq!(session.current_step_index(), 2);
        assert_eq!(session.time_remaining(), 0);
        assert!(!session.is_running());
        assert_eq!(session.phase(), Phase::Completed);
        assert_eq!(cues.get(), 3);
        assert_eq!(session.elapsed_secs(), session.total_duration_secs());
        assert!((session.progress() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn tick_reports_transitions() {
        let (mut session, _) = three_step_session();
        session.start();
        tick_n(&mut session, 44);
        assert_matches!(session.tick(), Some(Transition::Advanced { from: 0, to: 1 }));
        assert_eq!(session.tick(), None);
    }

    #[test]
    fn tick_while_not_running_does_nothing() {
        let (mut session, cues) = three_step_session();
        assert_eq!(session.tick(), None);
        assert_eq!(session.time_remaining(), 45);

        session.start();
        session.tick();
        session.pause();
        assert_eq!(session.tick(), None);
        assert_eq!(session.time_remaining(), 44);
        assert_eq!(cues.get(), 0);
    }

    #[test]
    fn pause_then_start_resumes_exactly() {
        let (mut session, _) = three_step_session();
        session.start();
        tick_n(&mut session, 25);
        assert_eq!(session.time_remaining(), 20);

        session.pause();
        assert_eq!(session.phase(), Phase::Paused);
        assert!(session.can_resume());
        let paused = session.state();

        assert!(session.start());
        assert_eq!(session.current_step_index(), paused.current_step_index);
        assert_eq!(session.time_remaining(), 20);
        assert_eq!(session.phase(), Phase::Running);
    }

    #[test]
    fn skip_advances_and_keeps_running_flag() {
        let (mut session, cues) = three_step_session();
        session.start();
        tick_n(&mut session, 10);
        assert_matches!(session.skip(), Some(Transition::Advanced { from: 0, to: 1 }));
        assert_eq!(session.time_remaining(), 15);
        assert!(session.is_running());

        session.pause();
        session.skip();
        assert_eq!(session.current_step_index(), 2);
        assert_eq!(session.time_remaining(), 30);
        assert!(!session.is_running());
        assert_eq!(cues.get(), 2);
    }

    #[test]
    fn skip_on_last_step_is_a_no_op() {
        let (mut session, cues) = three_step_session();
        session.start();
        session.skip();
        session.skip();
        tick_n(&mut session, 3);
        let before = session.state();
        let played = cues.get();

        assert_eq!(session.skip(), None);
        assert_eq!(session.state(), before);
        assert_eq!(cues.get(), played);
        assert!(!session.can_skip());
    }

    #[test]
    fn reset_restores_initial_state() {
        let (mut session, _) = three_step_session();
        let initial = session.state();
        session.start();
        session.skip();
        tick_n(&mut session, 7);
        session.reset();
        assert_eq!(session.state(), initial);
        assert_eq!(session.phase(), Phase::NotStarted);

        session.start();
        tick_n(&mut session, 90);
        assert!(session.is_completed());
        session.reset();
        assert_eq!(session.state(), initial);
    }

    #[test]
    fn completed_session_cannot_be_restarted_without_reset() {
        let (mut session, cues) = three_step_session();
        session.start();
        tick_n(&mut session, 90);
        assert!(session.is_completed());

        assert!(!session.start());
        assert!(!session.is_running());
        assert_eq!(session.tick(), None);
        assert_eq!(cues.get(), 3);
    }

    #[test]
    fn paused_on_last_step_is_not_resumable() {
        let (mut session, _) = three_step_session();
        session.start();
        session.skip();
        session.skip();
        tick_n(&mut session, 5);
        session.pause();

        assert_eq!(session.phase(), Phase::Paused);
        assert!(!session.can_resume());
        assert!(!session.start());
        assert_eq!(session.time_remaining(), 25);
    }

    #[test]
    fn elapsed_counts_prior_steps_and_current_progress() {
        let (mut session, _) = three_step_session();
        session.start();
        tick_n(&mut session, 50);
        assert_eq!(session.elapsed_secs(), 50);
        assert_eq!(session.total_duration_secs(), 90);
        assert!((session.progress() - 50.0 / 90.0).abs() < 1e-9);
    }

    #[test]
    fn skip_counts_the_skipped_step_as_elapsed() {
        let (mut session, _) = three_step_session();
        session.start();
        tick_n(&mut session, 5);
        session.skip();
        assert_eq!(session.elapsed_secs(), 45);
    }

    #[test]
    fn exercise_position_is_one_based() {
        let (mut session, _) = three_step_session();
        assert_eq!(session.exercise_position(), (1, 3));
        session.skip();
        assert_eq!(session.exercise_position(), (2, 3));
    }

    #[test]
    fn format_time_pads_seconds() {
        assert_eq!(format_time(75), "1:15");
        assert_eq!(format_time(5), "0:05");
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(600), "10:00");
    }

    #[test]
    fn phase_display_names() {
        assert_eq!(Phase::NotStarted.to_string(), "Ready");
        assert_eq!(Phase::Running.to_string(), "Running");
        assert_eq!(Phase::Paused.to_string(), "Paused");
        assert_eq!(Phase::Completed.to_string(), "Complete");
    }
}
