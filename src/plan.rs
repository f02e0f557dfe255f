use thiserror::Error;

/// One entry of a workout: an exercise or a rest interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub name: &'static str,
    pub duration_secs: u32,
    pub reps: &'static str,
    pub instructions: &'static str,
}

impl Step {
    pub const fn new(
        name: &'static str,
        duration_secs: u32,
        reps: &'static str,
        instructions: &'static str,
    ) -> Self {
        Self {
            name,
            duration_secs,
            reps,
            instructions,
        }
    }

    /// Rest and cool down intervals are not counted as exercises
    pub fn is_exercise(&self) -> bool {
        !self.name.contains("Rest") && !self.name.contains("Cool")
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("a plan needs at least one step")]
    Empty,
    #[error("step {index} ({name}) has a zero duration")]
    ZeroDuration { index: usize, name: &'static str },
}

/// Ordered, immutable sequence of steps. Never empty, every duration >= 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    steps: Vec<Step>,
}

impl Plan {
    pub fn new(steps: Vec<Step>) -> Result<Self, PlanError> {
        if steps.is_empty() {
            return Err(PlanError::Empty);
        }
        if let Some((index, step)) = steps
            .iter()
            .enumerate()
            .find(|(_, s)| s.duration_secs == 0)
        {
            return Err(PlanError::ZeroDuration {
                index,
                name: step.name,
            });
        }
        Ok(Self { steps })
    }

    /// The built-in dumbbell routine
    pub fn full_body() -> Self {
        Self {
            steps: FULL_BODY.to_vec(),
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn step(&self, index: usize) -> &Step {
        &self.steps[index]
    }

    pub fn total_duration_secs(&self) -> u32 {
        self.steps.iter().map(|s| s.duration_secs).sum()
    }

    /// Sum of durations of every step strictly before `index`
    pub fn duration_before(&self, index: usize) -> u32 {
        self.steps[..index].iter().map(|s| s.duration_secs).sum()
    }

    pub fn exercise_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_exercise()).count()
    }
}

impl Default for Plan {
    fn default() -> Self {
        Self::full_body()
    }
}

pub const FULL_BODY: [Step; 16] = [
    Step::new(
        "Goblet Squats",
        45,
        "12-15 reps",
        "Hold one dumbbell vertically at chest height. Squat down keeping chest up, then drive through heels to stand.",
    ),
    Step::new(
        "Rest",
        15,
        "Recovery",
        "Breathe deeply and prepare for next exercise.",
    ),
    Step::new(
        "Push-ups (Dumbbells as Handles)",
        30,
        "10-15 reps",
        "Use dumbbells as push-up handles for better range of motion. Keep core tight and body straight.",
    ),
    Step::new("Rest", 15, "Recovery", "Shake out arms and shoulders."),
    Step::new(
        "Bent-Over Dumbbell Rows",
        45,
        "12-15 reps each arm",
        "Hinge at hips, keep back flat. Pull dumbbell to hip, squeeze shoulder blade. Alternate arms or do one side at a time.",
    ),
    Step::new("Rest", 15, "Recovery", "Stay hydrated if needed."),
    Step::new(
        "Standing Shoulder Press",
        45,
        "10-12 reps",
        "Press dumbbells overhead from shoulder height. Keep core engaged and avoid arching lower back.",
    ),
    Step::new("Rest", 15, "Recovery", "Roll shoulders and breathe."),
    Step::new(
        "Dumbbell Romanian Deadlifts",
        45,
        "12-15 reps",
        "Hinge at hips with slight knee bend, lower dumbbells along legs. Feel stretch in hamstrings, return to standing.",
    ),
    Step::new("Rest", 15, "Recovery", "Almost there! Catch your breath."),
    Step::new(
        "Bicep Curls",
        30,
        "12-15 reps",
        "Keep elbows at sides, curl dumbbells to shoulders. Control the descent.",
    ),
    Step::new("Rest", 15, "Recovery", "Prepare for triceps."),
    Step::new(
        "Overhead Tricep Extensions",
        30,
        "12-15 reps",
        "Hold one dumbbell with both hands overhead. Lower behind head, then extend arms.",
    ),
    Step::new("Rest", 15, "Recovery", "Final exercise coming up!"),
    Step::new(
        "Dumbbell Russian Twists",
        45,
        "20-30 twists",
        "Sit with knees bent, hold one dumbbell at chest. Lean back slightly, rotate torso side to side.",
    ),
    Step::new(
        "Cool Down",
        30,
        "Stretch",
        "Light stretching: arms overhead, touch toes, quad stretches. Great work!",
    ),
];

/// Static header and info card text shown above the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkoutInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub duration_label: &'static str,
    pub equipment: &'static str,
    pub focus: &'static str,
}

pub const FULL_BODY_INFO: WorkoutInfo = WorkoutInfo {
    title: "15-Minute Full Body Workout",
    description: "Efficient dumbbell routine targeting all major muscle groups",
    duration_label: "15 min",
    equipment: "5kg Dumbbells",
    focus: "Full Body",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tip {
    pub heading: &'static str,
    pub body: &'static str,
}

pub const TRAINING_TIPS: [Tip; 6] = [
    Tip {
        heading: "Consistency over perfection",
        body: "Even 3-4 days per week will yield results. Don't stress about missing days.",
    },
    Tip {
        heading: "Progressive overload",
        body: "As exercises become easier, slow down reps for more time under tension or add a pause at peak contraction.",
    },
    Tip {
        heading: "Form first",
        body: "Quality reps beat quantity. Control the weight through full range of motion.",
    },
    Tip {
        heading: "Nutrition matters",
        body: "Protein (1.6-2.2g per kg bodyweight) and slight calorie surplus support muscle growth.",
    },
    Tip {
        heading: "Recovery is growth",
        body: "Muscle builds during rest. Get 7-9 hours of sleep when possible.",
    },
    Tip {
        heading: "Track progress",
        body: "Note when exercises feel easier. This indicates strength gains.",
    },
];
