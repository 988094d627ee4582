// src/render/score.rs
//! Bounded count-up animation for the overall score

pub const DEFAULT_SCORE_STEPS: u32 = 50;

/// Yields the value to display on each tick. Advances by `target / steps`,
/// stops once the target is reached or passed or the step budget runs out,
/// and always yields the exact target last.
#[derive(Debug, Clone)]
pub struct ScoreCounter {
    target: f64,
    increment: f64,
    current: f64,
    ticks: u32,
    steps: u32,
    done: bool,
}

impl ScoreCounter {
    pub fn new(target: f64, steps: u32) -> Self {
        let steps = steps.max(1);
        Self {
            target,
            increment: target / f64::from(steps),
            current: 0.0,
            ticks: 0,
            steps,
            done: false,
        }
    }

    fn reached(&self) -> bool {
        if self.increment >= 0.0 {
            self.current >= self.target
        } else {
            self.current <= self.target
        }
    }
}

impl Iterator for ScoreCounter {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.done {
            return None;
        }

        self.ticks += 1;
        self.current += self.increment;

        if self.reached() || self.ticks >= self.steps || !self.current.is_finite() {
            self.current = self.target;
            self.done = true;
        }

        Some(self.current)
    }
}

/// Scores are displayed as whole numbers.
pub fn format_score(value: f64) -> String {
    format!("{}", value.round() as i64)
}
