//! Counter animation: parse a displayed statistic, then count up to it one
//! animation frame at a time.

use serde::{Deserialize, Serialize};

use crate::config::CounterConfig;

/// Lifecycle of one counter element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterPhase {
    Idle,
    Animating,
    Done,
    /// The text held no digits; it was left untouched.
    Skipped,
}

/// Numeric target and literal suffix pulled out of a counter's text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSpec {
    pub target: u64,
    pub suffix: String,
}

/// Split counter text into its digits and everything that is neither a digit
/// nor a comma. `"1,234+"` gives `1234` and `"+"`.
///
/// Returns `None` when the text has no digits, or more than fit in a `u64`.
pub fn parse_counter_text(text: &str) -> Option<CounterSpec> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let target = digits.parse::<u64>().ok()?;
    let suffix = text
        .chars()
        .filter(|c| !c.is_ascii_digit() && *c != ',')
        .collect();
    Some(CounterSpec { target, suffix })
}

/// Render an integer with a separator between each group of three digits.
pub fn format_thousands(value: u64, separator: &str) -> String {
    let raw = value.to_string();
    let lead = raw.len() % 3;
    let mut out = String::with_capacity(raw.len() + raw.len() / 3 * separator.len());
    for (i, ch) in raw.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Result of advancing a counter by one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterStep {
    pub text: String,
    pub done: bool,
}

/// Running state of one animating counter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CounterAnimation {
    spec: CounterSpec,
    increment: f64,
    total_steps: u32,
    steps_taken: u32,
    done: bool,
}

impl CounterAnimation {
    pub fn new(spec: CounterSpec, cfg: &CounterConfig) -> Self {
        let interval = cfg.frame_interval_ms.max(1) as f64;
        let frames = cfg.duration_ms as f64 / interval;
        let target = spec.target as f64;
        let increment = if frames > 0.0 { target / frames } else { target };
        let total_steps = (frames.ceil() as u32).max(1);
        Self {
            spec,
            increment,
            total_steps,
            steps_taken: 0,
            done: false,
        }
    }

    pub fn spec(&self) -> &CounterSpec {
        &self.spec
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    /// Advance one frame and return the text to display.
    ///
    /// Intermediate values are `floor(k * increment)`; the final step renders
    /// the exact target followed by the suffix. Calling after completion
    /// keeps returning the final text.
    pub fn step(&mut self, separator: &str) -> CounterStep {
        if !self.done {
            self.steps_taken += 1;
            let value = self.steps_taken as f64 * self.increment;
            if value < self.spec.target as f64 && self.steps_taken < self.total_steps {
                return CounterStep {
                    text: format_thousands(value.floor() as u64, separator),
                    done: false,
                };
            }
            self.done = true;
        }
        CounterStep {
            text: format!(
                "{}{}",
                format_thousands(self.spec.target, separator),
                self.spec.suffix
            ),
            done: true,
        }
    }
}
