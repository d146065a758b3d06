//! Number-guessing sub-game.

use rand::Rng;

use super::Step;

pub const LOWEST: i64 = 1;
pub const HIGHEST: i64 = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuessGame {
    target: i64,
    attempts: u32,
}

impl GuessGame {
    pub fn new(target: i64) -> Self {
        GuessGame { target, attempts: 0 }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::new(rng.gen_range(LOWEST..=HIGHEST))
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    /// Guesses that parsed as numbers so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn intro(&self) -> String {
        format!(
            "I'm thinking of a number between {} and {}. Take a guess!",
            LOWEST, HIGHEST
        )
    }

    pub fn play(&mut self, line: &str) -> Step {
        let Ok(guess) = line.trim().parse::<i64>() else {
            return Step::Continue("Please enter a valid number.".to_string());
        };
        self.attempts += 1;

        if guess == self.target {
            let noun = if self.attempts == 1 { "attempt" } else { "attempts" };
            Step::Done(format!(
                "Correct! You guessed the number in {} {}.",
                self.attempts, noun
            ))
        } else if guess < self.target {
            Step::Continue("Higher...".to_string())
        } else {
            Step::Continue("Lower...".to_string())
        }
    }
}
