//! Hangman sub-game.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::Step;

pub const MAX_TRIES: u8 = 6;

pub const WORDS: &[&str] = &[
    "TERMINAL", "EXPLOIT", "KERNEL", "COMPILER", "SOCKET", "PACKET", "BINARY", "DEBUGGER",
    "TTEOKBOKKI", "SHELL",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HangmanGame {
    word: String,
    guessed: BTreeSet<char>,
    tries_left: u8,
}

impl HangmanGame {
    pub fn new(word: &str) -> Self {
        HangmanGame {
            word: word.to_uppercase(),
            guessed: BTreeSet::new(),
            tries_left: MAX_TRIES,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::new(WORDS.choose(rng).copied().unwrap_or("TERMINAL"))
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn tries_left(&self) -> u8 {
        self.tries_left
    }

    pub fn guessed(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    /// The word with unguessed letters as `_`, letters separated by spaces.
    pub fn masked(&self) -> String {
        self.word
            .chars()
            .map(|c| if self.guessed.contains(&c) { c.to_string() } else { "_".to_string() })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn intro(&self) -> String {
        format!(
            "Let's play hangman! Guess the word one letter at a time.\n\n{}\nTries left: {}",
            self.masked(),
            self.tries_left
        )
    }

    pub fn play(&mut self, line: &str) -> Step {
        let mut chars = line.trim().chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => c.to_ascii_uppercase(),
            _ => return Step::Continue("Please enter a single letter.".to_string()),
        };

        if !self.guessed.insert(letter) {
            return Step::Continue(format!("You already guessed '{}'.", letter));
        }
        let hit = self.word.contains(letter);
        if !hit {
            self.tries_left = self.tries_left.saturating_sub(1);
        }

        let masked = self.masked();
        if !masked.contains('_') {
            return Step::Done(format!("{}\nYou won! The word was {}.", masked, self.word));
        }
        if self.tries_left == 0 {
            return Step::Done(format!("Game over! The word was {}.", self.word));
        }

        let verdict = if hit {
            format!("Good guess! '{}' is in the word.", letter)
        } else {
            format!("No '{}' in the word.", letter)
        };
        Step::Continue(format!("{}\n{}\nTries left: {}", verdict, masked, self.tries_left))
    }
}
