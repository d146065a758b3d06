//! Line-mode rendering for the command interpreter.
//!
//! The shell runs in the terminal's normal (cooked) mode, so these helpers
//! only colour text and never move the cursor except to clear the screen.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use super::C_PHOSPHOR;
use crate::shell::{History, Session};

const C_PROMPT_GAME: Color = Color::Yellow;
const C_OUTPUT: Color = Color::White;

/// Prompt text for the current session.
pub fn prompt_for(session: &Session) -> &'static str {
    match session {
        Session::Idle => "guest@terminal-blog:~$ ",
        Session::Guessing(_) => "guess> ",
        Session::Hangman(_) => "hangman> ",
    }
}

pub fn print_prompt<W: Write>(out: &mut W, session: &Session) -> std::io::Result<()> {
    let color = match session {
        Session::Idle => C_PHOSPHOR,
        _ => C_PROMPT_GAME,
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(prompt_for(session)))?;
    out.queue(style::ResetColor)?;
    out.flush()
}

/// Print a command's output block.  Empty output prints nothing.
pub fn print_output<W: Write>(out: &mut W, text: &str) -> std::io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    out.queue(style::SetForegroundColor(C_OUTPUT))?;
    for line in text.lines() {
        out.queue(Print(line))?;
        out.queue(Print("\n"))?;
    }
    out.queue(style::ResetColor)?;
    out.flush()
}

pub fn print_banner<W: Write>(out: &mut W, text: &str) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_PHOSPHOR))?;
    out.queue(Print(text))?;
    out.queue(Print("\n\n"))?;
    out.queue(style::ResetColor)?;
    out.flush()
}

/// Wipe the screen and replay the banner plus whatever history remains.
pub fn redraw<W: Write>(out: &mut W, banner: &str, history: &History) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;
    print_banner(out, banner)?;
    for entry in history.entries() {
        out.queue(style::SetForegroundColor(C_PHOSPHOR))?;
        out.queue(Print(prompt_for(&Session::Idle)))?;
        out.queue(style::ResetColor)?;
        out.queue(Print(&entry.command))?;
        out.queue(Print("\n"))?;
        print_output(out, &entry.output)?;
    }
    out.flush()
}
