//! Collision resolution for the initial mirror

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::{Error, Result};

/// Kind of entry that collided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    fn noun(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

/// A same-named entry already present at a copy destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub kind: EntryKind,
    /// Path relative to the replica root
    pub relative: PathBuf,
    /// Full destination path
    pub destination: PathBuf,
}

impl Collision {
    /// One-line description of the clash.
    pub fn summary(&self) -> String {
        format!(
            "A {} with the name \"{}\" already exists in the destination folder.",
            self.kind.noun(),
            self.relative.display()
        )
    }

    /// The question put to the user.
    pub fn question(&self) -> String {
        format!("{}\nDo you want to replace it? (y/n)", self.summary())
    }
}

/// Outcome of a collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Replace,
    Keep,
}

/// Decides collisions when the policy is `Prompt`.
pub trait CollisionPrompt {
    fn resolve(&mut self, collision: &Collision) -> Result<Resolution>;
}

/// Line-oriented `y`/`n` prompt; asks again until the answer is valid.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompt, returning its output (useful for inspecting
    /// what was asked).
    pub fn into_output(self) -> W {
        self.output
    }
}

impl LinePrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process's standard input and output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> CollisionPrompt for LinePrompt<R, W> {
    fn resolve(&mut self, collision: &Collision) -> Result<Resolution> {
        let mut answer = String::new();
        loop {
            writeln!(self.output, "\n{}", collision.question()).map_err(Error::Prompt)?;
            self.output.flush().map_err(Error::Prompt)?;

            answer.clear();
            let read = self.input.read_line(&mut answer).map_err(Error::Prompt)?;
            if read == 0 {
                return Err(Error::Prompt(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before an answer was given",
                )));
            }

            match answer.trim() {
                "y" => return Ok(Resolution::Replace),
                "n" => return Ok(Resolution::Keep),
                _ => continue,
            }
        }
    }
}
