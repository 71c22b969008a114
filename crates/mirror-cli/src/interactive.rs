//! Interactive collision prompt
//!
//! Uses dialoguer for a terminal confirmation when the initial mirror finds
//! an entry already in the replica.

use colored::Colorize;
use dialoguer::Confirm;
use mirror_core::{Collision, CollisionPrompt, Resolution};
use std::io;

/// [`CollisionPrompt`] backed by a dialoguer confirmation.
///
/// Only used when standard input is a terminal; piped input goes through
/// the core's line prompt instead.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl CollisionPrompt for TerminalPrompt {
    fn resolve(&mut self, collision: &Collision) -> mirror_core::Result<Resolution> {
        println!();
        println!("{}", collision.summary().yellow());

        let replace = Confirm::new()
            .with_prompt("Do you want to replace it?")
            .default(false)
            .interact()
            .map_err(|e| mirror_core::Error::Prompt(io::Error::other(e)))?;

        Ok(if replace {
            Resolution::Replace
        } else {
            Resolution::Keep
        })
    }
}
