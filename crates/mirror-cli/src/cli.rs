//! CLI argument parsing using clap derive

use clap::{Parser, ValueEnum};
use mirror_core::{
    ChangeDetection, CollisionPolicy, ConfigLayer, ErrorPolicy, MirrorConfig, SyncInterval,
};
use mirror_fs::ConfigStore;
use std::path::PathBuf;

use crate::error::{CliError, Result};

/// Directory Mirror - Keep a replica directory identical to a source directory
///
/// Runs a full copy first, then reconciles the replica with the source once
/// every INTERVAL, logging every creation, copy and removal.
///
/// Example:
///   mirror ./photos /mnt/backup/photos ./mirror.txt 00:05:00
#[derive(Parser, Debug)]
#[command(name = "mirror")]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// Directory to mirror; must exist
    pub source: Option<PathBuf>,

    /// Mirror directory; created if absent
    pub replica: Option<PathBuf>,

    /// Activity log file; created if absent
    pub log_file: Option<PathBuf>,

    /// Time between pass starts, as HH:MM:SS
    pub interval: Option<String>,

    /// Read settings from a TOML, JSON or YAML file; arguments override it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// What to do when the first copy finds an entry already in the replica
    #[arg(long, value_enum, value_name = "POLICY")]
    pub on_collision: Option<CollisionArg>,

    /// How to decide that a source file changed
    #[arg(long, value_enum, value_name = "MODE")]
    pub change_detection: Option<DetectionArg>,

    /// What a failed copy or directory creation does
    #[arg(long, value_enum, value_name = "POLICY")]
    pub on_copy_error: Option<ErrorArg>,

    /// Give replica files the time they were copied instead of the source's
    #[arg(long)]
    pub no_preserve_mtime: bool,

    /// Don't echo activity lines to the console
    #[arg(short, long)]
    pub quiet: bool,

    /// Run a single pass and exit
    #[arg(long)]
    pub once: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionArg {
    /// Replace the existing entry
    Overwrite,
    /// Leave the existing entry alone
    Keep,
    /// Ask for each collision
    Prompt,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionArg {
    /// Modification time only
    Mtime,
    /// Modification time or size
    Size,
    /// Modification time or content checksum
    Hash,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorArg {
    /// Warn and carry on with the next entry
    Skip,
    /// Stop the pass and retry next interval
    AbortPass,
    /// Stop the program
    Exit,
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Overwrite => Self::Overwrite,
            CollisionArg::Keep => Self::Keep,
            CollisionArg::Prompt => Self::Prompt,
        }
    }
}

impl From<DetectionArg> for ChangeDetection {
    fn from(arg: DetectionArg) -> Self {
        match arg {
            DetectionArg::Mtime => Self::ModifiedTime,
            DetectionArg::Size => Self::SizeAndModifiedTime,
            DetectionArg::Hash => Self::ContentHash,
        }
    }
}

impl From<ErrorArg> for ErrorPolicy {
    fn from(arg: ErrorArg) -> Self {
        match arg {
            ErrorArg::Skip => Self::SkipEntry,
            ErrorArg::AbortPass => Self::AbortPass,
            ErrorArg::Exit => Self::Exit,
        }
    }
}

impl Cli {
    /// The settings given on the command line.
    ///
    /// Flags that were not passed stay unset so a config file can supply
    /// them.
    pub fn layer(&self) -> Result<ConfigLayer> {
        let interval = self
            .interval
            .as_deref()
            .map(str::parse::<SyncInterval>)
            .transpose()?;

        Ok(ConfigLayer {
            source: self.source.clone(),
            replica: self.replica.clone(),
            log_file: self.log_file.clone(),
            interval,
            on_collision: self.on_collision.map(Into::into),
            change_detection: self.change_detection.map(Into::into),
            on_copy_error: self.on_copy_error.map(Into::into),
            preserve_mtime: self.no_preserve_mtime.then_some(false),
            persist_warnings: None,
            echo_to_console: self.quiet.then_some(false),
        })
    }

    /// Merge the config file, if any, under the command line and resolve.
    pub fn resolve(&self) -> Result<MirrorConfig> {
        let mut layer = match &self.config {
            Some(path) => ConfigStore::new().load::<ConfigLayer>(path)?,
            None => ConfigLayer::default(),
        };
        layer.merge(self.layer()?);

        layer.resolve().map_err(|e| match e {
            mirror_core::Error::MissingSetting { name } => CliError::user(format!(
                "missing {}: pass it as an argument or set it in --config",
                name.replace('_', " ")
            )),
            other => other.into(),
        })
    }
}
