use super::session::WriteSession;
use crate::errors::BootmacError;
use crate::safety::{self, RejectionReason, ValidatedDisk};
use anyhow::Result;
use bootmac_hal::{combined_output, DiskUtilOps, FlashOps, SystemHal, RAW_WRITE_BLOCK_SIZE};
use log::{info, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Identifier prompts before the interactive flow gives up.
pub const MAX_IDENTIFIER_ATTEMPTS: usize = 3;

/// `Idle -> Unmounting -> Writing -> Ejected`, or `Failed` from either active step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteState {
    Idle,
    Unmounting,
    Writing,
    Ejected,
    Failed,
}

impl WriteState {
    pub fn is_terminal(self) -> bool {
        matches!(self, WriteState::Ejected | WriteState::Failed)
    }

    fn can_advance_to(self, next: WriteState) -> bool {
        use WriteState::*;
        matches!(
            (self, next),
            (Idle, Unmounting)
                | (Unmounting, Writing)
                | (Unmounting, Failed)
                | (Writing, Ejected)
                | (Writing, Failed)
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WriteFailure {
    #[error("not confirmed (type YES exactly to proceed); nothing was written")]
    NotConfirmed,

    #[error("session was confirmed for {session} but the validated target is {target}")]
    TargetMismatch { session: String, target: String },

    #[error("source image not found or not a regular file: {}", .0.display())]
    SourceUnavailable(PathBuf),

    #[error("unmounting {identifier} failed: {diagnostic}")]
    UnmountFailed {
        identifier: String,
        diagnostic: String,
    },

    #[error("raw write to {node} failed (exit={code:?})")]
    RawWriteFailed { node: String, code: Option<i32> },

    #[error("could not launch {program}: {message}")]
    Launch { program: String, message: String },

    #[error("invalid write state transition {from:?} -> {to:?}")]
    InvalidTransition { from: WriteState, to: WriteState },
}

/// Result of a completed raw write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub identifier: String,
    /// Set when the image was written but `diskutil eject` failed.
    pub eject_warning: Option<String>,
}

/// Drives one write session through unmount, raw write and eject. No step is retried.
pub struct WriteOrchestrator<'a, H: ?Sized> {
    hal: &'a H,
    state: WriteState,
    history: Vec<WriteState>,
}

impl<'a, H: SystemHal + ?Sized> WriteOrchestrator<'a, H> {
    pub fn new(hal: &'a H) -> Self {
        Self {
            hal,
            state: WriteState::Idle,
            history: vec![WriteState::Idle],
        }
    }

    pub fn state(&self) -> WriteState {
        self.state
    }

    /// Every state visited, starting with `Idle`.
    pub fn history(&self) -> &[WriteState] {
        &self.history
    }

    fn advance(&mut self, next: WriteState) -> Result<(), WriteFailure> {
        if !self.state.can_advance_to(next) {
            return Err(WriteFailure::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        log::debug!("write state: {:?} -> {:?}", self.state, next);
        self.state = next;
        self.history.push(next);
        Ok(())
    }

    fn fail(&mut self, failure: WriteFailure) -> WriteFailure {
        if let Err(err) = self.advance(WriteState::Failed) {
            log::error!("{}", err);
        }
        log::error!("❌ {}", failure);
        failure
    }

    pub fn run(
        &mut self,
        session: WriteSession,
        target: &ValidatedDisk,
    ) -> Result<WriteOutcome, WriteFailure> {
        if self.state != WriteState::Idle {
            return Err(WriteFailure::InvalidTransition {
                from: self.state,
                to: WriteState::Unmounting,
            });
        }

        // Gates. Nothing below this block may run unless all of them pass.
        if !session.is_confirmed() {
            warn!("🛑 Write not confirmed; {} left untouched", target.identifier());
            return Err(WriteFailure::NotConfirmed);
        }
        if session.target() != target.identifier() {
            return Err(WriteFailure::TargetMismatch {
                session: session.target().to_string(),
                target: target.identifier().to_string(),
            });
        }
        if !session.source().is_file() {
            return Err(WriteFailure::SourceUnavailable(
                session.source().to_path_buf(),
            ));
        }

        let identifier = target.identifier().as_str();

        self.advance(WriteState::Unmounting)?;
        info!("🔌 Unmounting all volumes on {}", target.block_node());
        match self.hal.diskutil_unmount_disk(identifier) {
            Ok(output) if output.status.success() => {
                if session.debug() {
                    info!("{}", combined_output(&output));
                }
            }
            Ok(output) => {
                return Err(self.fail(WriteFailure::UnmountFailed {
                    identifier: identifier.to_string(),
                    diagnostic: combined_output(&output),
                }));
            }
            Err(err) => {
                return Err(self.fail(WriteFailure::UnmountFailed {
                    identifier: identifier.to_string(),
                    diagnostic: err.to_string(),
                }));
            }
        }

        self.advance(WriteState::Writing)?;
        info!(
            "💾 Writing {} -> {} (bs={})",
            session.source().display(),
            target.raw_node(),
            RAW_WRITE_BLOCK_SIZE
        );
        info!("⏳ This can take a long time. Press Ctrl+T for dd progress.");
        let status = match self.hal.dd_raw_write(session.source(), identifier) {
            Ok(status) => status,
            Err(err) => {
                return Err(self.fail(WriteFailure::Launch {
                    program: bootmac_hal::DD.to_string(),
                    message: err.to_string(),
                }));
            }
        };
        if !status.success() {
            return Err(self.fail(WriteFailure::RawWriteFailed {
                node: target.raw_node(),
                code: status.code(),
            }));
        }
        info!("✅ Image written to {}", target.raw_node());

        // The write already succeeded; eject problems are only reported.
        let eject_warning = match self.hal.diskutil_eject(identifier) {
            Ok(output) if output.status.success() => {
                info!("⏏️  Ejected {}; it is safe to remove the drive", target.block_node());
                None
            }
            Ok(output) => Some(format!(
                "eject of {} failed: {}",
                identifier,
                combined_output(&output)
            )),
            Err(err) => Some(format!("eject of {} failed: {}", identifier, err)),
        };
        if let Some(warning) = &eject_warning {
            warn!("⚠️  {}", warning);
        }
        self.advance(WriteState::Ejected)?;

        Ok(WriteOutcome {
            identifier: identifier.to_string(),
            eject_warning,
        })
    }
}

/// Run a single write session against an already validated disk.
pub fn write<H: SystemHal + ?Sized>(
    hal: &H,
    session: WriteSession,
    target: &ValidatedDisk,
) -> Result<WriteOutcome, WriteFailure> {
    WriteOrchestrator::new(hal).run(session, target)
}

/// Operator interaction needed by the interactive write flow.
pub trait WritePrompter {
    /// Ask for a disk identifier after showing `inventory`.
    ///
    /// `rejected` is the reason the previous answer was refused, if any.
    /// Returning `None` abandons the flow.
    fn disk_identifier(
        &mut self,
        inventory: &str,
        rejected: Option<&RejectionReason>,
    ) -> Result<Option<String>>;

    /// Ask the operator to type the confirmation literal for this source / target pair.
    fn confirmation(&mut self, source: &Path, target: &ValidatedDisk) -> Result<String>;
}

/// Inputs for [`run_with_hal`].
#[derive(Debug, Clone)]
pub struct WriteRequest {
    pub image: PathBuf,
    /// Pre-selected identifier (`--disk`); validated once, never re-prompted.
    pub disk: Option<String>,
    pub debug: bool,
}

/// Privilege check -> disk selection and validation -> confirmation -> write.
pub fn run_with_hal<H, P>(hal: &H, request: &WriteRequest, prompter: &mut P) -> Result<WriteOutcome>
where
    H: SystemHal + ?Sized,
    P: WritePrompter + ?Sized,
{
    info!("💽 Write image to USB drive");

    if !hal.is_elevated() {
        return Err(BootmacError::PrivilegeRequired("Writing to a disk".to_string()).into());
    }
    if !request.image.is_file() {
        return Err(BootmacError::ImageUnavailable(request.image.clone()).into());
    }
    info!("📀 Image: {}", request.image.display());

    let target = select_target(hal, request, prompter)?;
    let confirmation = prompter.confirmation(&request.image, &target)?;
    let session = WriteSession::new(&request.image, &target, confirmation, request.debug);

    let outcome = write(hal, session, &target).map_err(|failure| match failure {
        WriteFailure::NotConfirmed => BootmacError::Aborted,
        other => BootmacError::Write(other),
    })?;
    Ok(outcome)
}

fn select_target<H, P>(hal: &H, request: &WriteRequest, prompter: &mut P) -> Result<ValidatedDisk>
where
    H: SystemHal + ?Sized,
    P: WritePrompter + ?Sized,
{
    if let Some(disk) = request.disk.as_deref() {
        return safety::validate_for_write(hal, disk)
            .map_err(|reason| BootmacError::Rejected(reason).into());
    }

    // The operator still sees why the list is missing.
    let inventory = safety::list_disks(hal).unwrap_or_else(|err| {
        warn!("Could not list disks: {}", err);
        format!("⚠️  Could not list disks: {}", err)
    });

    let mut rejected: Option<RejectionReason> = None;
    for _ in 0..MAX_IDENTIFIER_ATTEMPTS {
        let Some(input) = prompter.disk_identifier(&inventory, rejected.as_ref())? else {
            return Err(BootmacError::Aborted.into());
        };
        match safety::validate_for_write(hal, &input) {
            Ok(disk) => return Ok(disk),
            Err(reason) => {
                warn!("❌ {}", reason);
                rejected = Some(reason);
            }
        }
    }

    Err(rejected
        .map(BootmacError::Rejected)
        .unwrap_or(BootmacError::Aborted)
        .into())
}
