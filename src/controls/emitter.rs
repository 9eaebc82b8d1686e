//! Fire-and-forget command submission

use crate::session::{Session, SessionResolver};
use flightdeck_shared::{Command, SessionError};
use tracing::debug;

/// What happened to a control's command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The session accepted the command
    Sent,
    /// The session reported an error; the control does not retry
    Failed(SessionError),
    /// No session could be resolved, nothing was submitted
    NoSession,
    /// The interaction did not map to a command
    NoCommand,
}

/// Resolve the session now and submit one command to it
pub(crate) async fn submit(
    resolver: &SessionResolver,
    source: &str,
    command: Command,
) -> SubmitOutcome {
    match resolver.session().await {
        Some(session) => submit_to(session.as_ref(), source, command).await,
        None => {
            debug!("[{}] No session, {} not sent", source, command);
            SubmitOutcome::NoSession
        }
    }
}

/// Submit one command to an already resolved session
pub(crate) async fn submit_to(
    session: &dyn Session,
    source: &str,
    command: Command,
) -> SubmitOutcome {
    match session.submit(command).await {
        Ok(()) => {
            debug!("[{}] Submitted {}", source, command);
            SubmitOutcome::Sent
        }
        Err(e) => {
            // Reporting is the session subsystem's job
            debug!("[{}] {} discarded: {}", source, command, e);
            SubmitOutcome::Failed(e)
        }
    }
}
