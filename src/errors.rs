/// Error taxonomy for panel operations.
use thiserror::Error;

/// Failure while fetching or decoding the merged group set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// The messaging transport rejected or dropped the request.
    #[error("group sync transport failure: {0}")]
    Transport(String),
    /// The response arrived but did not match the expected shape.
    #[error("malformed group payload: {0}")]
    Malformed(String),
}

/// No active tab could be resolved in the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no active tab in the current window")]
pub struct NoActiveTabError;

/// Failure of a tab or group mutation request. These are best-effort:
/// callers log them and, except for the analyze flow, never surface them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error(transparent)]
    NoActiveTab(#[from] NoActiveTabError),
    #[error("tab action failed: {0}")]
    Failed(String),
}
