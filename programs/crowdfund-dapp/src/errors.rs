use std::fmt;

use anchor_lang::error::Error;
use anchor_lang::prelude::*;

#[error_code]
pub enum CrowdfundError {
    #[msg("No read endpoint answered the liveness check")]
    NoEndpointAvailable,
    #[msg("Ledger read failed")]
    FetchFailed,
    #[msg("Amount could not be formatted")]
    FormatError,
    #[msg("Deadline must be in the future")]
    DeadlineNotInFuture,
    #[msg("Deadline is not a valid local date and time")]
    InvalidDeadlineFormat,
    #[msg("Invalid amount")]
    InvalidAmount,
    #[msg("Required field is missing")]
    MissingField,
    #[msg("Campaign title is too long")]
    TitleTooLong,
    #[msg("Connected account is not the campaign owner")]
    NotCampaignOwner,
    #[msg("Campaign funds were already withdrawn")]
    AlreadyWithdrawn,
    #[msg("Invalid client configuration")]
    InvalidConfig,
    #[msg("Ledger reported an invalid platform fee")]
    InvalidFeePercent,
}

impl CrowdfundError {
    /// User input errors. These are raised before any network access.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CrowdfundError::DeadlineNotInFuture
                | CrowdfundError::InvalidDeadlineFormat
                | CrowdfundError::InvalidAmount
                | CrowdfundError::MissingField
                | CrowdfundError::TitleTooLong
                | CrowdfundError::NotCampaignOwner
                | CrowdfundError::AlreadyWithdrawn
        )
    }
}

/// Failure category reported by the read layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadErrorKind {
    /// Endpoint unreachable or connection dropped.
    Transport,
    /// Payload did not match the expected account layout.
    Decode,
    /// The ledger rejected the call.
    Revert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadError {
    pub kind: ReadErrorKind,
    pub message: String,
}

impl ReadError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ReadErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: ReadErrorKind::Decode,
            message: message.into(),
        }
    }

    pub fn revert(message: impl Into<String>) -> Self {
        Self {
            kind: ReadErrorKind::Revert,
            message: message.into(),
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ReadError {}

pub type ReadResult<T> = std::result::Result<T, ReadError>;

/// Errors surfaced by the wallet when signing or sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    UserRejected,
    InsufficientFunds,
    Reverted(String),
    Transport(String),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletError::UserRejected => write!(f, "user rejected the request"),
            WalletError::InsufficientFunds => write!(f, "insufficient funds"),
            WalletError::Reverted(reason) => write!(f, "transaction reverted: {reason}"),
            WalletError::Transport(reason) => write!(f, "wallet transport error: {reason}"),
        }
    }
}

impl std::error::Error for WalletError {}

/// Error returned by the write path.
#[derive(Debug)]
pub enum WriteError {
    /// Local validation failed; nothing was sent.
    Invalid(Error),
    /// The wallet or the ledger refused the transaction.
    Wallet(WalletError),
}

impl From<Error> for WriteError {
    fn from(err: Error) -> Self {
        WriteError::Invalid(err)
    }
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::Invalid(err) => write!(f, "{err}"),
            WriteError::Wallet(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for WriteError {}

/// Numeric code carried by an anchor error, if it came from an `#[error_code]` enum.
pub fn error_code_of(err: &Error) -> Option<u32> {
    match err {
        Error::AnchorError(anchor_err) => Some(anchor_err.error_code_number),
        Error::ProgramError(_) => None,
    }
}

/// Whether `err` was raised from `code`.
pub fn is_error(err: &Error, code: CrowdfundError) -> bool {
    error_code_of(err) == Some(u32::from(code))
}
