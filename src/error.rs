use alloc::string::String;

use displaydoc::Display;

#[derive(Clone, Debug, PartialEq, Eq, Display)]
pub enum Error {
    /// Participant list is empty
    NoParticipants,
    /// Transaction list is empty
    NoTransactions,
    /// Participant {0} appears more than once in the participant list
    DuplicateParticipant(String),
    /// Invalid transaction amount, expected positive value
    NonPositiveAmount,
    /// Amount {0} has more fractional digits than the configured scale of {1}
    ExcessPrecision(String, u32),
    /// Configured scale {0} exceeds the supported maximum of 28 fractional digits
    InvalidScale(u32),
    /// Arithmetic overflow while accumulating amounts
    Overflow,
    /// Transaction references unknown participant {0}
    UnknownParticipant(String),
    /// Flow network node {0} does not map to a participant
    UnmappedNode(usize),
    /// Settlement failed verification: {0}
    Inconsistent(String),
}

/// Coarse classification of an [`Error`], for callers that translate errors into user-facing
/// messages.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    UnknownParticipant,
    InternalConsistency,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NoParticipants
            | Error::NoTransactions
            | Error::DuplicateParticipant(_)
            | Error::NonPositiveAmount
            | Error::ExcessPrecision(_, _)
            | Error::InvalidScale(_)
            | Error::Overflow => ErrorKind::InvalidInput,
            Error::UnknownParticipant(_) => ErrorKind::UnknownParticipant,
            Error::UnmappedNode(_) | Error::Inconsistent(_) => ErrorKind::InternalConsistency,
        }
    }
}
