use crate::family::{Family, SockType};

/// Address marshaling errors.
///
/// Every failure here is deterministic over its inputs: encoding the same
/// address into the same buffer fails the same way every time, so there is
/// nothing to retry — the caller has to fix the address or the buffer.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AddrError {
    #[error("{caller}: address family {family:?} has no code on this platform")]
    UnsupportedFamily { family: Family, caller: &'static str },

    #[error("{caller}: socket type {kind:?} has no code on this platform")]
    UnsupportedSockType { kind: SockType, caller: &'static str },

    #[error("no address family registered for code {code}")]
    UnrecognizedFamilyCode { code: libc::c_int },

    #[error("no socket type registered for code {code}")]
    UnrecognizedSockTypeCode { code: libc::c_int },

    #[error("unix path of {len} bytes does not fit the {max}-byte sun_path field")]
    PathTooLong { len: usize, max: usize },

    #[error("raw address data of {len} bytes is below the {min}-byte minimum for family code {family}")]
    UndersizedRawAddress { family: libc::sa_family_t, len: usize, min: usize },

    #[error("buffer of {got} bytes is too small for a {needed}-byte address")]
    BufferTooSmall { needed: usize, got: usize },
}

impl From<AddrError> for std::io::Error {
    fn from(err: AddrError) -> Self {
        let kind = match &err {
            // Decode-side failures: the bytes came from outside.
            AddrError::UnrecognizedFamilyCode { .. }
            | AddrError::UnrecognizedSockTypeCode { .. } => std::io::ErrorKind::InvalidData,
            // Everything else is a bad argument from the caller.
            AddrError::UnsupportedFamily { .. }
            | AddrError::UnsupportedSockType { .. }
            | AddrError::PathTooLong { .. }
            | AddrError::UndersizedRawAddress { .. }
            | AddrError::BufferTooSmall { .. } => std::io::ErrorKind::InvalidInput,
        };
        std::io::Error::new(kind, err)
    }
}
