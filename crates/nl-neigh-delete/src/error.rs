//! Error types for nl-neigh-delete
//!
//! Every [`NeighDeleteError`] is fatal for the run. The binary reports it once
//! with an `Error: ` prefix and exits with [`NeighDeleteError::code`].

use neigh_types::ParseError;
use thiserror::Error;

/// Failure reported by the kernel or the socket layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct KernelError {
    /// errno value, sign as reported
    pub errno: Option<i32>,
    pub reason: String,
}

impl KernelError {
    pub fn new(errno: Option<i32>, reason: impl Into<String>) -> Self {
        Self {
            errno,
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for KernelError {
    fn from(err: std::io::Error) -> Self {
        Self {
            errno: err.raw_os_error(),
            reason: err.to_string(),
        }
    }
}

/// Errors that can occur while building the filter or deleting neighbours
#[derive(Debug, Error)]
pub enum NeighDeleteError {
    /// A command line token could not be converted to its typed form
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The netlink socket could not be set up or a cache could not be dumped
    #[error("{context}: {source}")]
    Connection {
        context: String,
        #[source]
        source: KernelError,
    },

    /// The kernel rejected a delete request for a matched entry
    #[error("Unable to delete neighbour {entry}: {source}")]
    Deletion {
        entry: String,
        #[source]
        source: KernelError,
        /// Entries removed earlier in the same pass, not rolled back
        deleted: usize,
    },

    /// Writing to or reading from the terminal failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NeighDeleteError {
    pub fn connection(context: impl Into<String>, source: impl Into<KernelError>) -> Self {
        NeighDeleteError::Connection {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Process exit code for this error, always non-zero
    pub fn code(&self) -> i32 {
        let code = match self {
            NeighDeleteError::Parse(err) => parse_error_code(err),
            NeighDeleteError::Connection { source, .. } => source.errno.unwrap_or(libc::EIO),
            NeighDeleteError::Deletion { source, .. } => source.errno.unwrap_or(libc::EIO),
            NeighDeleteError::Io(err) => err.raw_os_error().unwrap_or(libc::EIO),
        };
        exit_code(code)
    }
}

fn parse_error_code(err: &ParseError) -> i32 {
    match err {
        ParseError::UnknownDevice(_) => libc::ENODEV,
        ParseError::FamilyMismatch { .. } => libc::EAFNOSUPPORT,
        _ => libc::EINVAL,
    }
}

/// Absolute value of an errno-style code, clamped to a valid non-zero exit status
pub fn exit_code(code: i32) -> i32 {
    match code.unsigned_abs() {
        0 => 1,
        abs if abs > 255 => 255,
        abs => abs as i32,
    }
}

/// Result type alias for nl-neigh-delete operations
pub type Result<T> = std::result::Result<T, NeighDeleteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_and_code() {
        let err = NeighDeleteError::from(ParseError::InvalidAddress("10.0.0.300".to_string()));
        assert_eq!(err.to_string(), "Unable to parse address \"10.0.0.300\"");
        assert_eq!(err.code(), libc::EINVAL);

        let err = NeighDeleteError::from(ParseError::UnknownDevice("eth9".to_string()));
        assert_eq!(err.code(), libc::ENODEV);
    }

    #[test]
    fn test_deletion_error_code_is_absolute() {
        let err = NeighDeleteError::Deletion {
            entry: "10.0.0.1 dev eth0".to_string(),
            source: KernelError::new(Some(-libc::EPERM), "Operation not permitted"),
            deleted: 1,
        };
        assert_eq!(
            err.to_string(),
            "Unable to delete neighbour 10.0.0.1 dev eth0: Operation not permitted"
        );
        assert_eq!(err.code(), libc::EPERM);
    }

    #[test]
    fn test_connection_error_from_io() {
        let io = std::io::Error::from_raw_os_error(libc::EACCES);
        let err = NeighDeleteError::connection("Unable to connect netlink socket", io);
        assert!(err.to_string().starts_with("Unable to connect netlink socket: "));
        assert_eq!(err.code(), libc::EACCES);
    }

    #[test]
    fn test_connection_error_defaults_to_eio() {
        let err = NeighDeleteError::connection(
            "Unable to connect netlink socket",
            KernelError::new(None, "unsupported platform"),
        );
        assert_eq!(err.code(), libc::EIO);
    }

    #[test]
    fn test_exit_code_never_zero() {
        assert_eq!(exit_code(0), 1);
        assert_eq!(exit_code(-2), 2);
        assert_eq!(exit_code(4096), 255);
    }
}
