use derive_more::Display;
use nix::unistd::{Gid, Uid};
use std::ffi::NulError;

/// Common errors of the drop pipeline.
///
/// Every failure stage maps to its own exit code so the invoking
/// supervisor can tell them apart, see [`Error::exit_code`].
#[derive(Debug, Display)]
pub enum Error {
    #[display(fmt = "missing arguments")]
    Usage,
    #[display(fmt = "invalid argument: {}", "_0")]
    BadArgument(NulError),
    #[display(fmt = "caller is not root, refusing to continue")]
    NotSuperuser,
    #[display(fmt = "error looking up user {}: {}", "user", "err")]
    Lookup { user: String, err: nix::Error },
    #[display(fmt = "user {} does not exist", "_0")]
    UnknownUser(String),
    #[display(fmt = "user {} has UID 0, refusing to continue", "_0")]
    SuperuserTarget(String),
    #[display(fmt = "setgroups({},{}) failed: {}", "user", "gid.as_raw()", "err")]
    InitGroups {
        user: String,
        gid: Gid,
        err: nix::Error,
    },
    #[display(fmt = "setgid({}) failed: {}", "gid.as_raw()", "err")]
    SetGroupId { gid: Gid, err: nix::Error },
    #[display(fmt = "setuid({}) failed: {}", "uid.as_raw()", "err")]
    SetUserId { uid: Uid, err: nix::Error },
    #[display(fmt = "exec of {} failed: {}", "program", "err")]
    Exec { program: String, err: nix::Error },
    #[display(fmt = "exec returned control after reporting success")]
    ExecReturned,
}

impl Error {
    /// The exit code reported to the invoking supervisor.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage | Error::BadArgument(_) | Error::NotSuperuser => 42,
            Error::Lookup { .. } | Error::UnknownUser(_) => 43,
            Error::SuperuserTarget(_) => 44,
            Error::InitGroups { .. } | Error::SetGroupId { .. } => 45,
            Error::SetUserId { .. } => 46,
            Error::Exec { .. } => 47,
            Error::ExecReturned => 48,
        }
    }
}

impl std::error::Error for Error {}

impl From<NulError> for Error {
    fn from(err: NulError) -> Self {
        Error::BadArgument(err)
    }
}
