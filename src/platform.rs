//! The narrow system interface behind the drop pipeline.

use crate::account::Account;
use cfg_if::cfg_if;
use nix::unistd::{self, Gid, Uid, User};
use std::ffi::{CStr, CString};

/// Credential and exec primitives of the operating system.
///
/// The pipeline never calls the operating system directly; everything
/// identity-changing goes through this trait.  Tests substitute an
/// implementation that records the calls and their order instead of
/// touching real process credentials.
pub trait Platform {
    /// The effective user id of the calling process.
    fn effective_user_id(&self) -> Uid;

    /// Look up an account in the system identity database.
    ///
    /// `Ok(None)` means the database answered and holds no such
    /// account; `Err` means the lookup itself failed.
    fn user_by_name(&self, name: &str) -> nix::Result<Option<Account>>;

    /// Initialize the supplementary group list of the process to the
    /// groups of `user`, with `group` as the primary group.
    fn init_groups(&self, user: &CStr, group: Gid) -> nix::Result<()>;

    /// Change the group id of the process.
    fn set_group_id(&self, gid: Gid) -> nix::Result<()>;

    /// Change the user id of the process.
    fn set_user_id(&self, uid: Uid) -> nix::Result<()>;

    /// Replace the process image with `program`, searching the
    /// executable search path.  Defined to return only on failure;
    /// `Ok(())` from an implementation is a violation of that
    /// contract and is reported as such by the caller.
    fn exec(&self, program: &CStr, args: &[CString]) -> nix::Result<()>;
}

/// The real operating system.
#[derive(Debug, Default)]
pub struct Native;

impl Platform for Native {
    fn effective_user_id(&self) -> Uid {
        unistd::geteuid()
    }

    fn user_by_name(&self, name: &str) -> nix::Result<Option<Account>> {
        User::from_name(name).map(|user| user.map(Account::from))
    }

    fn init_groups(&self, user: &CStr, group: Gid) -> nix::Result<()> {
        cfg_if! {
            if #[cfg(any(target_os = "ios", target_os = "macos", target_os = "redox"))] {
                // initgroups is not available on these targets; the
                // primary group change still applies.
                let _ = (user, group);
            } else {
                unistd::initgroups(user, group)?;
            }
        }
        Ok(())
    }

    fn set_group_id(&self, gid: Gid) -> nix::Result<()> {
        cfg_if! {
            if #[cfg(any(target_os = "android", target_os = "freebsd",
                         target_os = "linux", target_os = "openbsd"))] {
                unistd::setresgid(gid, gid, gid)?;
            } else {
                unistd::setgid(gid)?;
            }
        }
        Ok(())
    }

    fn set_user_id(&self, uid: Uid) -> nix::Result<()> {
        cfg_if! {
            if #[cfg(any(target_os = "android", target_os = "freebsd",
                         target_os = "linux", target_os = "openbsd"))] {
                // Clears the saved user id as well; there is no way
                // back after this call.
                unistd::setresuid(uid, uid, uid)?;
            } else {
                unistd::setuid(uid)?;
            }
        }
        Ok(())
    }

    fn exec(&self, program: &CStr, args: &[CString]) -> nix::Result<()> {
        unistd::execvp(program, args).map(|_| ())
    }
}
