//! Argument parsing and the privilege drop pipeline.

use crate::{account::Account, error::Error, platform::Platform};
use log::debug;
use nix::unistd::{Gid, Uid};
use std::{
    convert::Infallible,
    ffi::{CStr, CString, OsString},
    os::unix::ffi::OsStrExt,
};

/// A parsed invocation: the target account, the program to execute
/// and the argument vector it receives.
#[derive(Debug)]
pub struct Request {
    /// Name of the account to drop to.
    pub user: String,
    /// Path of the program that replaces this process.
    pub program: CString,
    /// Argument vector of the program, starting with its own argv[0].
    pub args: Vec<CString>,
}

impl Request {
    /// Parse the arguments following the helper's own name:
    /// `username path argv0 [args...]`.
    pub fn parse<I>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut args = args.into_iter();

        let user = args
            .next()
            .ok_or(Error::Usage)?
            .to_string_lossy()
            .into_owned();
        let program = cstring(args.next().ok_or(Error::Usage)?)?;
        let argv0 = cstring(args.next().ok_or(Error::Usage)?)?;

        let mut argv = vec![argv0];
        for arg in args {
            argv.push(cstring(arg)?);
        }

        Ok(Self {
            user,
            program,
            args: argv,
        })
    }
}

fn cstring(arg: OsString) -> Result<CString, Error> {
    CString::new(arg.as_bytes()).map_err(Error::from)
}

/// Proof that the process still holds superuser privileges.
///
/// There is no public constructor and [`Privileged::drop_to`] consumes
/// the token, so running the drop sequence twice is a type error
/// rather than a runtime condition.
#[derive(Debug)]
pub struct Privileged(());

impl Privileged {
    /// Check the effective user id of the calling process.
    ///
    /// Not a security boundary: without real privilege the credential
    /// calls in [`Privileged::drop_to`] would fail anyway.  The check
    /// only turns that failure into a clear diagnostic up front.
    pub fn acquire<P: Platform>(platform: &P) -> Result<Self, Error> {
        if platform.effective_user_id().is_root() {
            Ok(Self(()))
        } else {
            Err(Error::NotSuperuser)
        }
    }

    /// Lower the process credentials to `account`, consuming the
    /// token.
    ///
    /// Supplementary groups are initialized first and the group id
    /// changes before the user id: once the user id is gone, so is the
    /// privilege to touch group membership.
    pub fn drop_to<P: Platform>(
        self,
        platform: &P,
        account: &Account,
    ) -> Result<Unprivileged, Error> {
        let user = CString::new(account.name.as_bytes())?;

        platform
            .init_groups(&user, account.gid)
            .map_err(|err| Error::InitGroups {
                user: account.name.clone(),
                gid: account.gid,
                err,
            })?;

        platform
            .set_group_id(account.gid)
            .map_err(|err| Error::SetGroupId {
                gid: account.gid,
                err,
            })?;

        platform
            .set_user_id(account.uid)
            .map_err(|err| Error::SetUserId {
                uid: account.uid,
                err,
            })?;

        Ok(Unprivileged {
            uid: account.uid,
            gid: account.gid,
        })
    }
}

/// The process after the drop, holding the credentials it ended up
/// with.
#[derive(Debug)]
pub struct Unprivileged {
    /// The new real and effective user id.
    pub uid: Uid,
    /// The new real and effective group id.
    pub gid: Gid,
}

impl Unprivileged {
    /// Replace the process image with `program`, searching the
    /// executable search path.  Returns only on failure.
    pub fn exec<P: Platform>(
        self,
        platform: &P,
        program: &CStr,
        args: &[CString],
    ) -> Result<Infallible, Error> {
        platform.exec(program, args).map_err(|err| Error::Exec {
            program: program.to_string_lossy().into_owned(),
            err,
        })?;

        // The primitive is defined to never return on success.
        Err(Error::ExecReturned)
    }
}

/// Run the whole pipeline: validate the caller, resolve the account,
/// drop privileges, execute the program.
///
/// Returns only an error; on success the process image has been
/// replaced and nothing of this program is left to return to.
pub fn run<P: Platform>(platform: &P, request: &Request) -> Result<Infallible, Error> {
    let token = Privileged::acquire(platform)?;
    let account = Account::from_name(platform, &request.user)?;

    debug!(
        "dropping privileges to {} (uid {}, gid {})",
        account.name,
        account.uid.as_raw(),
        account.gid.as_raw()
    );
    let process = token.drop_to(platform, &account)?;

    debug!("executing {:?}", request.program);
    process.exec(platform, &request.program, &request.args)
}
