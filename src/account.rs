//! Resolution of the target account.

use crate::{error::Error, platform::Platform};
use nix::unistd::{Gid, Uid, User};

/// The identity a process drops to: an account name and its numeric
/// user and primary group ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Account name in the identity database.
    pub name: String,
    /// Numeric user id.
    pub uid: Uid,
    /// Numeric primary group id.
    pub gid: Gid,
}

impl Account {
    /// Resolve `name` against the identity database of `platform`,
    /// refusing the superuser.
    ///
    /// A resolved user id of 0 means no privilege would be dropped,
    /// which is never what the caller intended.
    pub fn from_name<P: Platform>(platform: &P, name: &str) -> Result<Self, Error> {
        let account = platform
            .user_by_name(name)
            .map_err(|err| Error::Lookup {
                user: name.to_string(),
                err,
            })?
            .ok_or_else(|| Error::UnknownUser(name.to_string()))?;

        if account.uid.is_root() {
            return Err(Error::SuperuserTarget(name.to_string()));
        }

        Ok(account)
    }
}

impl From<User> for Account {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            uid: user.uid,
            gid: user.gid,
        }
    }
}
