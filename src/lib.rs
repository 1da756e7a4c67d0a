//! Drop root privileges and execute a program.
//!
//! A privileged supervisor that wants to start an unprivileged worker
//! either performs the credential dance itself or hands it to a small
//! helper that cannot get the ordering wrong.  This crate is that
//! helper: invoked as root with an account name and a command line, it
//! initializes the supplementary groups of the account, changes the
//! group id before the user id (the only order that works), and then
//! replaces itself with the target program.
//!
//! Every step either succeeds and falls through to the next, or
//! terminates the process with a distinct exit code.  A process with
//! half-dropped privileges never keeps running.
//!
//! ```text
//! privexec www /usr/sbin/httpd httpd -f /etc/httpd.conf
//! ```
//!
//! The pipeline talks to the operating system exclusively through the
//! narrow [`Platform`] trait, so the ordering of the credential calls
//! can be verified in tests without touching real process credentials.
//!
//! [`Platform`]: platform::Platform

mod error;

pub mod account;
pub mod platform;
pub mod process;

pub use {
    account::Account,
    error::Error,
    platform::{Native, Platform},
    process::{run, Request},
};
