// Standard Library Common IO and FS Abstractions
pub use std::env;
pub use std::ffi::CString;
pub use std::fmt;
pub use std::fs::{File, OpenOptions};
pub use std::io::{self, BufRead, Write};
pub use std::path::PathBuf;
pub use std::process::exit;

// Unix-specific IO abstractions
pub use std::os::unix::io::{AsRawFd, OwnedFd, RawFd};

// Nix crate for POSIX APIs
pub use nix::{
	errno::Errno,
	libc::{STDERR_FILENO, STDIN_FILENO, STDOUT_FILENO},
	sys::wait::{waitpid, WaitStatus as WtStat},
	unistd::{dup2, execvp, fork, isatty, pipe, ForkResult, Pid},
};

pub use crate::flog;
pub use crate::libsh::flog::SkiffLogLevel::*;
