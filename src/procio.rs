use std::os::unix::fs::OpenOptionsExt;

use crate::{
	libsh::error::{ShErr, ShErrKind, ShResult},
	parse::Stage,
	prelude::*,
};

pub fn open_input(path: &str) -> ShResult<File> {
	File::open(path).map_err(|e| {
		ShErr::simple(ShErrKind::IoErr(e.kind()), format!("cannot open '{path}'"))
	})
}

pub fn open_output(path: &str, append: bool) -> ShResult<File> {
	let mut opts = OpenOptions::new();
	opts.write(true).create(true).mode(0o644);
	if append {
		opts.append(true);
	} else {
		opts.truncate(true);
	}
	opts.open(path).map_err(|e| {
		ShErr::simple(ShErrKind::IoErr(e.kind()), format!("cannot open '{path}'"))
	})
}

/// Point the standard input at `fd`. The caller keeps ownership of `fd`
/// and should drop it once wired, the dup2'd copy survives on fd 0.
pub fn wire_input(fd: &impl AsRawFd) -> ShResult<()> {
	dup2(fd.as_raw_fd(), STDIN_FILENO)?;
	Ok(())
}

/// Point the standard output at `fd`. Same ownership rule as [`wire_input`].
pub fn wire_output(fd: &impl AsRawFd) -> ShResult<()> {
	dup2(fd.as_raw_fd(), STDOUT_FILENO)?;
	Ok(())
}

/// Open and apply a stage's file redirections onto the standard streams.
pub fn wire_stage_files(stage: &Stage) -> ShResult<()> {
	if let Some(path) = &stage.input_source {
		let file = open_input(path)?;
		wire_input(&file)?;
	}
	wire_stage_output(stage)
}

/// Apply only the output side of a stage's file redirections.
pub fn wire_stage_output(stage: &Stage) -> ShResult<()> {
	if let Some(redir) = &stage.output {
		let file = open_output(&redir.path, redir.append)?;
		wire_output(&file)?;
	}
	Ok(())
}
