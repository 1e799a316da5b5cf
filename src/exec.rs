use crate::{
	builtin::Builtin,
	libsh::error::{ShErr, ShErrKind, ShResult},
	parse::{parse_input, Pipeline, Stage},
	prelude::*,
	procio,
};

pub const SIG_EXIT_OFFSET: i32 = 128;
/// Status reported when a line fails to parse
pub const PARSE_FAIL_STATUS: i32 = 2;
/// Status a child exits with when its process image cannot be replaced.
/// From the parent's point of view this is indistinguishable from the
/// program running and exiting with this code.
pub const EXEC_FAIL_STATUS: i32 = 127;
/// Status a child exits with when a redirection target cannot be opened
pub const REDIR_FAIL_STATUS: i32 = 1;

/// The outcome of dispatching one line of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
	pub status: i32,
	pub should_exit: bool,
}

impl Dispatch {
	pub fn status(status: i32) -> Self {
		Self { status, should_exit: false }
	}
}

/// The entry point of the execution engine: parse one line, dispatch it,
/// and report its status.
///
/// Parse errors print one diagnostic and resolve to [`PARSE_FAIL_STATUS`]
/// without touching the exit flag; blank lines carry `last_status` through
/// unchanged and spawn nothing. An `Err` from this function means the
/// shell cannot continue safely (the process table is exhausted), the
/// read loop is expected to report it and terminate.
pub fn dispatch_line(input: &str, last_status: i32) -> ShResult<Dispatch> {
	let pipeline = match parse_input(input) {
		Ok(Some(pipeline)) => pipeline,
		Ok(None) => return Ok(Dispatch::status(last_status)),
		Err(e) => {
			eprintln!("skiff: {e}");
			return Ok(Dispatch::status(PARSE_FAIL_STATUS));
		}
	};
	dispatch(pipeline, last_status)
}

/// Decide builtin vs. external. Builtins run synchronously in the calling
/// process and may set the exit flag; everything else forks. A builtin
/// name wins even at the head of a pipeline, the pipe is not consulted.
fn dispatch(pipeline: Pipeline, last_status: i32) -> ShResult<Dispatch> {
	let head = &pipeline.stages[0];
	if let Some(builtin) = Builtin::lookup(head.cmd_name()) {
		flog!(DEBUG, "dispatching builtin {:?}", builtin);
		return Ok(builtin.run(&head.argv, last_status));
	}

	let status = if pipeline.stages.len() > 1 {
		run_pipeline(&pipeline.stages)?
	} else {
		run_external(head)?
	};
	Ok(Dispatch::status(status))
}

/// Arguments to execvp, prepared before forking so the child never has to
/// handle a conversion failure
struct ExecArgs {
	cmd: CString,
	argv: Vec<CString>,
}

impl ExecArgs {
	fn new(argv: &[String]) -> ShResult<Self> {
		let argv = argv
			.iter()
			.map(|arg| CString::new(arg.as_str()))
			.collect::<Result<Vec<_>, _>>()
			.map_err(|_| {
				ShErr::simple(ShErrKind::InternalErr, "argument contains a NUL byte")
			})?;
		let cmd = argv[0].clone();
		Ok(Self { cmd, argv })
	}
	/// Replace the current process image. Only returns on failure.
	fn exec(&self) -> Errno {
		let Err(e) = execvp(&self.cmd, &self.argv);
		e
	}
}

fn run_fork() -> ShResult<ForkResult> {
	unsafe { fork() }.map_err(|e| ShErr::simple(ShErrKind::ForkFail, e.desc()))
}

/// Wait for a specific child and translate its wait status into an exit
/// code. Termination by signal maps to `128 + signo`. A wait reporting a
/// process other than the one asked for is an internal inconsistency, it
/// is reported and the observed status propagated anyway.
fn reap(child: Pid) -> ShResult<i32> {
	match waitpid(child, None)? {
		WtStat::Exited(pid, code) => {
			if pid != child {
				eprintln!("skiff: reaped unexpected process {pid}");
			}
			Ok(code)
		}
		WtStat::Signaled(_, sig, _) => Ok(SIG_EXIT_OFFSET + sig as i32),
		other => Err(ShErr::simple(
			ShErrKind::InternalErr,
			format!("unexpected wait status: {other:?}"),
		)),
	}
}

/// Run one stage as an external command: fork once, wire the redirections
/// in the child, then replace the child's image. Open failures are local
/// to the child, it reports them and exits without touching the parent.
pub fn run_external(stage: &Stage) -> ShResult<i32> {
	let exec_args = ExecArgs::new(&stage.argv)?;
	flog!(DEBUG, "running external command {:?}", stage.cmd_name());

	match run_fork()? {
		ForkResult::Child => {
			if let Err(e) = procio::wire_stage_files(stage) {
				eprintln!("skiff: {e}");
				exit(REDIR_FAIL_STATUS);
			}
			let e = exec_args.exec();
			eprintln!("skiff: {}: {}", stage.cmd_name(), e.desc());
			exit(EXEC_FAIL_STATUS)
		}
		ForkResult::Parent { child } => reap(child),
	}
}

/// Run a multi-stage pipeline. The parent observes a single orchestrator
/// child; the orchestrator forks every non-final stage itself, awaiting
/// each before the next starts, and then becomes the final stage via
/// exec, so the whole pipeline reports one status.
pub fn run_pipeline(stages: &[Stage]) -> ShResult<i32> {
	let mut exec_args = Vec::with_capacity(stages.len());
	for stage in stages {
		exec_args.push(ExecArgs::new(&stage.argv)?);
	}
	flog!(DEBUG, "running {}-stage pipeline", stages.len());

	match run_fork()? {
		ForkResult::Child => exit(drive_stages(stages, &exec_args)),
		ForkResult::Parent { child } => reap(child),
	}
}

/// Orchestrator body. Only returns on failure or once every non-final
/// stage has been awaited and the final exec itself failed; the return
/// value is the status the orchestrator exits with.
///
/// A non-zero exit from any earlier stage aborts the pipeline: the
/// remaining stages are never started and that status wins. Pipe ends are
/// closed in every process that does not need them, the reader's EOF
/// depends on it.
fn drive_stages(stages: &[Stage], exec_args: &[ExecArgs]) -> i32 {
	let mut prev_read: Option<OwnedFd> = None;
	let last = stages.len() - 1;

	for (i, stage) in stages[..last].iter().enumerate() {
		let (r_pipe, w_pipe) = match pipe() {
			Ok(pipes) => pipes,
			Err(e) => {
				eprintln!("skiff: failed to create pipe: {}", e.desc());
				return REDIR_FAIL_STATUS;
			}
		};

		match unsafe { fork() } {
			Ok(ForkResult::Child) => {
				// The read end belongs to the next stage, not this one
				drop(r_pipe);
				exit(run_piped_stage(stage, &exec_args[i], prev_read.take(), w_pipe));
			}
			Ok(ForkResult::Parent { child }) => {
				// Drop the write end here so the reader sees EOF once
				// this stage's process is done with it. Overwriting
				// prev_read closes the read end the stage now owns.
				drop(w_pipe);
				prev_read = Some(r_pipe);

				match reap(child) {
					Ok(0) => {}
					Ok(code) => {
						eprintln!(
							"skiff: pipeline: '{}' exited with status {}",
							stage.cmd_name(),
							code
						);
						return code;
					}
					Err(e) => {
						eprintln!("skiff: {e}");
						return REDIR_FAIL_STATUS;
					}
				}
			}
			Err(e) => {
				eprintln!("skiff: failed to spawn process: {}", e.desc());
				return REDIR_FAIL_STATUS;
			}
		}
	}

	// The orchestrator itself becomes the final stage
	let stage = &stages[last];
	if let Some(read) = prev_read {
		if let Err(e) = procio::wire_input(&read) {
			eprintln!("skiff: {e}");
			return REDIR_FAIL_STATUS;
		}
		drop(read);
	}
	if let Err(e) = procio::wire_stage_output(stage) {
		eprintln!("skiff: {e}");
		return REDIR_FAIL_STATUS;
	}
	let e = exec_args[last].exec();
	eprintln!(
		"skiff: pipeline: final command '{}' failed: {}",
		stage.cmd_name(),
		e.desc()
	);
	EXEC_FAIL_STATUS
}

/// One non-final pipeline stage, in its own process. Stdin comes from the
/// previous pipe, except that the head stage consults its own input
/// redirection; stdout always goes to the next pipe, so a file
/// redirection on a non-final stage's output never takes effect.
fn run_piped_stage(
	stage: &Stage,
	exec_args: &ExecArgs,
	prev_read: Option<OwnedFd>,
	w_pipe: OwnedFd,
) -> i32 {
	if let Err(e) = wire_piped_stage(stage, prev_read, w_pipe) {
		eprintln!("skiff: {e}");
		return REDIR_FAIL_STATUS;
	}
	let e = exec_args.exec();
	eprintln!("skiff: {}: {}", stage.cmd_name(), e.desc());
	EXEC_FAIL_STATUS
}

fn wire_piped_stage(
	stage: &Stage,
	prev_read: Option<OwnedFd>,
	w_pipe: OwnedFd,
) -> ShResult<()> {
	match prev_read {
		Some(read) => procio::wire_input(&read)?,
		// Only the head stage consults its own input redirection; with
		// neither a pipe nor a file, stdin is simply inherited
		None => {
			if let Some(path) = &stage.input_source {
				let file = procio::open_input(path)?;
				procio::wire_input(&file)?;
			}
		}
	}
	procio::wire_output(&w_pipe)?;
	Ok(())
}
