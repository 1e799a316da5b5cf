use crate::{exec::Dispatch, prelude::*};

/// A command that runs in the calling process instead of a spawned one.
/// Lookup is an exact, case-sensitive match on the command name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
	Cd,
	Exit,
}

impl Builtin {
	pub fn lookup(name: &str) -> Option<Self> {
		match name {
			"cd" => Some(Self::Cd),
			"exit" => Some(Self::Exit),
			_ => None,
		}
	}
	pub fn run(&self, argv: &[String], last_status: i32) -> Dispatch {
		match self {
			Self::Cd => cd(argv),
			Self::Exit => exit_shell(argv, last_status),
		}
	}
}

fn cd(argv: &[String]) -> Dispatch {
	let target = argv.get(1).cloned().or_else(|| env::var("HOME").ok());
	let Some(target) = target else {
		eprintln!("skiff: cd: HOME not set");
		return Dispatch::status(1);
	};
	if let Err(e) = env::set_current_dir(&target) {
		eprintln!("skiff: cd: {target}: {e}");
		return Dispatch::status(1);
	}
	Dispatch::status(0)
}

fn exit_shell(argv: &[String], last_status: i32) -> Dispatch {
	let status = match argv.get(1) {
		Some(arg) => match arg.parse::<i32>() {
			Ok(code) => code,
			Err(_) => {
				eprintln!("skiff: exit: numeric argument required: '{arg}'");
				2
			}
		},
		// `exit` with no argument carries the last status forward
		None => last_status,
	};
	Dispatch { status, should_exit: true }
}
