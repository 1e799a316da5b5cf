pub mod builtin;
pub mod exec;
pub mod libsh;
pub mod parse;
pub mod prelude;
pub mod procio;
#[cfg(test)]
pub mod tests;

use crate::{exec::dispatch_line, prelude::*};

fn main() {
	exit(repl());
}

/// The top-level read loop: prompt when interactive, dispatch each line,
/// thread the last status through. The status of the last command becomes
/// the shell's own exit code.
fn repl() -> i32 {
	let interactive = isatty(STDIN_FILENO).unwrap_or(false);
	let stdin = io::stdin();
	let mut last_status = 0;
	let mut line = String::new();

	loop {
		if interactive {
			print!("skiff$ ");
			io::stdout().flush().ok();
		}
		line.clear();
		match stdin.lock().read_line(&mut line) {
			Ok(0) => break, // EOF
			Ok(_) => {}
			Err(e) => {
				eprintln!("skiff: {e}");
				return 1;
			}
		}
		flog!(INFO, "New input: {:?}", line);

		match dispatch_line(&line, last_status) {
			Ok(result) => {
				last_status = result.status;
				if result.should_exit {
					break;
				}
			}
			Err(e) => {
				// Cannot continue safely, e.g. the process table is exhausted
				eprintln!("skiff: {e}");
				return 1;
			}
		}
	}
	last_status
}
