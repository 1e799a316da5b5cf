use std::{env, fmt};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum SkiffLogLevel {
	NONE = 0,
	ERROR = 1,
	WARN = 2,
	INFO = 3,
	DEBUG = 4,
	TRACE = 5,
}

impl fmt::Display for SkiffLogLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		use SkiffLogLevel::*;
		match self {
			ERROR => write!(f, "ERROR"),
			WARN => write!(f, "WARN"),
			INFO => write!(f, "INFO"),
			DEBUG => write!(f, "DEBUG"),
			TRACE => write!(f, "TRACE"),
			NONE => write!(f, ""),
		}
	}
}

pub fn log_level() -> SkiffLogLevel {
	use SkiffLogLevel::*;
	let level = env::var("SKIFF_LOG_LEVEL").unwrap_or_default();
	match level.to_lowercase().as_str() {
		"error" => ERROR,
		"warn" => WARN,
		"info" => INFO,
		"debug" => DEBUG,
		"trace" => TRACE,
		_ => NONE,
	}
}

/// Structured logging for skiff.
///
/// Prints `[LEVEL][file:line] message` to stderr when `SKIFF_LOG_LEVEL`
/// is set at or above the given level. Accepts either a format string
/// with arguments, or bare expressions which are logged with `{:#?}`.
#[macro_export]
macro_rules! flog {
	($level:path, $fmt:literal $(, $args:expr)* $(,)?) => {{
		use $crate::libsh::flog::log_level;

		if $level <= log_level() {
			eprintln!(
				"[{}][{}:{}] {}",
				$level, file!(), line!(), format!($fmt $(, $args)*)
			);
		}
	}};

	($level:path, $($val:expr),+ $(,)?) => {{
		use $crate::libsh::flog::log_level;

		if $level <= log_level() {
			$(
				eprintln!(
					"[{}][{}:{}] {} = {:#?}",
					$level, file!(), line!(), stringify!($val), &$val
				);
			)+
		}
	}};
}
