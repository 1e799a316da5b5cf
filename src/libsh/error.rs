use crate::prelude::*;

pub type ShResult<T> = Result<T, ShErr>;

#[derive(Debug)]
pub struct ShErr {
	kind: ShErrKind,
	msg: String,
}

impl ShErr {
	pub fn simple(kind: ShErrKind, msg: impl Into<String>) -> Self {
		Self { kind, msg: msg.into() }
	}
	pub fn kind(&self) -> &ShErrKind {
		&self.kind
	}
}

impl fmt::Display for ShErr {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.msg.is_empty() {
			write!(f, "{}", self.kind)
		} else {
			write!(f, "{}: {}", self.kind, self.msg)
		}
	}
}

impl From<io::Error> for ShErr {
	fn from(e: io::Error) -> Self {
		ShErr::simple(ShErrKind::IoErr(e.kind()), e.to_string())
	}
}

impl From<Errno> for ShErr {
	fn from(e: Errno) -> Self {
		ShErr::simple(ShErrKind::Errno(e), e.desc())
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShErrKind {
	IoErr(io::ErrorKind),
	ParseErr,
	InternalErr,
	ForkFail,
	Errno(Errno),
}

impl fmt::Display for ShErrKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let output = match self {
			Self::IoErr(e) => return write!(f, "I/O error ({e})"),
			Self::ParseErr => "parse error",
			Self::InternalErr => "internal error",
			Self::ForkFail => "failed to spawn process",
			Self::Errno(e) => return write!(f, "errno ({e})"),
		};
		write!(f, "{output}")
	}
}
