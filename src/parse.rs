use std::{iter::Peekable, str::Chars};

use crate::{
	libsh::error::{ShErr, ShErrKind, ShResult},
	prelude::*,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tk {
	Word(String),
	Pipe,
	RedirIn,
	RedirOut,
	RedirAppend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRedir {
	pub path: String,
	pub append: bool,
}

/// One pipeline stage: a program, its arguments, and its file redirections
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stage {
	pub argv: Vec<String>,
	pub input_source: Option<String>,
	pub output: Option<OutputRedir>,
}

impl Stage {
	pub fn cmd_name(&self) -> &str {
		// argv is never empty, the parser rejects empty stages
		self.argv.first().map(|s| s.as_str()).unwrap_or_default()
	}
}

/// An ordered sequence of stages connected by pipes. A single stage
/// means no pipe is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
	pub stages: Vec<Stage>,
}

pub fn lex(line: &str) -> ShResult<Vec<Tk>> {
	let mut tokens = vec![];
	let mut chars = line.chars().peekable();

	while let Some(ch) = chars.next() {
		match ch {
			c if c.is_whitespace() => continue,
			'|' => tokens.push(Tk::Pipe),
			'<' => tokens.push(Tk::RedirIn),
			'>' => {
				if chars.peek() == Some(&'>') {
					chars.next();
					tokens.push(Tk::RedirAppend);
				} else {
					tokens.push(Tk::RedirOut);
				}
			}
			_ => tokens.push(Tk::Word(lex_word(ch, &mut chars)?)),
		}
	}
	Ok(tokens)
}

fn lex_word(first: char, chars: &mut Peekable<Chars<'_>>) -> ShResult<String> {
	let mut word = String::new();
	push_word_char(first, chars, &mut word)?;

	while let Some(&c) = chars.peek() {
		if c.is_whitespace() || matches!(c, '|' | '<' | '>') {
			break;
		}
		chars.next();
		push_word_char(c, chars, &mut word)?;
	}
	Ok(word)
}

fn push_word_char(c: char, chars: &mut Peekable<Chars<'_>>, word: &mut String) -> ShResult<()> {
	match c {
		'\'' | '"' => lex_quoted(c, chars, word),
		_ => {
			word.push(c);
			Ok(())
		}
	}
}

fn lex_quoted(quote: char, chars: &mut Peekable<Chars<'_>>, word: &mut String) -> ShResult<()> {
	for c in chars.by_ref() {
		if c == quote {
			return Ok(());
		}
		word.push(c);
	}
	Err(ShErr::simple(ShErrKind::ParseErr, "unterminated quote"))
}

/// Parse one line of input into a pipeline.
///
/// Returns `Ok(None)` for blank lines. Structural problems, like a
/// redirection operator with no target word or an empty pipeline stage,
/// are parse errors.
pub fn parse_input(line: &str) -> ShResult<Option<Pipeline>> {
	let tokens = lex(line)?;
	if tokens.is_empty() {
		return Ok(None);
	}
	flog!(TRACE, tokens);

	let mut stages = vec![];
	let mut stage = Stage::default();
	let mut tokens = tokens.into_iter();

	while let Some(tk) = tokens.next() {
		match tk {
			Tk::Word(w) => stage.argv.push(w),
			Tk::Pipe => {
				stages.push(finish_stage(std::mem::take(&mut stage))?);
			}
			Tk::RedirIn => {
				stage.input_source = Some(redir_target(&mut tokens, "<")?);
			}
			Tk::RedirOut => {
				let path = redir_target(&mut tokens, ">")?;
				stage.output = Some(OutputRedir { path, append: false });
			}
			Tk::RedirAppend => {
				let path = redir_target(&mut tokens, ">>")?;
				stage.output = Some(OutputRedir { path, append: true });
			}
		}
	}
	stages.push(finish_stage(stage)?);

	Ok(Some(Pipeline { stages }))
}

fn finish_stage(stage: Stage) -> ShResult<Stage> {
	if stage.argv.is_empty() {
		return Err(ShErr::simple(ShErrKind::ParseErr, "missing command in pipeline"));
	}
	Ok(stage)
}

fn redir_target(tokens: &mut impl Iterator<Item = Tk>, op: &str) -> ShResult<String> {
	match tokens.next() {
		Some(Tk::Word(w)) => Ok(w),
		_ => Err(ShErr::simple(
			ShErrKind::ParseErr,
			format!("expected a filename after `{op}`"),
		)),
	}
}
