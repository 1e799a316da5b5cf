use pretty_assertions::assert_eq;

use crate::libsh::error::ShErrKind;
use crate::parse::{lex, parse_input, OutputRedir, Tk};

#[test]
fn lex_words_and_operators() {
	let tokens = lex("cat < in.txt | grep foo >> out.txt").unwrap();
	assert_eq!(
		tokens,
		vec![
			Tk::Word("cat".into()),
			Tk::RedirIn,
			Tk::Word("in.txt".into()),
			Tk::Pipe,
			Tk::Word("grep".into()),
			Tk::Word("foo".into()),
			Tk::RedirAppend,
			Tk::Word("out.txt".into()),
		]
	);
}

#[test]
fn lex_quoted_words() {
	let tokens = lex("echo 'a b' \"c|d\" e'f'g").unwrap();
	assert_eq!(
		tokens,
		vec![
			Tk::Word("echo".into()),
			Tk::Word("a b".into()),
			Tk::Word("c|d".into()),
			Tk::Word("efg".into()),
		]
	);
}

#[test]
fn lex_operators_bound_to_words() {
	let tokens = lex("echo>out").unwrap();
	assert_eq!(
		tokens,
		vec![Tk::Word("echo".into()), Tk::RedirOut, Tk::Word("out".into())]
	);
}

#[test]
fn lex_unterminated_quote() {
	let err = lex("echo 'oops").unwrap_err();
	assert!(matches!(err.kind(), ShErrKind::ParseErr));
}

#[test]
fn blank_lines_parse_to_none() {
	assert!(parse_input("").unwrap().is_none());
	assert!(parse_input("   \t  ").unwrap().is_none());
}

#[test]
fn parse_single_command() {
	let pipeline = parse_input("ls -l /tmp").unwrap().unwrap();
	assert_eq!(pipeline.stages.len(), 1);
	let stage = &pipeline.stages[0];
	assert_eq!(stage.argv, vec!["ls", "-l", "/tmp"]);
	assert_eq!(stage.input_source, None);
	assert_eq!(stage.output, None);
}

#[test]
fn parse_redirections() {
	let pipeline = parse_input("sort < in.txt > out.txt").unwrap().unwrap();
	let stage = &pipeline.stages[0];
	assert_eq!(stage.argv, vec!["sort"]);
	assert_eq!(stage.input_source.as_deref(), Some("in.txt"));
	assert_eq!(
		stage.output,
		Some(OutputRedir { path: "out.txt".into(), append: false })
	);
}

#[test]
fn parse_append_redirection() {
	let pipeline = parse_input("echo hi >> log.txt").unwrap().unwrap();
	assert_eq!(
		pipeline.stages[0].output,
		Some(OutputRedir { path: "log.txt".into(), append: true })
	);
}

#[test]
fn parse_pipeline_stages() {
	let pipeline = parse_input("cat f | sort | uniq -c").unwrap().unwrap();
	assert_eq!(pipeline.stages.len(), 3);
	assert_eq!(pipeline.stages[0].argv, vec!["cat", "f"]);
	assert_eq!(pipeline.stages[1].argv, vec!["sort"]);
	assert_eq!(pipeline.stages[2].argv, vec!["uniq", "-c"]);
}

#[test]
fn parse_empty_stage_is_an_error() {
	for input in ["echo |", "| cat", "cat f | | sort"] {
		let err = parse_input(input).unwrap_err();
		assert!(matches!(err.kind(), ShErrKind::ParseErr), "{input}");
	}
}

#[test]
fn parse_missing_redirection_target() {
	for input in ["cat <", "echo hi >", "echo hi >> | cat"] {
		let err = parse_input(input).unwrap_err();
		assert!(matches!(err.kind(), ShErrKind::ParseErr), "{input}");
	}
}
