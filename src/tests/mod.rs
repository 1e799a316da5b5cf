use crate::prelude::*;

pub mod parser;

/// Unique scratch path for a test, under the system temp dir
pub fn tmp_path(tag: &str) -> PathBuf {
	env::temp_dir().join(format!("skiff-test-{}-{}", tag, std::process::id()))
}
