//! Content commands: cat, write, append

use std::io::Write;
use std::sync::Arc;

use fileset::Context;

use super::inspect::single_target_error;
use crate::error::Result;

/// Run the cat command
pub fn run_cat(context: &Arc<Context>, pattern: &str) -> Result<()> {
    let set = context.resolve_files(pattern)?;
    let Some(bytes) = set.read_bytes()? else {
        return Err(single_target_error(&set));
    };
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&bytes)?;
    stdout.flush()?;
    Ok(())
}

/// Run the write command
pub fn run_write(context: &Arc<Context>, path: &str, content: &str) -> Result<()> {
    let mut set = context.resolve(path)?;
    set.write(content)?;
    Ok(())
}

/// Run the append command
pub fn run_append(context: &Arc<Context>, path: &str, content: &str, new_line: bool) -> Result<()> {
    let mut set = context.resolve(path)?;
    set.append(content, new_line)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn write_then_append_with_new_line() {
        let dir = TempDir::new().unwrap();
        let path = format!("{}/out/log.txt", dir.path().display());
        let context = Arc::new(Context::default().with_line_ending(fileset::LineEnding::Lf));

        run_write(&context, &path, "one").unwrap();
        run_append(&context, &path, "two", true).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("out/log.txt")).unwrap(),
            "one\ntwo"
        );
    }

    #[test]
    fn cat_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let context = Arc::new(Context::default());
        let pattern = format!("{}/missing.txt", dir.path().display());
        assert!(run_cat(&context, &pattern).is_err());
    }
}
