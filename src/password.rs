//! Password resolution for engine connections

use crate::cli::EngineArgs;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Prompt shown when reading the password from the terminal
pub const PROMPT: &str = "Password: ";

/// Resolve the password for `args`, from `--password-file` when given and
/// from the terminal otherwise.
pub fn read_password(args: &EngineArgs) -> Result<String> {
    resolve_password(args.password_file.as_deref())
}

/// Read the password from `password_file`, or prompt with echo disabled.
pub fn resolve_password(password_file: Option<&Path>) -> Result<String> {
    match password_file {
        Some(path) => read_password_file(path),
        None => prompt_password(),
    }
}

/// Read a password file, dropping exactly one trailing newline.
///
/// The engine rejects passwords with empty lines, so only the newline left
/// by an editor is removed; any other trailing whitespace is kept.
pub fn read_password_file(path: &Path) -> Result<String> {
    let contents = fs::read_to_string(path)?;
    Ok(strip_trailing_newline(contents))
}

/// Prompt on the terminal and return the input verbatim.
pub fn prompt_password() -> Result<String> {
    Ok(rpassword::prompt_password(PROMPT)?)
}

fn strip_trailing_newline(mut contents: String) -> String {
    if contents.ends_with('\n') {
        contents.pop();
    }
    contents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn password_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write password");
        file
    }

    #[test]
    fn test_single_trailing_newline_stripped() {
        let file = password_file("secret\n");
        assert_eq!(read_password_file(file.path()).unwrap(), "secret");
    }

    #[test]
    fn test_only_one_newline_stripped() {
        let file = password_file("secret\n\n");
        assert_eq!(read_password_file(file.path()).unwrap(), "secret\n");
    }

    #[test]
    fn test_no_trailing_newline() {
        let file = password_file("secret");
        assert_eq!(read_password_file(file.path()).unwrap(), "secret");
    }

    #[test]
    fn test_other_whitespace_preserved() {
        let file = password_file("  secret \t\n");
        assert_eq!(read_password_file(file.path()).unwrap(), "  secret \t");
    }

    #[test]
    fn test_empty_file() {
        let file = password_file("");
        assert_eq!(read_password_file(file.path()).unwrap(), "");
    }

    #[test]
    fn test_missing_file_propagates_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("no-such-password");

        match resolve_password(Some(&missing)) {
            Err(EngineError::Io(err)) => assert_eq!(err.kind(), std::io::ErrorKind::NotFound),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_read_password_uses_args_file() {
        let file = password_file("from-args\n");
        let args = EngineArgs {
            engine_url: "https://engine".to_string(),
            username: "admin".to_string(),
            password_file: Some(file.path().to_path_buf()),
            cafile: None,
            secure: false,
            debug: false,
        };
        assert_eq!(read_password(&args).unwrap(), "from-args");
    }
}
