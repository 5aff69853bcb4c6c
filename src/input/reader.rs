use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, IsTerminal, Read};

/// Largest source file accepted as model input.
pub const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB

/// Reads source code for the one-shot commands and the session's `/load`.
pub struct InputReader;

impl InputReader {
    /// Reads from `file_path`, or from stdin when no path is given.
    pub fn read(file_path: Option<&str>) -> Result<String> {
        file_path.map_or_else(Self::read_stdin, Self::read_file)
    }

    /// Like [`InputReader::read`], but fails when the result is blank.
    ///
    /// `what` names the input in the error message (e.g. "original code").
    pub fn read_non_empty(file_path: Option<&str>, what: &str) -> Result<String> {
        let content = Self::read(file_path)?;
        if content.trim().is_empty() {
            bail!("Error: {what} is empty");
        }
        Ok(content)
    }

    pub fn read_file(path: &str) -> Result<String> {
        let metadata =
            fs::metadata(path).with_context(|| format!("Failed to access file: {path}"))?;

        let size = metadata.len() as usize;
        if size > MAX_INPUT_SIZE {
            bail!(
                "Error: Input size ({:.1} MB) exceeds maximum allowed size (1 MB).\n\n\
                 Send a smaller excerpt of the code.",
                size as f64 / 1024.0 / 1024.0
            );
        }

        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
    }

    #[allow(clippy::significant_drop_tightening)]
    fn read_stdin() -> Result<String> {
        let mut stdin = io::stdin().lock();

        if stdin.is_terminal() {
            bail!(
                "Error: No input provided\n\n\
                 Pass a file path or pipe code via stdin, e.g.:\n  \
                 cat main.py | codecraft analyze"
            );
        }

        let mut buffer = Vec::new();
        let mut chunk = [0u8; 8192];

        loop {
            let bytes_read = stdin
                .read(&mut chunk)
                .context("Failed to read from stdin")?;

            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&chunk[..bytes_read]);

            if buffer.len() > MAX_INPUT_SIZE {
                bail!(
                    "Error: Input size ({:.1} MB) exceeds maximum allowed size (1 MB).\n\n\
                     Send a smaller excerpt of the code.",
                    buffer.len() as f64 / 1024.0 / 1024.0
                );
            }
        }

        String::from_utf8(buffer).context("Input is not valid UTF-8")
    }
}
