//! External document converter (pandoc).
//!
//! Both directions shell out to the same program: a source document to
//! markdown, and markdown to an HTML fragment. The converter's stderr is
//! kept verbatim so failures can be shown as the tool reported them.

use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("failed to run `{program}` (is it installed?): {source}")]
    ConverterUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` failed ({status}):\n{stderr}")]
    ConversionFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("`{program}` produced non-UTF-8 output")]
    InvalidOutput { program: String },
}

/// Adapter around the pandoc command line.
#[derive(Debug, Clone)]
pub struct Pandoc {
    program: String,
}

impl Pandoc {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Convert a source document (docx, odt, ...) to markdown.
    pub fn to_markdown(&self, path: &Path) -> Result<String, ConvertError> {
        let args: [&OsStr; 4] = [
            path.as_os_str(),
            OsStr::new("-t"),
            OsStr::new("markdown"),
            OsStr::new("--wrap=none"),
        ];
        let output = self.run(&args, None)?;
        self.stdout_string(output)
    }

    /// Convert markdown to an HTML fragment.
    ///
    /// Pandoc's automatic heading ids are disabled; anchors are assigned
    /// afterwards so they follow one rule regardless of backend.
    pub fn to_html(&self, markdown: &str) -> Result<String, ConvertError> {
        let args = [
            OsStr::new("-f"),
            OsStr::new("markdown-auto_identifiers"),
            OsStr::new("-t"),
            OsStr::new("html"),
            OsStr::new("--wrap=none"),
        ];
        let output = self.run(&args, Some(markdown.as_bytes()))?;
        self.stdout_string(output)
    }

    fn run(&self, args: &[&OsStr], stdin_data: Option<&[u8]>) -> Result<Output, ConvertError> {
        tracing::debug!(program = %self.program, ?args, "running converter");

        let unavailable = |source| ConvertError::ConverterUnavailable {
            program: self.program.clone(),
            source,
        };

        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .stdin(if stdin_data.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(unavailable)?;

        if let Some(data) = stdin_data
            && let Some(mut stdin) = child.stdin.take()
        {
            // A converter that exits early closes the pipe; its exit status
            // carries the real error, so a broken pipe here is not fatal.
            if let Err(e) = stdin.write_all(data)
                && e.kind() != std::io::ErrorKind::BrokenPipe
            {
                return Err(unavailable(e));
            }
        }

        let output = child.wait_with_output().map_err(unavailable)?;

        if !output.status.success() {
            return Err(ConvertError::ConversionFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        Ok(output)
    }

    fn stdout_string(&self, output: Output) -> Result<String, ConvertError> {
        String::from_utf8(output.stdout).map_err(|_| ConvertError::InvalidOutput {
            program: self.program.clone(),
        })
    }
}
