use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use log::{error, info, warn};

use crate::error::Result;

/// Where named outputs, annotations and the failure signal end up.
pub trait OutputSink {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()>;
    fn info(&mut self, message: &str) -> Result<()>;
    fn warning(&mut self, message: &str) -> Result<()>;
    fn set_failed(&mut self, message: &str) -> Result<()>;
}

/// GitHub Actions runner: outputs go to `$GITHUB_OUTPUT`, annotations to
/// stdout as workflow commands.
pub struct ActionsOutput<W: Write> {
    output_file: Option<PathBuf>,
    stdout: W,
}

impl ActionsOutput<std::io::Stdout> {
    pub fn new(output_file: Option<PathBuf>) -> Self {
        Self::with_writer(output_file, std::io::stdout())
    }
}

impl<W: Write> ActionsOutput<W> {
    pub fn with_writer(output_file: Option<PathBuf>, stdout: W) -> Self {
        Self {
            output_file,
            stdout,
        }
    }

    fn command(&mut self, command: &str, message: &str) -> Result<()> {
        writeln!(self.stdout, "::{command}::{}", escape_data(message))?;
        Ok(())
    }
}

impl<W: Write> OutputSink for ActionsOutput<W> {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        info!("Setting output {name}={value}");

        match &self.output_file {
            Some(path) => {
                let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                writeln!(file, "{name}<<{delimiter}\n{value}\n{delimiter}")?;
            }
            None => {
                writeln!(self.stdout, "::set-output name={name}::{}", escape_data(value))?;
            }
        }

        Ok(())
    }

    fn info(&mut self, message: &str) -> Result<()> {
        info!("{message}");
        writeln!(self.stdout, "{message}")?;
        Ok(())
    }

    fn warning(&mut self, message: &str) -> Result<()> {
        warn!("{message}");
        self.command("warning", message)
    }

    fn set_failed(&mut self, message: &str) -> Result<()> {
        error!("{message}");
        self.command("error", message)
    }
}

/// Escapes workflow command data the way the runner decodes it.
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
