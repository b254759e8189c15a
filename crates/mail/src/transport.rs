use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::MailError;
use crate::message::Message;

pub trait Transport {
    fn send(&self, message: &Message) -> Result<(), MailError>;
}

/// Hands the message to the local MTA via `sendmail -t -i`.
///
/// `-t` reads recipients from the headers; `-i` keeps a lone "." line from
/// ending the message early.
pub struct Sendmail {
    program: String,
}

impl Sendmail {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    fn resolve(&self) -> Result<PathBuf, MailError> {
        which::which(&self.program).map_err(|_| MailError::SendmailNotFound(self.program.clone()))
    }
}

impl Transport for Sendmail {
    fn send(&self, message: &Message) -> Result<(), MailError> {
        let program = self.resolve()?;
        log::debug!("piping message to {}", program.display());

        let mut child = Command::new(&program)
            .args(["-t", "-i"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| MailError::Io(format!("failed to run {}: {e}", program.display())))?;

        // stdin is dropped before the wait so sendmail sees EOF
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(message.to_mime().as_bytes()),
            None => Ok(()),
        };

        let output = child
            .wait_with_output()
            .map_err(|e| MailError::Io(format!("failed to wait for sendmail: {e}")))?;

        if !output.status.success() {
            return Err(MailError::SendmailFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written.map_err(|e| MailError::Io(format!("failed to write to sendmail: {e}")))?;

        log::info!("sent {} to {} via sendmail", message.message_id(), message.recipient);
        Ok(())
    }
}

/// Drops each message as a `.eml` file in a directory instead of sending it.
pub struct Outbox {
    dir: PathBuf,
}

impl Outbox {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the message and return the file path.
    pub fn deliver(&self, message: &Message) -> Result<PathBuf, MailError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| MailError::Io(format!("cannot create {}: {e}", self.dir.display())))?;

        let name = format!(
            "{}-{}.eml",
            message.date.format("%Y%m%dT%H%M%S"),
            message.id.simple()
        );
        let path = self.dir.join(name);
        std::fs::write(&path, message.to_mime())
            .map_err(|e| MailError::Io(format!("cannot write {}: {e}", path.display())))?;

        log::info!("queued {} for {} at {}", message.message_id(), message.recipient, path.display());
        Ok(path)
    }
}

impl Transport for Outbox {
    fn send(&self, message: &Message) -> Result<(), MailError> {
        self.deliver(message).map(|_| ())
    }
}
