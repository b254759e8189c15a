use std::fmt;

#[derive(Debug)]
pub enum MailError {
    /// Address is not of the form local@domain.
    InvalidAddress(String),
    /// Header value contains a line break.
    InvalidHeader { name: String },
    /// Attachment file could not be read.
    Attachment { path: String, message: String },
    /// sendmail binary not found on PATH.
    SendmailNotFound(String),
    /// sendmail ran but exited non-zero.
    SendmailFailed { status: String, stderr: String },
    /// IO error (spawn, pipe, outbox write).
    Io(String),
}

impl fmt::Display for MailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddress(addr) => write!(f, "invalid email address: '{addr}'"),
            Self::InvalidHeader { name } => write!(f, "header '{name}' contains a line break"),
            Self::Attachment { path, message } => {
                write!(f, "cannot attach {path}: {message}")
            }
            Self::SendmailNotFound(program) => write!(f, "sendmail binary not found: {program}"),
            Self::SendmailFailed { status, stderr } => {
                if stderr.is_empty() {
                    write!(f, "sendmail failed ({status})")
                } else {
                    write!(f, "sendmail failed ({status}): {stderr}")
                }
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for MailError {}
