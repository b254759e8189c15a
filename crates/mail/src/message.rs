use std::path::Path;

use base64::Engine;
use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::error::MailError;

/// Base64 body lines are wrapped at 76 columns (RFC 2045).
const BASE64_LINE_WIDTH: usize = 76;

const CRLF: &str = "\r\n";

#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl Attachment {
    /// Read a file and guess its MIME type from the extension.
    pub fn from_path(path: &Path) -> Result<Self, MailError> {
        let data = std::fs::read(path).map_err(|e| MailError::Attachment {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "attachment".to_string());
        Ok(Self { mime_type: mime_type_for(path).to_string(), filename, data })
    }
}

fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "csv" => "text/csv",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}

/// A plain-text email with at most one attachment.
#[derive(Debug, Clone)]
pub struct Message {
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub attachment: Option<Attachment>,
    pub date: DateTime<Local>,
    pub id: Uuid,
}

impl Message {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, MailError> {
        let sender = sender.into();
        let recipient = recipient.into();
        let subject = subject.into();
        validate_address(&sender)?;
        validate_address(&recipient)?;
        if subject.contains(['\r', '\n']) {
            return Err(MailError::InvalidHeader { name: "Subject".into() });
        }
        Ok(Self {
            sender,
            recipient,
            subject,
            body: body.into(),
            attachment: None,
            date: Local::now(),
            id: Uuid::new_v4(),
        })
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// `<uuid@sender-domain>`
    pub fn message_id(&self) -> String {
        let domain = self.sender.rsplit('@').next().unwrap_or("localhost");
        format!("<{}@{}>", self.id.simple(), domain)
    }

    /// Render as an RFC 5322 message with CRLF line endings.
    ///
    /// Without an attachment the body is sent as a single text/plain part;
    /// with one, as multipart/mixed with the attachment base64-encoded.
    pub fn to_mime(&self) -> String {
        let mut out = String::new();
        push_header(&mut out, "From", &self.sender);
        push_header(&mut out, "To", &self.recipient);
        push_header(&mut out, "Subject", &encode_header_value(&self.subject));
        push_header(&mut out, "Date", &self.date.to_rfc2822());
        push_header(&mut out, "Message-ID", &self.message_id());
        push_header(&mut out, "MIME-Version", "1.0");

        match &self.attachment {
            None => {
                push_text_part_headers(&mut out);
                out.push_str(CRLF);
                push_body(&mut out, &self.body);
            }
            Some(attachment) => {
                let boundary = format!("=_{}", self.id.simple());
                push_header(
                    &mut out,
                    "Content-Type",
                    &format!("multipart/mixed; boundary=\"{boundary}\""),
                );
                out.push_str(CRLF);

                out.push_str(&format!("--{boundary}{CRLF}"));
                push_text_part_headers(&mut out);
                out.push_str(CRLF);
                push_body(&mut out, &self.body);

                out.push_str(&format!("--{boundary}{CRLF}"));
                push_header(
                    &mut out,
                    "Content-Type",
                    &format!("{}; {}", attachment.mime_type, mime_param("name", &attachment.filename)),
                );
                push_header(
                    &mut out,
                    "Content-Disposition",
                    &format!("attachment; {}", mime_param("filename", &attachment.filename)),
                );
                push_header(&mut out, "Content-Transfer-Encoding", "base64");
                out.push_str(CRLF);
                let encoded = base64::engine::general_purpose::STANDARD.encode(&attachment.data);
                for chunk in encoded.as_bytes().chunks(BASE64_LINE_WIDTH) {
                    // base64 output is ASCII, so any byte split is a char boundary
                    out.push_str(std::str::from_utf8(chunk).unwrap_or_default());
                    out.push_str(CRLF);
                }
                out.push_str(&format!("--{boundary}--{CRLF}"));
            }
        }
        out
    }
}

/// Minimal shape check: exactly one '@' with something on both sides, no
/// whitespace or angle brackets.
fn validate_address(addr: &str) -> Result<(), MailError> {
    let invalid = || MailError::InvalidAddress(addr.to_string());
    let (local, domain) = addr.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.is_empty()
        || domain.contains('@')
        || addr.chars().any(|c| c.is_whitespace() || c == '<' || c == '>')
    {
        return Err(invalid());
    }
    Ok(())
}

fn push_header(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push_str(": ");
    out.push_str(value);
    out.push_str(CRLF);
}

fn push_text_part_headers(out: &mut String) {
    push_header(out, "Content-Type", "text/plain; charset=utf-8");
    push_header(out, "Content-Transfer-Encoding", "8bit");
}

fn push_body(out: &mut String, body: &str) {
    for line in body.lines() {
        out.push_str(line);
        out.push_str(CRLF);
    }
}

/// `name="value"` with quotes and backslashes escaped, or the RFC 2231
/// `name*=utf-8''...` form when the value has non-ASCII or control bytes.
fn mime_param(name: &str, value: &str) -> String {
    if value.bytes().all(|b| (0x20..0x7f).contains(&b)) {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        return format!("{name}=\"{escaped}\"");
    }
    let mut encoded = String::with_capacity(value.len() * 3);
    for b in value.bytes() {
        if b.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&b) {
            encoded.push(b as char);
        } else {
            encoded.push_str(&format!("%{b:02X}"));
        }
    }
    format!("{name}*=utf-8''{encoded}")
}

/// RFC 2047 encoded-word for non-ASCII header text.
fn encode_header_value(value: &str) -> String {
    if value.is_ascii() {
        value.to_string()
    } else {
        let encoded = base64::engine::general_purpose::STANDARD.encode(value.as_bytes());
        format!("=?utf-8?B?{encoded}?=")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn message() -> Message {
        Message::new(
            "automation@example.com",
            "student@example.com",
            "Sales summary for last month",
            "line one\nline two",
        )
        .unwrap()
    }

    #[test]
    fn plain_message_headers_and_body() {
        let mime = message().to_mime();
        assert!(mime.starts_with("From: automation@example.com\r\nTo: student@example.com\r\n"));
        assert!(mime.contains("Subject: Sales summary for last month\r\n"));
        assert!(mime.contains("MIME-Version: 1.0\r\n"));
        assert!(mime.contains("Content-Type: text/plain; charset=utf-8\r\n"));
        assert!(mime.ends_with("\r\n\r\nline one\r\nline two\r\n"));
        assert!(!mime.contains("multipart"));
    }

    #[test]
    fn message_id_uses_sender_domain() {
        let msg = message();
        let id = msg.message_id();
        assert!(id.starts_with('<'));
        assert!(id.ends_with("@example.com>"));
    }

    #[test]
    fn multipart_with_attachment() {
        let msg = message().with_attachment(Attachment {
            filename: "cars.csv".into(),
            mime_type: "text/csv".into(),
            data: vec![b'x'; 100],
        });
        let mime = msg.to_mime();
        let boundary = format!("=_{}", msg.id.simple());

        assert!(mime.contains(&format!("Content-Type: multipart/mixed; boundary=\"{boundary}\"")));
        assert!(mime.contains("Content-Disposition: attachment; filename=\"cars.csv\"\r\n"));
        assert!(mime.contains("Content-Transfer-Encoding: base64\r\n"));
        assert!(mime.ends_with(&format!("--{boundary}--\r\n")));
        assert_eq!(mime.matches(&format!("--{boundary}\r\n")).count(), 2);

        // 100 bytes -> 136 base64 chars -> one 76-char line and one 60-char line
        let encoded = base64::engine::general_purpose::STANDARD.encode(vec![b'x'; 100]);
        assert!(mime.contains(&format!("{}\r\n{}\r\n", &encoded[..76], &encoded[76..])));
    }

    #[test]
    fn attachment_filename_is_quoted_or_encoded() {
        assert_eq!(mime_param("filename", "cars.csv"), "filename=\"cars.csv\"");
        assert_eq!(mime_param("filename", "a\"b\\c.csv"), "filename=\"a\\\"b\\\\c.csv\"");
        assert_eq!(
            mime_param("filename", "Résumé.csv"),
            "filename*=utf-8''R%C3%A9sum%C3%A9.csv"
        );

        let msg = message().with_attachment(Attachment {
            filename: "x.csv\r\nBcc: spy@example.com".into(),
            mime_type: "text/csv".into(),
            data: b"1".to_vec(),
        });
        let mime = msg.to_mime();
        assert!(!mime.contains("\r\nBcc:"));
        assert!(mime.contains("filename*=utf-8''x.csv%0D%0ABcc%3A%20spy%40example.com\r\n"));
    }

    #[test]
    fn attachment_from_path_guesses_type() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cars.xlsx");
        std::fs::write(&path, b"PK\x03\x04").unwrap();

        let att = Attachment::from_path(&path).unwrap();
        assert_eq!(att.filename, "cars.xlsx");
        assert_eq!(att.mime_type, "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet");
        assert_eq!(att.data, b"PK\x03\x04");

        assert_eq!(mime_type_for(Path::new("report.bin")), "application/octet-stream");
    }

    #[test]
    fn attachment_missing_file() {
        let dir = tempdir().unwrap();
        let err = Attachment::from_path(&dir.path().join("gone.xlsx")).unwrap_err();
        assert!(matches!(err, MailError::Attachment { .. }));
    }

    #[test]
    fn bad_addresses_rejected() {
        for addr in ["", "student", "@example.com", "student@", "a@b@c", "a b@example.com", "<a@b>"] {
            let result = Message::new("automation@example.com", addr, "s", "b");
            assert!(matches!(result, Err(MailError::InvalidAddress(_))), "accepted {addr:?}");
        }
    }

    #[test]
    fn subject_line_break_rejected() {
        let result = Message::new("a@example.com", "b@example.com", "hi\r\nBcc: x@evil.test", "b");
        assert!(matches!(result, Err(MailError::InvalidHeader { .. })));
    }

    #[test]
    fn non_ascii_subject_is_encoded() {
        let msg = Message::new("a@example.com", "b@example.com", "Résumé", "b").unwrap();
        assert!(msg.to_mime().contains("Subject: =?utf-8?B?UsOpc3Vtw6k=?=\r\n"));
    }
}
