//! `carsales-mail`: compose the report email and hand it to a transport.

pub mod error;
pub mod message;
pub mod transport;

pub use error::MailError;
pub use message::{Attachment, Message};
pub use transport::{Outbox, Sendmail, Transport};
