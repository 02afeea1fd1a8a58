//! Services for digest rendering and mail delivery.
//!
//! - `Digest`: render new rows into a subject and body
//! - `Mailer`: deliver a digest (`SmtpMailer` in production)

pub mod digest;
pub mod mailer;

pub use digest::{Digest, MailBody};
pub use mailer::{Mailer, SmtpMailer};
