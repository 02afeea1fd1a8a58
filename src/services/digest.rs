// src/services/digest.rs

//! Digest rendering.
//!
//! Recent listings become an HTML table; unseen raw rows become a
//! plain-text bulleted list.

use chrono::{DateTime, Utc};

use crate::models::{JobRow, MailConfig, NewRows, TrackedRow};

/// Message body in the format the digest was rendered to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailBody {
    Html(String),
    Text(String),
}

impl MailBody {
    pub fn as_str(&self) -> &str {
        match self {
            MailBody::Html(s) | MailBody::Text(s) => s,
        }
    }
}

/// A rendered email ready for a mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub subject: String,
    pub body: MailBody,
}

impl Digest {
    /// Render new rows, or `None` when there is nothing to announce.
    pub fn render(rows: &NewRows, mail: &MailConfig, checked_at: DateTime<Utc>) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }

        let digest = match rows {
            NewRows::Recent(jobs) => Self {
                subject: mail.subject_recent.clone(),
                body: MailBody::Html(html_table(jobs, checked_at)),
            },
            NewRows::Unseen(tracked) => Self {
                subject: mail
                    .subject_unseen
                    .replace("{count}", &tracked.len().to_string()),
                body: MailBody::Text(text_list(tracked, checked_at)),
            },
        };
        Some(digest)
    }
}

/// HTML table of listings. Cell text is inserted verbatim since table cells
/// in the source are already HTML fragments.
pub fn html_table(jobs: &[JobRow], checked_at: DateTime<Utc>) -> String {
    let mut html = String::from(
        r#"<h2>🔥 New Jobs Posted in the Last Hour</h2>
<table border="1" cellpadding="6" style="border-collapse: collapse;">
  <tr>
    <th>Company</th>
    <th>Role</th>
    <th>Location</th>
    <th>Salary</th>
    <th>Apply</th>
    <th>Posted</th>
  </tr>
"#,
    );

    for job in jobs {
        html.push_str(&format!(
            r#"  <tr>
    <td>{}</td>
    <td>{}</td>
    <td>{}</td>
    <td>{}</td>
    <td><a href="{}">Apply</a></td>
    <td>{}</td>
  </tr>
"#,
            job.company, job.role, job.location, job.salary, job.apply_url, job.posted
        ));
    }

    html.push_str("</table>\n");
    html.push_str(&format!(
        "<p><small>Checked {}</small></p>\n",
        checked_at.format("%Y-%m-%d %H:%M UTC")
    ));
    html
}

/// Bulleted plain-text list of raw rows.
pub fn text_list(rows: &[TrackedRow], checked_at: DateTime<Utc>) -> String {
    let mut text = format!(
        "{} new job postings (checked {}):\n\n",
        rows.len(),
        checked_at.format("%Y-%m-%d %H:%M UTC")
    );
    for row in rows {
        text.push_str(&format!("- {}\n", row.line));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn checked_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()
    }

    fn acme() -> JobRow {
        JobRow {
            company: "Acme".to_string(),
            role: "SWE".to_string(),
            location: "NYC".to_string(),
            salary: "150k".to_string(),
            apply_url: "http://x".to_string(),
            posted: "30m".to_string(),
        }
    }

    #[test]
    fn test_render_empty_is_none() {
        let mail = MailConfig::default();
        assert!(Digest::render(&NewRows::Recent(Vec::new()), &mail, checked_at()).is_none());
        assert!(Digest::render(&NewRows::Unseen(Vec::new()), &mail, checked_at()).is_none());
    }

    #[test]
    fn test_render_recent_is_html() {
        let mail = MailConfig::default();
        let digest = Digest::render(&NewRows::Recent(vec![acme()]), &mail, checked_at()).unwrap();

        assert_eq!(digest.subject, mail.subject_recent);
        let MailBody::Html(html) = &digest.body else {
            panic!("expected html body");
        };
        assert!(html.contains("<td>Acme</td>"));
        assert!(html.contains(r#"<a href="http://x">Apply</a>"#));
        assert!(html.contains("<td>30m</td>"));
        assert!(html.contains("2026-10-19 09:30 UTC"));
        assert_eq!(html.matches("<tr>").count(), 2);
        assert!(html.ends_with("</small></p>\n"));
    }

    #[test]
    fn test_render_unseen_is_text() {
        let mail = MailConfig::default();
        let rows = vec![TrackedRow::new("| a |"), TrackedRow::new("| b |")];
        let digest = Digest::render(&NewRows::Unseen(rows), &mail, checked_at()).unwrap();

        assert_eq!(digest.subject, "🔥 2 New Job Postings");
        assert_eq!(
            digest.body,
            MailBody::Text(
                "2 new job postings (checked 2026-10-19 09:30 UTC):\n\n- | a |\n- | b |\n"
                    .to_string()
            )
        );
    }
}
