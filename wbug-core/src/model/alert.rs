use chrono::{DateTime, Utc};

use crate::data::{self, FromNode};
use crate::xml::Element;

/// A severe weather alert.
#[derive(Debug, Clone)]
pub struct Alert {
    id: String,
    alert_type: String,
    title: String,
    posted_time: DateTime<Utc>,
    expires_time: DateTime<Utc>,
    message_summary: String,
}

impl Alert {
    /// The unique alert identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The alert type, e.g. `Severe Thunderstorm Warning`.
    pub fn alert_type(&self) -> &str {
        &self.alert_type
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// When the alert was posted.
    pub fn posted_time(&self) -> DateTime<Utc> {
        self.posted_time
    }

    /// When the alert expires.
    pub fn expires_time(&self) -> DateTime<Utc> {
        self.expires_time
    }

    pub fn message_summary(&self) -> &str {
        &self.message_summary
    }
}

impl FromNode for Alert {
    /// Binds an `<aws:alert>` element.
    fn from_node(alert: &Element) -> anyhow::Result<Self> {
        Ok(Self {
            id: data::get_string(alert, "aws:id"),
            alert_type: data::get_string(alert, "aws:type"),
            title: data::get_string(alert, "aws:title"),
            posted_time: data::get_timestamp(alert, "aws:posted-date"),
            expires_time: data::get_timestamp(alert, "aws:expires-date"),
            message_summary: data::get_string(alert, "aws:msg-summary"),
        })
    }
}
