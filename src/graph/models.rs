//! Microsoft Graph resource and payload models.

use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Graph's date-time format for `dateTimeTimeZone` values.
const GRAPH_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Keep-alive event start, UTC hour of the current day.
const EVENT_START_HOUR: i64 = 9;

/// Keep-alive event length in minutes.
const EVENT_DURATION_MINUTES: i64 = 30;

/// Collection wrapper returned by Graph list endpoints.
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// A tenant user as returned by `GET /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Directory object ID.
    pub id: String,

    /// User Principal Name (email-like format).
    pub user_principal_name: String,
}

/// Calendar event, only the fields the calendar read reports on.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarEvent {
    pub id: Option<String>,
    pub subject: Option<String>,
}

/// Microsoft To Do task list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoList {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    pub content_type: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeTimeZone {
    pub date_time: String,
    pub time_zone: String,
}

impl DateTimeTimeZone {
    fn utc(at: NaiveDateTime) -> Self {
        Self {
            date_time: at.format(GRAPH_DATETIME_FORMAT).to_string(),
            time_zone: "UTC".to_string(),
        }
    }
}

/// Body of `POST /users/{id}/events`.
#[derive(Debug, Clone, Serialize)]
pub struct NewEvent {
    pub subject: String,
    pub body: ItemBody,
    pub start: DateTimeTimeZone,
    pub end: DateTimeTimeZone,
}

impl NewEvent {
    /// The daily 30-minute event at 09:00 UTC of `now`'s day.
    pub fn daily_keepalive(now: DateTime<Utc>) -> Self {
        let start = now.date_naive().and_time(NaiveTime::MIN) + Duration::hours(EVENT_START_HOUR);
        let end = start + Duration::minutes(EVENT_DURATION_MINUTES);

        Self {
            subject: "Daily Auto Event".to_string(),
            body: ItemBody {
                content_type: "HTML".to_string(),
                content: "Created automatically to keep calendar activity going every day."
                    .to_string(),
            },
            start: DateTimeTimeZone::utc(start),
            end: DateTimeTimeZone::utc(end),
        }
    }
}

/// Body of `POST /users/{id}/todo/lists/{list}/tasks`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub body: ItemBody,
    pub due_date_time: DateTimeTimeZone,
}

impl NewTask {
    /// A reminder due 24 hours after `now`.
    pub fn daily_reminder(now: DateTime<Utc>) -> Self {
        Self {
            title: "Daily Reminder".to_string(),
            body: ItemBody {
                content_type: "text".to_string(),
                content: "Created automatically to keep daily activity going.".to_string(),
            },
            due_date_time: DateTimeTimeZone::utc((now + Duration::days(1)).naive_utc()),
        }
    }
}

/// Body of `POST /users/{upn}/sendMail`.
#[derive(Debug, Clone, Serialize)]
pub struct SendMailRequest {
    pub message: MailMessage,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MailMessage {
    pub subject: String,
    pub body: ItemBody,
    pub to_recipients: Vec<Recipient>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub email_address: EmailAddress,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailAddress {
    pub address: String,
}

impl SendMailRequest {
    /// Plain-text message to a single recipient.
    pub fn text(subject: &str, body: &str, recipient: &str) -> Self {
        Self {
            message: MailMessage {
                subject: subject.to_string(),
                body: ItemBody {
                    content_type: "Text".to_string(),
                    content: body.to_string(),
                },
                to_recipients: vec![Recipient {
                    email_address: EmailAddress {
                        address: recipient.to_string(),
                    },
                }],
            },
        }
    }
}
