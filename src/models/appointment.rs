use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Bookable slots offered by the practice. Sessions run on the hour.
pub const TIME_SLOTS: [&str; 9] = [
    "9:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "1:00 PM", "2:00 PM", "3:00 PM", "4:00 PM",
    "5:00 PM",
];

pub fn is_valid_time_slot(s: &str) -> bool {
    TIME_SLOTS.contains(&s)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub category: Category,
    pub status: AppointmentStatus,
    pub notes: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Accepts any casing; the stored form is always lowercase.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Some(AppointmentStatus::Pending),
            "confirmed" => Some(AppointmentStatus::Confirmed),
            "cancelled" => Some(AppointmentStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Reading,
    Consultation,
    Healing,
    Meditation,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Reading => "reading",
            Category::Consultation => "consultation",
            Category::Healing => "healing",
            Category::Meditation => "meditation",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "reading" => Some(Category::Reading),
            "consultation" => Some(Category::Consultation),
            "healing" => Some(Category::Healing),
            "meditation" => Some(Category::Meditation),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_any_casing() {
        assert_eq!(
            AppointmentStatus::parse("CANCELLED"),
            Some(AppointmentStatus::Cancelled)
        );
        assert_eq!(
            AppointmentStatus::parse("Confirmed"),
            Some(AppointmentStatus::Confirmed)
        );
        assert_eq!(
            AppointmentStatus::parse("pending"),
            Some(AppointmentStatus::Pending)
        );
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        assert_eq!(AppointmentStatus::parse("done"), None);
        assert_eq!(AppointmentStatus::parse(""), None);
    }

    #[test]
    fn test_status_canonical_form_is_lowercase() {
        for status in [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Cancelled,
        ] {
            assert_eq!(status.as_str(), status.as_str().to_lowercase());
            assert_eq!(AppointmentStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("reading"), Some(Category::Reading));
        assert_eq!(Category::parse("MEDITATION"), Some(Category::Meditation));
        assert_eq!(Category::parse("tarot"), None);
    }

    #[test]
    fn test_time_slots() {
        assert!(is_valid_time_slot("9:00 AM"));
        assert!(is_valid_time_slot("5:00 PM"));
        assert!(!is_valid_time_slot("10:30 AM"));
        assert!(!is_valid_time_slot("6:00 PM"));
        assert!(!is_valid_time_slot(""));
    }
}
