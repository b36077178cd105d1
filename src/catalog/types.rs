//! Marketplace records. Field names serialize as camelCase to match the
//! catalog JSON API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display format of event dates, e.g. "March 15, 2024".
pub const EVENT_DATE_FORMAT: &str = "%B %d, %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Available,
    Resale,
    Expired,
}

impl EventStatus {
    pub const ALL: [EventStatus; 3] = [
        EventStatus::Available,
        EventStatus::Resale,
        EventStatus::Expired,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Available => "Available",
            EventStatus::Resale => "Resale",
            EventStatus::Expired => "Expired",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventStatus::Available => write!(f, "available"),
            EventStatus::Resale => write!(f, "resale"),
            EventStatus::Expired => write!(f, "expired"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    pub location: String,
    /// Display date, e.g. "March 15, 2024".
    pub date: String,
    pub status: EventStatus,
    pub price: f64,
    pub currency: String,
}

impl EventRecord {
    /// Calendar date parsed from the display string.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), EVENT_DATE_FORMAT).ok()
    }

    pub fn is_expired(&self) -> bool {
        self.status == EventStatus::Expired
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Purchase,
    Create,
    List,
    Transfer,
}

impl ActivityKind {
    pub fn title(&self) -> &'static str {
        match self {
            ActivityKind::Purchase => "Ticket purchased",
            ActivityKind::Create => "Event created",
            ActivityKind::List => "Ticket listed for sale",
            ActivityKind::Transfer => "Ticket transferred",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub event_title: String,
    pub event_date: String,
    /// RFC 3339.
    pub timestamp: String,
    pub time_ago: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Active,
    Listed,
    Expired,
}

impl TicketStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Active => "Active",
            TicketStatus::Listed => "Listed for Sale",
            TicketStatus::Expired => "Expired",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedTicket {
    pub id: String,
    pub event_title: String,
    pub event_location: String,
    pub event_date: String,
    pub status: TicketStatus,
    pub ticket_id: String,
    pub purchase_price: f64,
    #[serde(default)]
    pub listing_price: Option<f64>,
    pub currency: String,
}

impl OwnedTicket {
    /// The price shown on the card: listing price while listed, else what was paid.
    pub fn display_price(&self) -> f64 {
        match (self.status, self.listing_price) {
            (TicketStatus::Listed, Some(p)) => p,
            _ => self.purchase_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEvent {
    pub id: String,
    pub title: String,
    pub date: String,
    pub tickets_sold: u32,
    pub total_tickets: u32,
}

impl CreatedEvent {
    /// Sold share in percent, 0 when the event has no tickets.
    pub fn sold_pct(&self) -> u32 {
        if self.total_tickets == 0 {
            return 0;
        }
        self.tickets_sold.min(self.total_tickets) * 100 / self.total_tickets
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Debit,
    Credit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub title: String,
    pub date: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Debit => -self.amount,
            TransactionKind::Credit => self.amount,
        }
    }

    /// `+500 HKDT` for credits, `-150 HKDT` for debits.
    pub fn display_amount(&self) -> String {
        format!("{:+} HKDT", self.signed_amount())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStats {
    pub total_revenue: f64,
    pub tickets_sold: u32,
    pub active_events: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub owned_tickets: Vec<OwnedTicket>,
    pub created_events: Vec<CreatedEvent>,
    pub transactions: Vec<Transaction>,
    pub balance: f64,
    pub stats: AccountStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let raw = r#"{
            "id": "1",
            "title": "Jay Chou Concert",
            "location": "Hong Kong Coliseum",
            "date": "March 15, 2024",
            "status": "available",
            "price": 100,
            "currency": "HKDT"
        }"#;
        let event: EventRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(event.status, EventStatus::Available);
        assert_eq!(event.price, 100.0);
        assert_eq!(
            event.parsed_date(),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn test_single_digit_day_parses() {
        let event = EventRecord {
            id: "4".into(),
            title: "Art Exhibition".into(),
            location: "Hong Kong Museum of Art".into(),
            date: "May 5, 2024".into(),
            status: EventStatus::Available,
            price: 80.0,
            currency: "HKDT".into(),
        };
        assert_eq!(event.parsed_date(), NaiveDate::from_ymd_opt(2024, 5, 5));
    }

    #[test]
    fn test_activity_type_field() {
        let raw = r#"{
            "id": "1",
            "type": "purchase",
            "eventTitle": "Jay Chou Concert",
            "eventDate": "March 15, 2024",
            "timestamp": "2024-03-01T14:30:00Z",
            "timeAgo": "2 hours ago"
        }"#;
        let activity: Activity = serde_json::from_str(raw).unwrap();
        assert_eq!(activity.kind, ActivityKind::Purchase);
        assert_eq!(activity.kind.title(), "Ticket purchased");
    }

    #[test]
    fn test_sold_pct() {
        let ev = CreatedEvent {
            id: "1".into(),
            title: "Tech Meetup".into(),
            date: "April 30, 2024".into(),
            tickets_sold: 15,
            total_tickets: 50,
        };
        assert_eq!(ev.sold_pct(), 30);
        let empty = CreatedEvent {
            total_tickets: 0,
            ..ev
        };
        assert_eq!(empty.sold_pct(), 0);
    }

    #[test]
    fn test_transaction_amount_sign() {
        let debit = Transaction {
            id: "t1".into(),
            title: "Ticket Purchase".into(),
            date: "March 10, 2024".into(),
            amount: 150.0,
            kind: TransactionKind::Debit,
        };
        assert_eq!(debit.signed_amount(), -150.0);
        assert_eq!(debit.display_amount(), "-150 HKDT");

        let credit = Transaction {
            kind: TransactionKind::Credit,
            amount: 87.5,
            ..debit
        };
        assert_eq!(credit.signed_amount(), 87.5);
        assert_eq!(credit.display_amount(), "+87.5 HKDT");
    }
}
