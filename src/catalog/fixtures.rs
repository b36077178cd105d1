//! Built-in marketplace data served when no catalog API is configured.

use super::types::{
    AccountSnapshot, AccountStats, Activity, ActivityKind, CreatedEvent, EventRecord, EventStatus,
    OwnedTicket, TicketStatus, Transaction, TransactionKind,
};

const CURRENCY: &str = "HKDT";

fn event(id: &str, title: &str, location: &str, date: &str, status: EventStatus, price: f64) -> EventRecord {
    EventRecord {
        id: id.to_string(),
        title: title.to_string(),
        location: location.to_string(),
        date: date.to_string(),
        status,
        price,
        currency: CURRENCY.to_string(),
    }
}

pub fn events() -> Vec<EventRecord> {
    use EventStatus::*;
    vec![
        event("1", "Jay Chou Concert", "Hong Kong Coliseum", "March 15, 2024", Available, 100.0),
        event("2", "Tech Conference", "Hong Kong Convention Centre", "April 20, 2024", Resale, 150.0),
        event("3", "Music Festival", "Central Harbourfront", "February 10, 2024", Expired, 100.0),
        event("4", "Art Exhibition", "Hong Kong Museum of Art", "May 5, 2024", Available, 80.0),
        event("5", "Food Festival", "Victoria Park", "June 12, 2024", Available, 120.0),
        event("6", "Football Match", "Hong Kong Stadium", "June 12, 2024", Resale, 200.0),
        event("7", "Basketball Tournament", "Southorn Stadium", "July 8, 2024", Available, 90.0),
        event("8", "Ballet Performance", "Hong Kong Cultural Centre", "August 15, 2024", Resale, 180.0),
        event("9", "Business Forum", "Hong Kong Convention Centre", "September 5, 2024", Available, 250.0),
        event("10", "Film Festival", "The Grand Cinema", "October 10, 2024", Resale, 120.0),
        event("11", "Comic Convention", "AsiaWorld-Expo", "November 20, 2024", Available, 150.0),
        event("12", "New Year Countdown", "Victoria Harbour", "December 31, 2024", Available, 300.0),
    ]
}

pub fn activities() -> Vec<Activity> {
    let activity = |id: &str, kind, title: &str, date: &str, ts: &str, ago: &str| Activity {
        id: id.to_string(),
        kind,
        event_title: title.to_string(),
        event_date: date.to_string(),
        timestamp: ts.to_string(),
        time_ago: ago.to_string(),
    };
    vec![
        activity("1", ActivityKind::Purchase, "Jay Chou Concert", "March 15, 2024", "2024-03-01T14:30:00Z", "2 hours ago"),
        activity("2", ActivityKind::Create, "Tech Conference", "April 20, 2024", "2024-02-28T10:15:00Z", "1 day ago"),
        activity("3", ActivityKind::List, "Music Festival", "February 10, 2024", "2024-02-25T16:45:00Z", "3 days ago"),
        activity("4", ActivityKind::Transfer, "Art Exhibition", "May 5, 2024", "2024-02-20T09:00:00Z", "1 week ago"),
    ]
}

pub fn account() -> AccountSnapshot {
    AccountSnapshot {
        owned_tickets: vec![
            OwnedTicket {
                id: "1".to_string(),
                event_title: "Jay Chou Concert".to_string(),
                event_location: "Hong Kong Coliseum".to_string(),
                event_date: "March 15, 2024".to_string(),
                status: TicketStatus::Active,
                ticket_id: "#1234".to_string(),
                purchase_price: 100.0,
                listing_price: None,
                currency: CURRENCY.to_string(),
            },
            OwnedTicket {
                id: "2".to_string(),
                event_title: "Tech Conference".to_string(),
                event_location: "Hong Kong Convention Centre".to_string(),
                event_date: "April 20, 2024".to_string(),
                status: TicketStatus::Listed,
                ticket_id: "#5678".to_string(),
                purchase_price: 150.0,
                listing_price: Some(150.0),
                currency: CURRENCY.to_string(),
            },
        ],
        created_events: vec![
            CreatedEvent {
                id: "1".to_string(),
                title: "Tech Meetup".to_string(),
                date: "April 30, 2024".to_string(),
                tickets_sold: 15,
                total_tickets: 50,
            },
            CreatedEvent {
                id: "2".to_string(),
                title: "Startup Demo Day".to_string(),
                date: "May 15, 2024".to_string(),
                tickets_sold: 10,
                total_tickets: 40,
            },
        ],
        transactions: vec![
            Transaction {
                id: "1".to_string(),
                title: "Tech Conference Ticket".to_string(),
                date: "Apr 5, 2024".to_string(),
                amount: 150.0,
                kind: TransactionKind::Debit,
            },
            Transaction {
                id: "2".to_string(),
                title: "Deposit from Bank".to_string(),
                date: "Apr 1, 2024".to_string(),
                amount: 500.0,
                kind: TransactionKind::Credit,
            },
            Transaction {
                id: "3".to_string(),
                title: "Jay Chou Concert Ticket".to_string(),
                date: "Mar 28, 2024".to_string(),
                amount: 100.0,
                kind: TransactionKind::Debit,
            },
        ],
        balance: 1250.0,
        stats: AccountStats {
            total_revenue: 2500.0,
            tickets_sold: 25,
            active_events: 2,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fixture_shape() {
        let events = events();
        assert_eq!(events.len(), 12);
        let ids: HashSet<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), 12);
        assert!(events.iter().all(|e| e.parsed_date().is_some()));
        assert!(events.iter().all(|e| e.price >= 0.0));
        assert_eq!(activities().len(), 4);
    }
}
