//! Market tab filtering, sorting and pagination.
//!
//! `query` is a pure function of (events, filter, sort). A record is kept
//! only if every active criterion holds:
//!   - free-text query: case-insensitive substring of title or location
//!   - status set (non-empty): status is selected
//!   - location set (non-empty): location is selected
//!   - price range: min <= price <= max (inclusive)
//! An empty set imposes no restriction on its dimension.
//!
//! Pages are 1-based. Any filter or sort change resets to page 1; a page
//! past the end is an empty slice.

use crate::catalog::{EventRecord, EventStatus};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

/// Price buckets offered by the filter menu.
pub const PRICE_RANGES: [PriceRange; 4] = [
    PriceRange::new(0.0, 100.0),
    PriceRange::new(100.0, 200.0),
    PriceRange::new(200.0, 300.0),
    PriceRange::new(300.0, 500.0),
];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventFilter {
    pub query: String,
    pub statuses: Vec<EventStatus>,
    pub locations: Vec<String>,
    pub price_range: Option<PriceRange>,
}

impl EventFilter {
    /// What the Market tab opens with: available tickets priced 0-500.
    pub fn initial() -> Self {
        Self {
            query: String::new(),
            statuses: vec![EventStatus::Available],
            locations: Vec::new(),
            price_range: Some(PriceRange::new(0.0, 500.0)),
        }
    }

    pub fn matches(&self, event: &EventRecord) -> bool {
        let query = self.query.to_lowercase();
        if !query.is_empty()
            && !event.title.to_lowercase().contains(&query)
            && !event.location.to_lowercase().contains(&query)
        {
            return false;
        }
        if !self.statuses.is_empty() && !self.statuses.contains(&event.status) {
            return false;
        }
        if !self.locations.is_empty() && !self.locations.iter().any(|l| *l == event.location) {
            return false;
        }
        match self.price_range {
            Some(range) => range.contains(event.price),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Date,
    Title,
    Price,
}

impl SortField {
    pub const ALL: [SortField; 3] = [SortField::Title, SortField::Date, SortField::Price];

    /// Menu label.
    pub fn label(&self) -> &'static str {
        match self {
            SortField::Date => "Event Date",
            SortField::Title => "Event Title",
            SortField::Price => "Price",
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortField::Date => write!(f, "Date"),
            SortField::Title => write!(f, "Title"),
            SortField::Price => write!(f, "Price"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::Date,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    /// Same field flips the direction; a new field starts descending.
    pub fn toggled(self, field: SortField) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Desc,
            }
        }
    }
}

/// Case-insensitive ordering with exact text as tiebreak (lowercase first),
/// approximating locale collation for display strings.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let fold = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<String>();
    fold(a).cmp(&fold(b)).then_with(|| b.cmp(a))
}

/// Ascending comparison on a single field. Unparsable dates sort first.
pub fn compare(a: &EventRecord, b: &EventRecord, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.parsed_date().cmp(&b.parsed_date()),
        SortField::Title => locale_cmp(&a.title, &b.title),
        SortField::Price => a.price.total_cmp(&b.price),
    }
}

/// Filter then sort. The sort is stable, so ties keep catalog order.
pub fn query(events: &[EventRecord], filter: &EventFilter, sort: SortState) -> Vec<EventRecord> {
    let mut result: Vec<EventRecord> = events.iter().filter(|e| filter.matches(e)).cloned().collect();
    result.sort_by(|a, b| {
        let ord = compare(a, b, sort.field);
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    result
}

/// Items on 1-based `page`. Page 0 or a page past the end is empty.
pub fn page<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Figures for the "Showing X to Y of Z results" footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: usize,
    pub total_results: usize,
    pub total_pages: usize,
    /// 1-based index of the first result on the page, 0 when empty.
    pub start_result: usize,
    pub end_result: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageInfo {
    pub fn new(total_results: usize, page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_results.div_ceil(page_size);
        let start_result = if total_results == 0 || page == 0 {
            0
        } else {
            (page - 1)
                .saturating_mul(page_size)
                .saturating_add(1)
                .min(total_results.saturating_add(1))
        };
        let end_result = if start_result == 0 || start_result > total_results {
            0
        } else {
            start_result.saturating_add(page_size - 1).min(total_results)
        };
        Self {
            page,
            total_results,
            total_pages,
            start_result,
            end_result,
            has_previous: page > 1,
            has_next: page < total_pages,
        }
    }
}

/// Distinct locations in first-seen order.
pub fn location_options(events: &[EventRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for e in events {
        if !seen.contains(&e.location) {
            seen.push(e.location.clone());
        }
    }
    seen
}

/// Market tab UI state. Every filter or sort mutation returns to page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketState {
    pub filter: EventFilter,
    pub sort: SortState,
    pub page: usize,
}

impl Default for MarketState {
    fn default() -> Self {
        Self {
            filter: EventFilter::initial(),
            sort: SortState::default(),
            page: 1,
        }
    }
}

impl MarketState {
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
        self.page = 1;
    }

    pub fn toggle_status(&mut self, status: EventStatus) {
        toggle(&mut self.filter.statuses, status);
        self.page = 1;
    }

    pub fn remove_status(&mut self, status: EventStatus) {
        self.filter.statuses.retain(|s| *s != status);
        self.page = 1;
    }

    pub fn toggle_location(&mut self, location: &str) {
        toggle(&mut self.filter.locations, location.to_string());
        self.page = 1;
    }

    pub fn remove_location(&mut self, location: &str) {
        self.filter.locations.retain(|l| l != location);
        self.page = 1;
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.filter.price_range = Some(range);
        self.page = 1;
    }

    pub fn clear_price_range(&mut self) {
        self.filter.price_range = None;
        self.page = 1;
    }

    pub fn sort_by(&mut self, field: SortField) {
        self.sort = self.sort.toggled(field);
        self.page = 1;
    }

    pub fn previous_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    pub fn next_page(&mut self, total_pages: usize) {
        if self.page < total_pages {
            self.page += 1;
        }
    }

    pub fn go_to(&mut self, page: usize) {
        self.page = page.max(1);
    }
}

fn toggle<T: PartialEq>(set: &mut Vec<T>, value: T) {
    if let Some(pos) = set.iter().position(|v| *v == value) {
        set.remove(pos);
    } else {
        set.push(value);
    }
}
