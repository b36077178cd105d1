use super::event_card::EventCard;
use super::AppContext;
use crate::catalog::{Catalog, EventStatus};
use crate::market::{self, location_options, MarketState, PageInfo, PriceRange, SortField, PRICE_RANGES};
use dioxus::prelude::*;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Menu {
    Status,
    Location,
    Price,
    Sort,
}

fn page_class(current: bool) -> &'static str {
    if current {
        "page-button page-button-current"
    } else {
        "page-button"
    }
}

fn price_label(range: &PriceRange) -> String {
    format!("{} - {} HKDT", range.min, range.max)
}

#[component]
pub fn MarketTab() -> Element {
    let ctx = use_context::<AppContext>();
    let page_size = ctx.config.market.page_size;

    let catalog = ctx.catalog.clone();
    let events = use_resource(move || {
        let catalog = catalog.clone();
        async move {
            catalog
                .list_events()
                .await
                .inspect_err(|e| warn!(error = %e, "failed to load events"))
        }
    });

    let mut state = use_signal(MarketState::default);
    let mut open_menu = use_signal(|| None::<Menu>);

    let all_events = match &*events.read_unchecked() {
        Some(Ok(list)) => list.clone(),
        _ => Vec::new(),
    };
    let locations = location_options(&all_events);

    let current = state();
    let results = market::query(&all_events, &current.filter, current.sort);
    let info = PageInfo::new(results.len(), current.page, page_size);
    let visible = market::page(&results, current.page, page_size).to_vec();

    let mut toggle_menu = move |menu: Menu| {
        let next = if open_menu() == Some(menu) { None } else { Some(menu) };
        open_menu.set(next);
    };

    rsx! {
        div { class: "mt-6",
            // search + filter bar
            div { class: "flex flex-wrap items-center gap-3",
                input {
                    class: "flex-1 rounded-md border border-gray-300 px-3 py-2",
                    r#type: "text",
                    placeholder: "Search events...",
                    value: "{current.filter.query}",
                    oninput: move |evt: FormEvent| state.write().set_query(evt.value()),
                }
                div { class: "relative",
                    button { class: "filter-button", onclick: move |_| toggle_menu(Menu::Status), "Status" }
                    if open_menu() == Some(Menu::Status) {
                        div { class: "filter-menu",
                            for status in EventStatus::ALL {
                                label { key: "{status}", class: "filter-option",
                                    input {
                                        r#type: "checkbox",
                                        checked: current.filter.statuses.contains(&status),
                                        onchange: move |_| state.write().toggle_status(status),
                                    }
                                    "{status.label()}"
                                }
                            }
                        }
                    }
                }
                div { class: "relative",
                    button { class: "filter-button", onclick: move |_| toggle_menu(Menu::Location), "Location" }
                    if open_menu() == Some(Menu::Location) {
                        div { class: "filter-menu",
                            for location in locations {
                                label { key: "{location}", class: "filter-option",
                                    input {
                                        r#type: "checkbox",
                                        checked: current.filter.locations.contains(&location),
                                        onchange: {
                                            let location = location.clone();
                                            move |_| state.write().toggle_location(&location)
                                        },
                                    }
                                    "{location}"
                                }
                            }
                        }
                    }
                }
                div { class: "relative",
                    button { class: "filter-button", onclick: move |_| toggle_menu(Menu::Price), "Price" }
                    if open_menu() == Some(Menu::Price) {
                        div { class: "filter-menu",
                            for range in PRICE_RANGES {
                                button {
                                    key: "{range.min}",
                                    class: "filter-option",
                                    onclick: move |_| {
                                        state.write().set_price_range(range);
                                        open_menu.set(None);
                                    },
                                    "{price_label(&range)}"
                                }
                            }
                        }
                    }
                }
                div { class: "relative",
                    button { class: "filter-button", onclick: move |_| toggle_menu(Menu::Sort),
                        "Sort: {current.sort.field} {current.sort.direction.arrow()}"
                    }
                    if open_menu() == Some(Menu::Sort) {
                        div { class: "filter-menu",
                            for field in SortField::ALL {
                                button {
                                    key: "{field}",
                                    class: "filter-option",
                                    onclick: move |_| {
                                        state.write().sort_by(field);
                                        open_menu.set(None);
                                    },
                                    "{field.label()}"
                                    if current.sort.field == field {
                                        " {current.sort.direction.arrow()}"
                                    }
                                }
                            }
                        }
                    }
                }
            }

            // active filter chips
            div { class: "mt-3 flex flex-wrap gap-2",
                for status in current.filter.statuses.clone() {
                    span { key: "status-{status}", class: "chip",
                        "{status.label()}"
                        button { onclick: move |_| state.write().remove_status(status), "×" }
                    }
                }
                for location in current.filter.locations.clone() {
                    span { key: "location-{location}", class: "chip",
                        "{location}"
                        button {
                            onclick: {
                                let location = location.clone();
                                move |_| state.write().remove_location(&location)
                            },
                            "×"
                        }
                    }
                }
                if let Some(range) = current.filter.price_range {
                    span { class: "chip",
                        "{price_label(&range)}"
                        button { onclick: move |_| state.write().clear_price_range(), "×" }
                    }
                }
            }

            if visible.is_empty() {
                div { class: "mt-8 text-center",
                    h3 { class: "text-sm font-medium text-gray-900", "No matching events found" }
                    p { class: "mt-1 text-sm text-gray-500", "Try adjusting your filters or search criteria." }
                }
            } else {
                div { class: "mt-6 grid grid-cols-1 gap-6 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4",
                    for event in visible {
                        EventCard {
                            key: "{event.id}",
                            event: event.clone(),
                            on_buy: move |id: String| info!(event_id = %id, "buy ticket requested"),
                        }
                    }
                }
            }

            if info.total_pages > 0 {
                div { class: "mt-6 flex items-center justify-between",
                    p { class: "text-sm text-gray-700",
                        "Showing {info.start_result} to {info.end_result} of {info.total_results} results"
                    }
                    div { class: "flex space-x-2",
                        button {
                            disabled: !info.has_previous,
                            onclick: move |_| state.write().previous_page(),
                            "Previous"
                        }
                        for number in 1..=info.total_pages {
                            button {
                                key: "{number}",
                                class: "{page_class(number == info.page)}",
                                onclick: move |_| state.write().go_to(number),
                                "{number}"
                            }
                        }
                        button {
                            disabled: !info.has_next,
                            onclick: move |_| state.write().next_page(info.total_pages),
                            "Next"
                        }
                    }
                }
            }
        }
    }
}
