use super::activity::ActivityTimeline;
use super::event_card::{CreateEventCard, EventCard};
use super::AppContext;
use crate::catalog::Catalog;
use dioxus::prelude::*;
use tracing::{info, warn};

#[component]
pub fn ExploreTab() -> Element {
    let ctx = use_context::<AppContext>();
    let limit = ctx.config.market.explore_limit;

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
    let catalog = ctx.catalog.clone();
    let activities = use_resource(move || {
        let catalog = catalog.clone();
        async move {
            catalog
                .list_activities()
                .await
                .inspect_err(|e| warn!(error = %e, "failed to load activity"))
        }
    });

    let featured = match &*events.read_unchecked() {
        Some(Ok(list)) => list.iter().take(limit).cloned().collect::<Vec<_>>(),
        _ => Vec::new(),
    };
    let recent = match &*activities.read_unchecked() {
        Some(Ok(list)) => list.clone(),
        _ => Vec::new(),
    };

    rsx! {
        div {
            div { class: "mt-8 grid grid-cols-1 gap-6 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4",
                for event in featured {
                    EventCard {
                        key: "{event.id}",
                        event: event.clone(),
                        on_buy: move |id: String| info!(event_id = %id, "buy ticket requested"),
                    }
                }
                CreateEventCard { on_create: move |_| info!("create event requested") }
            }
            ActivityTimeline { activities: recent }
        }
    }
}
