use crate::catalog::Activity;
use dioxus::prelude::*;

#[component]
pub fn ActivityTimeline(activities: Vec<Activity>) -> Element {
    rsx! {
        div { class: "mt-8",
            h2 { class: "text-lg font-medium text-gray-900", "Recent Activity" }
            div { class: "mt-4 bg-white shadow rounded-lg",
                ul { class: "divide-y divide-gray-200",
                    for activity in activities {
                        li { key: "{activity.id}", class: "px-6 py-4",
                            div { class: "flex items-center space-x-4",
                                div { class: "flex-1 min-w-0",
                                    p { class: "text-sm font-medium text-gray-900", "{activity.kind.title()}" }
                                    p { class: "text-sm text-gray-500",
                                        "{activity.event_title} - {activity.event_date}"
                                    }
                                }
                                span { class: "text-sm text-gray-500", "{activity.time_ago}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
