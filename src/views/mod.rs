//! Dioxus components and routing.
//!
//! Routes: `/login` (public), `/dashboard` (wallet-gated), `/` → `/login`.

mod account;
mod account_dropdown;
mod activity;
mod dashboard;
mod event_card;
mod explore;
mod login;
mod market;
mod network_modal;

pub use dashboard::Dashboard;
pub use login::Login;

use crate::auth::{Navigate, SessionController};
use crate::catalog::CatalogSource;
use crate::config::Config;
use crate::provider::InjectedProvider;
use crate::session::{BrowserStorage, Session};
use dioxus::prelude::*;
use std::rc::Rc;
use tracing::warn;

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[redirect("/", || Route::Login {})]
    #[route("/login")]
    Login {},
    #[route("/dashboard")]
    Dashboard {},
}

/// Shared, read-only application state provided at the root.
#[derive(Clone)]
pub struct AppContext {
    pub config: Rc<Config>,
    pub catalog: CatalogSource,
}

pub type AppController = SessionController<InjectedProvider, BrowserStorage, RouterNavigator>;

/// [`Navigate`] over the Dioxus router plus a full page reload.
#[derive(Clone, Copy)]
pub struct RouterNavigator(Navigator);

impl Navigate for RouterNavigator {
    fn to_login(&self) {
        self.0.replace(Route::Login {});
    }

    fn to_dashboard(&self) {
        self.0.replace(Route::Dashboard {});
    }

    fn reload(&self) {
        reload_page();
    }
}

pub fn reload_page() {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().reload() {
        warn!(error = ?e, "page reload failed");
    }
}

/// Controller bound to the injected wallet, browser storage and the router.
pub fn app_controller(config: &Config, navigator: Navigator) -> Rc<AppController> {
    SessionController::new(
        InjectedProvider::detect(),
        Session::new(BrowserStorage, &config.session.storage_key),
        RouterNavigator(navigator),
        config.poll_interval(),
    )
}

/// Root component. Expects the parsed [`Config`] as launch context.
#[component]
pub fn App() -> Element {
    let config = use_context::<Config>();
    use_context_provider(move || AppContext {
        catalog: CatalogSource::from_config(&config),
        config: Rc::new(config),
    });

    rsx! {
        Router::<Route> {}
    }
}
