//! Expense tracker frontend.
//!
//! Client-side rendered Yew application. Talks to the expense REST backend
//! over HTTP and keeps the session token in local storage.

mod api;
mod auth;
mod components;
mod config;
mod draft;
mod error;
mod ledger;
mod models;
mod session;
mod storage;
mod summary;

use config::Config;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(Config::load().log_level));

    yew::Renderer::<components::App>::new().render();
}
