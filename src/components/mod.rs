mod auth_screen;
mod chart;
mod expense_card;
mod icons;
mod shell;
mod workspace;

pub use shell::App;
