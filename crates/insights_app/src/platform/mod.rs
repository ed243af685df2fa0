mod app;
mod ui;

pub use app::run_app;
