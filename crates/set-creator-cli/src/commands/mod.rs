pub mod create;
pub mod create_ui;
