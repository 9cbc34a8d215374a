pub mod auth;
pub mod generate;
pub mod history;
