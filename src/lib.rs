pub mod api;
pub mod database;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;
