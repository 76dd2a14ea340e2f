pub mod auth;
pub mod health;
pub mod profile;
pub mod saved_schemes;
pub mod schemes;
pub mod swagger;
