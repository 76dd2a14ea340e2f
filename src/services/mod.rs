pub mod auth_service;
pub mod profile_service;
pub mod saved_scheme_service;
pub mod scheme_service;
