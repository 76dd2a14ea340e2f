pub mod scheme;
pub mod user;

pub use scheme::*;
pub use user::*;
