pub mod assets;
pub mod health;
pub mod info;
pub mod pages;

pub use assets::{openapi_json, stylesheet};
pub use health::health_check;
pub use info::get_info;
pub use pages::{home, login_page, not_found};
