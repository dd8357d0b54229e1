// Public API exports

pub mod domain;
pub mod gateway;
pub mod handlers;
pub mod i18n;
pub mod infrastructure;
pub mod shared;
pub mod state;
