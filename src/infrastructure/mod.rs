// Infrastructure adapters: in-memory storage, upstream HTTP client, users

pub mod store;
pub mod upstream;
pub mod users;

pub use store::{EntityStore, demo_store};
pub use upstream::UpstreamClient;
pub use users::UserDirectory;
