pub mod health_client;

pub use health_client::{render_status, FetchError, HealthClient, HealthSnapshot};
