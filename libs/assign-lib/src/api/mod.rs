pub mod config;
pub mod errors;
pub mod http_client;
pub mod models;
pub mod traits;

pub use config::AdminApiConfig;
pub use errors::ApiError;
pub use http_client::AdminApiClient;
pub use traits::AssignmentApi;
