pub mod api_key;

pub use api_key::api_key_middleware;
