pub mod use_cases;

pub use use_cases::content_client::ContentClient;
