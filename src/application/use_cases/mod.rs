pub mod content_client;
