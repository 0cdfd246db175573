pub mod client;
pub mod export;
pub mod http;
pub mod transport;
