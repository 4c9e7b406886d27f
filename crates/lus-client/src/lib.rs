pub mod auto_renew;
pub mod client;

pub use auto_renew::AutoRenewRegistry;
pub use client::LusClient;
