pub mod config;
pub use config::WebhookConfig;

pub mod webhook;
pub use webhook::WebhookSender;
