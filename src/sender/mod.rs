pub mod sender;
pub use sender::{DispatchResult, TicketSender};

pub mod webhook;
pub use webhook::{WebhookConfig, WebhookSender};
