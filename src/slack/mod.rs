pub(crate) mod client;
pub(crate) mod models;
pub(crate) mod ops;

pub use client::SlackClient;
pub use models::{AuthIdentity, PostedMessage};
