pub mod mock_notifier;

pub use mock_notifier::{MockNotifier, SentMessage};
