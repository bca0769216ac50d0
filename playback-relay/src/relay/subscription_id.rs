use derive_more::{Display, From};

/// Identifies one registration of a relay with an engine.
/// Callbacks carrying an id other than the active one are stale.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash, PartialOrd, Ord, From)]
#[display("SubscriptionId({id})")]
pub struct SubscriptionId {
	id: u64,
}

impl From<SubscriptionId> for u64 {
	fn from(subscription_id: SubscriptionId) -> Self {
		subscription_id.id
	}
}
