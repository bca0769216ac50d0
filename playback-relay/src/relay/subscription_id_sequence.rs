use crate::relay::subscription_id::SubscriptionId;
use std::ops::RangeFrom;

pub struct SubscriptionIdSequence {
	id_pool: RangeFrom<u64>,
}

impl Default for SubscriptionIdSequence {
	fn default() -> Self {
		Self { id_pool: 0.. }
	}
}

impl SubscriptionIdSequence {
	pub fn next(&mut self) -> SubscriptionId {
		SubscriptionId::from(self.id_pool.next().expect("Ran out of available SubscriptionIds."))
	}
}
