use crate::engine::SurfaceHandle;
use crate::relay::subscription_id::SubscriptionId;

/// Describes an active registration of a [`PlaybackRelay`](crate::relay::PlaybackRelay) with an engine.
///
/// The registration itself stays with the relay and is released by
/// [`PlaybackRelay::detach`](crate::relay::PlaybackRelay::detach).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelaySubscription {
	id: SubscriptionId,
	surface: SurfaceHandle,
}

impl RelaySubscription {
	pub(super) fn new(id: SubscriptionId, surface: SurfaceHandle) -> Self {
		Self { id, surface }
	}

	pub fn id(&self) -> SubscriptionId {
		self.id
	}

	/// The surface the engine renders into.
	pub fn surface(&self) -> &SurfaceHandle {
		&self.surface
	}
}
