//! ListVipRequestsHandler - Query handler for pending VIP requests.

use std::sync::Arc;

use crate::domain::membership::{MembershipError, Profile};
use crate::ports::ProfileStore;

#[derive(Debug, Clone, Default)]
pub struct ListVipRequestsQuery;

pub struct ListVipRequestsHandler {
    store: Arc<dyn ProfileStore>,
}

impl ListVipRequestsHandler {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Returns profiles with a pending request, ordered by id.
    pub async fn handle(&self, _query: ListVipRequestsQuery) -> Result<Vec<Profile>, MembershipError> {
        let mut requests = self.store.find_vip_requests().await?;
        requests.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(requests)
    }
}
