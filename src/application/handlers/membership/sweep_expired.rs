//! SweepExpiredHandler - Command handler that downgrades lapsed VIPs.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::membership::{
    needs_downgrade, MembershipError, ProfileChanges, Role, SweepReport,
};
use crate::ports::{Clock, ProfileStore};

/// Command to run one expiration sweep.
#[derive(Debug, Clone, Default)]
pub struct SweepExpiredCommand;

/// Handler for the expiration sweep.
///
/// Lists every `vip` profile and revokes those whose expiration is
/// strictly before `now`. Downgrades run one at a time, each awaited
/// before the next. A failed downgrade is logged and recorded in the
/// report without aborting the pass; nothing is retried within the pass.
/// Failing to list the VIP set fails the whole sweep.
///
/// No lock is held across the pass: a profile renewed after the listing
/// but before its downgrade write is still downgraded.
pub struct SweepExpiredHandler {
    store: Arc<dyn ProfileStore>,
    clock: Arc<dyn Clock>,
}

impl SweepExpiredHandler {
    pub fn new(store: Arc<dyn ProfileStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn handle(&self, _cmd: SweepExpiredCommand) -> Result<SweepReport, MembershipError> {
        let now = self.clock.now();

        let vips = self.store.find_by_role(Role::Vip).await.map_err(|e| {
            error!(error = %e, "Failed to list VIP profiles for sweep");
            MembershipError::from(e)
        })?;

        let downgrade = ProfileChanges::membership(Role::User, None);
        let mut report = SweepReport::new();

        for profile in vips.iter().filter(|p| needs_downgrade(p, now)) {
            match self.store.update(&profile.id, &downgrade).await {
                Ok(()) => {
                    info!(profile_id = %profile.id, "Expired VIP downgraded");
                    report.record_success();
                }
                Err(e) => {
                    warn!(profile_id = %profile.id, error = %e, "Failed to downgrade expired VIP");
                    report.record_failure(profile.id.clone());
                }
            }
        }

        info!(
            scanned = vips.len(),
            downgraded = report.downgraded_count,
            failed = report.failures.len(),
            "Expiration sweep finished"
        );

        Ok(report)
    }
}
