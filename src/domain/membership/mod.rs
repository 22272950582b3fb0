//! Membership domain module.
//!
//! VIP lifecycle rules for catalog profiles: role classification,
//! time-boxed extension, revocation, self-service requests and the
//! expiration sweep.
//!
//! # Module Structure
//!
//! - `role` - Profile roles
//! - `period` - Extension period value object
//! - `status` - VipStatus classification
//! - `profile` - Profile aggregate and change sets
//! - `sweep` - Sweep report and downgrade predicate
//! - `errors` - MembershipError taxonomy

mod errors;
mod period;
mod profile;
mod role;
mod status;
mod sweep;

pub use errors::MembershipError;
pub use period::PeriodDays;
pub use profile::{extended_expiration, Profile, ProfileChanges};
pub use role::Role;
pub use status::{classify, days_remaining, VipStatus, EXPIRING_SOON_DAYS};
pub use sweep::{needs_downgrade, SweepReport};
