//! Clock port.
//!
//! Every lifecycle operation reads "now" exactly once through this port so
//! tests can pin time.

use crate::domain::foundation::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
