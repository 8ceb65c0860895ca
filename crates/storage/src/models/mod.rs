pub mod claim;
pub mod claim_time;
pub mod multiplier;

pub use claim::{ClaimTimestamp, StudentClaim};
pub use claim_time::{ClaimClock, TIMESTAMP_FORMAT};
pub use multiplier::{CodeMultiplier, DEFAULT_MULTIPLIER, parse_multiplier};
