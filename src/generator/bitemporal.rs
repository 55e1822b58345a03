//! Bitemporal delta mode planner
//!
//! Unitemporal batch-id milestoning plus validity columns sourced directly
//! from staging fields ("source specifies from and through"). The validity
//! columns flow through the INSERT as ordinary staging fields; the only
//! structural difference is that the milestoning UPDATE also matches on
//! the validity-from column, so distinct validity periods of one key are
//! milestoned independently.

use super::context::{CompileEnv, ModePlan};
use super::unitemporal;
use crate::models::TransactionMilestoning;

pub(crate) fn plan(
    env: &CompileEnv,
    milestoning: &TransactionMilestoning,
    digest_field: &str,
    validity_from_field: &str,
) -> ModePlan {
    unitemporal::plan_delta(env, milestoning, digest_field, &[validity_from_field])
}
