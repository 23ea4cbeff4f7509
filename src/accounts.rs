//! Fixed GitHub account identifiers

/// Account ID of `dependabot[bot]`
pub const DEPENDABOT_ACCOUNT_ID: u64 = 49_699_333;

/// Account ID of the steward app's bot user, which posts reviews and comments
pub const STEWARD_ACCOUNT_ID: u64 = 139_881_524;

/// The two accounts the policy cares about
///
/// Production code always uses [`Accounts::default`]; tests may substitute
/// other IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accounts {
    /// Author every eligible pull request must come from
    pub update_bot_id: u64,
    /// Our own account, used to detect prior reviews and comments
    pub steward_id: u64,
}

impl Default for Accounts {
    fn default() -> Self {
        Self {
            update_bot_id: DEPENDABOT_ACCOUNT_ID,
            steward_id: STEWARD_ACCOUNT_ID,
        }
    }
}
