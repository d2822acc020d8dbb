use crate::error::{Result, VendingError};

/// Reserved submitter identity rejected at intake.
///
/// Stand-in for the real allow-list policy; kept literal so the guard can be
/// swapped out in one place once that policy lands.
const RESERVED_OWNER_EMAIL: &str = "foo";

/// Reject disallowed submitter identities. Runs before any remote call; every
/// other field passes through unchecked.
pub fn check_owner_email(owner_email: &str) -> Result<()> {
    if owner_email == RESERVED_OWNER_EMAIL {
        return Err(VendingError::Validation(format!(
            "ownerEmail cannot be '{RESERVED_OWNER_EMAIL}'"
        )));
    }
    Ok(())
}
