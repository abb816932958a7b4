// ============================================================
// Error messages surfaced to callers
// ============================================================

/// Caller is not the identity that deployed the contract.
pub const ERR_NOT_OWNER: &str = "FundMe__NotOwner";

/// Attached EGLD converts to less than the minimum USD contribution.
pub const ERR_INSUFFICIENT_CONTRIBUTION: &str = "Not enough EGLD!";

/// `getFunder` was asked for a position past the end of the funder list.
pub const ERR_INDEX_OUT_OF_RANGE: &str = "Funder index out of range";
