// ============================================================
// Funder Scan — how a withdrawal walks the funder list
// ============================================================

/// Both strategies reset the same records; they differ only in
/// how often the funder list is read from storage.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FunderScan {
    /// Re-read the list length and every element from storage.
    Storage,
    /// Load the list into a local `ManagedVec` once, then iterate that copy.
    Cached,
}
