/// Privilege queries for the running process.
pub trait PrivilegeOps {
    /// True when running with an effective uid of root (e.g. under `sudo`).
    fn is_elevated(&self) -> bool;
}
