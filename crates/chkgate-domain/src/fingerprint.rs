use chkgate_types::Severity;
use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a detail item.
///
/// Identity fields:
/// - check_id
/// - severity
/// - item name
/// - reason (including tag suffix)
pub fn fingerprint_for_item(
    check_id: &str,
    severity: Severity,
    name: &str,
    reason: &str,
) -> String {
    let canonical = [check_id, severity.group_prefix(), name, reason].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
