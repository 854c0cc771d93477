/// Buffered block device node for a whole-disk identifier (`disk4` -> `/dev/disk4`).
pub fn block_node(identifier: &str) -> String {
    format!("/dev/{}", identifier)
}

/// Raw (unbuffered) character device node (`disk4` -> `/dev/rdisk4`).
///
/// Sequential writes through the raw node bypass the buffer cache and are
/// considerably faster for multi-gigabyte images.
pub fn raw_node(identifier: &str) -> String {
    format!("/dev/r{}", identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_node_prefixes_r() {
        assert_eq!(raw_node("disk4"), "/dev/rdisk4");
        assert_eq!(block_node("disk4"), "/dev/disk4");
    }
}
