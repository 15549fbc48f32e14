//! File transfer port.
//!
//! The transfer mechanism is an opaque external collaborator: it blocks until
//! one file is fully written to its final location, and either fully succeeds
//! or fails. It exposes no progress callback; byte-level progress is
//! reconstructed elsewhere by observing the staging directory.

use async_trait::async_trait;

use crate::transfer::{FileEntry, MonitorResult};

/// Port for transferring a single file of the plan.
///
/// Invoked once per file, strictly sequentially. Implementations must not
/// retry internally on failure; the run treats the first failure as fatal.
#[async_trait]
pub trait FileTransferPort: Send + Sync {
    /// Transfer one file, returning when it is fully written.
    async fn transfer(&self, file: &FileEntry) -> MonitorResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::MonitorError;

    struct AlwaysFails;

    #[async_trait]
    impl FileTransferPort for AlwaysFails {
        async fn transfer(&self, file: &FileEntry) -> MonitorResult<()> {
            Err(MonitorError::transfer(&file.path, "connection reset"))
        }
    }

    #[tokio::test]
    async fn port_is_object_safe() {
        let port: Box<dyn FileTransferPort> = Box::new(AlwaysFails);
        let err = port
            .transfer(&FileEntry::new("a.bin", 10))
            .await
            .unwrap_err();
        assert_eq!(err.reason(), "connection reset");
    }
}
