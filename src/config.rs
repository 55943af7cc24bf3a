/// Read buffer for dump streams, sized for multi-gigabyte sequential reads
pub const READ_BUFFER_SIZE: usize = 256 * 1024;

/// Content model reported for pages that carry a `<redirect>` element
pub const REDIRECT_MODEL: &str = "redirect";

/// Progress update interval (tick every N pages)
pub const PROGRESS_INTERVAL: u64 = 1000;
