//! Small logging helpers.

use std::time::Instant;

/// RAII timer that logs elapsed time at DEBUG level on drop.
pub struct Timed {
    name: &'static str,
    start: Instant,
}

impl Timed {
    pub fn debug(name: &'static str) -> Self {
        log::trace!("{}...", name);
        Self {
            name,
            start: Instant::now(),
        }
    }
}

impl Drop for Timed {
    fn drop(&mut self) {
        log::debug!("{}: {:.3?}", self.name, self.start.elapsed());
    }
}
