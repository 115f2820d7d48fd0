use std::fmt;

const SCRUBBED: &str = "[scrubbed]";

/// Identifier wrapper for log fields. Renders as `[scrubbed]` when safe
/// logging is on.
#[derive(Clone, Copy)]
pub struct SafeLog<'a> {
    value: &'a str,
    safe_logging: bool,
}

impl<'a> SafeLog<'a> {
    pub fn new(value: &'a str, safe_logging: bool) -> Self {
        Self {
            value,
            safe_logging,
        }
    }
}

impl fmt::Display for SafeLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.safe_logging {
            f.write_str(SCRUBBED)
        } else {
            f.write_str(self.value)
        }
    }
}
