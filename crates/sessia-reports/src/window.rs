use jiff::Timestamp;
use jiff::civil::Date;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};

/// An optional inclusive date range, in UTC.
///
/// With both bounds absent no filtering is applied — callers wanting a
/// bounded query must supply the dates themselves.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl DateWindow {
    pub fn new(start: Option<Date>, end: Option<Date>) -> Self {
        Self { start, end }
    }

    /// Whether a timestamp falls inside the window. Both bounds inclusive.
    pub fn contains(&self, ts: Timestamp) -> bool {
        let date = ts.to_zoned(TimeZone::UTC).date();
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }
}
