use crate::decode::ControlKind;
use chrono::{DateTime, Utc};
use log::warn;
use std::time::Duration;

/// The start and end of a run, as announced by the `started` and `ended` lines of the log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunBoundaries {
    pub started: Option<DateTime<Utc>>,
    pub ended: Option<DateTime<Utc>>,
}

impl RunBoundaries {
    /// Record a boundary. Each boundary is set once; later lines of the same kind are ignored.
    pub fn record(&mut self, kind: ControlKind, time: Option<DateTime<Utc>>) {
        let slot = match kind {
            ControlKind::Started => &mut self.started,
            ControlKind::Ended => &mut self.ended,
        };

        match (*slot, time) {
            (_, None) => {}
            (None, Some(time)) => *slot = Some(time),
            (Some(first), Some(time)) => {
                warn!("Ignoring repeated `{kind}` line at {time}, keeping {first}");
            }
        }
    }

    /// Time between the start of the run and `until`.
    ///
    /// `None` when the start is unknown or `until` is not after it, so that no rate is ever
    /// computed over an empty time base.
    pub fn elapsed_until(&self, until: DateTime<Utc>) -> Option<Duration> {
        let started = self.started?;
        (until - started)
            .to_std()
            .ok()
            .filter(|elapsed| !elapsed.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::parse_iso8601;

    fn time(raw: &str) -> DateTime<Utc> {
        parse_iso8601(raw).unwrap()
    }

    #[test]
    fn first_boundary_wins() {
        let mut boundaries = RunBoundaries::default();
        boundaries.record(ControlKind::Started, Some(time("2019-01-01T00:00:00Z")));
        boundaries.record(ControlKind::Started, Some(time("2019-01-01T01:00:00Z")));
        boundaries.record(ControlKind::Ended, Some(time("2019-01-01T02:00:00Z")));

        assert_eq!(Some(time("2019-01-01T00:00:00Z")), boundaries.started);
        assert_eq!(Some(time("2019-01-01T02:00:00Z")), boundaries.ended);
    }

    #[test]
    fn unreadable_boundary_leaves_it_unset() {
        let mut boundaries = RunBoundaries::default();
        boundaries.record(ControlKind::Started, None);
        assert_eq!(None, boundaries.started);

        boundaries.record(ControlKind::Started, Some(time("2019-01-01T00:00:00Z")));
        assert!(boundaries.started.is_some());
    }

    #[test]
    fn elapsed_needs_a_start_before_the_end() {
        let mut boundaries = RunBoundaries::default();
        let end = time("2019-01-01T00:02:00Z");
        assert_eq!(None, boundaries.elapsed_until(end));

        boundaries.record(ControlKind::Started, Some(time("2019-01-01T00:00:00Z")));
        assert_eq!(Some(Duration::from_secs(120)), boundaries.elapsed_until(end));
        assert_eq!(None, boundaries.elapsed_until(time("2019-01-01T00:00:00Z")));
        assert_eq!(None, boundaries.elapsed_until(time("2018-12-31T23:59:00Z")));
    }
}
