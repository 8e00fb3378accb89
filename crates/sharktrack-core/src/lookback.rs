//! Lookback queries: fetch a window, order it by recency, deduplicate it.
//!
//! Provider errors propagate untouched. A sighting with an unparseable
//! timestamp only costs that one record; it is logged and skipped.

use std::collections::HashSet;

use crate::{
  provider::SightingProvider,
  sighting::{Sighting, TimedSighting, Window, subject_key},
};

/// Fetch the raw sightings for `window`.
pub async fn fetch_window<P>(
  provider: &P,
  window: Window,
) -> Result<Vec<Sighting>, P::Error>
where
  P: SightingProvider,
{
  let sightings = provider.list_sightings(window).await?;
  tracing::debug!(%window, count = sightings.len(), "fetched sightings");
  Ok(sightings)
}

/// Sort sightings most recent first.
///
/// The sort is stable: sightings with equal timestamps keep their input
/// order. Applying this to its own output yields the same sequence.
pub fn order_by_recency<I>(sightings: I) -> Vec<TimedSighting>
where
  I: IntoIterator,
  I::Item: Into<Sighting>,
{
  let mut timed: Vec<TimedSighting> = sightings
    .into_iter()
    .filter_map(|s| match TimedSighting::try_from(s.into()) {
      Ok(timed) => Some(timed),
      Err(err) => {
        tracing::warn!(%err, "skipping sighting");
        None
      }
    })
    .collect();
  timed.sort_by(|a, b| b.seen_at.cmp(&a.seen_at));
  timed
}

/// Keep only the first sighting of each subject.
///
/// Over a recency-ordered input that first sighting is the most recent one,
/// so every surviving record is its subject's latest in the window.
pub fn deduplicate<I>(ordered: I) -> Vec<TimedSighting>
where
  I: IntoIterator<Item = TimedSighting>,
{
  let mut seen: HashSet<String> = HashSet::new();
  ordered
    .into_iter()
    .filter(|s| seen.insert(subject_key(s).to_owned()))
    .collect()
}

/// Fetch `window` and return one sighting per subject, most recent first.
pub async fn unique_in_window<P>(
  provider: &P,
  window: Window,
) -> Result<Vec<TimedSighting>, P::Error>
where
  P: SightingProvider,
{
  let sightings = fetch_window(provider, window).await?;
  Ok(deduplicate(order_by_recency(sightings)))
}

/// Find the most recent sighting of `subject_id`, trying each window in
/// turn and stopping at the first one in which the subject appears.
///
/// `Ok(None)` means the subject was not seen in any of the windows.
pub async fn resolve_latest<P>(
  provider: &P,
  subject_id: &str,
  windows: &[Window],
) -> Result<Option<TimedSighting>, P::Error>
where
  P: SightingProvider,
{
  for &window in windows {
    let ordered = order_by_recency(fetch_window(provider, window).await?);
    if let Some(found) =
      ordered.into_iter().find(|s| subject_key(s) == subject_id)
    {
      return Ok(Some(found));
    }
  }
  Ok(None)
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;
  use crate::testing::FakeProvider;

  fn raw(pairs: &[(&str, &str)]) -> Vec<Sighting> {
    pairs.iter().map(|(id, ts)| Sighting::new(*id, *ts)).collect()
  }

  fn ids(sightings: &[TimedSighting]) -> Vec<&str> {
    sightings.iter().map(|s| s.subject_id.as_str()).collect()
  }

  #[test]
  fn orders_most_recent_first() {
    let ordered = order_by_recency(raw(&[
      ("A", "2016-03-01 10:00:00"),
      ("B", "2016-03-02 09:00:00"),
      ("C", "2016-02-28 23:59:59"),
    ]));
    assert_eq!(ids(&ordered), vec!["B", "A", "C"]);
  }

  #[test]
  fn equal_timestamps_keep_input_order() {
    let ordered = order_by_recency(raw(&[
      ("X", "2016-03-01 10:00:00"),
      ("A", "2016-03-01 12:00:00"),
      ("Y", "2016-03-01 10:00:00"),
      ("Z", "2016-03-01 10:00:00"),
    ]));
    assert_eq!(ids(&ordered), vec!["A", "X", "Y", "Z"]);
  }

  #[test]
  fn ordering_is_idempotent() {
    let once = order_by_recency(raw(&[
      ("A", "2016-03-01 10:00:00"),
      ("B", "2016-03-01 10:00:00"),
      ("C", "2016-03-03 08:30:00"),
      ("A", "2016-03-02 10:00:00"),
    ]));
    let twice = order_by_recency(once.clone());
    assert_eq!(once, twice);
  }

  #[test]
  fn malformed_timestamps_are_skipped_not_fatal() {
    let ordered = order_by_recency(raw(&[
      ("A", "2016-03-01 10:00:00"),
      ("BAD", "not a time"),
      ("B", "2016-03-01 11:00:00"),
      ("WORSE", "2016-13-45 99:00:00"),
    ]));
    assert_eq!(ids(&ordered), vec!["B", "A"]);
  }

  #[test]
  fn dedup_keeps_latest_sighting_per_subject() {
    let input = raw(&[
      ("A", "2016-03-01 10:00:00"),
      ("B", "2016-03-01 09:00:00"),
      ("A", "2016-03-01 14:00:00"),
      ("C", "2016-02-20 07:00:00"),
      ("B", "2016-03-01 16:30:00"),
      ("A", "2016-02-27 14:00:00"),
    ]);

    let mut latest: HashMap<&str, &str> = HashMap::new();
    for s in &input {
      let entry = latest
        .entry(s.subject_id.as_str())
        .or_insert(s.timestamp.as_str());
      if s.timestamp.as_str() > *entry {
        *entry = s.timestamp.as_str();
      }
    }

    let unique = deduplicate(order_by_recency(input.clone()));
    assert_eq!(unique.len(), latest.len());
    for s in &unique {
      assert_eq!(latest[s.subject_id.as_str()], s.timestamp);
    }
    assert_eq!(ids(&unique), vec!["B", "A", "C"]);
  }

  #[tokio::test]
  async fn day_window_scenario() {
    let provider = FakeProvider::default().with_sightings(
      Window::Day,
      &[
        ("A", "2016-03-01 10:00:00"),
        ("A", "2016-03-01 14:00:00"),
        ("B", "2016-03-01 09:00:00"),
      ],
    );

    let unique = unique_in_window(&provider, Window::Day).await.unwrap();
    assert_eq!(ids(&unique), vec!["A", "B"]);
    assert_eq!(unique[0].timestamp, "2016-03-01 14:00:00");
    assert_eq!(unique[1].timestamp, "2016-03-01 09:00:00");

    let a = resolve_latest(&provider, "A", &Window::CASCADE)
      .await
      .unwrap()
      .unwrap();
    assert_eq!(a.timestamp, "2016-03-01 14:00:00");
    let b = resolve_latest(&provider, "B", &Window::CASCADE)
      .await
      .unwrap()
      .unwrap();
    assert_eq!(b.timestamp, "2016-03-01 09:00:00");
  }

  #[tokio::test]
  async fn resolve_latest_falls_through_to_wider_windows() {
    let provider = FakeProvider::default()
      .with_sightings(Window::Day, &[("A", "2016-03-07 10:00:00")])
      .with_sightings(
        Window::Week,
        &[("A", "2016-03-07 10:00:00"), ("B", "2016-03-02 08:00:00")],
      )
      .with_sightings(
        Window::Month,
        &[
          ("A", "2016-03-07 10:00:00"),
          ("B", "2016-03-02 08:00:00"),
          ("C", "2016-02-11 17:45:00"),
        ],
      );

    let b = resolve_latest(&provider, "B", &Window::CASCADE)
      .await
      .unwrap()
      .unwrap();
    assert_eq!(b.timestamp, "2016-03-02 08:00:00");

    let c = resolve_latest(&provider, "C", &Window::CASCADE)
      .await
      .unwrap()
      .unwrap();
    assert_eq!(c.timestamp, "2016-02-11 17:45:00");

    let missing = resolve_latest(&provider, "Z", &Window::CASCADE)
      .await
      .unwrap();
    assert!(missing.is_none());
  }

  #[tokio::test]
  async fn provider_failure_propagates() {
    let provider = FakeProvider::offline();
    assert!(fetch_window(&provider, Window::Week).await.is_err());
    assert!(unique_in_window(&provider, Window::Week).await.is_err());
    assert!(
      resolve_latest(&provider, "A", &Window::CASCADE)
        .await
        .is_err()
    );
  }
}
