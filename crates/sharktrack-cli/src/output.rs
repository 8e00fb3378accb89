//! Plain-text rendering of API responses, one record per line.

use std::fmt::Write as _;

use sharktrack_core::search::{AttributeTally, SearchHit};

use crate::client::{FavouriteView, FeaturedView, MembershipView, ProfileView, SubjectView};

fn or_unknown(value: &Option<String>) -> &str { value.as_deref().unwrap_or("Unknown") }

pub fn search(hits: &[SearchHit]) -> String {
  if hits.is_empty() {
    return "No results.\n".to_string();
  }
  let mut out = String::new();
  for hit in hits {
    let s = &hit.subject;
    let _ = writeln!(
      out,
      "{}\t{}\t{}\t{}\tlast seen {}",
      s.subject_id,
      or_unknown(&s.gender),
      or_unknown(&s.life_stage),
      or_unknown(&s.tag_location),
      hit.last_seen,
    );
  }
  out
}

pub fn statistics(tally: &AttributeTally) -> String {
  if tally.is_empty() {
    return "Not enough data.\n".to_string();
  }
  let mut out = String::new();
  for (title, counts) in [
    ("Gender", &tally.genders),
    ("Life stage", &tally.life_stages),
    ("Tag location", &tally.tag_locations),
  ] {
    let _ = writeln!(out, "{title}:");
    for (value, count) in counts {
      let _ = writeln!(out, "  {value}: {count}");
    }
  }
  out
}

pub fn subject(view: &SubjectView) -> String {
  let s = &view.subject;
  let mut out = String::new();
  let _ = writeln!(out, "Name:         {}", s.subject_id);
  let _ = writeln!(out, "Gender:       {}", or_unknown(&s.gender));
  let _ = writeln!(out, "Stage:        {}", or_unknown(&s.life_stage));
  let _ = writeln!(out, "Species:      {}", s.species);
  let _ = writeln!(out, "Length:       {}", s.length);
  let _ = writeln!(out, "Weight:       {}", s.weight);
  let _ = writeln!(out, "Tagged at:    {}", or_unknown(&s.tag_location));
  match &view.last_seen {
    Some(seen) => {
      let _ = writeln!(out, "Last seen:    {}", seen.timestamp);
    }
    None => {
      let _ = writeln!(out, "Last seen:    not in the past month");
    }
  }
  if !s.description.is_empty() {
    let _ = writeln!(out, "\n{}", s.description);
  }
  out
}

pub fn featured(view: &FeaturedView) -> String {
  format!(
    "Shark of the day: {} (since {})\n",
    view.subject.subject_id, view.selected_at
  )
}

pub fn profile(view: &ProfileView) -> String {
  let mut out = format!("Profile {}: following {}\n", view.name, view.following.len());
  for id in &view.following {
    let _ = writeln!(out, "  {id}");
  }
  out
}

pub fn membership(view: &MembershipView) -> String {
  let verb = if view.following { "Following" } else { "Not following" };
  let mut out = format!("{verb} {} ({} followed)\n", view.subject_id, view.count);
  if view.became_non_empty {
    out.push_str("Favourites enabled.\n");
  }
  if view.became_empty {
    out.push_str("Favourites disabled.\n");
  }
  out
}

pub fn favourites(views: &[FavouriteView]) -> String {
  if views.is_empty() {
    return "No favourites with a known location.\n".to_string();
  }
  let mut out = String::new();
  for v in views {
    let _ = writeln!(out, "{}\t{} miles", v.ranked.subject_id, v.distance);
  }
  out
}
