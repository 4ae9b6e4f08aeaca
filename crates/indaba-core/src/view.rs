//! Pure view projections over cached collections.
//!
//! Everything here is a pure function of its input: no fetching, no
//! mutation, no shared state. Ordering of the input (newest first, as the
//! backend returns it) is preserved unless a function says otherwise.

use crate::{
  alert::{Alert, AlertCategory},
  news::NewsArticle,
  update::CommunityUpdate,
};

/// Split articles into (featured, regular), preserving input order.
pub fn featured_split(articles: &[NewsArticle]) -> (Vec<&NewsArticle>, Vec<&NewsArticle>) {
  articles.iter().partition(|a| a.featured)
}

/// Alerts ordered most urgent first; ties keep the input (newest-first)
/// order.
pub fn by_severity(alerts: &[Alert]) -> Vec<&Alert> {
  let mut out: Vec<&Alert> = alerts.iter().collect();
  out.sort_by_key(|a| a.severity.rank());
  out
}

/// Alerts for one category, input order preserved.
pub fn with_category(alerts: &[Alert], category: AlertCategory) -> Vec<&Alert> {
  alerts.iter().filter(|a| a.category == category).collect()
}

/// Display line for an event, e.g. `Sat 05 Sep 2026 at 14:00, Community Hall`.
pub fn event_line(update: &CommunityUpdate) -> String {
  format!(
    "{} at {}, {}",
    update.date.format("%a %d %b %Y"),
    update.time.format("%H:%M"),
    update.location,
  )
}

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, NaiveTime, Utc};
  use uuid::Uuid;

  use super::*;
  use crate::{
    alert::Severity,
    update::UpdateCategory,
  };

  fn article(title: &str, featured: bool) -> NewsArticle {
    NewsArticle {
      id:         Uuid::new_v4(),
      title:      title.into(),
      content:    String::new(),
      image:      None,
      video_link: None,
      featured,
      category:   "community".into(),
      author:     "Desk".into(),
      date:       NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
      summary:    String::new(),
      created_at: Utc::now(),
    }
  }

  fn alert(title: &str, category: AlertCategory, severity: Severity) -> Alert {
    Alert {
      id:          Uuid::new_v4(),
      title:       title.into(),
      description: String::new(),
      category,
      severity,
      icon:        "bell".into(),
      posted:      "now".into(),
      timeline:    None,
      locations:   vec![],
      created_at:  Utc::now(),
    }
  }

  #[test]
  fn featured_split_partitions_in_order() {
    let articles = vec![
      article("a", true),
      article("b", false),
      article("c", true),
    ];
    let (featured, regular) = featured_split(&articles);
    assert_eq!(
      featured.iter().map(|a| a.title.as_str()).collect::<Vec<_>>(),
      ["a", "c"]
    );
    assert_eq!(regular.len(), 1);
    assert_eq!(regular[0].title, "b");
  }

  #[test]
  fn by_severity_puts_high_first_and_is_stable() {
    let alerts = vec![
      alert("low-1", AlertCategory::General, Severity::Low),
      alert("high-1", AlertCategory::Water, Severity::High),
      alert("med-1", AlertCategory::Crime, Severity::Medium),
      alert("high-2", AlertCategory::Electricity, Severity::High),
    ];
    let ordered: Vec<&str> = by_severity(&alerts).iter().map(|a| a.title.as_str()).collect();
    assert_eq!(ordered, ["high-1", "high-2", "med-1", "low-1"]);
  }

  #[test]
  fn with_category_filters() {
    let alerts = vec![
      alert("pipe burst", AlertCategory::Water, Severity::High),
      alert("substation", AlertCategory::Electricity, Severity::Medium),
    ];
    let water = with_category(&alerts, AlertCategory::Water);
    assert_eq!(water.len(), 1);
    assert_eq!(water[0].title, "pipe burst");
  }

  #[test]
  fn event_line_formats_date_time_location() {
    let update = CommunityUpdate {
      id:          Uuid::new_v4(),
      title:       "AGM".into(),
      description: String::new(),
      category:    UpdateCategory::Meeting,
      date:        NaiveDate::from_ymd_opt(2026, 9, 5).unwrap(),
      time:        NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
      location:    "Community Hall".into(),
      created_at:  Utc::now(),
    };
    assert_eq!(event_line(&update), "Sat 05 Sep 2026 at 14:00, Community Hall");
  }
}
