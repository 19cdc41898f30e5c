use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::error::Result;
use crate::github::GitHubSource;
use crate::models::{ContributionDay, DateRange, StreakSummary};

/// GitHub refuses contribution calendars spanning more than a year.
pub const MAX_WINDOW_DAYS: i64 = 365;

/// Splits `[from, to]` into consecutive windows of at most a year.
///
/// Every window but the last ends on the final second of a calendar day and
/// the next one starts one second later, so no day is fetched twice.
pub fn year_windows(from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let mut windows = Vec::new();
    let mut start = from;

    while start <= to {
        let next_midnight = (start.date_naive() + Duration::days(MAX_WINDOW_DAYS))
            .and_time(NaiveTime::default())
            .and_utc();
        let end = (next_midnight - Duration::seconds(1)).min(to);

        windows.push((start, end));
        start = end + Duration::seconds(1);
    }

    windows
}

/// Sorts by date and drops repeated dates, keeping the first occurrence.
pub fn normalize_days(days: &mut Vec<ContributionDay>) {
    days.sort_by_key(|d| d.date);
    days.dedup_by_key(|d| d.date);
}

/// Streak statistics over a date-ordered day sequence.
///
/// The last day of `days` is treated as today: when it has no contributions
/// the current streak is 0, whatever happened the day before.
pub fn summarize_streaks(days: &[ContributionDay], total_contributions: u64) -> StreakSummary {
    let mut longest = 0u32;
    let mut longest_range = None;
    let mut run = 0u32;
    let mut run_start = 0usize;

    for (i, day) in days.iter().enumerate() {
        if !day.is_active() {
            run = 0;
            continue;
        }
        if run == 0 {
            run_start = i;
        }
        run += 1;
        if run > longest {
            longest = run;
            longest_range = Some(DateRange {
                start: days[run_start].date,
                end: day.date,
            });
        }
    }

    let current = days.iter().rev().take_while(|d| d.is_active()).count();
    let current_range = (current > 0).then(|| DateRange {
        start: days[days.len() - current].date,
        end: days[days.len() - 1].date,
    });

    StreakSummary {
        current_streak: current as u32,
        longest_streak: longest,
        longest_range,
        current_range,
        total_contributions,
        first_active_date: days.iter().find(|d| d.is_active()).map(|d| d.date),
        last_day: days.last().map(|d| d.date),
    }
}

/// Fetches every calendar window between `from` and `to` and summarizes the
/// combined day sequence.
pub async fn collect_contributions(
    source: &dyn GitHubSource,
    login: &str,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<StreakSummary> {
    let windows = year_windows(from, to);
    tracing::info!(
        "Fetching {} contribution windows for {} since {}",
        windows.len(),
        login,
        from.date_naive()
    );

    let mut days = Vec::new();
    let mut total = 0u64;
    for (start, end) in windows {
        let calendar = source.contribution_calendar(login, start, end).await?;
        total += calendar.total;
        days.extend(calendar.days);
    }

    normalize_days(&mut days);
    Ok(summarize_streaks(&days, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(counts: &[u32]) -> Vec<ContributionDay> {
        let start = date(2024, 1, 1);
        counts
            .iter()
            .enumerate()
            .map(|(i, c)| ContributionDay::new(start + Duration::days(i as i64), *c))
            .collect()
    }

    #[test]
    fn test_longest_and_current_streak() {
        let days = series(&[1, 0, 2, 3, 0, 0, 1]);
        let summary = summarize_streaks(&days, 7);

        assert_eq!(summary.longest_streak, 2);
        assert_eq!(
            summary.longest_range,
            Some(DateRange {
                start: date(2024, 1, 3),
                end: date(2024, 1, 4),
            })
        );
        assert_eq!(summary.current_streak, 1);
        assert_eq!(
            summary.current_range,
            Some(DateRange {
                start: date(2024, 1, 7),
                end: date(2024, 1, 7),
            })
        );
        assert_eq!(summary.first_active_date, Some(date(2024, 1, 1)));
        assert_eq!(summary.total_contributions, 7);
    }

    #[test]
    fn test_trailing_zero_day_ends_current_streak() {
        let days = series(&[4, 5, 6, 7, 0]);
        let summary = summarize_streaks(&days, 22);

        assert_eq!(summary.current_streak, 0);
        assert_eq!(summary.current_range, None);
        assert_eq!(summary.longest_streak, 4);
    }

    #[test]
    fn test_today_without_contributions_resets_streak() {
        // Yesterday closed a 3 day run; today has nothing yet. The last fetched
        // day counts as today, so the run is not carried over.
        let days = series(&[0, 1, 1, 1, 0]);
        let summary = summarize_streaks(&days, 3);
        assert_eq!(summary.current_streak, 0);
        assert_eq!(summary.last_day, Some(date(2024, 1, 5)));
    }

    #[test]
    fn test_first_longest_run_wins_ties() {
        let days = series(&[1, 1, 0, 1, 1]);
        let summary = summarize_streaks(&days, 4);
        assert_eq!(summary.longest_streak, 2);
        assert_eq!(
            summary.longest_range.map(|r| r.start),
            Some(date(2024, 1, 1))
        );
        assert_eq!(summary.current_streak, 2);
    }

    #[test]
    fn test_empty_and_inactive_sequences() {
        let summary = summarize_streaks(&[], 0);
        assert_eq!(summary, StreakSummary::default());

        let summary = summarize_streaks(&series(&[0, 0, 0]), 0);
        assert_eq!(summary.longest_streak, 0);
        assert_eq!(summary.current_streak, 0);
        assert_eq!(summary.longest_range, None);
        assert_eq!(summary.first_active_date, None);
    }

    #[test]
    fn test_normalize_sorts_and_dedups() {
        let mut days = vec![
            ContributionDay::new(date(2024, 3, 2), 1),
            ContributionDay::new(date(2024, 3, 1), 2),
            ContributionDay::new(date(2024, 3, 2), 9),
        ];
        normalize_days(&mut days);
        assert_eq!(
            days,
            vec![
                ContributionDay::new(date(2024, 3, 1), 2),
                ContributionDay::new(date(2024, 3, 2), 1),
            ]
        );
    }

    #[test]
    fn test_year_windows_are_day_aligned_and_bounded() {
        let from = Utc.with_ymd_and_hms(2019, 6, 15, 8, 30, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 2, 10, 12, 0, 0).unwrap();
        let windows = year_windows(from, to);

        assert_eq!(windows.first().map(|w| w.0), Some(from));
        assert_eq!(windows.last().map(|w| w.1), Some(to));
        assert_eq!(windows.len(), 5);

        for (start, end) in &windows {
            assert!(*end - *start <= Duration::days(MAX_WINDOW_DAYS));
            assert!(start <= end);
        }
        for pair in windows.windows(2) {
            assert_eq!(pair[1].0 - pair[0].1, Duration::seconds(1));
            assert_eq!(pair[1].0.time(), NaiveTime::default());
            assert!(pair[1].0.date_naive() > pair[0].1.date_naive());
        }
    }

    #[test]
    fn test_year_windows_short_and_empty_ranges() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 1, 20, 0, 0, 0).unwrap();
        assert_eq!(year_windows(from, to), vec![(from, to)]);
        assert!(year_windows(to, from).is_empty());
    }

    fn reference_runs(counts: &[u32]) -> (u32, u32) {
        let mut longest = 0;
        let mut run = 0;
        for c in counts {
            run = if *c > 0 { run + 1 } else { 0 };
            longest = longest.max(run);
        }
        let trailing = counts.iter().rev().take_while(|c| **c > 0).count() as u32;
        (longest, trailing)
    }

    proptest! {
        #[test]
        fn prop_streaks_match_reference(counts in prop::collection::vec(0u32..4, 0..120)) {
            let days = series(&counts);
            let summary = summarize_streaks(&days, 0);
            let (longest, trailing) = reference_runs(&counts);

            prop_assert_eq!(summary.longest_streak, longest);
            prop_assert_eq!(summary.current_streak, trailing);
            prop_assert_eq!(summarize_streaks(&days, 0), summary);
        }
    }
}
