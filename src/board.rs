// Board text rendering: one message body per world, two ranks per line in
// the fixed zone order. Pure string assembly, no I/O.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::catalog::{Rank, World, Zone};
use crate::windows;

/// Render the full status board for one world.
pub fn render_board(
    world: World,
    timers: &HashMap<Rank, DateTime<Utc>>,
    now: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("\u{1F9ED} **{world} \u{2013} A-Rank Hunts**\n"));
    for zone in Zone::ALL {
        let [first, second] = zone.ranks();
        out.push_str(&format!(
            "**{zone}**: {}  \u{00B7}  {}\n",
            render_cell(first, timers.get(&first).copied(), now),
            render_cell(second, timers.get(&second).copied(), now),
        ));
    }
    out.push_str("_Tap a button to mark a kill._");
    out
}

/// One board cell: marker, shortened name, elapsed time since kill.
fn render_cell(rank: Rank, last_killed: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let status = windows::spawn_status(last_killed, now);
    let elapsed = match last_killed {
        Some(killed) => windows::format_elapsed(windows::elapsed_hours(killed, now)),
        None => "--:--".to_string(),
    };
    format!("{} {} `{}`", status.marker(), rank.short_name(), elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::windows::SpawnStatus;
    use chrono::{Duration, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn full_timers(now: DateTime<Utc>) -> HashMap<Rank, DateTime<Utc>> {
        Rank::ALL
            .into_iter()
            .map(|r| (r, now - Duration::hours(2)))
            .collect()
    }

    #[test]
    fn test_board_layout() {
        let now = fixed_now();
        let body = render_board(World::Halicarnassus, &full_timers(now), now);

        assert!(body.contains("Halicarnassus"));
        // Header + one line per zone + footer
        assert_eq!(body.lines().count(), 2 + Zone::ALL.len());
        for zone in Zone::ALL {
            assert!(body.contains(zone.name()), "missing zone {zone}");
        }
    }

    #[test]
    fn test_two_ranks_per_zone_line() {
        let now = fixed_now();
        let body = render_board(World::Maduin, &full_timers(now), now);

        let line = body
            .lines()
            .find(|l| l.contains("Urqopacha"))
            .expect("zone line");
        assert!(line.contains("Queen Hawk"));
        assert!(line.contains("Nechuciho"));
    }

    #[test]
    fn test_cell_for_guaranteed_window() {
        let now = fixed_now();
        let cell = render_cell(Rank::QueenHawk, Some(now - Duration::hours(2)), now);
        assert_eq!(
            cell,
            format!("{} Queen Hawk `02:00`", SpawnStatus::Guaranteed.marker())
        );
    }

    #[test]
    fn test_cell_for_future_sentinel() {
        let now = fixed_now();
        let cell = render_cell(Rank::CatsEye, Some(now + Duration::minutes(90)), now);
        assert_eq!(
            cell,
            format!("{} Cat's Eye `-01:30`", SpawnStatus::NotYetDue.marker())
        );
    }

    #[test]
    fn test_cell_for_missing_timer() {
        let now = fixed_now();
        let cell = render_cell(Rank::Heshuala, None, now);
        assert!(cell.starts_with(SpawnStatus::Unknown.marker()));
        assert!(cell.ends_with("`--:--`"));
    }
}
