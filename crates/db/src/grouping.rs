//! Reconstruction of nested show aggregates from flat join rows.
//!
//! The show read paths select one row per (show, cast member) pairing.
//! These helpers fold such a row sequence back into [`Show`] values with
//! their cast lists attached, in a single pass.

use crate::models::show::{Show, ShowCastRow};

/// Partition a row sequence into one [`Show`] per contiguous run of equal
/// `show_id` values, preserving run order.
///
/// Rows for one show must already be contiguous (the producing queries
/// order by `show_id`); global sort order is neither required nor checked.
/// A show id recurring in two non-contiguous runs yields two separate
/// aggregates. Duplicate rows within a run produce duplicate cast entries.
pub fn group_into_shows(rows: Vec<ShowCastRow>) -> Vec<Show> {
    let mut shows = Vec::new();
    let mut rows = rows.into_iter();

    let Some(first) = rows.next() else {
        return shows;
    };

    let mut current = start_aggregate(first);
    for row in rows {
        if row.show_id == current.id {
            current.cast.push(row.actor());
        } else {
            shows.push(current);
            current = start_aggregate(row);
        }
    }
    shows.push(current);

    shows
}

/// Build exactly one [`Show`] from rows already known to belong to a single
/// show (fetched by id), skipping run partitioning.
///
/// Returns `None` on empty input; the caller raises its not-found error
/// from that signal. Scalar fields come from the first row and every row
/// contributes one cast entry.
pub fn collect_single_show(rows: Vec<ShowCastRow>) -> Option<Show> {
    let mut rows = rows.into_iter();
    let mut show = start_aggregate(rows.next()?);
    show.cast.extend(rows.map(|row| row.actor()));
    Some(show)
}

/// Open a new aggregate from the first row of a run.
fn start_aggregate(row: ShowCastRow) -> Show {
    let cast = vec![row.actor()];
    Show {
        id: row.show_id,
        name: row.show_name,
        seasons_count: row.seasons_count,
        image_url: row.image_url,
        cast,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::actor::Actor;

    fn row(show_id: i64, actor_id: i64) -> ShowCastRow {
        ShowCastRow {
            show_id,
            show_name: format!("show{show_id}"),
            seasons_count: 3,
            image_url: format!("shows/{show_id}.png"),
            actor_id,
            actor_name: format!("actor{actor_id}"),
            actor_image_url: format!("actors/{actor_id}.png"),
        }
    }

    fn actor(actor_id: i64) -> Actor {
        Actor {
            id: actor_id,
            name: format!("actor{actor_id}"),
            image_url: format!("actors/{actor_id}.png"),
        }
    }

    #[test]
    fn test_empty_input_yields_no_aggregates() {
        assert_eq!(group_into_shows(Vec::new()), Vec::new());
    }

    #[test]
    fn test_contiguous_runs_become_aggregates_in_run_order() {
        let rows = vec![row(1, 1), row(1, 2), row(2, 5), row(3, 1), row(3, 6), row(3, 7)];

        let shows = group_into_shows(rows);

        assert_eq!(shows.len(), 3);
        assert_eq!(shows[0].id, 1);
        assert_eq!(shows[0].cast, vec![actor(1), actor(2)]);
        assert_eq!(shows[1].id, 2);
        assert_eq!(shows[1].cast, vec![actor(5)]);
        assert_eq!(shows[2].id, 3);
        assert_eq!(shows[2].cast, vec![actor(1), actor(6), actor(7)]);
    }

    #[test]
    fn test_scalar_fields_come_from_first_row_of_run() {
        let mut second = row(1, 2);
        second.show_name = "renamed mid-run".into();
        let shows = group_into_shows(vec![row(1, 1), second]);

        assert_eq!(shows.len(), 1);
        assert_eq!(shows[0].name, "show1");
        assert_eq!(shows[0].seasons_count, 3);
        assert_eq!(shows[0].image_url, "shows/1.png");
    }

    #[test]
    fn test_duplicate_row_produces_duplicate_cast_entry() {
        let shows = group_into_shows(vec![row(1, 1), row(1, 2), row(1, 2)]);

        assert_eq!(shows.len(), 1);
        assert_eq!(shows[0].cast, vec![actor(1), actor(2), actor(2)]);
    }

    #[test]
    fn test_non_contiguous_runs_yield_separate_aggregates() {
        // Precondition violation: id 1 appears in two runs. The fold does
        // not merge them.
        let shows = group_into_shows(vec![row(1, 1), row(2, 5), row(1, 2)]);

        let ids: Vec<i64> = shows.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 1]);
        assert_eq!(shows[0].cast, vec![actor(1)]);
        assert_eq!(shows[2].cast, vec![actor(2)]);
    }

    #[test]
    fn test_single_show_from_empty_input_is_none() {
        assert_eq!(collect_single_show(Vec::new()), None);
    }

    #[test]
    fn test_single_show_collects_all_rows_into_one_aggregate() {
        let show = collect_single_show(vec![row(4, 2), row(4, 9)]).unwrap();

        assert_eq!(show.id, 4);
        assert_eq!(show.name, "show4");
        assert_eq!(show.cast, vec![actor(2), actor(9)]);
    }

    #[test]
    fn test_single_show_takes_scalars_from_first_row() {
        let mut stray = row(4, 9);
        stray.show_name = "other".into();
        let show = collect_single_show(vec![row(4, 2), stray]).unwrap();

        assert_eq!(show.name, "show4");
        assert_eq!(show.cast.len(), 2);
    }
}
