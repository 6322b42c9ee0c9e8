use tracing::debug;

use crate::selection::Selection;
use crate::trip::TripTable;

/// Returns a new table holding only the trips that match both halves of
/// `selection`. The input table is left untouched.
#[tracing::instrument(skip_all, fields(month = %selection.month, day = %selection.day))]
pub fn filter(table: &TripTable, selection: Selection) -> TripTable {
    let trips: Vec<_> = table
        .iter()
        .filter(|t| selection.month.matches(t.month) && selection.day.matches(t.weekday))
        .cloned()
        .collect();

    debug!(before = table.len(), after = trips.len(), "Trips filtered");

    TripTable::new(table.city, table.schema, trips)
}
