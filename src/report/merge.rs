//! Outer joins of per-sample tables on the sample name.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::Warning;

/// A record that belongs to exactly one sample.
pub trait Keyed {
    /// The name of the sample this record describes.
    fn sample_name(&self) -> &str;
}

/// One row of an outer join: the sample name and whichever side(s) had a
/// record for it.
#[derive(Debug)]
pub struct JoinedRow<L, R> {
    /// The sample name shared by both sides.
    pub sample_name: String,

    /// The record from the left table, if present.
    pub left: Option<L>,

    /// The record from the right table, if present.
    pub right: Option<R>,
}

/// The result of an outer join.
#[derive(Debug)]
pub struct Joined<L, R> {
    /// One row per distinct sample name, ordered by sample name.
    pub rows: Vec<JoinedRow<L, R>>,

    /// Any anomalies encountered while joining.
    pub warnings: Vec<Warning>,
}

/// Outer-joins two tables on the sample name. No record from either side is
/// dropped unless it repeats a sample name already seen on the same side, in
/// which case the first record wins and a [`Warning::DuplicateSample`] is
/// recorded.
pub fn outer_join<L, R>(left: Vec<L>, right: Vec<R>) -> Joined<L, R>
where
    L: Keyed,
    R: Keyed,
{
    let mut slots: BTreeMap<String, (Option<L>, Option<R>)> = BTreeMap::new();
    let mut warnings = Vec::new();

    for record in left {
        match slots.entry(record.sample_name().to_string()) {
            Entry::Vacant(e) => {
                e.insert((Some(record), None));
            }
            Entry::Occupied(e) => {
                warnings.push(Warning::duplicate_sample(e.key()));
            }
        }
    }

    for record in right {
        let slot = slots
            .entry(record.sample_name().to_string())
            .or_insert((None, None));

        if slot.1.is_some() {
            warnings.push(Warning::duplicate_sample(record.sample_name()));
        } else {
            slot.1 = Some(record);
        }
    }

    let rows = slots
        .into_iter()
        .map(|(sample_name, (left, right))| JoinedRow {
            sample_name,
            left,
            right,
        })
        .collect();

    Joined { rows, warnings }
}
