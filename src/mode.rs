//! Frequency ranking of categorical values.

/// How missing values take part in a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NaPolicy {
    /// Missing values are ranked like any other value.
    Retain,
    /// Rows with any missing column are left out of the ranking and the
    /// count basis.
    Drop,
}

/// A value combination that may contain missing columns.
pub trait Categorical {
    fn has_missing(&self) -> bool;
}

impl<T> Categorical for Option<T> {
    fn has_missing(&self) -> bool {
        self.is_none()
    }
}

impl<A: Categorical, B: Categorical> Categorical for (A, B) {
    fn has_missing(&self) -> bool {
        self.0.has_missing() || self.1.has_missing()
    }
}

impl<A: Categorical, B: Categorical, C: Categorical> Categorical for (A, B, C) {
    fn has_missing(&self) -> bool {
        self.0.has_missing() || self.1.has_missing() || self.2.has_missing()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<K> {
    pub value: K,
    pub count: usize,
}

/// Distinct values ordered by descending count, ties in first-seen order.
///
/// Values are compared with `PartialEq` so float columns can be ranked.
pub fn rank_by_frequency<K, I>(rows: I, policy: NaPolicy) -> Vec<Ranked<K>>
where
    K: Categorical + PartialEq,
    I: IntoIterator<Item = K>,
{
    let mut ranked: Vec<Ranked<K>> = Vec::new();
    for row in rows {
        if policy == NaPolicy::Drop && row.has_missing() {
            continue;
        }
        match ranked.iter_mut().find(|r| r.value == row) {
            Some(r) => r.count += 1,
            None => ranked.push(Ranked { value: row, count: 1 }),
        }
    }
    // stable, so first-seen order survives among equal counts
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

/// Most frequent value of the rows, or `None` for an empty ranking.
pub fn mode<K, I>(rows: I, policy: NaPolicy) -> Option<K>
where
    K: Categorical + PartialEq,
    I: IntoIterator<Item = K>,
{
    rank_by_frequency(rows, policy).into_iter().next().map(|r| r.value)
}

/// Most frequent present value of a single column.
pub fn dominant<T, I>(values: I) -> Option<T>
where
    T: PartialEq,
    I: IntoIterator<Item = Option<T>>,
{
    mode(values, NaPolicy::Drop).flatten()
}
