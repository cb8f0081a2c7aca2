//! Partition
//!
//! Splits the ISBN multiset of a cart into groupings that each hold at most one
//! copy of every series ISBN. The number of rounds is the highest copy count of
//! any single ISBN in the cart, which is enough to drain every series copy.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::{
    books::{Book, Isbn},
    series::Series,
};

/// One partition round: at most one copy of each series ISBN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping<'a> {
    isbns: SmallVec<[&'a Isbn; 8]>,
}

impl<'a> Grouping<'a> {
    /// ISBNs in the grouping, in series order.
    pub fn isbns(&self) -> &[&'a Isbn] {
        &self.isbns
    }

    /// Number of distinct books in the grouping.
    pub fn len(&self) -> usize {
        self.isbns.len()
    }

    /// Check if the grouping is empty.
    pub fn is_empty(&self) -> bool {
        self.isbns.is_empty()
    }
}

/// Result of partitioning a cart against a series.
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    max_copies: usize,
    groupings: Vec<Grouping<'a>>,
    ungrouped: FxHashMap<&'a Isbn, usize>,
}

impl<'a> Partition<'a> {
    /// Highest copy count of a single ISBN, which is also the number of rounds.
    pub fn max_copies(&self) -> usize {
        self.max_copies
    }

    /// Groupings in round order.
    pub fn groupings(&self) -> &[Grouping<'a>] {
        &self.groupings
    }

    /// Copies left over after the last round, keyed by ISBN.
    ///
    /// Only ISBNs outside the series end up here.
    pub fn ungrouped(&self) -> &FxHashMap<&'a Isbn, usize> {
        &self.ungrouped
    }

    /// Total number of copies placed in a grouping.
    pub fn grouped_copies(&self) -> usize {
        self.groupings.iter().map(Grouping::len).sum()
    }
}

/// ISBNs in the cart that the series does not know about, in cart order.
///
/// The symmetric difference of cart and series ISBNs also yields series books
/// missing from the cart; those are irrelevant and filtered out.
pub fn unknown_isbns<'c>(cart: &'c [Book<'_>], series: &Series<'_>) -> SmallVec<[&'c Isbn; 4]> {
    let cart_isbns: FxHashSet<&Isbn> = cart.iter().map(Book::isbn).collect();
    let series_isbns: FxHashSet<&Isbn> = series.books().iter().map(Book::isbn).collect();

    let unknown: FxHashSet<&Isbn> = cart_isbns
        .symmetric_difference(&series_isbns)
        .filter(|isbn| cart_isbns.contains(*isbn))
        .copied()
        .collect();

    let mut seen = FxHashSet::default();

    cart.iter()
        .map(Book::isbn)
        .filter(|isbn| unknown.contains(isbn) && seen.insert(*isbn))
        .collect()
}

/// Count copies per ISBN.
pub fn copy_counts<'a>(isbns: impl IntoIterator<Item = &'a Isbn>) -> FxHashMap<&'a Isbn, usize> {
    let mut counts = FxHashMap::default();

    for isbn in isbns {
        *counts.entry(isbn).or_default() += 1;
    }

    counts
}

/// Partition a cart's ISBN multiset into groupings of distinct series ISBNs.
///
/// Each round takes the set intersection of the remaining cart ISBNs with the
/// series ISBNs, then removes exactly one copy of each ISBN in that grouping.
/// Rounds stop after `max_copies`, whatever is left is reported as ungrouped.
pub fn partition<'a>(
    cart: impl IntoIterator<Item = &'a Isbn>,
    series: &[&'a Isbn],
) -> Partition<'a> {
    let mut remaining = copy_counts(cart);
    let max_copies = remaining.values().copied().max().unwrap_or(0);

    let mut groupings = Vec::with_capacity(max_copies);

    for _ in 0..max_copies {
        let mut seen = FxHashSet::default();
        let isbns: SmallVec<[&Isbn; 8]> = series
            .iter()
            .copied()
            .filter(|isbn| remaining.get(isbn).is_some_and(|count| *count > 0))
            .filter(|isbn| seen.insert(*isbn))
            .collect();

        for isbn in &isbns {
            if let Some(count) = remaining.get_mut(isbn) {
                *count -= 1;
            }
        }

        groupings.push(Grouping { isbns });
    }

    remaining.retain(|_, count| *count > 0);

    Partition {
        max_copies,
        groupings,
        ungrouped: remaining,
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::GBP};

    use super::*;

    fn isbns(values: &[&str]) -> Vec<Isbn> {
        values.iter().copied().map(Isbn::from).collect()
    }

    fn book(isbn: &str) -> Book<'static> {
        Book::new(isbn, format!("Title {isbn}"), Money::from_minor(800, GBP))
    }

    fn as_strs<'a>(grouping: &Grouping<'a>) -> Vec<&'a str> {
        grouping.isbns().iter().map(|isbn| isbn.as_str()).collect()
    }

    #[test]
    fn partition_splits_duplicates_across_rounds() {
        let cart = isbns(&["1", "2", "3", "4", "5", "1", "3", "5"]);
        let series = isbns(&["1", "2", "3", "4", "5"]);
        let series_refs: Vec<&Isbn> = series.iter().collect();

        let partition = partition(&cart, &series_refs);

        assert_eq!(partition.max_copies(), 2);
        assert_eq!(partition.groupings().len(), 2);

        let rounds: Vec<Vec<&str>> = partition.groupings().iter().map(as_strs).collect();

        assert_eq!(rounds, vec![vec!["1", "2", "3", "4", "5"], vec!["1", "3", "5"]]);
        assert!(partition.ungrouped().is_empty());
    }

    #[test]
    fn partition_drains_every_series_copy() {
        let cart = isbns(&["1", "1", "1", "1", "1", "4", "4", "4", "2"]);
        let series = isbns(&["1", "2", "3", "4", "5"]);
        let series_refs: Vec<&Isbn> = series.iter().collect();

        let partition = partition(&cart, &series_refs);

        assert_eq!(partition.max_copies(), 5);
        assert_eq!(partition.grouped_copies(), cart.len());

        let sizes: Vec<usize> = partition.groupings().iter().map(Grouping::len).collect();

        assert_eq!(sizes, vec![3, 2, 2, 1, 1]);
    }

    #[test]
    fn partition_never_groups_isbns_outside_the_series() {
        let cart = isbns(&["1", "X", "X", "2"]);
        let series = isbns(&["1", "2"]);
        let series_refs: Vec<&Isbn> = series.iter().collect();

        let partition = partition(&cart, &series_refs);

        let rounds: Vec<Vec<&str>> = partition.groupings().iter().map(as_strs).collect();

        assert_eq!(partition.max_copies(), 2);
        assert_eq!(rounds, vec![vec!["1", "2"], vec![]]);
        assert_eq!(partition.ungrouped().get(&Isbn::from("X")), Some(&2));
    }

    #[test]
    fn partition_ignores_duplicate_series_entries() {
        let cart = isbns(&["1", "1"]);
        let series = isbns(&["1", "1"]);
        let series_refs: Vec<&Isbn> = series.iter().collect();

        let partition = partition(&cart, &series_refs);

        let sizes: Vec<usize> = partition.groupings().iter().map(Grouping::len).collect();

        assert_eq!(sizes, vec![1, 1]);
    }

    #[test]
    fn partition_of_empty_cart_has_no_rounds() {
        let series = isbns(&["1"]);
        let series_refs: Vec<&Isbn> = series.iter().collect();

        let partition = partition(std::iter::empty(), &series_refs);

        assert_eq!(partition.max_copies(), 0);
        assert!(partition.groupings().is_empty());
    }

    #[test]
    fn unknown_isbns_keeps_only_cart_books() {
        let cart = [book("1"), book("X"), book("2"), book("X"), book("Y")];
        let series = Series::new(vec![book("1"), book("2"), book("3")]);

        let unknown: Vec<&str> = unknown_isbns(&cart, &series)
            .into_iter()
            .map(Isbn::as_str)
            .collect();

        assert_eq!(unknown, vec!["X", "Y"]);
    }

    #[test]
    fn unknown_isbns_is_empty_when_cart_is_a_subset() {
        let cart = [book("1"), book("1")];
        let series = Series::new(vec![book("1"), book("2")]);

        assert!(unknown_isbns(&cart, &series).is_empty());
    }

    #[test]
    fn copy_counts_counts_each_isbn() {
        let cart = isbns(&["1", "2", "1"]);
        let counts = copy_counts(&cart);

        assert_eq!(counts.get(&Isbn::from("1")), Some(&2));
        assert_eq!(counts.get(&Isbn::from("2")), Some(&1));
    }
}
