//! Page-grouping partitioner: splits a show's sets into page groups.
//!
//! # Algorithm
//! 1. Simulate sequential filling of `page_line_capacity`-line pages to estimate
//!    how many pages the show needs.
//! 2. One page → a single group holding every set.
//! 3. Otherwise target `(total_songs + 1) / pages` songs per page and walk the
//!    sets in order: each group is seeded with the next set, then pulls in
//!    following sets while the running total is more than `balance_slack_songs`
//!    short of the cumulative target, never pushing a group past
//!    `per_group_line_ceiling`.
//! 4. Sets left over after the last simulated page are absorbed into the last
//!    group, or into a fresh group when absorbing would breach the ceiling.
//!
//! Sets are atomic and keep their order; every set lands in exactly one group
//! and no group is ever empty. A group holding more than one set never exceeds
//! the ceiling. A single set larger than the ceiling gets a group of its own.

use std::ops::Range;

use crate::layout::geometry::LayoutConfig;
use crate::models::{Set, Show};

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// A contiguous run of a show's sets destined for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageGroup<'a> {
    /// Position of this group within the show's spread (0 = first page).
    pub index: usize,
    /// Indices into `Show::sets()` covered by this group.
    pub range: Range<usize>,
    pub sets: &'a [Set],
}

impl PageGroup<'_> {
    pub fn song_count(&self) -> usize {
        self.sets.iter().map(Set::len).sum()
    }

    /// Every group after the first renders with a "continued" header.
    pub fn is_continuation(&self) -> bool {
        self.index > 0
    }

    pub fn labels(&self) -> Vec<String> {
        self.sets.iter().map(|s| s.label().to_string()).collect()
    }
}

/// Ordered page groups covering every set of a show exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageGrouping<'a> {
    groups: Vec<PageGroup<'a>>,
    /// Page count predicted by the line-capacity simulation.
    simulated_pages: usize,
}

impl<'a> PageGrouping<'a> {
    fn from_ranges(sets: &'a [Set], ranges: Vec<Range<usize>>, simulated_pages: usize) -> Self {
        let groups = ranges
            .into_iter()
            .enumerate()
            .map(|(index, range)| PageGroup {
                index,
                sets: &sets[range.clone()],
                range,
            })
            .collect();
        PageGrouping {
            groups,
            simulated_pages,
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_spread(&self) -> bool {
        self.groups.len() > 1
    }

    pub fn simulated_pages(&self) -> usize {
        self.simulated_pages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageGroup<'a>> {
        self.groups.iter()
    }

    /// Set labels per group, e.g. `[["1"], ["2", "E"]]`.
    pub fn labels(&self) -> Vec<Vec<String>> {
        self.groups.iter().map(PageGroup::labels).collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Estimates how many pages the sets need when filled sequentially.
///
/// A page closes as soon as adding the next set would meet or exceed
/// `capacity` lines; that set then opens the next page.
pub fn simulate_page_count(sets: &[Set], capacity: usize) -> usize {
    let mut pages = 1;
    let mut lines = 0;
    for set in sets {
        if lines + set.len() >= capacity {
            pages += 1;
            lines = set.len();
        } else {
            lines += set.len();
        }
    }
    pages
}

/// Partitions a show's sets into page groups.
///
/// Pure: the same show and config always yield the same grouping.
pub fn to_page_friendly_set_groupings<'a>(
    show: &'a Show,
    config: &LayoutConfig,
) -> PageGrouping<'a> {
    let sets = show.sets();
    let num_pages = simulate_page_count(sets, config.page_line_capacity);

    if num_pages == 1 {
        return PageGrouping::from_ranges(sets, vec![0..sets.len()], num_pages);
    }

    let ceiling = config.per_group_line_ceiling;
    let slack = config.balance_slack_songs;
    let songs_per_page = (show.len() + 1) / num_pages;

    let mut ranges: Vec<Range<usize>> = Vec::with_capacity(num_pages);
    let mut placed = 0usize;
    let mut next = 0usize;

    for page in 1..=num_pages {
        if next >= sets.len() {
            break;
        }

        let start = next;
        let mut group_songs = sets[next].len();
        placed += group_songs;
        next += 1;

        while songs_per_page * page > placed + slack {
            let Some(candidate) = sets.get(next) else {
                break;
            };
            if group_songs + candidate.len() > ceiling {
                break;
            }
            group_songs += candidate.len();
            placed += candidate.len();
            next += 1;
        }

        ranges.push(start..next);
    }

    // The simulation under-counted; absorb the remainder.
    while next < sets.len() {
        let size = sets[next].len();
        let fits = ranges
            .last()
            .map(|r| sets[r.clone()].iter().map(Set::len).sum::<usize>() + size <= ceiling)
            .unwrap_or(false);

        match ranges.last_mut() {
            Some(last) if fits => last.end = next + 1,
            _ => ranges.push(next..next + 1),
        }
        next += 1;
    }

    PageGrouping::from_ranges(sets, ranges, num_pages)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
