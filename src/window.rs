use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::model::{BucketKey, RequestRecord};
use crate::store::Buckets;

/// The most recent buckets of a series, newest first.
pub type Window<'a> = Vec<(BucketKey, &'a [RequestRecord])>;

/// How `WindowSelector` picks the most recent buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Scan when `scan_is_cheaper` says so, sort otherwise.
    Adaptive,
    /// Always sort every bucket key. O(B log B).
    Sort,
    /// Always run `limit` linear passes over the buckets. O(B * limit).
    Scan,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Adaptive
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "adaptive" => Ok(Strategy::Adaptive),
            "sort" => Ok(Strategy::Sort),
            "scan" => Ok(Strategy::Scan),
            _ => Err(format!(
                "unknown selection strategy '{}', expected one of adaptive, sort, scan",
                s
            )),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

/// Break-even point between `limit` linear scans and a single sort of
/// `population` keys: scanning wins while `limit < log2(population)`.
#[inline]
pub fn scan_is_cheaper(limit: usize, population: usize) -> bool {
    (limit as f64) < (population as f64).log2()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WindowSelector {
    strategy: Strategy,
}

impl WindowSelector {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The concrete algorithm (`Sort` or `Scan`) used for a query.
    pub fn resolve(&self, limit: usize, population: usize) -> Strategy {
        match self.strategy {
            Strategy::Adaptive if scan_is_cheaper(limit, population) => Strategy::Scan,
            Strategy::Adaptive => Strategy::Sort,
            forced => forced,
        }
    }

    /// Returns up to `limit` buckets with the greatest keys, newest first.
    pub fn select<'a>(&self, buckets: &'a Buckets, limit: usize) -> Window<'a> {
        if buckets.is_empty() || limit == 0 {
            return Vec::new();
        }

        let algorithm = self.resolve(limit, buckets.len());
        debug!(
            "selecting {} of {} buckets by {}",
            limit,
            buckets.len(),
            algorithm
        );

        match algorithm {
            Strategy::Scan => select_by_scan(buckets, limit),
            _ => select_by_sort(buckets, limit),
        }
    }
}

pub fn select_by_sort(buckets: &Buckets, limit: usize) -> Window<'_> {
    let mut window: Window<'_> = buckets
        .iter()
        .map(|(key, records)| (*key, records.as_slice()))
        .collect();
    window.sort_unstable_by(|a, b| b.0.cmp(&a.0));
    window.truncate(limit);
    window
}

/// Each round picks the greatest key strictly below the previous pick.
pub fn select_by_scan(buckets: &Buckets, limit: usize) -> Window<'_> {
    let mut window = Vec::with_capacity(limit.min(buckets.len()));
    let mut below: Option<BucketKey> = None;

    for _ in 0..limit {
        let latest = buckets
            .iter()
            .filter(|(key, _)| below.map_or(true, |bound| **key < bound))
            .max_by_key(|(key, _)| **key);

        match latest {
            Some((key, records)) => {
                window.push((*key, records.as_slice()));
                below = Some(*key);
            }
            None => break, // fewer buckets than requested
        }
    }

    window
}
