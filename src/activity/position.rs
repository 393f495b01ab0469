use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// The stable, tree-encoding position of an activity (the "system number").
///
/// Top-level activities are `"1"`, `"2"`, ...; a child inside a branch is
/// `"{parent}.{tag}{index}"`, e.g. `"3.S1"`, `"3.N2"` or `"4.A21"` (first child of the
/// second alternative). Once assigned it is never recomputed, except for top-level
/// activities when they are reordered.
///
/// Descendants keep the prefix they were created with, so after a reorder or a branch
/// removal a child's prefix may no longer match its parent's current position. The
/// alternative form has no separator between `n` and the index either: `"5.A113"` is
/// both child 13 of branch 1 and child 3 of branch 11. Positions are therefore not
/// unique across a collection; siblings inside one branch still sort in creation order.
///
/// Ordering is numeric-aware: digit runs compare as integers, so `"10"` sorts after `"9"`
/// and `"3.S10"` after `"3.S9"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct StructuralPosition(String);

impl StructuralPosition {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Position of the `index`-th (1-based) top-level activity.
    pub fn top_level(index: usize) -> Self {
        Self(index.to_string())
    }

    /// Position of the `index`-th (1-based) child within `tag` under `self`.
    pub fn child(&self, tag: &BranchTag, index: usize) -> Self {
        Self(format!("{}{}", self.branch_prefix(tag), index))
    }

    /// The shared prefix of every child position within `tag`, e.g. `"3.S"`.
    pub fn branch_prefix(&self, tag: &BranchTag) -> String {
        format!("{}.{}", self.0, tag)
    }

    /// The same position with its trailing index bumped by one: `"3.S1"` becomes
    /// `"3.S2"`. `None` when the position does not end in digits.
    pub fn successor(&self) -> Option<Self> {
        let stem = self.0.trim_end_matches(|c: char| c.is_ascii_digit());
        let index: usize = self.0[stem.len()..].parse().ok()?;
        Some(Self(format!("{}{}", stem, index.checked_add(1)?)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of dot-delimited segments; top-level positions have depth 1.
    pub fn depth(&self) -> usize {
        self.0.split('.').count()
    }
}

impl fmt::Display for StructuralPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StructuralPosition {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StructuralPosition {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Ord for StructuralPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.0, &other.0).then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for StructuralPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The branch segment used when deriving a child's structural position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchTag {
    /// `S`, the "yes" side of a decision.
    Yes,
    /// `N`, the "no" side of a decision.
    No,
    /// `A{n}`, the nth (1-based) alternative branch.
    Alternative(usize),
}

impl fmt::Display for BranchTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchTag::Yes => write!(f, "S"),
            BranchTag::No => write!(f, "N"),
            BranchTag::Alternative(n) => write!(f, "A{}", n),
        }
    }
}

/// A run of either digits or non-digits inside a position string.
#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Number(&'a str),
    Text(&'a str),
}

fn segments(value: &str) -> impl Iterator<Item = Segment<'_>> {
    let mut rest = value;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let numeric = first.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != numeric)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(end);
        rest = tail;
        Some(if numeric {
            Segment::Number(head)
        } else {
            Segment::Text(head)
        })
    })
}

/// Compares two digit runs by value without parsing, so arbitrarily long runs never overflow.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Numeric-aware string comparison.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = segments(a);
    let mut right = segments(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = match (&l, &r) {
                    (Segment::Number(x), Segment::Number(y)) => cmp_digits(x, y),
                    (Segment::Text(x), Segment::Text(y)) => x.cmp(y),
                    // Digits sort before text, same as a plain byte comparison would.
                    (Segment::Number(_), Segment::Text(_)) => Ordering::Less,
                    (Segment::Text(_), Segment::Number(_)) => Ordering::Greater,
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}
