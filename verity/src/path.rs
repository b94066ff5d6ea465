//! Locations of nested values, recovered from wrapped validation errors.

use std::ops::{Add, AddAssign};

/// One step into a nested value.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Segment {
    /// A named field of an object.
    Field(String),
    /// An element of an array.
    Index(usize),
}

impl core::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Field(name) => f.write_str(name),
            Segment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<String> for Segment {
    fn from(s: String) -> Self {
        Segment::Field(s)
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        Segment::Field(s.to_string())
    }
}

impl From<usize> for Segment {
    fn from(i: usize) -> Self {
        Segment::Index(i)
    }
}

#[cfg(feature = "smallvec")]
type SegmentsSmallVecArray = [Segment; 8];

#[cfg(feature = "smallvec")]
/// Most paths are shallow, so they are kept inline.
type SegmentsInner = smallvec_crate::SmallVec<SegmentsSmallVecArray>;

#[cfg(not(feature = "smallvec"))]
type SegmentsInner = Vec<Segment>;

/// A path of consecutive segments from the validated value
/// to the value that failed validation.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
#[repr(transparent)]
pub struct Path(SegmentsInner);

impl Path {
    /// Create a new empty path.
    pub fn new() -> Self {
        Path(SegmentsInner::new())
    }

    /// Iterator over the segments, outermost first.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.0.iter()
    }

    /// The number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the path points to the validated value itself.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the segments joined by dots.
    pub fn dotted(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Add a new segment.
    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.0.push(segment.into())
    }

    /// Return the inner container.
    pub fn into_inner(self) -> SegmentsInner {
        self.0
    }
}

impl core::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.dotted())
    }
}

impl AddAssign for Path {
    fn add_assign(&mut self, rhs: Self) {
        self.0.extend(rhs.0.into_iter())
    }
}

impl<S: Into<Segment>> Add<S> for Path {
    type Output = Self;
    fn add(mut self, rhs: S) -> Self::Output {
        self.push(rhs);
        self
    }
}

impl IntoIterator for Path {
    type Item = Segment;

    #[cfg(feature = "smallvec")]
    type IntoIter = smallvec_crate::IntoIter<SegmentsSmallVecArray>;

    #[cfg(not(feature = "smallvec"))]
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
