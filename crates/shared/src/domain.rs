use serde::{Deserialize, Serialize};

use crate::error::InvalidSpeed;

/// One slot of the visualized sequence: a bar height plus the transient
/// highlight flags a renderer needs to color it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementState {
    pub value: u16,
    pub is_comparing: bool,
    pub is_swapping: bool,
    pub is_sorted: bool,
}

impl ElementState {
    pub fn new(value: u16) -> Self {
        Self {
            value,
            is_comparing: false,
            is_swapping: false,
            is_sorted: false,
        }
    }

    /// Clears the transient highlight flags, leaving the sorted mark.
    pub fn clear_highlight(&mut self) {
        self.is_comparing = false;
        self.is_swapping = false;
    }

    /// Clears every flag, sorted mark included.
    pub fn clear_flags(&mut self) {
        self.is_comparing = false;
        self.is_swapping = false;
        self.is_sorted = false;
    }

    pub fn highlight(&self) -> Highlight {
        if self.is_sorted {
            Highlight::Sorted
        } else if self.is_swapping {
            Highlight::Swapping
        } else if self.is_comparing {
            Highlight::Comparing
        } else {
            Highlight::Unsorted
        }
    }
}

/// Render classification of a slot. When flags overlap the priority is
/// sorted > swapping > comparing > unsorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    Sorted,
    Swapping,
    Comparing,
    Unsorted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    Bubble,
    Selection,
    Insertion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

/// Animation speed in `1..=100`. Higher is faster; the inter-step delay is
/// `101 - speed` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Speed(u8);

impl Speed {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Result<Self, InvalidSpeed> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidSpeed { value })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(50)
    }
}

impl TryFrom<u8> for Speed {
    type Error = InvalidSpeed;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Speed> for u8 {
    fn from(speed: Speed) -> Self {
        speed.0
    }
}

/// Aggregate run status reported to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub phase: Phase,
    pub algorithm: Algorithm,
    pub speed: Speed,
    pub comparisons: u64,
    pub swaps: u64,
    pub step_label: String,
}
