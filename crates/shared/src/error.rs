use thiserror::Error;

/// A caller passed a speed outside the supported slider range. This is a
/// configuration error, not a runtime condition; it is surfaced at
/// construction and never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("speed {value} is outside the supported range 1..=100")]
pub struct InvalidSpeed {
    pub value: u8,
}
