use crate::error::WallReferenceError;
use crate::geometry::CardinalDirection;

/// A parsed `<room or sub-space>.<direction>` wall reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallRef<'a> {
    pub target: &'a str,
    pub direction: CardinalDirection,
}

impl<'a> WallRef<'a> {
    /// Splits a reference on its last `.`.
    ///
    /// # Errors
    ///
    /// Returns `WallReferenceError::BadFormat` when either half is missing and
    /// `UnknownDirection` when the suffix is not a compass direction.
    pub fn parse(reference: &'a str) -> Result<Self, WallReferenceError> {
        let (target, direction) = reference
            .rsplit_once('.')
            .filter(|(target, direction)| !target.is_empty() && !direction.is_empty())
            .ok_or_else(|| WallReferenceError::BadFormat(reference.to_owned()))?;
        let direction = direction
            .parse()
            .map_err(|direction| WallReferenceError::UnknownDirection {
                reference: reference.to_owned(),
                direction,
            })?;
        Ok(Self { target, direction })
    }

    /// Parses a reference and checks its target with `exists`.
    ///
    /// # Errors
    ///
    /// As [`WallRef::parse`], plus `UnknownTarget` when `exists` rejects it.
    pub fn resolve(
        reference: &'a str,
        exists: impl Fn(&str) -> bool,
    ) -> Result<Self, WallReferenceError> {
        let parsed = Self::parse(reference)?;
        if !exists(parsed.target) {
            return Err(WallReferenceError::UnknownTarget {
                reference: reference.to_owned(),
                target: parsed.target.to_owned(),
            });
        }
        Ok(parsed)
    }
}
