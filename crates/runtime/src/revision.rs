use serde::{Deserialize, Serialize};

/// Counter of effective state changes.
///
/// Hosts poll this to decide whether a re-render is needed: the value only
/// moves when something observable changed, so equal revisions imply equal
/// state.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(pub u64);

impl Revision {
    pub const INITIAL: Revision = Revision(0);

    pub fn next(self) -> Self {
        Revision(self.0 + 1)
    }

    /// Advances in place and returns the new value.
    pub fn bump(&mut self) -> Self {
        *self = self.next();
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::Revision;

    #[test]
    fn bump_advances_by_one() {
        let mut r = Revision::INITIAL;
        assert_eq!(r.bump(), Revision(1));
        assert_eq!(r.bump(), Revision(2));
        assert_eq!(r, Revision(2));
    }

    #[test]
    fn revisions_are_ordered() {
        assert!(Revision(3) > Revision(2));
        assert_eq!(Revision::default(), Revision::INITIAL);
    }
}
