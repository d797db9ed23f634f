//! Typed outcome of a DOM lookup.
//!
//! A missing element is an expected state on storefront listings (no promo
//! badge, no next-page arrow on the last page), so lookups return
//! [`Lookup::Absent`] rather than an error. Errors are reserved for driver
//! failures.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    Absent,
}

impl<T> Lookup<T> {
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Lookup<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::Absent => Lookup::Absent,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Lookup::Found(v),
            None => Lookup::Absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_option() {
        assert_eq!(Lookup::from(Some(3)), Lookup::Found(3));
        assert_eq!(Lookup::<i32>::from(None), Lookup::Absent);
    }

    #[test]
    fn map_preserves_absence() {
        let absent: Lookup<&str> = Lookup::Absent;
        assert_eq!(absent.map(str::len), Lookup::Absent);
        assert_eq!(Lookup::Found("abc").map(str::len), Lookup::Found(3));
    }
}
