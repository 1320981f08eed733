/// Single value cell. Writers hand over a complete replacement, so a reader
/// never sees a half written value. The revision only moves when the stored
/// value actually differs from the previous one.
#[derive(Debug, Clone)]
pub struct Store<T> {
    value: Option<T>,
    revision: u64,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self {
            value: None,
            revision: 0,
        }
    }
}

impl<T: PartialEq> Store<T> {
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns whether the stored value changed.
    pub fn replace(&mut self, value: Option<T>) -> bool {
        if self.value == value {
            return false;
        }

        self.value = value;
        self.revision += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_tracks_revisions() {
        let mut store = Store::default();
        assert!(!store.is_set());

        assert!(store.replace(Some(1)));
        assert_eq!(store.revision(), 1);

        assert!(!store.replace(Some(1)));
        assert_eq!(store.revision(), 1);

        assert!(store.replace(None));
        assert_eq!(store.get(), None);
        assert_eq!(store.revision(), 2);
    }
}
