//! Binding name normalization.
//!
//! [`Container::get`](crate::Container::get) accepts either a single name
//! or an ordered collection of names. [`IntoKeys`] turns any of them into
//! the owned, ordered `Vec<String>` the resolver works with.

/// Converts a single binding name or an ordered collection of names into
/// a list of keys.
///
/// # Examples
/// ```
/// use bindery_container::key::IntoKeys;
///
/// assert_eq!("config".into_keys(), vec!["config".to_string()]);
/// assert_eq!(["a", "b"].into_keys(), vec!["a".to_string(), "b".to_string()]);
/// assert!(Vec::<String>::new().into_keys().is_empty());
/// ```
pub trait IntoKeys {
    fn into_keys(self) -> Vec<String>;
}

impl IntoKeys for &str {
    fn into_keys(self) -> Vec<String> {
        vec![self.to_owned()]
    }
}

impl IntoKeys for String {
    fn into_keys(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoKeys for &String {
    fn into_keys(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<S: AsRef<str>> IntoKeys for &[S] {
    fn into_keys(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_owned()).collect()
    }
}

impl<S: AsRef<str>> IntoKeys for Vec<S> {
    fn into_keys(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_owned()).collect()
    }
}

impl<S: AsRef<str>> IntoKeys for &Vec<S> {
    fn into_keys(self) -> Vec<String> {
        self.as_slice().into_keys()
    }
}

impl<S: AsRef<str>, const N: usize> IntoKeys for [S; N] {
    fn into_keys(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_owned()).collect()
    }
}

impl<S: AsRef<str>, const N: usize> IntoKeys for &[S; N] {
    fn into_keys(self) -> Vec<String> {
        self.as_slice().into_keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_names() {
        assert_eq!("a".into_keys(), vec!["a"]);
        assert_eq!(String::from("a").into_keys(), vec!["a"]);
        assert_eq!((&String::from("a")).into_keys(), vec!["a"]);
    }

    #[test]
    fn sequences_keep_order() {
        assert_eq!(["b", "a", "c"].into_keys(), vec!["b", "a", "c"]);
        assert_eq!(vec!["b", "a"].into_keys(), vec!["b", "a"]);
        assert_eq!((&["x", "y"][..]).into_keys(), vec!["x", "y"]);
        assert_eq!(
            vec![String::from("x"), String::from("y")].into_keys(),
            vec!["x", "y"]
        );
    }

    #[test]
    fn duplicates_are_kept() {
        assert_eq!(["a", "a"].into_keys(), vec!["a", "a"]);
    }

    #[test]
    fn empty_sequences() {
        let empty: [&str; 0] = [];
        assert!(empty.into_keys().is_empty());
        assert!(Vec::<&str>::new().into_keys().is_empty());
    }
}
