use std::collections::HashMap;

/// Lowercased ASCII alphanumerics of `s`, so that `unit_of_measure`, `unitOfMeasure` and
/// `Unit Of Measure` all normalize to the same sequence.
fn normalized(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
}

fn flex_eq(a: &str, b: &str) -> bool {
    normalized(a).eq(normalized(b))
}

pub trait FlexMap<T> {
    fn flex_get(&self, key: &str) -> Option<&T>;
}

impl<T> FlexMap<T> for HashMap<String, T> {
    fn flex_get(&self, search_key: &str) -> Option<&T> {
        if let Some(value) = self.get(search_key) {
            return Some(value);
        }
        let mut matches = self
            .iter()
            .filter(|(key, _)| flex_eq(key, search_key))
            .map(|(_, value)| value);
        let first = matches.next();
        // An ambiguous key resolves to nothing
        match matches.next() {
            Some(_) => None,
            None => first,
        }
    }
}
