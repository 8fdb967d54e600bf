//! Navigation context - where the current page and query live between views

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Access to the location's query string.
///
/// In a browser this is the address bar; on the server it is the request's
/// query plus the URL pushed back to the client.
pub trait NavigationContext: Send + Sync {
    /// Read a query parameter
    fn query_param(&self, key: &str) -> Option<String>;
    /// Write a query parameter; an empty value removes it
    fn set_query_param(&self, key: &str, value: &str);
}

/// In-memory navigation context
#[derive(Debug, Default)]
pub struct MemoryNavigation {
    params: Mutex<BTreeMap<String, String>>,
    writes: Mutex<usize>,
}

impl MemoryNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from existing query pairs, e.g. an incoming request
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let params = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.is_empty())
            .collect();
        Self {
            params: Mutex::new(params),
            writes: Mutex::new(0),
        }
    }

    /// Number of `set_query_param` calls so far
    pub fn write_count(&self) -> usize {
        *recover(&self.writes)
    }

    /// Encode the parameters as a query string (without the leading `?`)
    pub fn query_string(&self) -> String {
        recover(&self.params)
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// A panicked writer leaves the map itself intact, so keep using it
fn recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl NavigationContext for MemoryNavigation {
    fn query_param(&self, key: &str) -> Option<String> {
        recover(&self.params).get(key).cloned()
    }

    fn set_query_param(&self, key: &str, value: &str) {
        {
            let mut params = recover(&self.params);
            if value.is_empty() {
                params.remove(key);
            } else {
                params.insert(key.to_string(), value.to_string());
            }
        }
        *recover(&self.writes) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_and_write_params() {
        let nav = MemoryNavigation::from_pairs([("p", "3"), ("q", "")]);
        assert_eq!(nav.query_param("p"), Some("3".to_string()));
        assert_eq!(nav.query_param("q"), None);

        nav.set_query_param("p", "4");
        nav.set_query_param("q", "rent");
        assert_eq!(nav.query_param("p"), Some("4".to_string()));
        assert_eq!(nav.write_count(), 2);

        nav.set_query_param("q", "");
        assert_eq!(nav.query_param("q"), None);
    }

    #[test]
    fn test_query_string_is_encoded_and_sorted() {
        let nav = MemoryNavigation::new();
        nav.set_query_param("q", "rent & bills");
        nav.set_query_param("p", "2");
        assert_eq!(nav.query_string(), "p=2&q=rent%20%26%20bills");
    }

    #[test]
    fn test_poisoned_lock_still_reads_and_writes() {
        let nav = MemoryNavigation::from_pairs([("p", "5")]);
        let result = std::thread::scope(|scope| {
            scope
                .spawn(|| {
                    let _params = nav.params.lock().unwrap();
                    let _writes = nav.writes.lock().unwrap();
                    panic!("writer crashed");
                })
                .join()
        });
        assert!(result.is_err());
        assert!(nav.params.is_poisoned());

        assert_eq!(nav.query_param("p"), Some("5".to_string()));
        nav.set_query_param("p", "6");
        assert_eq!(nav.query_param("p"), Some("6".to_string()));
        assert_eq!(nav.write_count(), 1);
        assert_eq!(nav.query_string(), "p=6");
    }
}
