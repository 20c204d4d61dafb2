//! Configuration access port trait.
//!
//! Lookups are by `[section] key`. Typed getters fall back to `default` when
//! the key is missing or does not parse.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;

    /// Like `get_string`, but treats blank values as absent.
    fn get_non_empty(&self, section: &str, key: &str) -> Option<String> {
        self.get_string(section, key)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}
