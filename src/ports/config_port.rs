//! Sectioned configuration access port.

/// Typed key lookup over `[section] key = value` configuration.
///
/// Numeric and boolean getters fall back to `default` when the key is
/// missing or does not parse; use [`ConfigPort::get_string`] to tell the two
/// apart.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;

    /// `None` when the key is absent or blank.
    fn get_optional_double(&self, section: &str, key: &str) -> Option<Result<f64, String>> {
        let raw = self.get_string(section, key)?;
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(raw.parse::<f64>().map_err(|_| raw.to_string()))
    }
}
