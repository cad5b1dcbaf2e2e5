//! INI file configuration adapter.

use crate::domain::error::TzuError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TzuError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| TzuError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, TzuError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| TzuError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[data]
path = prices.csv
kind = ohlcv
has_headers = true

[backtest]
initial_cash = 50000.0
transaction_cost = 0.001
stop_loss = 0.1

[strategy]
type = rsi
period = 14
oversold = 25
"#;

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("data", "path"),
            Some("prices.csv".to_string())
        );
        assert_eq!(
            adapter.get_string("strategy", "type"),
            Some("rsi".to_string())
        );
        assert_eq!(adapter.get_int("strategy", "period", 0), 14);
        assert_eq!(adapter.get_double("backtest", "initial_cash", 0.0), 50000.0);
        assert!(adapter.get_bool("data", "has_headers", false));
    }

    #[test]
    fn keys_are_case_insensitive() {
        let adapter = FileConfigAdapter::from_string("[Backtest]\nInitial_Cash = 10\n").unwrap();
        assert_eq!(adapter.get_double("backtest", "initial_cash", 0.0), 10.0);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("backtest", "take_profit"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
        assert_eq!(adapter.get_int("strategy", "overbought", 70), 70);
        assert_eq!(adapter.get_double("backtest", "missing", 99.9), 99.9);
        assert!(!adapter.get_bool("backtest", "verbose", false));
    }

    #[test]
    fn non_numeric_values_fall_back_to_defaults() {
        let adapter =
            FileConfigAdapter::from_string("[strategy]\nperiod = abc\nthreshold = x\n").unwrap();
        assert_eq!(adapter.get_int("strategy", "period", 14), 14);
        assert_eq!(adapter.get_double("strategy", "threshold", 0.5), 0.5);
    }

    #[test]
    fn bool_spellings() {
        let adapter = FileConfigAdapter::from_string(
            "[backtest]\na = true\nb = yes\nc = 1\nd = off\ne = no\nf = 0\n",
        )
        .unwrap();
        assert!(adapter.get_bool("backtest", "a", false));
        assert!(adapter.get_bool("backtest", "b", false));
        assert!(adapter.get_bool("backtest", "c", false));
        assert!(!adapter.get_bool("backtest", "d", true));
        assert!(!adapter.get_bool("backtest", "e", true));
        assert!(!adapter.get_bool("backtest", "f", true));
    }

    #[test]
    fn optional_double() {
        let adapter = FileConfigAdapter::from_string(
            "[backtest]\nstop_loss = 0.05\ntake_profit =\nbad = ten\n",
        )
        .unwrap();
        assert_eq!(
            adapter.get_optional_double("backtest", "stop_loss"),
            Some(Ok(0.05))
        );
        assert_eq!(adapter.get_optional_double("backtest", "take_profit"), None);
        assert_eq!(adapter.get_optional_double("backtest", "missing"), None);
        assert_eq!(
            adapter.get_optional_double("backtest", "bad"),
            Some(Err("ten".to_string()))
        );
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_string("data", "kind"), Some("ohlcv".to_string()));
    }

    #[test]
    fn from_file_missing_is_parse_error() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(matches!(result, Err(TzuError::ConfigParse { .. })));
    }
}
