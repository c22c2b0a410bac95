use toml::{Value, map::Map};

/// Folds imported documents together, then lays `main` over the result.
pub fn merge_documents(imports: Vec<Value>, main: Value) -> Value {
    let merged_imports = imports
        .into_iter()
        .fold(Value::Table(Map::new()), merge_two);

    merge_two(merged_imports, main)
}

/// Deep merges `overlay` into `base`.
///
/// Tables merge key by key. Any other value in `overlay` replaces the one
/// in `base` outright, arrays included.
pub fn merge_two(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(mut overlay_table)) => {
            for (key, base_value) in base_table {
                let merged = match overlay_table.remove(&key) {
                    Some(overlay_value) => merge_two(base_value, overlay_value),
                    None => base_value,
                };
                overlay_table.insert(key, merged);
            }

            Value::Table(overlay_table)
        }
        (_, overlay) => overlay,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Value {
        toml::from_str(source).unwrap()
    }

    #[test]
    fn overlay_wins_on_conflicting_scalars() {
        let base = parse("[clock]\ntime_format = \"3:04 PM\"\ntimezone = \"UTC\"");
        let overlay = parse("[clock]\ntimezone = \"Europe/Berlin\"");

        let merged = merge_two(base, overlay);

        assert_eq!(merged["clock"]["timezone"].as_str(), Some("Europe/Berlin"));
        assert_eq!(merged["clock"]["time_format"].as_str(), Some("3:04 PM"));
    }

    #[test]
    fn later_imports_override_earlier_ones_and_main_overrides_all() {
        let first = parse("[clock]\ntimezone = \"UTC\"\ndate_format = \"Jan 2\"");
        let second = parse("[clock]\ntimezone = \"Asia/Tokyo\"");
        let main = parse("[general]\nlog_level = \"debug\"\n[clock]\ndate_format = \"2006-01-02\"");

        let merged = merge_documents(vec![first, second], main);

        assert_eq!(merged["clock"]["timezone"].as_str(), Some("Asia/Tokyo"));
        assert_eq!(merged["clock"]["date_format"].as_str(), Some("2006-01-02"));
        assert_eq!(merged["general"]["log_level"].as_str(), Some("debug"));
    }
}
