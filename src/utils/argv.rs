use once_cell::sync::Lazy;
use regex::Regex;

/// Splits a command line on whitespace, keeping quoted sections together:
/// `relate 1 union "big dog" 'cat'` gives five arguments.
pub fn split_into_argv(line: &str) -> Vec<String> {
    static RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r#""([^"]*)"|'([^']*)'|(\S+)"#).unwrap());
    RE.captures_iter(line)
        .filter_map(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map(|m| m.as_str().to_string())
        })
        .collect()
}
