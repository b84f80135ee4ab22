/// Minimal `k=v&k=v` query-string handling for the wizard's navigation
/// contract (`from`/`to` prefill overrides).

pub fn parse(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

pub fn get<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let pairs = parse("from=piazza&to=bole");
        assert_eq!(get(&pairs, "from"), Some("piazza"));
        assert_eq!(get(&pairs, "to"), Some("bole"));
        assert_eq!(get(&pairs, "date"), None);
    }

    #[test]
    fn test_empty_values_ignored() {
        let pairs = parse("from=&to=bole");
        assert_eq!(get(&pairs, "from"), None);
        assert_eq!(get(&pairs, "to"), Some("bole"));
        assert!(parse("").is_empty());
    }
}
