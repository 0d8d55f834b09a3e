use std::collections::HashMap;

use crate::error::InputError;

/// Metadata keys understood by `add` and `edit`.
pub const TASK_KEYS: [&str; 3] = ["name", "cost", "due"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub name: String,
    pub metadata: HashMap<String, String>,
}

/// Splits `Pay rent cost:1.200,50 due:2024-03-01` into the free-text name
/// and its `key:value` pairs, resolving each key against `keys`. A word whose
/// key matches nothing (`10:30`) stays part of the name.
pub fn parse_args(args: &[String], keys: &[&str]) -> Result<ParsedInput, InputError> {
    let mut name_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        let pair = arg.split_once(':').filter(|(key, _)| !key.is_empty());
        let Some((key, value)) = pair else {
            name_parts.push(arg.as_str());
            continue;
        };
        match expand_key(key, keys) {
            Ok(key) => {
                metadata.insert(key, value.to_string());
            }
            Err(InputError::UnknownKey(_)) => name_parts.push(arg.as_str()),
            Err(e) => return Err(e),
        }
    }

    Ok(ParsedInput {
        name: name_parts.join(" "),
        metadata,
    })
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String, InputError> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(InputError::UnknownKey(key.to_string())),
        _ => Err(InputError::AmbiguousKey {
            key: key.to_string(),
            candidates: matches.iter().map(|m| m.to_string()).collect(),
        }),
    }
}

/// Parses `add`/`edit` arguments. A `name:` pair overrides the free-text
/// words.
pub fn parse_task_args(args: &[String]) -> Result<ParsedInput, InputError> {
    let mut parsed = parse_args(args, &TASK_KEYS)?;
    if let Some(name) = parsed.metadata.remove("name") {
        parsed.name = name;
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_parse_simple() {
        let parsed = parse_args(&args(&["Pay", "rent", "cost:1.200,50", "due:2024-03-01"]), &TASK_KEYS).unwrap();
        assert_eq!(parsed.name, "Pay rent");
        assert_eq!(parsed.metadata.get("cost"), Some(&"1.200,50".to_string()));
        assert_eq!(parsed.metadata.get("due"), Some(&"2024-03-01".to_string()));
    }

    #[test]
    fn test_weekday_counts_survive_the_split() {
        let parsed = parse_args(&args(&["Gym", "due:2:fri"]), &TASK_KEYS).unwrap();
        assert_eq!(parsed.metadata.get("due"), Some(&"2:fri".to_string()));
    }

    #[test]
    fn test_expand_key() {
        assert_eq!(expand_key("c", &TASK_KEYS).unwrap(), "cost");
        assert_eq!(expand_key("d", &TASK_KEYS).unwrap(), "due");
        assert_eq!(expand_key("due", &TASK_KEYS).unwrap(), "due");
        assert_eq!(expand_key("n", &TASK_KEYS).unwrap(), "name");

        assert_eq!(expand_key("x", &TASK_KEYS), Err(InputError::UnknownKey("x".to_string())));

        let candidates = ["due", "project", "priority"];
        assert!(matches!(expand_key("p", &candidates), Err(InputError::AmbiguousKey { .. })));
    }

    #[test]
    fn test_parse_task_args() {
        let parsed = parse_task_args(&args(&["Rent", "c:1.200,50", "d:tomorrow"])).unwrap();
        assert_eq!(parsed.name, "Rent");
        assert_eq!(parsed.metadata.get("cost"), Some(&"1.200,50".to_string()));
        assert_eq!(parsed.metadata.get("due"), Some(&"tomorrow".to_string()));

        let renamed = parse_task_args(&args(&["ignored", "name:Water bill"])).unwrap();
        assert_eq!(renamed.name, "Water bill");

        let candidates = ["due", "description"];
        assert!(matches!(
            parse_args(&args(&["Rent", "d:1"]), &candidates),
            Err(InputError::AmbiguousKey { .. })
        ));
    }

    #[test]
    fn test_unknown_keys_stay_in_name() {
        let parsed = parse_task_args(&args(&["Meeting", "10:30", "due:fri"])).unwrap();
        assert_eq!(parsed.name, "Meeting 10:30");
        assert_eq!(parsed.metadata.len(), 1);
        assert_eq!(parsed.metadata.get("due"), Some(&"fri".to_string()));
    }
}
