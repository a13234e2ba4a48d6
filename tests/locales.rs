use std::collections::BTreeSet;
use std::fs;

use serde_yaml::Value;

fn flatten(prefix: &str, value: &Value, out: &mut BTreeSet<String>) {
    match value {
        Value::Mapping(map) => {
            for (key, child) in map {
                let key = key.as_str().expect("locale keys are strings");
                let path = if prefix.is_empty() {
                    key.to_string()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out);
            }
        }
        _ => {
            out.insert(prefix.to_string());
        }
    }
}

fn keys(locale: &str) -> BTreeSet<String> {
    let path = format!("{}/locales/{locale}.yml", env!("CARGO_MANIFEST_DIR"));
    let text = fs::read_to_string(&path).unwrap_or_else(|e| panic!("{path}: {e}"));
    let value: Value = serde_yaml::from_str(&text).unwrap_or_else(|e| panic!("{path}: {e}"));
    let mut out = BTreeSet::new();
    flatten("", &value, &mut out);
    out
}

#[test]
fn every_locale_has_the_same_keys() {
    let en = keys("en");
    assert!(!en.is_empty());
    for locale in slovarik::config::LANGUAGES {
        let other = keys(locale);
        let missing: Vec<_> = en.difference(&other).collect();
        let extra: Vec<_> = other.difference(&en).collect();
        assert!(
            missing.is_empty() && extra.is_empty(),
            "{locale}: missing {missing:?}, extra {extra:?}"
        );
    }
}

#[test]
fn interpolated_keys_keep_their_placeholders() {
    let read = |locale: &str| {
        let path = format!("{}/locales/{locale}.yml", env!("CARGO_MANIFEST_DIR"));
        serde_yaml::from_str::<Value>(&fs::read_to_string(path).unwrap()).unwrap()
    };
    let en = read("en");
    let ru = read("ru");
    for (section, key, placeholder) in [
        ("drill", "translate", "%{term}"),
        ("drill", "wrong", "%{answer}"),
        ("drill", "skipped", "%{answer}"),
        ("notice", "not_found", "%{path}"),
        ("notice", "empty", "%{path}"),
    ] {
        for (name, doc) in [("en", &en), ("ru", &ru)] {
            let text = doc[section][key].as_str().unwrap_or_default();
            assert!(
                text.contains(placeholder),
                "{name}: {section}.{key} lacks {placeholder}"
            );
        }
    }
}
