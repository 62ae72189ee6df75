use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{\s*([A-Za-z0-9_$][A-Za-z0-9_$.-]*)\s*\}\}").unwrap())
}

/// Replace every `{{a.b.c}}` occurrence in `template` with the value found
/// at that dotted path in `scope`. Lookups that miss substitute the empty
/// string; this is the documented behavior, not an error.
pub fn interpolate(template: &str, scope: &Value) -> String {
    token_re()
        .replace_all(template, |caps: &regex::Captures| {
            lookup(scope, &caps[1]).map(render_value).unwrap_or_default()
        })
        .into_owned()
}

/// Whether `template` still contains any `{{token}}` occurrence.
pub fn has_tokens(template: &str) -> bool {
    token_re().is_match(template)
}

fn lookup<'a>(scope: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(scope, |value, key| value.get(key))
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_interpolate_simple() {
        let scope = json!({"name": "my-app"});
        assert_eq!(interpolate("hello {{name}}", &scope), "hello my-app");
    }

    #[test]
    fn test_interpolate_dotted_path() {
        let scope = json!({"project": {"server": {"port": 8080}}});
        assert_eq!(
            interpolate("listen on {{project.server.port}}", &scope),
            "listen on 8080"
        );
    }

    #[test]
    fn test_interpolate_missing_is_empty() {
        let scope = json!({"a": 1});
        assert_eq!(interpolate("[{{missing.path}}]", &scope), "[]");
    }

    #[test]
    fn test_interpolate_multiple_tokens() {
        let scope = json!({"name": "app", "version": "1.0.0"});
        assert_eq!(
            interpolate("{{name}}@{{version}}", &scope),
            "app@1.0.0"
        );
    }

    #[test]
    fn test_interpolate_leaves_plain_text() {
        let scope = json!({});
        assert_eq!(interpolate("no tokens here", &scope), "no tokens here");
    }

    #[test]
    fn test_has_tokens() {
        assert!(has_tokens("{{x}}"));
        assert!(!has_tokens("1.0.0"));
    }
}
