use regex::Regex;

use crate::request::normalize_path;

/// Compiled path template.
///
/// Templates without `{placeholder}` segments are normalized like request
/// paths and compared literally; the
/// rest compile to an anchored regex with one capture group per placeholder.
#[derive(Debug, Clone)]
pub enum RoutePattern {
    Literal(String),
    Template { regex: Regex, params: Vec<String> },
}

impl RoutePattern {
    /// Compile a template such as `/users/{id}/posts`.
    ///
    /// # Errors
    ///
    /// Fails when the generated expression does not compile.
    pub fn compile(template: &str) -> Result<Self, regex::Error> {
        if !template.contains('{') {
            return Ok(RoutePattern::Literal(normalize_path(template)));
        }

        let mut pattern = String::with_capacity(template.len() + 8);
        pattern.push('^');
        let mut params = Vec::with_capacity(template.matches('{').count());

        for segment in template.split('/') {
            if segment.starts_with('{') && segment.ends_with('}') && segment.len() > 2 {
                pattern.push_str("/([^/]+)");
                params.push(segment[1..segment.len() - 1].to_string());
            } else if !segment.is_empty() {
                pattern.push('/');
                pattern.push_str(&regex::escape(segment));
            }
        }
        if pattern.len() == 1 {
            pattern.push('/');
        }
        pattern.push('$');

        Ok(RoutePattern::Template {
            regex: Regex::new(&pattern)?,
            params,
        })
    }

    /// Placeholder values in template order, or `None` when `path` does not match.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<Vec<String>> {
        match self {
            RoutePattern::Literal(literal) => (literal == path).then(Vec::new),
            RoutePattern::Template { regex, params } => {
                let caps = regex.captures(path)?;
                Some(
                    (1..=params.len())
                        .filter_map(|i| caps.get(i))
                        .map(|m| m.as_str().to_string())
                        .collect(),
                )
            }
        }
    }

    /// Placeholder names in template order.
    #[must_use]
    pub fn param_names(&self) -> &[String] {
        match self {
            RoutePattern::Literal(_) => &[],
            RoutePattern::Template { params, .. } => params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        let p = RoutePattern::compile("/").unwrap();
        assert_eq!(p.captures("/"), Some(vec![]));
        assert!(p.param_names().is_empty());
    }

    #[test]
    fn test_literal_template_is_normalized() {
        for template in ["users", "/users/", "/users"] {
            let p = RoutePattern::compile(template).unwrap();
            assert_eq!(p.captures("/users"), Some(vec![]), "{template}");
        }
    }

    #[test]
    fn test_parameterized_path() {
        let p = RoutePattern::compile("/items/{id}").unwrap();
        assert_eq!(p.captures("/items/123"), Some(vec!["123".to_string()]));
        assert_eq!(p.param_names(), ["id"]);
        assert_eq!(p.captures("/items"), None);
        assert_eq!(p.captures("/items/1/2"), None);
    }

    #[test]
    fn test_nested_path_keeps_template_order() {
        let p = RoutePattern::compile("/users/{user}/posts/{post}").unwrap();
        assert_eq!(
            p.captures("/users/7/posts/abc"),
            Some(vec!["7".to_string(), "abc".to_string()])
        );
    }

    #[test]
    fn test_literal_segments_are_escaped() {
        let p = RoutePattern::compile("/v1.0/{id}").unwrap();
        assert!(p.captures("/v1.0/5").is_some());
        assert!(p.captures("/v1x0/5").is_none());
    }
}
