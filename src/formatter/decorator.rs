use serde_json::{Map, Value};

/// Explicit field access for objects rendered through a decorator.
pub trait Decorable {
    fn class_name(&self) -> &str;

    /// Fields to expose, in output order.
    fn properties(&self) -> Map<String, Value>;
}

/// Wraps a [`Decorable`] and renders it as a JSON object tagged with `_class`.
#[derive(Debug)]
pub struct JsonDecorator<'a, T: ?Sized> {
    inner: &'a T,
}

impl<'a, T: Decorable + ?Sized> JsonDecorator<'a, T> {
    #[must_use]
    pub fn new(inner: &'a T) -> Self {
        Self { inner }
    }

    #[must_use]
    pub fn inner(&self) -> &T {
        self.inner
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert(
            "_class".to_string(),
            Value::String(self.inner.class_name().to_string()),
        );
        object.extend(self.inner.properties());
        Value::Object(object)
    }
}

impl<T: Decorable + ?Sized> From<JsonDecorator<'_, T>> for Value {
    fn from(decorator: JsonDecorator<'_, T>) -> Self {
        decorator.to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct User {
        id: u32,
        name: String,
        password_hash: String,
    }

    impl Decorable for User {
        fn class_name(&self) -> &str {
            "User"
        }

        fn properties(&self) -> Map<String, Value> {
            let mut m = Map::new();
            m.insert("id".into(), json!(self.id));
            m.insert("name".into(), json!(self.name));
            m
        }
    }

    #[test]
    fn test_only_declared_properties_rendered() {
        let user = User {
            id: 7,
            name: "ada".into(),
            password_hash: "x".into(),
        };
        assert_eq!(user.password_hash, "x");
        let value: Value = JsonDecorator::new(&user).into();
        assert_eq!(value, json!({ "_class": "User", "id": 7, "name": "ada" }));
    }
}
