/// Builds a dynamic [`Value`](crate::Value) with JSON-like syntax.
///
/// Objects become [`Map`](crate::Map) values, which encode as object literals
/// (or as the document body when used as the root). Any other expression is
/// converted through [`to_value`](crate::to_value); an expression that cannot
/// be converted becomes `Value::Null`.
///
/// ```rust
/// use serde_hcl_encoder::{hcl_value, to_string};
///
/// let doc = hcl_value!({
///     "region": "eu-west-1",
///     "zones": ["a", "b"]
/// });
/// assert_eq!(to_string(&doc).unwrap(), "region = \"eu-west-1\"\nzones  = [\"a\", \"b\"]\n");
/// ```
#[macro_export]
macro_rules! hcl_value {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Seq(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Seq(vec![$($crate::hcl_value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Map($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::Map::new();
        $(
            map.insert($key.to_string(), $crate::hcl_value!($value));
        )*
        $crate::Value::Map(map)
    }};

    ($other:expr) => {{
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    }};
}
