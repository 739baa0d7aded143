use std::collections::BTreeMap;

use prost_types::value::Kind;
use prost_types::{ListValue, NullValue, Struct, Value};
use serde_json::{Map, Number};

use crate::error::AppError;

/// Convert an open JSON object into a `google.protobuf.Struct` for partial updates.
///
/// Every JSON number becomes a double, as protobuf's `Value` has no integer kind.
pub fn json_to_struct(map: Map<String, serde_json::Value>) -> Result<Struct, AppError> {
    let fields = map
        .into_iter()
        .map(|(key, value)| json_to_value(value).map(|v| (key, v)))
        .collect::<Result<BTreeMap<_, _>, _>>()?;
    Ok(Struct { fields })
}

fn json_to_value(value: serde_json::Value) -> Result<Value, AppError> {
    let kind = match value {
        serde_json::Value::Null => Kind::NullValue(NullValue::NullValue as i32),
        serde_json::Value::Bool(b) => Kind::BoolValue(b),
        serde_json::Value::Number(n) => Kind::NumberValue(number_to_f64(&n)?),
        serde_json::Value::String(s) => Kind::StringValue(s),
        serde_json::Value::Array(items) => Kind::ListValue(ListValue {
            values: items
                .into_iter()
                .map(json_to_value)
                .collect::<Result<_, _>>()?,
        }),
        serde_json::Value::Object(map) => Kind::StructValue(json_to_struct(map)?),
    };
    Ok(Value { kind: Some(kind) })
}

fn number_to_f64(n: &Number) -> Result<f64, AppError> {
    n.as_f64()
        .filter(|f| f.is_finite())
        .ok_or_else(|| AppError::Validation(format!("number {n} cannot be represented")))
}
