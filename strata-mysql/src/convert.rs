use mysql::Value as NativeValue;
use strata_core::{Row, Scalar, Value};

pub(crate) fn to_native(value: &Value) -> NativeValue {
    match value.scalar() {
        Scalar::Invalid | Scalar::Null => NativeValue::NULL,
        Scalar::Integer(v) => NativeValue::Int(*v),
        Scalar::Float(v) => NativeValue::Double(*v),
        Scalar::Text(v) => NativeValue::Bytes(v.clone().into_bytes()),
        Scalar::Blob(v) => NativeValue::Bytes(v.to_vec()),
    }
}

const BINARY_CHARSET: u16 = 63;

pub(crate) fn to_row(native: mysql::Row) -> Row {
    let columns: Vec<(String, bool)> = native
        .columns_ref()
        .iter()
        .map(|column| {
            (
                column.name_str().into_owned(),
                column.character_set() == BINARY_CHARSET,
            )
        })
        .collect();
    native
        .unwrap()
        .into_iter()
        .zip(columns)
        .map(|(value, (name, binary))| Value::new(name, from_native(value, binary)))
        .collect()
}

fn from_native(value: NativeValue, binary: bool) -> Scalar {
    match value {
        NativeValue::NULL => Scalar::Null,
        NativeValue::Int(v) => Scalar::Integer(v),
        NativeValue::UInt(v) => Scalar::Integer(v as i64),
        NativeValue::Float(v) => Scalar::Float(v as f64),
        NativeValue::Double(v) => Scalar::Float(v),
        NativeValue::Bytes(v) if binary => Scalar::Blob(v.into_boxed_slice()),
        NativeValue::Bytes(v) => Scalar::Text(String::from_utf8_lossy(&v).into_owned()),
        NativeValue::Date(year, month, day, hour, minute, second, micros) => Scalar::Text(format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:06}",
            year, month, day, hour, minute, second, micros
        )),
        NativeValue::Time(negative, days, hours, minutes, seconds, micros) => Scalar::Text(format!(
            "{}{:02}:{:02}:{:02}.{:06}",
            if negative { "-" } else { "" },
            u32::from(hours) + days * 24,
            minutes,
            seconds,
            micros
        )),
    }
}
