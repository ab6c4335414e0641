use postgres::{Row as NativeRow, types::Type};
use strata_core::{Row, Scalar, Value};

pub(crate) fn extract_row(native: &NativeRow) -> Row {
    native
        .columns()
        .iter()
        .enumerate()
        .map(|(index, column)| Value::new(column.name(), extract_scalar(native, index, column.type_())))
        .collect()
}

fn extract_scalar(row: &NativeRow, index: usize, kind: &Type) -> Scalar {
    if *kind == Type::INT2 {
        scalar(row.try_get::<_, Option<i16>>(index), |v| {
            Scalar::Integer(v.into())
        })
    } else if *kind == Type::INT4 {
        scalar(row.try_get::<_, Option<i32>>(index), |v| {
            Scalar::Integer(v.into())
        })
    } else if *kind == Type::INT8 {
        scalar(row.try_get::<_, Option<i64>>(index), Scalar::Integer)
    } else if *kind == Type::FLOAT4 {
        scalar(row.try_get::<_, Option<f32>>(index), |v| {
            Scalar::Float(v.into())
        })
    } else if *kind == Type::FLOAT8 {
        scalar(row.try_get::<_, Option<f64>>(index), Scalar::Float)
    } else if *kind == Type::BOOL {
        scalar(row.try_get::<_, Option<bool>>(index), |v| {
            Scalar::Integer(v.into())
        })
    } else if *kind == Type::BYTEA {
        scalar(row.try_get::<_, Option<Vec<u8>>>(index), |v| {
            Scalar::Blob(v.into_boxed_slice())
        })
    } else {
        // TEXT, VARCHAR, NAME and friends, plus anything else with a
        // textual representation
        match row.try_get::<_, Option<String>>(index) {
            Ok(Some(v)) => Scalar::Text(v),
            Ok(None) => Scalar::Null,
            Err(error) => {
                log::warn!("cannot decode column {} of type {}: {}", index, kind, error);
                Scalar::Null
            }
        }
    }
}

fn scalar<T>(
    value: Result<Option<T>, postgres::Error>,
    wrap: impl FnOnce(T) -> Scalar,
) -> Scalar {
    match value {
        Ok(Some(v)) => wrap(v),
        Ok(None) => Scalar::Null,
        Err(error) => {
            log::warn!("cannot decode column: {}", error);
            Scalar::Null
        }
    }
}
