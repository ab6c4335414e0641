#[cfg(test)]
mod tests {
    use strata_core::{IntWidth, Row, Scalar, Value, int_width, values};

    #[test]
    fn value_null() {
        let value = Value::null("col");
        assert!(value.is_null());
        assert!(value.is_valid());
        assert_eq!(value.as_int(), None);
        assert_eq!(value.to_string(), "NULL");
    }

    #[test]
    fn value_integer() {
        let value = Value::new("qty", 42i32);
        assert_eq!(value.as_int(), Some(42));
        assert_eq!(value.as_float(), Some(42.0));
        assert_eq!(value.as_str(), None);
        assert_eq!(value.to_string(), "42");
        assert_eq!(value, Value::new("qty", 42i64));
        assert_ne!(value, Value::new("other", 42i64));
        assert_ne!(value, Value::new("qty", 43i64));
    }

    #[test]
    fn value_float() {
        let value = Value::new("weight", 5.64f32);
        assert_eq!(value.as_int(), Some(5));
        assert!((value.as_float().unwrap() - 5.64).abs() < 1e-6);
        // floats compare within epsilon, not bitwise
        assert_eq!(Scalar::from(0.1 + 0.2), Scalar::from(0.3));
        assert_ne!(Scalar::from(0.3), Scalar::from(0.31));
    }

    #[test]
    fn numeric_kinds_do_not_cross_compare() {
        assert_ne!(Scalar::Integer(1), Scalar::Float(1.0));
        assert_eq!(Scalar::Integer(1).as_float(), Scalar::Float(1.0).as_float());
    }

    #[test]
    fn value_text() {
        let value = Value::new("name", "O'Brien");
        assert_eq!(value.as_str(), Some("O'Brien"));
        assert_eq!(value.as_int(), None);
        assert_eq!(value.to_string(), "O'Brien");
        assert_eq!(value, Value::new("name", String::from("O'Brien")));
    }

    #[test]
    fn value_blob() {
        let value = Value::new("payload", vec![0x00u8, 0x92, 0xff]);
        assert_eq!(value.as_bytes(), Some(&[0x00u8, 0x92, 0xff][..]));
        assert_eq!(value.to_string(), "\\x0092ff");
        assert_eq!(value, Value::new("payload", &[0x00u8, 0x92, 0xff][..]));
    }

    #[test]
    fn value_option() {
        assert_eq!(Scalar::from(None::<i64>), Scalar::Null);
        assert_eq!(Scalar::from(Some(7i64)), Scalar::Integer(7));
    }

    #[test]
    fn invalid_sentinel() {
        let invalid = Value::invalid();
        assert!(!invalid.is_valid());
        assert!(!invalid.is_null());
        assert_eq!(invalid.to_string(), "INVALID");
        assert_eq!(Scalar::default(), Scalar::Invalid);
    }

    #[test]
    fn row_lookup() {
        let row: Row = [
            Value::new("name", "bolt"),
            Value::new("qty", 3i64),
            Value::new("qty", 4i64),
        ]
        .into_iter()
        .collect();
        assert_eq!(row.len(), 3);
        assert_eq!(row[0], row["name"]);
        assert_eq!(row[1], row["qty"]); // first match wins
        assert_eq!(row["qty"].as_int(), Some(3));
        assert!(!row[9].is_valid());
        assert!(!row["missing"].is_valid());
    }

    #[test]
    fn row_equality() {
        let left: Row = [Value::new("a", 1i64)].into_iter().collect();
        let right: Row = [Value::new("a", 1i64)].into_iter().collect();
        let longer: Row = [Value::new("a", 1i64), Value::new("b", 2i64)]
            .into_iter()
            .collect();
        assert_eq!(left, right);
        assert_ne!(left, longer);
    }

    #[test]
    fn int_width_tiers() {
        assert_eq!(int_width(0), IntWidth::I8);
        assert_eq!(int_width(i64::from(i8::MAX)), IntWidth::I8);
        assert_eq!(int_width(i64::from(i8::MIN)), IntWidth::I8);
        assert_eq!(int_width(i64::from(i8::MAX) + 1), IntWidth::I16);
        assert_eq!(int_width(i64::from(i16::MIN)), IntWidth::I16);
        assert_eq!(int_width(i64::from(i16::MAX) + 1), IntWidth::I32);
        assert_eq!(int_width(i64::from(i32::MIN)), IntWidth::I32);
        assert_eq!(int_width(i64::from(i32::MAX) + 1), IntWidth::I64);
        assert_eq!(int_width(i64::MIN), IntWidth::I64);
    }

    #[test]
    fn values_macro_normalizes_widths() {
        let bound = values!("aaaa", 5i32, 5.64f32, vec![0x92u8; 10], None::<i64>);
        assert_eq!(bound[0], Scalar::Text("aaaa".into()));
        assert_eq!(bound[1], Scalar::Integer(5));
        assert!(matches!(bound[2], Scalar::Float(_)));
        assert!(matches!(bound[3], Scalar::Blob(ref b) if b.len() == 10));
        assert_eq!(bound[4], Scalar::Null);
    }
}
