//! Property-based tests for field_logger using proptest

use proptest::collection::{hash_map, vec};
use proptest::prelude::*;
use field_logger::prelude::*;
use std::collections::HashMap;

fn level_strategy() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::ALL.to_vec())
}

fn fields_strategy() -> impl Strategy<Value = HashMap<String, i64>> {
    hash_map("[a-z]{1,6}", any::<i64>(), 0..8)
}

fn to_fields(map: &HashMap<String, i64>) -> Fields {
    fields_from(map.iter().map(|(k, v)| (k.clone(), *v)))
}

fn quiet_logger() -> FieldLogger {
    FieldLogger::builder()
        .appender(MemoryAppender::new())
        .build()
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    #[test]
    fn test_log_level_str_roundtrip(level in level_strategy(), lower in any::<bool>()) {
        let text = if lower { level.to_str().to_lowercase() } else { level.to_string() };
        prop_assert_eq!(text.parse::<LogLevel>(), Ok(level));
    }

    #[test]
    fn test_log_level_ordering_matches_discriminant(a in level_strategy(), b in level_strategy()) {
        prop_assert_eq!(a.cmp(&b), (a as u8).cmp(&(b as u8)));
    }
}

// ============================================================================
// Field Store Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Mutating either side after a clone never shows through the other
    #[test]
    fn test_clone_isolation(
        initial in fields_strategy(),
        parent_extra in fields_strategy(),
        child_extra in fields_strategy(),
    ) {
        let parent = quiet_logger();
        parent.add_fields(to_fields(&initial));
        let child = parent.clone();

        parent.add_fields(to_fields(&parent_extra));
        child.add_fields(to_fields(&child_extra));

        let mut expected_parent = to_fields(&initial);
        expected_parent.extend(to_fields(&parent_extra));
        let mut expected_child = to_fields(&initial);
        expected_child.extend(to_fields(&child_extra));

        prop_assert_eq!(parent.fields(), expected_parent);
        prop_assert_eq!(child.fields(), expected_child);
    }

    /// Sequential writes to the same key keep the last value
    #[test]
    fn test_last_write_wins(key in "[a-z]{1,6}", values in vec(any::<i64>(), 1..16)) {
        let logger = quiet_logger();
        for value in &values {
            logger.add_field(key.clone(), *value);
        }
        let fields = logger.fields();
        prop_assert_eq!(fields.get(&key).cloned(), values.last().map(|v| FieldValue::Int(*v)));
        prop_assert_eq!(fields.len(), 1);
    }

    /// Removing a key twice is the same as removing it once
    #[test]
    fn test_remove_is_idempotent(initial in fields_strategy(), victims in vec("[a-z]{1,6}", 0..6)) {
        let once = quiet_logger();
        let twice = quiet_logger();
        once.add_fields(to_fields(&initial));
        twice.add_fields(to_fields(&initial));

        let keys: Vec<&str> = victims.iter().map(String::as_str).collect();
        once.remove_fields_by_key(&keys);
        twice.remove_fields_by_key(&keys);
        twice.remove_fields_by_key(&keys);

        let remaining = once.fields();
        prop_assert_eq!(&remaining, &twice.fields());
        for key in &keys {
            prop_assert!(!remaining.contains_key(*key));
        }
    }

    /// Every emitted record is fields overlaid with defaults
    #[test]
    fn test_record_is_fields_then_defaults(fields in fields_strategy(), defaults in fields_strategy()) {
        let memory = MemoryAppender::new();
        let logger = FieldLogger::builder().appender(memory.clone()).build();
        logger.add_fields(to_fields(&fields));
        logger.set_defaults(to_fields(&defaults));

        logger.info("probe");

        let mut expected = to_fields(&fields);
        expected.extend(to_fields(&defaults));
        let records = memory.records();
        prop_assert_eq!(&records[0].data, &expected);
    }
}
