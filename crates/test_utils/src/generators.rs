//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating extracted field values,
//! including the label text and checkbox glyphs seen on scanned forms.

use domain_claims::{CanonicalField, RawFieldSet};
use proptest::prelude::*;

/// Strategy for generating any canonical field
pub fn canonical_field_strategy() -> impl Strategy<Value = CanonicalField> {
    proptest::sample::select(CanonicalField::ALL.to_vec())
}

/// Strategy for free text resembling OCR output, labels and glyphs included
pub fn form_text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z0-9 @.,:&-]{0,24}",
        "[A-Z ]{1,16}",
        Just("NAME & ADDRESS".to_string()),
        Just("08:36 \u{2713}PM".to_string()),
        Just("STREET".to_string()),
        Just("line one\nline two".to_string()),
    ]
}

/// Strategy for generating raw field sets with arbitrary content
pub fn raw_field_set_strategy() -> impl Strategy<Value = RawFieldSet> {
    proptest::collection::vec(
        (canonical_field_strategy(), proptest::option::of(form_text_strategy())),
        0..20,
    )
    .prop_map(|entries| {
        let mut fields = RawFieldSet::new();
        for (field, value) in entries {
            fields.insert(field, value.unwrap_or_default());
        }
        fields
    })
}

/// Strategy for whole amounts written with thousands separators (e.g. "48,250")
pub fn grouped_amount_strategy() -> impl Strategy<Value = (u64, String)> {
    (0u64..100_000_000u64).prop_map(|value| {
        let plain = value.to_string();
        let mut grouped = String::with_capacity(plain.len() + plain.len() / 3);
        for (i, c) in plain.chars().enumerate() {
            if i > 0 && (plain.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        (value, grouped)
    })
}

/// Strategy for clock times without any AM/PM marking
pub fn clock_time_strategy() -> impl Strategy<Value = String> {
    (1u32..13u32, 0u32..60u32).prop_map(|(h, m)| format!("{:02}:{:02}", h, m))
}
