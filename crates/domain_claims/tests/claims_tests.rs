//! Comprehensive tests for domain_claims

use rust_decimal_macros::dec;

use core_kernel::{Currency, Money};

use domain_claims::fields::{BusinessField, CanonicalField, RawFieldSet};
use domain_claims::normalizer::{self, normalize};
use domain_claims::report::ClaimReport;
use domain_claims::routing::{Route, RoutingDecision, RoutingPolicy};
use domain_claims::screening::{assess_risk, missing_mandatory, DEFAULT_RISK_KEYWORDS};
use domain_claims::triage::ClaimTriage;
use domain_claims::ClaimError;

use test_utils::{
    assert_missing_fields, assert_reason_mentions, assert_route, ClaimFormFixtures,
    MoneyFixtures, RawFieldSetBuilder, StringFixtures,
};

// ============================================================================
// Normalizer Tests
// ============================================================================

mod normalizer_tests {
    use super::*;

    #[test]
    fn test_policy_number_requires_a_digit() {
        assert_eq!(normalizer::policy_number(Some(" POL-123 ")), Some("POL-123".to_string()));
        assert_eq!(normalizer::policy_number(Some("POLICY NUMBER")), None);
    }

    #[test]
    fn test_policyholder_name_rejects_all_caps() {
        assert_eq!(normalizer::policyholder_name(Some("JOHN SMITH")), None);
        assert_eq!(
            normalizer::policyholder_name(Some("John Smith")),
            Some("John Smith".to_string())
        );
    }

    #[test]
    fn test_policyholder_name_rejects_short_values() {
        assert_eq!(normalizer::policyholder_name(Some("Jo")), None);
        assert_eq!(normalizer::policyholder_name(Some("  Al ")), None);
    }

    #[test]
    fn test_carrier_rejects_label_in_any_case() {
        assert_eq!(normalizer::carrier(Some("Carrier")), None);
        assert_eq!(normalizer::carrier(Some("INSURANCE CARRIER NAME")), None);
        assert_eq!(
            normalizer::carrier(Some(" Acme Mutual ")),
            Some("Acme Mutual".to_string())
        );
    }

    #[test]
    fn test_email_requires_at_sign() {
        assert_eq!(normalizer::email(Some("EMAIL ADDRESS")), None);
        assert_eq!(normalizer::email(Some("a@b.example")), Some("a@b.example".to_string()));
    }

    #[test]
    fn test_date_of_loss_rejects_time_and_label_text() {
        assert_eq!(normalizer::date_of_loss(Some("03/14/2024")), Some("03/14/2024".to_string()));
        assert_eq!(normalizer::date_of_loss(Some("03/14/2024 8:30 AM")), None);
        assert_eq!(normalizer::date_of_loss(Some("Date: 03/14/2024")), None);
        assert_eq!(normalizer::date_of_loss(Some("March")), None);
    }

    #[test]
    fn test_time_with_checked_pm() {
        assert_eq!(
            normalizer::time_of_loss(Some("08:36 \u{2713}PM")),
            Some("08:36 PM".to_string())
        );
        assert_eq!(
            normalizer::time_of_loss(Some("08:36 AM \u{2714} PM")),
            Some("08:36 PM".to_string())
        );
        assert_eq!(normalizer::time_of_loss(Some("08:36 XPM")), Some("08:36 PM".to_string()));
    }

    #[test]
    fn test_time_without_mark_defaults_to_am() {
        assert_eq!(normalizer::time_of_loss(Some("08:36")), Some("08:36 AM".to_string()));
        assert_eq!(normalizer::time_of_loss(Some("08:36 PM")), Some("08:36 AM".to_string()));
    }

    #[test]
    fn test_time_strips_everything_but_digits_and_colons() {
        assert_eq!(normalizer::time_of_loss(Some("at 8.36 hrs")), Some("836 AM".to_string()));
        assert_eq!(normalizer::time_of_loss(Some("AM PM")), None);
    }

    #[test]
    fn test_location_joins_street_and_city() {
        assert_eq!(
            normalizer::location(Some("Main St"), Some("Springfield, IL 62704")),
            Some("Main St, Springfield, IL 62704".to_string())
        );
    }

    #[test]
    fn test_location_rejects_street_placeholder() {
        assert_eq!(
            normalizer::location(Some("123 Street Rd"), Some("Springfield, IL 62704")),
            None
        );
    }

    #[test]
    fn test_location_needs_both_lines() {
        assert_eq!(normalizer::location(Some("Main St"), None), None);
        assert_eq!(normalizer::location(None, Some("Springfield, IL 62704")), None);
    }

    #[test]
    fn test_estimate_amount_requires_digit() {
        assert_eq!(normalizer::estimate_amount(Some("10,000")), Some("10,000".to_string()));
        assert_eq!(normalizer::estimate_amount(Some("ESTIMATE")), None);
    }

    #[test]
    fn test_make_plate_agency_and_contact() {
        assert_eq!(normalizer::vehicle_make(Some("MAKE")), None);
        assert_eq!(normalizer::vehicle_make(Some("Toyota")), Some("Toyota".to_string()));
        assert_eq!(normalizer::plate_number(Some("PLATE")), None);
        assert_eq!(normalizer::plate_number(Some("KA 01 AB 1234")), Some("KA 01 AB 1234".to_string()));
        assert_eq!(normalizer::agency(Some("AGENCY")), None);
        assert_eq!(normalizer::agency(Some("AB")), None);
        assert_eq!(normalizer::agency(Some("Lakeside Brokers")), Some("Lakeside Brokers".to_string()));
        assert_eq!(normalizer::contact_name(Some("PRIYA RAMAN")), None);
        assert_eq!(normalizer::contact_name(Some("Contact person")), None);
        assert_eq!(normalizer::contact_name(Some("Priya Raman")), Some("Priya Raman".to_string()));
    }

    #[test]
    fn test_injured_keeps_first_line_only() {
        assert_eq!(
            normalizer::injured(Some(StringFixtures::injured_with_phone())),
            Some("John Smith".to_string())
        );
    }

    #[test]
    fn test_injured_rejects_label_text() {
        assert_eq!(normalizer::injured(Some("NAME & ADDRESS\nPHONE")), None);
        assert_eq!(normalizer::injured(Some("Injured: none")), None);
        assert_eq!(normalizer::injured(Some("Phone 555-1234")), None);
        assert_eq!(normalizer::injured(Some("Al")), None);
    }

    #[test]
    fn test_absent_input_normalizes_to_absent() {
        let fields = normalize(&RawFieldSet::new());

        for field in BusinessField::ALL {
            assert!(fields.get(field).is_none(), "{} should be absent", field);
        }
    }

    #[test]
    fn test_template_form_normalizes_to_nothing() {
        let fields = normalize(&ClaimFormFixtures::template_form());

        for field in BusinessField::ALL {
            assert!(!fields.is_present(field), "{} should be absent", field);
        }
    }

    #[test]
    fn test_complete_claim_normalizes_every_field_but_injured() {
        let fields = normalize(&ClaimFormFixtures::complete_claim());

        for field in BusinessField::ALL {
            let expected = field != BusinessField::Injured;
            assert_eq!(fields.is_present(field), expected, "{}", field);
        }
        assert_eq!(
            fields.location.as_deref(),
            Some("Main St, Springfield, IL 62704")
        );
        assert_eq!(fields.time.as_deref(), Some("08:36 AM"));
    }
}

// ============================================================================
// Screening Tests
// ============================================================================

mod screening_tests {
    use super::*;

    #[test]
    fn test_missing_preserves_mandatory_order() {
        let raw = RawFieldSetBuilder::new()
            .without(CanonicalField::EstimateAmount)
            .without(CanonicalField::PolicyNumber)
            .build();

        let missing = missing_mandatory(&normalize(&raw));
        assert_eq!(
            missing,
            vec![BusinessField::PolicyNumber, BusinessField::EstimateAmount]
        );
    }

    #[test]
    fn test_rejected_value_counts_as_missing() {
        let raw = RawFieldSetBuilder::new()
            .with_field(CanonicalField::InsuredName, "NAME OF INSURED")
            .build();

        let missing = missing_mandatory(&normalize(&raw));
        assert_eq!(missing, vec![BusinessField::PolicyholderName]);
    }

    #[test]
    fn test_risk_keywords_found_in_either_narrative_in_list_order() {
        let raw = RawFieldSetBuilder::new()
            .with_accident_description("Collision looked STAGED")
            .with_damage_description("Damage inconsistent with account")
            .build();

        let risk = assess_risk(&raw, &DEFAULT_RISK_KEYWORDS);
        assert!(risk.is_flagged());
        assert_eq!(risk.keywords, vec!["inconsistent", "staged"]);
    }

    #[test]
    fn test_risk_keyword_matches_as_substring() {
        let raw = RawFieldSetBuilder::new()
            .with_accident_description("Suspected fraudulent claim")
            .build();

        assert_eq!(assess_risk(&raw, &DEFAULT_RISK_KEYWORDS).keywords, vec!["fraud"]);
    }
}

// ============================================================================
// Routing Tests
// ============================================================================

mod routing_tests {
    use super::*;

    fn triage(raw: &RawFieldSet) -> ClaimReport {
        ClaimTriage::default().triage(raw).expect("triage should succeed")
    }

    #[test]
    fn test_small_estimate_is_fast_tracked() {
        let report = triage(&RawFieldSetBuilder::new().with_estimate("10,000").build());

        assert_route(&report, Route::FastTrack);
        assert_eq!(
            report.reasoning,
            "Estimate Amount- Rs.10,000, is less than Rs.25,000."
        );
    }

    #[test]
    fn test_estimates_just_under_threshold_are_fast_tracked() {
        for estimate in ["24,999.99", "24,999.99999", "24,999.999999999"] {
            let report = triage(&RawFieldSetBuilder::new().with_estimate(estimate).build());

            assert_route(&report, Route::FastTrack);
            assert_reason_mentions(&report, estimate);
        }
    }

    #[test]
    fn test_estimate_at_threshold_is_not_fast_tracked() {
        for estimate in ["25,000", "25,000.00", "25000.0000001"] {
            let report = triage(&RawFieldSetBuilder::new().with_estimate(estimate).build());

            assert_ne!(report.recommended_route, Route::FastTrack, "estimate {}", estimate);
            assert_route(&report, Route::Unrouted);
        }
    }

    #[test]
    fn test_oversized_estimate_is_above_threshold() {
        let raw = RawFieldSetBuilder::new()
            .with_estimate("100,000,000,000,000,000,000,000,000,000")
            .build();
        let report = triage(&raw);

        assert_route(&report, Route::Unrouted);
    }

    #[test]
    fn test_oversized_estimate_still_reaches_later_rules() {
        let raw = RawFieldSetBuilder::new()
            .with_estimate("999999999999999999999999999999999999999")
            .with_accident_description("damage looks staged")
            .build();
        let report = triage(&raw);

        assert_route(&report, Route::InvestigationFlag);
        assert_eq!(report.reasoning, "Risk keywords found- staged");
    }

    #[test]
    fn test_fast_track_wins_over_risk_and_injury() {
        let raw = RawFieldSetBuilder::new()
            .with_estimate("10,000")
            .with_accident_description("staged collision, fraud suspected")
            .with_injured("Jane Doe")
            .build();

        assert_route(&triage(&raw), Route::FastTrack);
    }

    #[test]
    fn test_missing_carrier_goes_to_manual_review() {
        let raw = RawFieldSetBuilder::new()
            .without(CanonicalField::CarrierName)
            .build();
        let report = triage(&raw);

        assert_route(&report, Route::ManualReview);
        assert_eq!(report.reasoning, "Missing fields: Carrier");
        assert_missing_fields(&report, &["Carrier"]);
    }

    #[test]
    fn test_manual_review_wins_over_everything() {
        let raw = RawFieldSetBuilder::new()
            .without(CanonicalField::PolicyNumber)
            .with_estimate("90,000")
            .with_accident_description("fraud")
            .build();

        assert_route(&triage(&raw), Route::ManualReview);
    }

    #[test]
    fn test_fraud_keyword_flags_investigation() {
        let raw = RawFieldSetBuilder::new()
            .with_estimate("50,000")
            .with_accident_description("possible fraud indicators")
            .build();
        let report = triage(&raw);

        assert_route(&report, Route::InvestigationFlag);
        assert_reason_mentions(&report, "fraud");
    }

    #[test]
    fn test_injured_party_goes_to_specialist_queue() {
        let raw = RawFieldSetBuilder::new()
            .with_estimate("60,000")
            .with_injured(StringFixtures::injured_with_phone())
            .build();
        let report = triage(&raw);

        assert_eq!(report.extracted_fields.incident.injured.as_deref(), Some("John Smith"));
        assert_route(&report, Route::SpecialistQueue);
        assert_eq!(
            report.reasoning,
            "Injured person name-John Smith. So claim type is 'Injury'"
        );
    }

    #[test]
    fn test_no_matching_rule_is_unrouted() {
        let report = triage(&ClaimFormFixtures::high_value_claim());

        assert_eq!(report.decision(), RoutingDecision::unrouted());
    }

    #[test]
    fn test_non_numeric_estimate_is_a_hard_error() {
        let raw = RawFieldSetBuilder::new().with_estimate("Rs. 12,000").build();
        let result = ClaimTriage::default().triage(&raw);

        assert!(matches!(
            result,
            Err(ClaimError::EstimateNotNumeric { ref value, .. }) if value == "Rs. 12,000"
        ));
    }

    #[test]
    fn test_non_numeric_estimate_fails_even_with_missing_fields() {
        let raw = RawFieldSetBuilder::new()
            .without(CanonicalField::CarrierName)
            .with_estimate("approx 40000")
            .build();

        assert!(ClaimTriage::default().triage(&raw).is_err());
    }

    #[test]
    fn test_custom_threshold_changes_fast_track_boundary() {
        let triage = ClaimTriage::new(RoutingPolicy::with_threshold(MoneyFixtures::usd_threshold()))
            .unwrap();
        let report = triage
            .triage(&RawFieldSetBuilder::new().with_estimate("6,000").build())
            .unwrap();

        assert_route(&report, Route::Unrouted);
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let policy = RoutingPolicy {
            fast_track_threshold: MoneyFixtures::inr_threshold(),
            risk_keywords: vec!["fraud".to_string(), "  ".to_string()],
        };

        assert!(matches!(ClaimTriage::new(policy), Err(ClaimError::InvalidPolicy(_))));
    }

    #[test]
    fn test_outcome_exposes_parsed_estimate() {
        let outcome = ClaimTriage::default()
            .evaluate(&RawFieldSetBuilder::new().with_estimate("1,25,000").build())
            .unwrap();

        assert_eq!(outcome.estimate, Money::new(dec!(125000), Currency::INR));
        assert!(outcome.missing.is_empty());
    }
}

// ============================================================================
// Report Tests
// ============================================================================

mod report_tests {
    use super::*;

    #[test]
    fn test_report_layout_matches_published_shape() {
        let report = ClaimTriage::default()
            .triage(&ClaimFormFixtures::complete_claim())
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();

        let policy = &json["extractedFields"]["Policy Information"];
        assert_eq!(policy["Policy No."], StringFixtures::policy_number());
        assert_eq!(policy["PolicyHolder Name"], "John Smith");
        assert_eq!(policy["PolicyHolder Email"], "john.smith@example.com");

        let incident = &json["extractedFields"]["Incident Information"];
        assert_eq!(incident["Estimated Damage"], "10,000");
        assert_eq!(incident["Injured"], "null");

        assert_eq!(json["extractedFields"]["Involved Parties"]["Agency"], "Lakeside Brokers");
        assert_eq!(json["extractedFields"]["Asset Details"]["Vehicle Make"], "Honda");
        assert_eq!(json["recommendedRoute"], "Fast-Track");
        assert!(json["reasoning"].is_string());
    }

    #[test]
    fn test_missing_fields_explanation_lines() {
        let raw = RawFieldSetBuilder::new()
            .without(CanonicalField::InsuredName)
            .without(CanonicalField::CarrierName)
            .build();
        let report = ClaimTriage::default().triage(&raw).unwrap();

        assert_missing_fields(&report, &["Policyholder Name", "Carrier"]);
        assert!(report.missing_fields[0].starts_with("2 MISSING VALUE(S)-POLICYHOLDER NAME"));
        assert_eq!(
            report.missing_fields[1],
            "2 MISSING VALUE(S)-CARRIER,out of 4 mandatory fields-\
             ['Policy No', 'Policyholder Name', 'Carrier', 'Estimate Amount']"
        );
    }

    #[test]
    fn test_all_clear_line_when_nothing_missing() {
        let report = ClaimTriage::default()
            .triage(&ClaimFormFixtures::complete_claim())
            .unwrap();

        assert_missing_fields(&report, &[]);
        assert_eq!(
            report.missing_fields[0],
            " No Missing values out of mandatory fields-\
             ['Policy No', 'Policyholder Name', 'Carrier', 'Estimate Amount']"
        );
    }

    #[test]
    fn test_report_reads_back_from_json() {
        let report = ClaimTriage::default()
            .triage(&ClaimFormFixtures::high_value_claim())
            .unwrap();

        let json = serde_json::to_string_pretty(&report).unwrap();
        let parsed: ClaimReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;
    use test_utils::{clock_time_strategy, grouped_amount_strategy, raw_field_set_strategy};

    proptest! {
        #[test]
        fn normalization_is_idempotent(raw in raw_field_set_strategy()) {
            prop_assert_eq!(normalize(&raw), normalize(&raw));
        }

        #[test]
        fn triage_never_leaves_route_undefined(raw in raw_field_set_strategy()) {
            // Non-numeric estimates are the one permitted failure
            if let Ok(report) = ClaimTriage::default().triage(&raw) {
                prop_assert!(!report.reasoning.is_empty());
                prop_assert!(!report.missing_fields.is_empty());
            }
        }

        #[test]
        fn complete_claims_route_on_estimate(amount in grouped_amount_strategy()) {
            let (value, text) = amount;
            let report = ClaimTriage::default()
                .triage(&RawFieldSetBuilder::new().with_estimate(text).build())
                .unwrap();

            let expected = if value < 25_000 { Route::FastTrack } else { Route::Unrouted };
            prop_assert_eq!(report.recommended_route, expected);
        }

        #[test]
        fn unmarked_times_default_to_am(time in clock_time_strategy()) {
            let normalized = normalizer::time_of_loss(Some(&time));
            prop_assert_eq!(normalized, Some(format!("{} AM", time)));
        }
    }
}
