//! Property-based tests for the dialog resolver
//!
//! These tests verify key invariants hold across generated slots and sessions.

use super::date::query_param;
use super::*;
use crate::weather::testing::{portland, seattle, MockLookups};
use chrono::NaiveDate;
use proptest::prelude::*;
use std::future::Future;

// ============================================================================
// Test Helpers
// ============================================================================

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

fn ctx() -> TurnContext {
    TurnContext::new(NaiveDate::from_ymd_opt(2015, 6, 18).unwrap())
}

fn lookups(rain: f64) -> MockLookups {
    MockLookups::new()
        .with_city(seattle())
        .with_city(portland())
        .with_rain(rain)
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Values that all mean "not provided"
fn arb_blank_slot() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[ \t]{1,4}".prop_map(Some),
    ]
}

fn arb_city_slot() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        arb_blank_slot(),
        Just(Some("Seattle".to_string())),
        Just(Some("portland".to_string())),
        "[A-Z][a-z]{3,10}ville".prop_map(Some),
    ]
}

fn arb_date_slot() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        arb_blank_slot(),
        arb_date().prop_map(|d| Some(d.format("%Y-%m-%d").to_string())),
        Just(Some("tomorrow".to_string())),
        "[a-z]{3,8} [a-z]{3,8}".prop_map(Some),
    ]
}

fn arb_resolved_date() -> impl Strategy<Value = ResolvedDate> {
    arb_date().prop_map(|d| resolve_date(Some(&d.format("%Y-%m-%d").to_string()), ctx().today).unwrap())
}

fn arb_session() -> impl Strategy<Value = SessionState> {
    (
        prop_oneof![Just(None), Just(Some(seattle())), Just(Some(portland()))],
        proptest::option::of(arb_resolved_date()),
    )
        .prop_map(|(city, date)| SessionState { city, date })
}

fn arb_intent() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("OneshotUmbrellaIntent"),
        Just("DialogUmbrellaIntent"),
        Just("SupportedCitiesIntent"),
        Just("AMAZON.HelpIntent"),
        Just("AMAZON.StopIntent"),
    ]
}

fn slots(city: Option<String>, date: Option<String>) -> SlotInput {
    [("City", city), ("Date", date)].into_iter().collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Dialog turn with nothing usable and no stored city asks for a city
    #[test]
    fn prop_empty_dialog_turn_asks_for_city(
        city in arb_blank_slot(),
        date in arb_blank_slot(),
        stored_date in proptest::option::of(arb_resolved_date()),
    ) {
        let session = SessionState { city: None, date: stored_date };
        let mock = lookups(0.9);
        let directive = block_on(resolve_turn(
            &ctx(), "DialogUmbrellaIntent", &slots(city, date), &session, &mock,
        )).unwrap();

        prop_assert!(!directive.should_end_session);
        prop_assert!(directive.speech.contains("Which city"));
        prop_assert_eq!(directive.session, session);
        prop_assert!(mock.geocoder_calls().is_empty());
    }

    /// A stored city plus a valid date finishes the conversation in one turn
    #[test]
    fn prop_stored_city_and_valid_date_answers(
        date in arb_date(),
        rain in 0.0f64..=1.0,
    ) {
        let session = SessionState::new().with_city(seattle());
        let raw = date.format("%Y-%m-%d").to_string();
        let mock = lookups(rain);
        let directive = block_on(resolve_turn(
            &ctx(), "DialogUmbrellaIntent", &slots(None, Some(raw)), &session, &mock,
        )).unwrap();

        prop_assert!(directive.should_end_session);
        prop_assert_eq!(
            mock.forecast_calls(),
            vec![("Seattle".to_string(), query_param(date))]
        );
        prop_assert!(mock.geocoder_calls().is_empty());
    }

    /// The forecast is only consulted once both slots are known, and a
    /// non-terminal turn never consults it
    #[test]
    fn prop_answer_requires_city_and_date(
        intent in arb_intent(),
        city in arb_city_slot(),
        date in arb_date_slot(),
        session in arb_session(),
    ) {
        let mock = lookups(0.5);
        let directive = block_on(resolve_turn(
            &ctx(), intent, &slots(city, date), &session, &mock,
        )).unwrap();

        let answered = !mock.forecast_calls().is_empty();
        if answered {
            prop_assert!(directive.should_end_session);
            prop_assert!(directive.speech.contains("chance of rain"));
        }
        if !directive.should_end_session {
            prop_assert!(!answered);
        }
        if answered && intent == "DialogUmbrellaIntent" {
            prop_assert!(directive.session.city.is_some());
            prop_assert!(directive.session.date.is_some());
        }
        // at most one lookup of each kind per turn
        prop_assert!(mock.geocoder_calls().len() <= 1);
        prop_assert!(mock.forecast_calls().len() <= 1);
    }

    /// Exactly one slot missing after a dialog turn means we ask for that slot
    #[test]
    fn prop_dialog_prompts_for_the_missing_slot(
        city in arb_city_slot(),
        date in arb_date_slot(),
        session in arb_session(),
    ) {
        let mock = lookups(0.5);
        let directive = block_on(resolve_turn(
            &ctx(), "DialogUmbrellaIntent", &slots(city, date), &session, &mock,
        )).unwrap();

        let after = &directive.session;
        match (&after.city, &after.date) {
            (Some(_), None) if !directive.should_end_session && after != &session => {
                prop_assert!(directive.speech.contains("which day"));
            }
            (None, Some(_)) if !directive.should_end_session && after != &session => {
                prop_assert!(directive.speech.contains("which city"));
            }
            _ => {}
        }
    }

    /// Resolving the same city slot twice leaves the session in the same state
    #[test]
    fn prop_city_resolution_is_idempotent(
        city in arb_city_slot(),
        session in arb_session(),
    ) {
        let mock = lookups(0.5);
        let slots = slots(city, None);
        let first = block_on(resolve_turn(
            &ctx(), "DialogUmbrellaIntent", &slots, &session, &mock,
        )).unwrap();
        let second = block_on(resolve_turn(
            &ctx(), "DialogUmbrellaIntent", &slots, &session, &mock,
        )).unwrap();

        prop_assert_eq!(&first.session.city, &second.session.city);
        prop_assert_eq!(first, second);
    }

    /// Umbrella rule is a strict greater-than on the 0-1 scale
    #[test]
    fn prop_umbrella_threshold(p in 0.0f64..=1.0) {
        let advice = decide(RainChance::new(p));
        if p > 0.5 {
            prop_assert_eq!(advice, Advice::TakeUmbrella);
        } else {
            prop_assert_eq!(advice, Advice::NoUmbrella);
        }
    }

    /// Query fragment is always an 8-digit zero-padded date plus the range
    #[test]
    fn prop_query_param_format(date in arb_date()) {
        let resolved = resolve_date(Some(&date.format("%Y-%m-%d").to_string()), ctx().today).unwrap();
        let digits = resolved
            .query_param
            .strip_prefix("begin_date=")
            .and_then(|rest| rest.strip_suffix("&range=24"))
            .unwrap()
            .to_string();

        prop_assert_eq!(digits.len(), 8);
        prop_assert!(digits.chars().all(|c| c.is_ascii_digit()));
        prop_assert_eq!(NaiveDate::parse_from_str(&digits, "%Y%m%d").unwrap(), date);
    }

    /// Garbage date strings never panic, they fail to resolve
    #[test]
    fn prop_unparseable_dates_fail_cleanly(raw in "[a-z]{1,12}( [a-z]{1,8})?") {
        prop_assume!(raw != "today" && raw != "tomorrow");
        prop_assume!(raw.parse::<chrono::Weekday>().is_err());
        prop_assert!(resolve_date(Some(&raw), ctx().today).is_err());
    }
}
