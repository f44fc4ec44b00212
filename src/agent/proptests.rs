//! Property-based tests for router reply mapping
//!
//! - Any reply maps onto one of the three intents
//! - A reply mentioning the weather token always routes to weather
//! - Replies mentioning neither token are general conversation

use super::intent::{label_from_reply, IntentLabel};
use proptest::prelude::*;

/// Text guaranteed not to contain either routing token
fn arb_filler() -> impl Strategy<Value = String> {
    "[a-z ,.]{0,40}"
}

fn arb_case(token: &'static str) -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<bool>(), token.len()).prop_map(move |upper| {
        token
            .chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_any_reply_maps_to_a_label(raw in any::<String>()) {
        let label = label_from_reply(&raw);
        prop_assert!(matches!(
            label,
            IntentLabel::GeneralConversation | IntentLabel::WeatherQuery | IntentLabel::WebSearch
        ));
    }

    #[test]
    fn prop_weather_token_wins(
        prefix in arb_filler(),
        suffix in arb_filler(),
        token in arb_case("weather_query"),
        mention_search in any::<bool>(),
    ) {
        let extra = if mention_search { " or web_search" } else { "" };
        let raw = format!("{prefix}{token}{extra}{suffix}");
        prop_assert_eq!(label_from_reply(&raw), IntentLabel::WeatherQuery);
    }

    #[test]
    fn prop_search_token_routes_to_search(
        prefix in arb_filler(),
        suffix in arb_filler(),
        token in arb_case("web_search"),
    ) {
        let raw = format!("  {prefix}{token}{suffix}\n");
        prop_assert_eq!(label_from_reply(&raw), IntentLabel::WebSearch);
    }

    #[test]
    fn prop_unmatched_reply_is_general(raw in arb_filler()) {
        prop_assert_eq!(label_from_reply(&raw), IntentLabel::GeneralConversation);
    }
}
