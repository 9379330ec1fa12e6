//! # Rate Selection
//!
//! Normalization, filtering and deduplication of carrier quotes.
//!
//! [`normalize_rates`] turns raw provider quotes into [`NormalizedRate`]s,
//! dropping unsupported services and non-positive prices. A
//! [`RateSelectionStrategy`] then decides which of the surviving rates are
//! shown and in what order.

use crate::domain::entities::{NormalizedRate, RawCarrierRate};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

/// Normalizes one carrier's raw quotes.
///
/// Quotes whose service code is outside the allow-list, or whose total cost
/// is zero or negative, are dropped.
#[must_use]
pub fn normalize_rates(carrier_code: &str, raw: &[RawCarrierRate]) -> Vec<NormalizedRate> {
    raw.iter()
        .filter_map(|rate| {
            let normalized = NormalizedRate::from_raw(carrier_code, rate);
            if normalized.is_none() {
                tracing::trace!(
                    carrier = carrier_code,
                    service_code = %rate.service_code,
                    amount = %rate.total_cost(),
                    "dropping unsupported or unpriced rate"
                );
            }
            normalized
        })
        .collect()
}

/// Trait for rate selection strategies.
///
/// Implementations decide which normalized rates reach the shopper.
pub trait RateSelectionStrategy: Send + Sync + fmt::Debug {
    /// Selects and orders the rates to display.
    fn select(&self, rates: Vec<NormalizedRate>) -> Vec<NormalizedRate>;

    /// Returns the name of this strategy.
    fn name(&self) -> &'static str;
}

/// Keeps the cheapest rate per displayed carrier/service and sorts by price.
///
/// Rates are grouped by [`NormalizedRate::display_key`], i.e. by the
/// `"{carrier}-{service}"` label the shopper sees, not by service code. When
/// two rates in a group cost the same, the one seen first wins. The output is
/// sorted ascending by amount; equal amounts keep first-seen order.
#[derive(Debug, Clone, Default)]
pub struct CheapestPerServiceStrategy;

impl CheapestPerServiceStrategy {
    /// Creates a new strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RateSelectionStrategy for CheapestPerServiceStrategy {
    fn select(&self, rates: Vec<NormalizedRate>) -> Vec<NormalizedRate> {
        let mut selected: Vec<NormalizedRate> = Vec::with_capacity(rates.len());
        let mut slots: HashMap<String, usize> = HashMap::with_capacity(rates.len());

        for rate in rates {
            match slots.entry(rate.display_key()) {
                Entry::Vacant(slot) => {
                    slot.insert(selected.len());
                    selected.push(rate);
                }
                Entry::Occupied(slot) => {
                    if let Some(kept) = selected.get_mut(*slot.get()) {
                        if rate.amount() < kept.amount() {
                            *kept = rate;
                        }
                    }
                }
            }
        }

        selected.sort_by_key(NormalizedRate::amount);
        selected
    }

    fn name(&self) -> &'static str {
        "CheapestPerService"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ServiceCode;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use std::collections::HashSet;

    fn rate(carrier_code: &str, service: &str, code: ServiceCode, cents: i64) -> NormalizedRate {
        NormalizedRate::new(carrier_code, service, code, Decimal::new(cents, 2)).unwrap()
    }

    #[test]
    fn normalize_drops_off_list_and_unpriced() {
        let raw = vec![
            RawCarrierRate::new("UPS Ground", "ups_ground", 8.0, 0.5),
            RawCarrierRate::new("UPS 3 Day Select", "ups_3_day_select", 12.0, 0.0),
            RawCarrierRate::new("UPS Next Day Air", "ups_next_day_air", 0.0, 0.0),
        ];
        let rates = normalize_rates("ups_walleted", &raw);

        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].service_code(), ServiceCode::UpsGround);
        assert_eq!(rates[0].amount(), Decimal::new(850, 2));
    }

    #[test]
    fn keeps_cheapest_of_duplicate_labels() {
        let strategy = CheapestPerServiceStrategy::new();
        let selected = strategy.select(vec![
            rate("ups_walleted", "UPS Ground", ServiceCode::UpsGround, 850),
            rate("ups", "UPS Ground", ServiceCode::UpsGround, 910),
        ]);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].amount(), Decimal::new(850, 2));
        assert_eq!(selected[0].id(), "ups_walleted_ups_ground");
    }

    #[test]
    fn cheaper_duplicate_seen_later_replaces_kept_rate() {
        let strategy = CheapestPerServiceStrategy::new();
        let selected = strategy.select(vec![
            rate("ups", "UPS Ground", ServiceCode::UpsGround, 910),
            rate("ups_walleted", "UPS Ground", ServiceCode::UpsGround, 850),
        ]);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id(), "ups_walleted_ups_ground");
    }

    #[test]
    fn distinct_codes_with_same_label_collapse() {
        let strategy = CheapestPerServiceStrategy::new();
        let selected = strategy.select(vec![
            rate("ups", "UPS Air", ServiceCode::Ups2ndDayAir, 2000),
            rate("ups", "UPS Air", ServiceCode::UpsNextDayAir, 3500),
        ]);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].service_code(), ServiceCode::Ups2ndDayAir);
    }

    #[test]
    fn sorts_ascending_by_amount() {
        let strategy = CheapestPerServiceStrategy::new();
        let selected = strategy.select(vec![
            rate("ups", "UPS Next Day Air", ServiceCode::UpsNextDayAir, 4200),
            rate("stamps_com", "USPS Ground Advantage", ServiceCode::UspsGroundAdvantage, 575),
            rate("ups", "UPS Ground", ServiceCode::UpsGround, 1100),
        ]);

        let amounts: Vec<Decimal> = selected.iter().map(NormalizedRate::amount).collect();
        assert_eq!(
            amounts,
            vec![Decimal::new(575, 2), Decimal::new(1100, 2), Decimal::new(4200, 2)]
        );
    }

    #[test]
    fn empty_input_selects_nothing() {
        assert!(CheapestPerServiceStrategy::new().select(Vec::new()).is_empty());
    }

    #[test]
    fn strategy_name() {
        assert_eq!(CheapestPerServiceStrategy::new().name(), "CheapestPerService");
    }

    fn raw_rate_strategy() -> impl Strategy<Value = RawCarrierRate> {
        let codes = prop::sample::select(vec![
            "usps_ground_advantage",
            "usps_priority_mail",
            "usps_priority_mail_express",
            "ups_ground",
            "ups_2nd_day_air",
            "ups_next_day_air",
            "usps_media_mail",
            "ups_3_day_select",
            "fedex_ground",
        ]);
        let names = prop::sample::select(vec!["Ground", "Priority", "Express", "Air"]);
        (codes, names, -500i64..5000, -200i64..200).prop_map(|(code, name, base, extra)| {
            RawCarrierRate::new(
                name,
                code,
                base as f64 / 100.0,
                extra as f64 / 100.0,
            )
        })
    }

    proptest! {
        #[test]
        fn selected_rates_hold_output_invariants(
            first in prop::collection::vec(raw_rate_strategy(), 0..12),
            second in prop::collection::vec(raw_rate_strategy(), 0..12),
        ) {
            let mut rates = normalize_rates("stamps_com", &first);
            rates.extend(normalize_rates("ups_walleted", &second));
            let selected = CheapestPerServiceStrategy::new().select(rates.clone());

            let mut keys = HashSet::new();
            for rate in &selected {
                prop_assert!(keys.insert((rate.carrier().to_string(), rate.service().to_string())));
                prop_assert!(rate.amount() > Decimal::ZERO);
                prop_assert!(ServiceCode::ALL.contains(&rate.service_code()));
            }
            for pair in selected.windows(2) {
                prop_assert!(pair[0].amount() <= pair[1].amount());
            }
            for rate in &rates {
                let kept = selected.iter().find(|s| s.display_key() == rate.display_key());
                prop_assert!(kept.is_some_and(|k| k.amount() <= rate.amount()));
            }
        }
    }
}
