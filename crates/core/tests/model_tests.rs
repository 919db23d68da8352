// ═══════════════════════════════════════════════════════════════════
// Model Tests — PositionQuery validation, TimeSeries, QuoteCache
// ═══════════════════════════════════════════════════════════════════

use chrono::{Duration, NaiveDate, TimeZone, Utc};

use stock_pulse_core::errors::CoreError;
use stock_pulse_core::models::cache::{QuoteCache, CACHE_TTL_SECS};
use stock_pulse_core::models::query::PositionQuery;
use stock_pulse_core::models::report::{PositionReport, Sentiment};
use stock_pulse_core::models::series::{DailyBar, TimeSeries};

fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn make_bar(close: f64) -> DailyBar {
    DailyBar {
        open: close - 1.0,
        high: close + 2.0,
        low: close - 2.0,
        close,
        volume: 1_000_000,
    }
}

fn make_report(symbol: &str) -> PositionReport {
    PositionReport {
        symbol: symbol.to_string(),
        current_price: 190.0,
        purchase_price: 185.0,
        units: 10.0,
        investment_value: 1850.0,
        daily_change_percent: 1.5,
        avg_7: 188.0,
        avg_30: 182.0,
        sentiment: Sentiment::Neutral,
        series: TimeSeries::new(),
    }
}

// ═══════════════════════════════════════════════════════════════════
// PositionQuery — validation boundary
// ═══════════════════════════════════════════════════════════════════

mod query_validation {
    use super::*;

    const TODAY: (i32, u32, u32) = (2025, 6, 15);

    fn today() -> NaiveDate {
        make_date(TODAY.0, TODAY.1, TODAY.2)
    }

    #[test]
    fn valid_query_uppercases_symbol() {
        let query = PositionQuery::new("aapl", make_date(2025, 6, 1), 10.0, today()).unwrap();
        assert_eq!(query.symbol, "AAPL");
        assert_eq!(query.purchase_date, make_date(2025, 6, 1));
        assert_eq!(query.units, 10.0);
    }

    #[test]
    fn symbol_is_trimmed() {
        let query = PositionQuery::new("  msft ", make_date(2025, 6, 1), 1.0, today()).unwrap();
        assert_eq!(query.symbol, "MSFT");
    }

    #[test]
    fn empty_symbol_rejected() {
        let result = PositionQuery::new("", make_date(2025, 6, 1), 10.0, today());
        assert!(result.is_err());
        match result.unwrap_err() {
            CoreError::ValidationError(msg) => assert!(msg.contains("Symbol")),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn whitespace_symbol_rejected() {
        assert!(PositionQuery::new("   ", make_date(2025, 6, 1), 10.0, today()).is_err());
    }

    #[test]
    fn purchase_today_accepted() {
        assert!(PositionQuery::new("AAPL", today(), 10.0, today()).is_ok());
    }

    #[test]
    fn future_purchase_date_rejected() {
        let result = PositionQuery::new("AAPL", make_date(2025, 6, 16), 10.0, today());
        assert!(result.is_err());
        match result.unwrap_err() {
            CoreError::ValidationError(msg) => assert!(msg.contains("future")),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn zero_units_rejected() {
        let result = PositionQuery::new("AAPL", make_date(2025, 6, 1), 0.0, today());
        assert!(result.is_err());
        match result.unwrap_err() {
            CoreError::ValidationError(msg) => assert!(msg.contains("positive")),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn negative_units_rejected() {
        assert!(PositionQuery::new("AAPL", make_date(2025, 6, 1), -5.0, today()).is_err());
    }

    #[test]
    fn nan_units_rejected() {
        assert!(PositionQuery::new("AAPL", make_date(2025, 6, 1), f64::NAN, today()).is_err());
    }

    #[test]
    fn infinite_units_rejected() {
        assert!(
            PositionQuery::new("AAPL", make_date(2025, 6, 1), f64::INFINITY, today()).is_err()
        );
    }

    #[test]
    fn fractional_units_accepted() {
        let query = PositionQuery::new("AAPL", make_date(2025, 6, 1), 0.5, today()).unwrap();
        assert_eq!(query.units, 0.5);
    }

    #[test]
    fn cache_key_is_symbol_and_date() {
        let query = PositionQuery::new("aapl", make_date(2025, 6, 1), 10.0, today()).unwrap();
        assert_eq!(
            query.cache_key(),
            ("AAPL".to_string(), make_date(2025, 6, 1))
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
// TimeSeries — ordered storage and lookups
// ═══════════════════════════════════════════════════════════════════

mod time_series {
    use super::*;

    fn sample_series() -> TimeSeries {
        // Trading days around a weekend: Fri 2025-05-30, Mon 2025-06-02
        let mut series = TimeSeries::new();
        series.insert(make_date(2025, 5, 29), make_bar(183.0));
        series.insert(make_date(2025, 5, 30), make_bar(185.0));
        series.insert(make_date(2025, 6, 2), make_bar(190.0));
        series
    }

    #[test]
    fn get_exact_date() {
        let series = sample_series();
        assert_eq!(series.get(make_date(2025, 5, 30)).unwrap().close, 185.0);
    }

    #[test]
    fn get_missing_date_is_none() {
        let series = sample_series();
        assert!(series.get(make_date(2025, 6, 1)).is_none());
    }

    #[test]
    fn latest_at_or_before_exact_hit() {
        let series = sample_series();
        let (date, bar) = series.latest_at_or_before(make_date(2025, 6, 2)).unwrap();
        assert_eq!(date, make_date(2025, 6, 2));
        assert_eq!(bar.close, 190.0);
    }

    #[test]
    fn latest_at_or_before_falls_back_over_weekend() {
        let series = sample_series();
        let (date, bar) = series.latest_at_or_before(make_date(2025, 6, 1)).unwrap();
        assert_eq!(date, make_date(2025, 5, 30));
        assert_eq!(bar.close, 185.0);
    }

    #[test]
    fn latest_at_or_before_none_when_target_predates_history() {
        let series = sample_series();
        assert!(series.latest_at_or_before(make_date(2025, 5, 28)).is_none());
    }

    #[test]
    fn insert_overwrites_existing_date() {
        let mut series = sample_series();
        series.insert(make_date(2025, 6, 2), make_bar(200.0));
        assert_eq!(series.get(make_date(2025, 6, 2)).unwrap().close, 200.0);
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn recent_closes_most_recent_first() {
        let series = sample_series();
        assert_eq!(series.recent_closes(2), vec![190.0, 185.0]);
    }

    #[test]
    fn recent_closes_caps_at_available() {
        let series = sample_series();
        assert_eq!(series.recent_closes(10).len(), 3);
    }

    #[test]
    fn iter_is_ascending_by_date() {
        let series = sample_series();
        let dates: Vec<NaiveDate> = series.iter().map(|(d, _)| d).collect();
        assert_eq!(
            dates,
            vec![
                make_date(2025, 5, 29),
                make_date(2025, 5, 30),
                make_date(2025, 6, 2),
            ]
        );
    }

    #[test]
    fn first_and_last_date() {
        let series = sample_series();
        assert_eq!(series.first_date(), Some(make_date(2025, 5, 29)));
        assert_eq!(series.last_date(), Some(make_date(2025, 6, 2)));
    }

    #[test]
    fn empty_series() {
        let series = TimeSeries::new();
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
        assert!(series.first_date().is_none());
        assert!(series.recent_closes(7).is_empty());
    }

    #[test]
    fn from_iterator_sorts_by_date() {
        let series: TimeSeries = vec![
            (make_date(2025, 6, 2), make_bar(190.0)),
            (make_date(2025, 5, 30), make_bar(185.0)),
        ]
        .into_iter()
        .collect();
        assert_eq!(series.first_date(), Some(make_date(2025, 5, 30)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// QuoteCache — lazy TTL, overwrite semantics
// ═══════════════════════════════════════════════════════════════════

mod quote_cache {
    use super::*;

    fn t0() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn key(symbol: &str) -> (String, NaiveDate) {
        (symbol.to_string(), make_date(2025, 6, 1))
    }

    #[test]
    fn fresh_entry_is_served() {
        let mut cache = QuoteCache::new();
        cache.insert(key("AAPL"), make_report("AAPL"), t0());

        let hit = cache.get_fresh(&key("AAPL"), t0() + Duration::seconds(60));
        assert_eq!(hit.unwrap().symbol, "AAPL");
    }

    #[test]
    fn entry_at_exactly_ttl_is_stale() {
        let mut cache = QuoteCache::new();
        cache.insert(key("AAPL"), make_report("AAPL"), t0());

        let at_ttl = t0() + Duration::seconds(CACHE_TTL_SECS);
        assert!(cache.get_fresh(&key("AAPL"), at_ttl).is_none());
    }

    #[test]
    fn entry_just_under_ttl_is_fresh() {
        let mut cache = QuoteCache::new();
        cache.insert(key("AAPL"), make_report("AAPL"), t0());

        let just_under = t0() + Duration::seconds(CACHE_TTL_SECS - 1);
        assert!(cache.get_fresh(&key("AAPL"), just_under).is_some());
    }

    #[test]
    fn stale_entry_remains_in_map() {
        let mut cache = QuoteCache::new();
        cache.insert(key("AAPL"), make_report("AAPL"), t0());

        let later = t0() + Duration::seconds(CACHE_TTL_SECS + 1);
        assert!(cache.get_fresh(&key("AAPL"), later).is_none());
        assert!(cache.contains(&key("AAPL")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn insert_overwrites_not_appends() {
        let mut cache = QuoteCache::new();
        cache.insert(key("AAPL"), make_report("AAPL"), t0());

        let mut updated = make_report("AAPL");
        updated.current_price = 200.0;
        cache.insert(key("AAPL"), updated, t0() + Duration::seconds(10));

        assert_eq!(cache.len(), 1);
        let hit = cache.get_fresh(&key("AAPL"), t0() + Duration::seconds(20));
        assert_eq!(hit.unwrap().current_price, 200.0);
    }

    #[test]
    fn reinsert_refreshes_ttl() {
        let mut cache = QuoteCache::new();
        cache.insert(key("AAPL"), make_report("AAPL"), t0());
        cache.insert(
            key("AAPL"),
            make_report("AAPL"),
            t0() + Duration::seconds(CACHE_TTL_SECS),
        );

        // Fresh relative to the second insert, stale relative to the first
        let probe = t0() + Duration::seconds(CACHE_TTL_SECS + 60);
        assert!(cache.get_fresh(&key("AAPL"), probe).is_some());
    }

    #[test]
    fn distinct_keys_are_independent() {
        let mut cache = QuoteCache::new();
        cache.insert(key("AAPL"), make_report("AAPL"), t0());
        cache.insert(key("MSFT"), make_report("MSFT"), t0());

        assert_eq!(cache.len(), 2);
        let probe = t0() + Duration::seconds(1);
        assert_eq!(cache.get_fresh(&key("AAPL"), probe).unwrap().symbol, "AAPL");
        assert_eq!(cache.get_fresh(&key("MSFT"), probe).unwrap().symbol, "MSFT");
    }

    #[test]
    fn same_symbol_different_date_is_distinct_key() {
        let mut cache = QuoteCache::new();
        cache.insert(key("AAPL"), make_report("AAPL"), t0());

        let other = ("AAPL".to_string(), make_date(2025, 5, 1));
        assert!(cache.get_fresh(&other, t0() + Duration::seconds(1)).is_none());
    }

    #[test]
    fn clear_empties_cache() {
        let mut cache = QuoteCache::new();
        cache.insert(key("AAPL"), make_report("AAPL"), t0());
        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.contains(&key("AAPL")));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Sentiment — display labels
// ═══════════════════════════════════════════════════════════════════

mod sentiment_display {
    use super::*;

    #[test]
    fn labels_match_ui_text() {
        assert_eq!(Sentiment::VeryBullish.to_string(), "Very Bullish");
        assert_eq!(Sentiment::Bullish.to_string(), "Bullish");
        assert_eq!(Sentiment::Neutral.to_string(), "Neutral");
        assert_eq!(Sentiment::Bearish.to_string(), "Bearish");
        assert_eq!(Sentiment::VeryBearish.to_string(), "Very Bearish");
    }
}
