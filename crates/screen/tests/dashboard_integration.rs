use sigboard_core::screening::entity::{BuySignal, MarketStats, SectorFilter, SortKey};
use sigboard_core::source::error::SourceError;
use sigboard_core::source::memory::MemorySource;
use sigboard_core::source::port::DashboardSource;
use sigboard_screen::projector::project;
use sigboard_screen::store::{DashboardAction, DashboardState};
use std::collections::BTreeMap;

fn signal(symbol: &str, sector: &str, strength: f64, change_percent: f64, market_cap: f64) -> BuySignal {
    BuySignal {
        symbol: symbol.to_string(),
        name: format!("{} Corp", symbol),
        sector: sector.to_string(),
        price: 50_000.0,
        change: 500.0,
        change_percent,
        market_cap,
        signal_strength: strength,
        rsi: 32.0,
        macd: 1.2,
        macd_signal: 0.8,
        reason: "RSI 반등 + MACD 골든크로스".to_string(),
        date: "2024-06-03".to_string(),
    }
}

fn fixture() -> Vec<BuySignal> {
    vec![
        signal("A", "IT", 40.0, 1.5, 3.0e12),
        signal("B", "금융", 90.0, -0.5, 1.0e12),
        signal("C", "IT", 60.0, 3.2, 2.0e12),
    ]
}

fn stats() -> MarketStats {
    MarketStats {
        kospi_index: 2650.0,
        kospi_change: 0.4,
        kosdaq_index: 870.0,
        kosdaq_change: -0.2,
        signal_count: 3,
        strong_signal_count: Some(1),
        top_sectors: vec!["IT".to_string()],
        sector_distribution: BTreeMap::from([("IT".to_string(), 2), ("금융".to_string(), 1)]),
    }
}

fn strengths(view: &[&BuySignal]) -> Vec<f64> {
    view.iter().map(|s| s.signal_strength).collect()
}

#[test]
fn test_sort_by_strength_descending() {
    let signals = fixture();
    let view = project(&signals, &SectorFilter::All, SortKey::SignalStrength);
    assert_eq!(strengths(&view), vec![90.0, 60.0, 40.0]);
}

#[test]
fn test_every_sort_key_orders_descending() {
    let signals = fixture();
    for key in SortKey::ALL {
        let view = project(&signals, &SectorFilter::All, key);
        assert_eq!(view.len(), signals.len());
        assert!(view.windows(2).all(|w| key.value_of(w[0]) >= key.value_of(w[1])));
    }
    let by_change: Vec<&str> = project(&signals, &SectorFilter::All, SortKey::ChangePercent)
        .iter()
        .map(|s| s.symbol.as_str())
        .collect();
    assert_eq!(by_change, vec!["C", "A", "B"]);
}

#[test]
fn test_sector_filter_is_exact() {
    let signals = fixture();
    let filter = SectorFilter::Sector("IT".to_string());
    let view = project(&signals, &filter, SortKey::SignalStrength);
    assert_eq!(strengths(&view), vec![60.0, 40.0]);
    assert!(view.iter().all(|s| s.sector == "IT"));

    let none = project(&signals, &SectorFilter::Sector("it".to_string()), SortKey::MarketCap);
    assert!(none.is_empty());
}

#[test]
fn test_projection_is_idempotent_and_leaves_source_untouched() {
    let signals = fixture();
    let before = signals.clone();
    let filter = SectorFilter::Sector("IT".to_string());

    let first: Vec<BuySignal> = project(&signals, &filter, SortKey::MarketCap)
        .into_iter()
        .cloned()
        .collect();
    let second: Vec<BuySignal> = project(&signals, &filter, SortKey::MarketCap)
        .into_iter()
        .cloned()
        .collect();

    assert_eq!(first, second);
    assert_eq!(signals, before);
}

#[test]
fn test_projection_of_empty_list() {
    assert!(project(&[], &SectorFilter::All, SortKey::SignalStrength).is_empty());
}

#[test]
fn test_successful_load_replaces_state() {
    let state = DashboardState::new()
        .reduce(DashboardAction::FetchFailed {
            generation: 0,
            message: "offline".to_string(),
        })
        .reduce(DashboardAction::FetchStarted);
    assert_eq!(state.error.as_deref(), Some("offline"));

    let state = state.reduce(DashboardAction::SignalsLoaded {
        generation: 1,
        signals: fixture(),
        stats: Some(stats()),
    });
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.signals.len(), 3);
    assert_eq!(state.market_stats.as_ref().map(|s| s.signal_count), Some(3));
    assert_eq!(strengths(&state.visible_signals()), vec![90.0, 60.0, 40.0]);

    let state = state.reduce(DashboardAction::SectorChanged(SectorFilter::Sector(
        "금융".to_string(),
    )));
    assert_eq!(strengths(&state.visible_signals()), vec![90.0]);
    assert_eq!(state.signals.len(), 3);
}

#[test]
fn test_stale_responses_are_discarded() {
    let state = DashboardState::new()
        .reduce(DashboardAction::FetchStarted)
        .reduce(DashboardAction::FetchStarted);
    assert_eq!(state.generation, 2);

    // 第一轮请求晚到，不得覆盖第二轮
    let stale = state.clone().reduce(DashboardAction::SignalsLoaded {
        generation: 1,
        signals: fixture(),
        stats: None,
    });
    assert_eq!(stale, state);

    let stale = state.clone().reduce(DashboardAction::FetchFailed {
        generation: 1,
        message: "timeout".to_string(),
    });
    assert_eq!(stale, state);

    let fresh = state.reduce(DashboardAction::SignalsLoaded {
        generation: 2,
        signals: vec![signal("Z", "IT", 10.0, 0.0, 0.0)],
        stats: None,
    });
    assert_eq!(fresh.signals.len(), 1);
    assert!(!fresh.loading);
}

#[test]
fn test_failure_keeps_previous_signals() {
    let state = DashboardState::new()
        .reduce(DashboardAction::FetchStarted)
        .reduce(DashboardAction::SignalsLoaded {
            generation: 1,
            signals: fixture(),
            stats: None,
        })
        .reduce(DashboardAction::FetchStarted)
        .reduce(DashboardAction::FetchFailed {
            generation: 2,
            message: "502".to_string(),
        });
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("502"));
    assert_eq!(state.signals.len(), 3);
}

#[tokio::test]
async fn test_reducer_driven_by_memory_source() -> anyhow::Result<()> {
    let source = MemorySource::new();
    let state = DashboardState::new().reduce(DashboardAction::FetchStarted);

    // 尚未预置数据
    let err = source.fetch_signals().await.unwrap_err();
    assert!(matches!(err, SourceError::NotFound(_)));
    let state = state.clone().reduce(DashboardAction::FetchFailed {
        generation: state.generation,
        message: err.to_string(),
    });
    assert!(state.error.is_some());

    source.set_signals(fixture());
    source.set_market_stats(stats());
    let state = state.reduce(DashboardAction::FetchStarted);
    let signals = source.fetch_signals().await?;
    let market = source.fetch_market_stats().await?;
    let state = state.clone().reduce(DashboardAction::SignalsLoaded {
        generation: state.generation,
        signals,
        stats: Some(market),
    });

    assert!(state.error.is_none());
    assert_eq!(state.market_stats, Some(stats()));
    let symbols: Vec<&str> = state.visible_signals().iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["B", "C", "A"]);
    Ok(())
}
