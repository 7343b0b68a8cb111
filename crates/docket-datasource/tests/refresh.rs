use std::sync::Arc;
use std::time::Duration;

use docket_core::{event_bus, AppEvent, DataEvent, Field, RecordFields};
use docket_datasource::{
    run_refresh_loop, ChannelSource, MemorySource, PollingSource, Record, RefreshStatus,
    Refresher, TableInfo,
};
use serde_json::json;
use tokio::sync::broadcast::error::TryRecvError;

fn fields(value: serde_json::Value) -> RecordFields {
    value.as_object().cloned().unwrap_or_default()
}

fn source() -> Arc<MemorySource> {
    let source = MemorySource::new();
    source.add_table(
        TableInfo::new("t1", "订单"),
        vec![Field::new("c", "客户"), Field::new("a", "金额")],
        vec![
            Record::new("r1", fields(json!({"c": "甲", "a": 10}))),
            Record::new("r2", fields(json!({"c": "乙", "a": 20}))),
            Record::new("r3", fields(json!({"c": "甲", "a": 30}))),
        ],
    );
    source.select("t1", "v1", vec!["r1".into(), "r2".into(), "r3".into()]);
    Arc::new(source)
}

#[tokio::test]
async fn test_initialize_reports_view_and_loads() {
    let source = source();
    let refresher = Refresher::new(source.clone()).with_grouping(vec!["c".to_string()]);
    let report = refresher.initialize().await;

    assert_eq!(report.view_changed.as_deref(), Some("v1"));
    assert_eq!(
        report.status,
        RefreshStatus::Updated {
            groups: 2,
            records: 3
        }
    );
    let snapshot = refresher.snapshot();
    assert_eq!(snapshot.tables.len(), 1);
    assert_eq!(snapshot.fields.len(), 2);
    assert_eq!(snapshot.groups[0].key_value("客户"), Some("甲"));
    assert_eq!(snapshot.groups[0].records.len(), 2);
    assert_eq!(snapshot.record_count(), 3);
}

#[tokio::test]
async fn test_refresh_publishes_view_and_data_events() {
    let source = source();
    source.select("t1", "v-events", vec!["r2".into()]);
    let mut events = event_bus().receiver();

    let refresher = Refresher::new(source.clone());
    refresher.initialize().await;

    let mut view_changed = false;
    let mut refreshed = false;
    loop {
        match events.try_recv() {
            Ok(AppEvent::Data(DataEvent::ViewChanged { view_id })) if view_id == "v-events" => {
                view_changed = true
            }
            Ok(AppEvent::Data(DataEvent::Refreshed { records: 1, .. })) if view_changed => {
                refreshed = true
            }
            Ok(_) | Err(TryRecvError::Lagged(_)) => {}
            Err(_) => break,
        }
    }
    assert!(view_changed);
    assert!(refreshed);
}

#[tokio::test]
async fn test_unchanged_selection_skips_fetch() {
    let source = source();
    let refresher = Refresher::new(source.clone());
    refresher.initialize().await;
    let fetched = source.record_fetches();

    let report = refresher.refresh(false).await;
    assert_eq!(report.status, RefreshStatus::Unchanged);
    assert!(report.view_changed.is_none());
    assert_eq!(source.record_fetches(), fetched);

    // forced refresh refetches even without a change
    let report = refresher.refresh(true).await;
    assert!(matches!(report.status, RefreshStatus::Updated { .. }));
    assert_eq!(source.record_fetches(), fetched + 3);
}

#[tokio::test]
async fn test_selection_change_is_committed() {
    let source = source();
    let refresher = Refresher::new(source.clone());
    refresher.initialize().await;

    source.select("t1", "v1", vec!["r2".into()]);
    let report = refresher.refresh(false).await;
    assert_eq!(
        report.status,
        RefreshStatus::Updated {
            groups: 1,
            records: 1
        }
    );
    assert_eq!(refresher.groups()[0].records[0]["c"], "乙");
}

#[tokio::test]
async fn test_view_switch_forces_reload() {
    let source = source();
    let refresher = Refresher::new(source.clone());
    refresher.initialize().await;

    // same record ids, other view
    source.select("t1", "v2", vec!["r1".into(), "r2".into(), "r3".into()]);
    let report = refresher.refresh(false).await;
    assert_eq!(report.view_changed.as_deref(), Some("v2"));
    assert!(matches!(report.status, RefreshStatus::Updated { .. }));
    assert_eq!(refresher.snapshot().view_id.as_deref(), Some("v2"));
}

#[tokio::test]
async fn test_empty_selection_clears() {
    let source = source();
    let refresher = Refresher::new(source.clone());
    refresher.initialize().await;

    source.select("t1", "v1", Vec::new());
    assert_eq!(refresher.refresh(false).await.status, RefreshStatus::Cleared);
    assert!(refresher.groups().is_empty());

    source.clear_selection();
    assert_eq!(refresher.refresh(false).await.status, RefreshStatus::Cleared);
}

#[tokio::test]
async fn test_failure_keeps_previous_data() {
    let source = source();
    let refresher = Refresher::new(source.clone());
    refresher.initialize().await;
    assert_eq!(refresher.groups().len(), 3);

    source.set_failure(Some("network down"));
    source.select("t1", "v1", vec!["r1".into()]);
    assert_eq!(refresher.refresh(true).await.status, RefreshStatus::Failed);
    assert_eq!(refresher.groups().len(), 3);
    assert!(!refresher.is_refreshing());

    // the failed selection is retried once the source recovers
    source.set_failure(None);
    assert_eq!(
        refresher.refresh(false).await.status,
        RefreshStatus::Updated {
            groups: 1,
            records: 1
        }
    );
}

#[tokio::test]
async fn test_missing_record_fails_whole_refresh() {
    let source = source();
    let refresher = Refresher::new(source.clone());
    refresher.initialize().await;

    source.select("t1", "v1", vec!["r1".into(), "gone".into()]);
    assert_eq!(refresher.refresh(false).await.status, RefreshStatus::Failed);
    assert_eq!(refresher.groups().len(), 3);
}

#[tokio::test]
async fn test_regrouping_forces_refresh() {
    let source = source();
    let refresher = Refresher::new(source.clone());
    refresher.initialize().await;
    assert_eq!(refresher.groups().len(), 3);

    let report = refresher.set_grouping(vec!["c".to_string()]).await;
    assert_eq!(
        report.status,
        RefreshStatus::Updated {
            groups: 2,
            records: 3
        }
    );
}

#[tokio::test]
async fn test_overlapping_refreshes_are_dropped() {
    let source = source();
    let refresher = Arc::new(Refresher::new(source.clone()));
    let (a, b) = tokio::join!(refresher.refresh(true), refresher.refresh(true));
    let busy = [a.status, b.status]
        .iter()
        .filter(|s| **s == RefreshStatus::Busy)
        .count();
    // MemorySource never suspends, so the first call may finish before the
    // second starts; at most one may be dropped.
    assert!(busy <= 1);
    assert!(!refresher.is_refreshing());
}

#[tokio::test]
async fn test_channel_loop_runs_until_closed() {
    let source = source();
    let refresher = Arc::new(Refresher::new(source.clone()));
    let (trigger, changes) = ChannelSource::channel(8);
    assert!(trigger.request(true));
    assert!(trigger.request(false));
    assert!(trigger.request(true));
    drop(trigger);

    let updates = run_refresh_loop(refresher.clone(), changes).await;
    assert_eq!(updates, 2);
    assert_eq!(refresher.groups().len(), 3);
}

#[tokio::test]
async fn test_polling_loop_picks_up_selection() {
    let source = source();
    let refresher = Arc::new(Refresher::new(source.clone()));
    refresher.initialize().await;
    source.select("t1", "v1", vec!["r3".into()]);

    let polling = PollingSource::new(Duration::from_millis(5));
    let _ = tokio::time::timeout(
        Duration::from_millis(100),
        run_refresh_loop(refresher.clone(), polling),
    )
    .await;
    assert_eq!(refresher.groups().len(), 1);
    assert_eq!(refresher.groups()[0].records[0]["a"], 30);
}

#[tokio::test]
async fn test_dump_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    std::fs::write(
        &path,
        r#"{"fields":[{"id":"c","name":"客户"}],"records":[{"recordId":"x","fields":{"c":"丙"}}]}"#,
    )
    .unwrap();

    let refresher = Refresher::new(Arc::new(MemorySource::load(&path).unwrap()));
    let report = refresher.initialize().await;
    assert_eq!(report.view_changed.as_deref(), Some("view"));
    assert_eq!(refresher.groups()[0].records[0]["c"], "丙");
}
