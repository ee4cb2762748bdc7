use async_trait::async_trait;
use complication_config::complications::{Slot, SlotId};
use complication_config::error::{ConfigError, ProviderError};
use complication_config::provider::{
    ProviderAssignment, ProviderInfo, ProviderInfoGateway, ProviderSource, StaticProviderSource,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

/// Fails for the left slot, panics for the right slot.
struct FlakySource;

#[async_trait]
impl ProviderSource for FlakySource {
    fn source_type(&self) -> &str {
        "flaky"
    }

    async fn resolve(&self, slot_id: SlotId) -> Result<Option<ProviderInfo>, ProviderError> {
        match Slot::from_id(slot_id) {
            Some(Slot::Left) => Err(ProviderError::Unavailable("service offline".to_string())),
            Some(Slot::Right) => panic!("provider source crashed"),
            _ => Ok(Some(ProviderInfo::new("Gallery", "Photos"))),
        }
    }
}

fn all_slot_ids() -> BTreeSet<SlotId> {
    Slot::ALL.iter().map(|slot| slot.id()).collect()
}

fn collect_results(rx: &mpsc::Receiver<ProviderAssignment>, n: usize) -> HashMap<SlotId, ProviderAssignment> {
    (0..n)
        .map(|_| rx.recv_timeout(Duration::from_secs(5)).expect("lookup result"))
        .map(|assignment| (assignment.slot_id, assignment))
        .collect()
}

#[test]
fn test_lookup_requires_open() {
    let mut gateway = ProviderInfoGateway::new(Arc::new(StaticProviderSource::new()), 1);
    let result = gateway.lookup_all(&all_slot_ids(), |_| {});
    assert_eq!(result, Err(ConfigError::GatewayNotOpen));
}

#[test]
fn test_open_is_idempotent_and_close_is_final() {
    let mut gateway = ProviderInfoGateway::new(Arc::new(StaticProviderSource::new()), 1);
    gateway.open().unwrap();
    gateway.open().unwrap();
    assert!(gateway.is_open());

    gateway.close();
    gateway.close();
    assert!(gateway.is_closed());
    assert_eq!(gateway.open(), Err(ConfigError::GatewayClosed));
    assert_eq!(gateway.lookup_all(&all_slot_ids(), |_| {}), Err(ConfigError::GatewayClosed));
}

#[test]
fn test_one_result_per_slot() {
    let source = StaticProviderSource::new()
        .with(Slot::Left.id(), Some(ProviderInfo::new("Weather", "Temperature").with_icon("ic_sun")))
        .with_delayed(
            Slot::Right.id(),
            Some(ProviderInfo::new("Fitness", "Steps")),
            Duration::from_millis(20),
        );
    let mut gateway = ProviderInfoGateway::new(Arc::new(source), 2);
    gateway.open().unwrap();

    let (tx, rx) = mpsc::channel();
    let tx = std::sync::Mutex::new(tx);
    let issued = gateway
        .lookup_all(&all_slot_ids(), move |assignment| {
            let _ = tx.lock().unwrap().send(assignment);
        })
        .unwrap();
    assert_eq!(issued, 3);

    let results = collect_results(&rx, 3);
    assert_eq!(results.len(), 3);
    assert!(results[&Slot::Background.id()].is_empty());
    assert_eq!(results[&Slot::Left.id()].provider.as_ref().unwrap().label, "Temperature");
    assert_eq!(results[&Slot::Right.id()].provider.as_ref().unwrap().app_name, "Fitness");

    // No duplicates trickle in afterwards
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
}

#[test]
fn test_failures_degrade_to_empty() {
    let mut gateway = ProviderInfoGateway::new(Arc::new(FlakySource), 2);
    gateway.open().unwrap();

    let (tx, rx) = mpsc::channel();
    let tx = std::sync::Mutex::new(tx);
    gateway
        .lookup_all(&all_slot_ids(), move |assignment| {
            let _ = tx.lock().unwrap().send(assignment);
        })
        .unwrap();

    let results = collect_results(&rx, 3);
    assert!(!results[&Slot::Background.id()].is_empty());
    assert_eq!(results[&Slot::Left.id()], ProviderAssignment::empty(Slot::Left.id()));
    assert_eq!(results[&Slot::Right.id()], ProviderAssignment::empty(Slot::Right.id()));
}

#[test]
fn test_results_after_close_are_dropped() {
    let source = StaticProviderSource::new().with_delayed(
        Slot::Left.id(),
        Some(ProviderInfo::new("Weather", "Temperature")),
        Duration::from_millis(200),
    );
    let mut gateway = ProviderInfoGateway::new(Arc::new(source), 1);
    gateway.open().unwrap();

    let delivered = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&delivered);
    let ids: BTreeSet<SlotId> = [Slot::Left.id()].into_iter().collect();
    gateway
        .lookup_all(&ids, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    gateway.close();
    std::thread::sleep(Duration::from_millis(400));
    assert_eq!(delivered.load(Ordering::SeqCst), 0);
    assert_eq!(gateway.pending_lookups(), 0);
}

#[test]
fn test_static_source_from_config() {
    let config: complication_config::config::Config = toml::from_str(
        r#"
[providers.right]
app_name = "Battery"
label = "Level"
icon = "ic_battery"
"#,
    )
    .unwrap();

    let source = StaticProviderSource::from_config(&config.providers);
    let mut gateway = ProviderInfoGateway::new(Arc::new(source), 1);
    gateway.open().unwrap();

    let (tx, rx) = mpsc::channel();
    let tx = std::sync::Mutex::new(tx);
    let ids: BTreeSet<SlotId> = [Slot::Right.id()].into_iter().collect();
    gateway
        .lookup_all(&ids, move |assignment| {
            let _ = tx.lock().unwrap().send(assignment);
        })
        .unwrap();

    let assignment = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(assignment.slot_id, Slot::Right.id());
    let provider = assignment.provider.unwrap();
    assert_eq!(provider.description(), "Battery Level");
    assert_eq!(provider.icon.unwrap().0, "ic_battery");
}
