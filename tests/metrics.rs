// tests/metrics.rs
//
// Метрики глобальные, поэтому в этом бинаре ровно один тест.

use anyhow::Result;

use TypeStore::metrics;
use TypeStore::{ByKey, ModificationEpochs, ObjRef, SortedRefIndex, StoreConfig, TypeSystem};

#[test]
fn metrics_snapshot_and_reset() -> Result<()> {
    metrics::reset();
    let m = metrics::snapshot();
    assert_eq!(m.types_declared, 0);
    assert_eq!(m.append_fast_path_ratio(), 0.0);
    assert_eq!(m.avg_remove_scan_steps(), 0.0);

    // ----- registry -----
    let mut ts = TypeSystem::empty();
    let t = ts.add_top_type("T").expect("top");
    let a = ts.add_type("A", t)?.expect("A");
    let f = ts.add_feature("f", a, t, false)?;
    assert_eq!(ts.add_feature("f", a, t, false)?, f);
    ts.commit();
    ts.commit();

    let mut full = TypeSystem::new();
    let tok = full.add_type("x.Token", full.top_type())?.expect("x.Token");
    full.array_type(tok);
    full.array_type(tok);

    let m = metrics::snapshot();
    // Массивы считаются отдельно от типов.
    assert_eq!(m.types_declared, 2 + 11);
    assert_eq!(m.features_declared, 1);
    assert_eq!(m.feature_redeclarations, 1);
    assert_eq!(m.commits, 1);
    assert_eq!(m.array_types_synthesized, 9 + 1);
    assert_eq!(m.array_cache_hits, 1);

    // ----- index -----
    let epochs = ModificationEpochs::new();
    let cfg = StoreConfig::default().with_remove_scan_warn(2);
    let mut idx = SortedRefIndex::with_config(1, ByKey(|r: ObjRef| r / 10), &epochs, &cfg);
    for r in [30, 31, 32, 33, 34, 10] {
        idx.insert(r);
    }
    assert!(idx.remove(30));
    assert!(!idx.remove(39));
    assert!(!idx.remove(70));
    idx.flush();

    let m = metrics::snapshot();
    assert_eq!(m.index_inserts, 6);
    assert_eq!(m.index_append_fast_path, 5);
    assert_eq!(m.index_removes, 1);
    assert_eq!(m.index_remove_misses, 2);
    assert!(m.index_remove_scan_steps >= 4, "scan over the key-3 run");
    assert_eq!(m.index_flushes, 1);
    assert!((m.append_fast_path_ratio() - 5.0 / 6.0).abs() < 1e-9);
    assert_eq!(m.index_insert_scan_steps, 0, "10 has no key-duplicates");

    // Вставка внутрь серии дубликатов: шаги от найденной позиции до конца серии.
    let mut run = SortedRefIndex::new(2, ByKey(|r: ObjRef| r / 10), &epochs);
    for r in [30, 31, 32, 33, 90] {
        run.insert(r);
    }
    let before = run.to_vec();
    let hit = before
        .binary_search_by(|&x| (x / 10).cmp(&3))
        .map_err(|_| anyhow::anyhow!("key 3 must be present"))?;
    run.insert(35);
    assert_eq!(run.to_vec(), vec![30, 31, 32, 33, 35, 90]);
    let m = metrics::snapshot();
    assert_eq!(m.index_insert_scan_steps, (3 - hit) as u64);
    assert_eq!(m.index_inserts, 6 + 6);

    let json = serde_json::to_string(&m)?;
    assert!(json.contains("\"index_inserts\":12"), "{json}");
    assert!(json.contains("\"index_insert_scan_steps\""), "{json}");

    metrics::reset();
    let m = metrics::snapshot();
    assert_eq!(m.index_inserts, 0);
    assert_eq!(m.commits, 0);
    Ok(())
}
