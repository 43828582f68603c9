// tests/dump_and_cli.rs
//
// Покрываем:
// - диагностический Display реестра
// - stats() и его JSON
// - cmd_* функции CLI (без разбора argv)

use anyhow::Result;

use TypeStore::cli::{cmd_array, cmd_dump, cmd_sort, cmd_status, cmd_subsumes};
use TypeStore::{StoreConfig, TypeSystem};

#[test]
fn dump_lists_types_then_features() -> Result<()> {
    let mut ts = TypeSystem::empty();
    let t = ts.add_top_type("T").expect("top");
    let a = ts.add_type("A", t)?.expect("A");
    ts.add_type("B", t)?.expect("B");
    ts.add_feature("f", a, t, false)?;

    let expected = "\
~T (1);
A (2) < T (1);
B (3) < T (1);
A:f (1): A (2) > T (1);
";
    assert_eq!(ts.to_string(), expected);
    Ok(())
}

#[test]
fn builtin_dump_and_stats() -> Result<()> {
    let mut ts = TypeSystem::new();
    let dump = ts.to_string();
    assert!(dump.starts_with("~core.TOP (1);\ncore.Integer (2) < core.TOP (1);\n"));
    assert!(dump.contains("core.FSArray (6) < core.ArrayBase (5);"));

    ts.commit();
    let s = ts.stats();
    assert_eq!(s.types, 19);
    assert_eq!(s.committed_types, 19);
    assert_eq!(s.array_types, 9);
    assert_eq!(s.features, 0);
    assert_eq!(s.string_subtypes, 0);
    assert!(s.committed);
    assert_eq!(s.max_subsumption_row, 19, "top subsumes every built-in");

    let v: serde_json::Value = serde_json::to_value(&s)?;
    assert_eq!(v["types"], 19);
    assert_eq!(v["committed"], true);
    Ok(())
}

#[test]
fn cli_commands_run() -> Result<()> {
    let cfg = StoreConfig::default();
    cmd_dump(&cfg)?;
    cmd_status(&cfg, true)?;
    cmd_status(&cfg, false)?;

    assert!(cmd_subsumes(&cfg, "core.TOP", "core.Integer[]")?);
    assert!(cmd_subsumes(&cfg, "core.FSArray", "core.FSArray[]")?);
    assert!(!cmd_subsumes(&cfg, "core.FSArray", "core.IntegerArray")?);
    assert!(cmd_subsumes(&cfg, "core.Thing", "core.TOP").is_err());

    assert_eq!(cmd_array(&cfg, "core.Integer")?, "core.IntegerArray");
    assert_eq!(cmd_array(&cfg, "core.FSArray")?, "core.FSArray[]");
    assert!(cmd_array(&cfg, "nope").is_err());

    let report = cmd_sort(&cfg, &[50, 31, 90, 32], 10, &[32, 33], false)?;
    assert_eq!(report.order, vec![31, 50, 90]);
    assert_eq!(report.keys, vec![3, 5, 9]);
    assert_eq!(report.removed, vec![32]);
    assert_eq!(report.not_found, vec![33]);
    assert_eq!(report.epoch, 5);

    assert!(cmd_sort(&cfg, &[1, 2], 0, &[], true).is_err());
    assert!(cmd_sort(&cfg, &[1, 0], 1, &[], true).is_err());
    Ok(())
}
