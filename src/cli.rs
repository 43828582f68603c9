use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::{StoreBuilder, StoreConfig};
use crate::consts::ARRAY_TYPE_SUFFIX;
use crate::index::{ByKey, ModificationEpochs, ObjRef, SortedRefIndex, NULL_REF};
use crate::metrics;
use crate::types::{TypeCode, TypeSystem};

#[derive(Parser, Debug)]
#[command(
    name = "typestore",
    version,
    about = "Type registry with subsumption, features, arrays and sorted reference indexes",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Print the diagnostic dump of the built-in registry.
    Dump,
    /// Registry stats and metrics.
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Does <sup> subsume <sub>? Names ending in "[]" are synthesized as arrays.
    Subsumes {
        #[arg(long)]
        sup: String,
        #[arg(long)]
        sub: String,
    },
    /// Synthesize (or look up) the array type of a component.
    Array {
        #[arg(long)]
        component: String,
    },
    /// Build an index keyed by ref / key_div and print its traversal.
    Sort {
        #[arg(long, value_delimiter = ',', required = true)]
        refs: Vec<ObjRef>,
        #[arg(long, default_value_t = 1)]
        key_div: u32,
        #[arg(long, value_delimiter = ',')]
        remove: Vec<ObjRef>,
        #[arg(long)]
        json: bool,
    },
}

/// Type name -> code; "X[]" goes through array synthesis.
fn resolve_type(ts: &mut TypeSystem, name: &str) -> Result<TypeCode> {
    if let Some(component) = name.strip_suffix(ARRAY_TYPE_SUFFIX) {
        let comp = resolve_type(ts, component)?;
        let arr = ts.array_type(comp);
        if arr == 0 {
            bail!("cannot synthesize array type for '{}'", component);
        }
        return Ok(arr);
    }
    match ts.type_code(name) {
        0 => Err(anyhow!("unknown type '{}'", name)),
        code => Ok(code),
    }
}

fn type_label(ts: &TypeSystem, code: TypeCode) -> String {
    format!("{} ({})", ts.type_name(code).unwrap_or("?"), code)
}

#[derive(Serialize)]
struct StatusReport {
    config: String,
    registry: crate::types::TypeSystemStats,
    metrics: metrics::MetricsSnapshot,
}

/// Result of `sort`: traversal order after removals.
#[derive(Debug, Serialize)]
pub struct SortReport {
    pub key_div: u32,
    pub order: Vec<ObjRef>,
    pub keys: Vec<u32>,
    pub removed: Vec<ObjRef>,
    pub not_found: Vec<ObjRef>,
    pub epoch: u64,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let cfg = StoreBuilder::new().build();

    match cli.cmd {
        Cmd::Dump => cmd_dump(&cfg),
        Cmd::Status { json } => cmd_status(&cfg, json),
        Cmd::Subsumes { sup, sub } => cmd_subsumes(&cfg, &sup, &sub).map(|_| ()),
        Cmd::Array { component } => cmd_array(&cfg, &component).map(|_| ()),
        Cmd::Sort {
            refs,
            key_div,
            remove,
            json,
        } => cmd_sort(&cfg, &refs, key_div, &remove, json).map(|_| ()),
    }
}

pub fn cmd_dump(cfg: &StoreConfig) -> Result<()> {
    let ts = TypeSystem::with_config(cfg);
    print!("{}", ts);
    Ok(())
}

pub fn cmd_status(cfg: &StoreConfig, json: bool) -> Result<()> {
    let mut ts = TypeSystem::with_config(cfg);
    ts.commit();
    let report = StatusReport {
        config: cfg.to_string(),
        registry: ts.stats(),
        metrics: metrics::snapshot(),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    let s = &report.registry;
    println!("{}", report.config);
    println!("types:            {}", s.types);
    println!("committed types:  {}", s.committed_types);
    println!("features:         {}", s.features);
    println!("array types:      {}", s.array_types);
    println!("string subtypes:  {}", s.string_subtypes);
    println!("committed:        {}", s.committed);
    println!("max subsumption:  {}", s.max_subsumption_row);
    Ok(())
}

pub fn cmd_subsumes(cfg: &StoreConfig, sup: &str, sub: &str) -> Result<bool> {
    let mut ts = TypeSystem::with_config(cfg);
    let a = resolve_type(&mut ts, sup)?;
    let b = resolve_type(&mut ts, sub)?;
    let yes = ts.subsumes(a, b);
    println!(
        "{} subsumes {}: {}",
        type_label(&ts, a),
        type_label(&ts, b),
        yes
    );
    Ok(yes)
}

/// Returns the array type's name.
pub fn cmd_array(cfg: &StoreConfig, component: &str) -> Result<String> {
    let mut ts = TypeSystem::with_config(cfg);
    let comp = resolve_type(&mut ts, component)?;
    let arr = ts.array_type(comp);
    if arr == 0 {
        bail!("cannot synthesize array type for '{}'", component);
    }
    println!(
        "{} parent={} component={}",
        type_label(&ts, arr),
        type_label(&ts, ts.parent(arr)),
        type_label(&ts, ts.component_type(arr))
    );
    Ok(ts.type_name(arr).unwrap_or_default().to_string())
}

pub fn cmd_sort(
    cfg: &StoreConfig,
    refs: &[ObjRef],
    key_div: u32,
    remove: &[ObjRef],
    json: bool,
) -> Result<SortReport> {
    if key_div == 0 {
        bail!("--key-div must be > 0");
    }
    if refs.contains(&NULL_REF) || remove.contains(&NULL_REF) {
        bail!("reference 0 is reserved");
    }
    let epochs = ModificationEpochs::new();
    let key = move |r: ObjRef| r / key_div;
    let mut index = SortedRefIndex::with_config(1, ByKey(key), &epochs, cfg);
    for &r in refs {
        index.insert(r);
    }
    let (removed, not_found): (Vec<ObjRef>, Vec<ObjRef>) =
        remove.iter().copied().partition(|&r| index.remove(r));

    let order: Vec<ObjRef> = index.cursor().collect();
    let report = SortReport {
        key_div,
        keys: order.iter().map(|&r| key(r)).collect(),
        order,
        removed,
        not_found,
        epoch: index.epoch(),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (r, k) in report.order.iter().zip(&report.keys) {
            println!("{:>10}  key={}", r, k);
        }
        if !report.removed.is_empty() {
            println!("removed:   {:?}", report.removed);
        }
        if !report.not_found.is_empty() {
            println!("not found: {:?}", report.not_found);
        }
        println!("size={} epoch={}", report.order.len(), report.epoch);
    }
    Ok(report)
}
