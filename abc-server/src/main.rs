use std::env;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;

use abc_core::{classify, AbcClass, AbcThresholds, Classification, ClassifiedRecord, ItemId};
use abc_pipeline::dataset_loader::load_sales_file;
use abc_pipeline::pipelines::abc_report::AbcReportPipeline;
use abc_pipeline::summary::{class_breakdown, value_by_item, ClassBreakdown, ItemValue};
use abc_pipeline::types::ReportQuery;
use abc_pipeline::view_pipeline::{PipelineResult, ViewPipeline};

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ReportJson {
    generated_at: String,
    fingerprint: String,
    thresholds: AbcThresholds,
    filters: FiltersJson,
    timings: TimingsJson,
    summary: SummaryJson,
    class_breakdown: Vec<ClassBreakdown>,
    aggregates: Vec<AggregateJson>,
    rows: Vec<RowJson>,
    value_by_item: Vec<ItemValue>,
}

#[derive(Serialize)]
struct FiltersJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top: Option<usize>,
}

#[derive(Serialize)]
struct TimingsJson {
    load_ms: u128,
    classify_ms: u128,
    view_ms: u128,
}

#[derive(Serialize)]
struct SummaryJson {
    rows_processed: usize,
    rows_classified: usize,
    rows_dropped_missing_qty: usize,
    items: usize,
    total_value: f64,
    rows_selected: usize,
    rows_removed_by_filters: usize,
}

#[derive(Serialize)]
struct AggregateJson {
    item_id: ItemId,
    value: f64,
    cumsum: f64,
    cumperc: f64,
    class: AbcClass,
}

#[derive(Serialize)]
struct RowJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    item_id: Option<ItemId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    qty: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
    class: String,
}

/// Assemble the full JSON report. `aggregates` and `class_breakdown` always
/// cover the whole dataset; `rows` and `value_by_item` cover the selected
/// view, so a filtered report still carries the complete Pareto curve.
fn build_json(
    classification: &Classification,
    result: &PipelineResult<ReportQuery, ClassifiedRecord>,
    rows_processed: usize,
    thresholds: AbcThresholds,
    top: Option<usize>,
    timings: TimingsJson,
) -> ReportJson {
    let aggregates = classification
        .aggregates
        .iter()
        .map(|a| AggregateJson {
            item_id: a.item_id.clone(),
            value: a.value,
            cumsum: a.cumsum,
            cumperc: a.cumperc,
            class: a.class,
        })
        .collect();

    let rows = result
        .selected_rows
        .iter()
        .map(|r| RowJson {
            item_id: r.item_id.clone(),
            description: r.description.clone(),
            qty: r.qty,
            value: r.value,
            class: r.class_label().to_string(),
        })
        .collect();

    ReportJson {
        generated_at: Utc::now().to_rfc3339(),
        fingerprint: format!("{:016x}", classification.fingerprint),
        thresholds,
        filters: FiltersJson {
            category: result.query.category.clone(),
            class: result.query.class.map(|c| c.to_string()),
            top,
        },
        timings,
        summary: SummaryJson {
            rows_processed,
            rows_classified: classification.classified.len(),
            rows_dropped_missing_qty: classification.dropped_missing_qty,
            items: classification.aggregates.len(),
            total_value: classification.total_value,
            rows_selected: result.selected_rows.len(),
            rows_removed_by_filters: result.removed_rows.len(),
        },
        class_breakdown: class_breakdown(&classification.aggregates),
        aggregates,
        rows,
        value_by_item: value_by_item(&result.selected_rows),
    }
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

/// Whole-dollar amount with thousands separators; cents are dropped.
fn format_dollars(amount: f64) -> String {
    let whole = amount.abs() as u64;
    let sign = if amount < 0.0 { "-" } else { "" };

    if whole < 1_000 {
        return format!("{}{}", sign, whole);
    }

    let s = whole.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    format!("{}{}", sign, result.chars().rev().collect::<String>())
}

fn display_id(item_id: &Option<ItemId>) -> String {
    item_id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".into())
}

fn display_value(value: Option<f64>) -> String {
    value
        .map(|v| format!("${}", format_dollars(v)))
        .unwrap_or_else(|| "-".into())
}

fn print_human(
    classification: &Classification,
    result: &PipelineResult<ReportQuery, ClassifiedRecord>,
    rows_processed: usize,
    thresholds: AbcThresholds,
    top: Option<usize>,
    load_ms: u128,
    classify_ms: u128,
    view_ms: u128,
) {
    println!();
    println!("  \u{2554}{:\u{2550}<62}\u{2557}", "");
    println!("  \u{2551}              ABC ANALYSIS \u{2014} Sales Value Report               \u{2551}");
    println!("  \u{255a}{:\u{2550}<62}\u{255d}", "");
    println!();

    println!(
        "  {} rows processed  \u{00b7}  {} classified  \u{00b7}  {} dropped (missing qty)",
        rows_processed,
        classification.classified.len(),
        classification.dropped_missing_qty
    );
    println!(
        "  {} items  \u{00b7}  ${} total value  \u{00b7}  thresholds A \u{2264} {}%, B \u{2264} {}%",
        classification.aggregates.len(),
        format_dollars(classification.total_value),
        thresholds.a,
        thresholds.b_cutoff()
    );

    println!();
    println!("  Class breakdown");
    println!("  {:\u{2500}<64}", "");
    for b in class_breakdown(&classification.aggregates) {
        println!(
            "   {}  {:>4} item{} {:>14}  {:>5.1}% of value",
            b.class,
            b.items,
            if b.items == 1 { " " } else { "s" },
            format!("${}", format_dollars(b.value)),
            b.share
        );
    }

    println!();
    println!("  Items by cumulative value");
    println!("  {:\u{2500}<64}", "");
    println!(
        "  {:<14} {:>12} {:>12} {:>7}  class",
        "item_id", "value", "cumsum", "cum%"
    );
    for a in &classification.aggregates {
        println!(
            "  {:<14} {:>12} {:>12} {:>7.1}  {}",
            a.item_id.to_string(),
            format!("${}", format_dollars(a.value)),
            format!("${}", format_dollars(a.cumsum)),
            a.cumperc,
            a.class
        );
    }

    println!();
    let mut applied: Vec<String> = Vec::new();
    if let Some(ref c) = result.query.category {
        applied.push(format!("category={}", c));
    }
    if let Some(c) = result.query.class {
        applied.push(format!("class={}", c));
    }
    if let Some(n) = top {
        applied.push(format!("top {}", n));
    }
    if applied.is_empty() {
        println!("  View: all classified rows");
    } else {
        println!("  View: {}", applied.join("  \u{00b7}  "));
    }
    println!(
        "  {} of {} rows selected ({} removed by filters)",
        result.selected_rows.len(),
        result.retrieved_rows.len(),
        result.removed_rows.len()
    );
    println!();

    if result.selected_rows.is_empty() {
        println!("  No rows match the requested view.");
    } else {
        println!("  {:\u{2500}<64}", "");
        println!(
            "  {:<14} {:<20} {:>8} {:>12}  class",
            "item_id", "description", "qty", "value"
        );
        for r in &result.selected_rows {
            println!(
                "  {:<14} {:<20} {:>8} {:>12}  {}",
                display_id(&r.item_id),
                r.description.as_deref().unwrap_or("-"),
                r.qty,
                display_value(r.value),
                r.class_label()
            );
        }
        println!("  {:\u{2500}<64}", "");

        let bars = value_by_item(&result.selected_rows);
        if !bars.is_empty() {
            // Bars scale against the largest item; the list is descending.
            let max = bars[0].value;
            println!();
            println!("  Value by item");
            for bar in &bars {
                let width = if max > 0.0 {
                    ((bar.value / max) * 40.0).round().max(0.0) as usize
                } else {
                    0
                };
                println!(
                    "  {:<14} {:<40} ${}",
                    bar.item_id.to_string(),
                    "\u{2588}".repeat(width),
                    format_dollars(bar.value)
                );
            }
        }
    }

    println!();
    println!(
        "  \u{23f1}  CSV loaded in {}ms \u{00b7} Classified in {}ms \u{00b7} View in {}ms \u{00b7} Total {}ms",
        load_ms,
        classify_ms,
        view_ms,
        load_ms + classify_ms + view_ms
    );
    println!();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn parse_thresholds(raw: &str) -> Option<AbcThresholds> {
    let (a, b) = raw.split_once(',')?;
    let a: f64 = a.trim().parse().ok()?;
    let b: f64 = b.trim().parse().ok()?;
    Some(AbcThresholds::new(a, b))
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: abc-server <sales.csv> [--category NAME] [--class A|B|C] [--top N] [--thresholds A,B] [--export PATH] [--json]");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  --category    Keep only rows whose description matches NAME");
        eprintln!("  --class       Keep only rows assigned to the given class");
        eprintln!("  --top         Keep only the N highest-value rows of the view");
        eprintln!("  --thresholds  Cumulative-percent cutoffs for classes A and B (default: 80,15)");
        eprintln!("  --export      Write the selected view to PATH as CSV");
        eprintln!("  --json        Output as JSON instead of formatted text");
        eprintln!();
        eprintln!("Example:");
        eprintln!("  abc-server fixtures/sample_sales.csv");
        eprintln!("  abc-server fixtures/sample_sales.csv --class A --json");
        eprintln!("  abc-server fixtures/sample_sales.csv --category Paint --top 10 --export view.csv");
        process::exit(1);
    }

    let csv_path = &args[1];

    // Parse optional flags
    let mut category: Option<String> = None;
    let mut class_filter: Option<AbcClass> = None;
    let mut top: Option<usize> = None;
    let mut thresholds = AbcThresholds::default();
    let mut export: Option<PathBuf> = None;
    let mut json_output = false;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--category" => {
                if i + 1 < args.len() {
                    category = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --category requires a name");
                    process::exit(1);
                }
            }
            "--class" => {
                if i + 1 < args.len() {
                    class_filter = Some(args[i + 1].parse().unwrap_or_else(|e| {
                        eprintln!("Error: --class {}", e);
                        process::exit(1);
                    }));
                    i += 2;
                } else {
                    eprintln!("Error: --class requires A, B or C");
                    process::exit(1);
                }
            }
            "--top" => {
                if i + 1 < args.len() {
                    top = Some(args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("Error: --top requires a positive integer");
                        process::exit(1);
                    }));
                    i += 2;
                } else {
                    eprintln!("Error: --top requires a number");
                    process::exit(1);
                }
            }
            "--thresholds" => {
                if i + 1 < args.len() {
                    thresholds = parse_thresholds(&args[i + 1]).unwrap_or_else(|| {
                        eprintln!("Error: --thresholds requires two numbers as A,B (e.g. 80,15)");
                        process::exit(1);
                    });
                    i += 2;
                } else {
                    eprintln!("Error: --thresholds requires a pair as A,B");
                    process::exit(1);
                }
            }
            "--export" => {
                if i + 1 < args.len() {
                    export = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                } else {
                    eprintln!("Error: --export requires a file path");
                    process::exit(1);
                }
            }
            "--json" => {
                json_output = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
    }

    // Load the sales table from CSV
    let load_start = Instant::now();
    let table = match load_sales_file(csv_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error loading CSV: {}", e);
            process::exit(1);
        }
    };
    let load_ms = load_start.elapsed().as_millis();
    let rows_processed = table.row_count();

    // Classify once; every view below reuses this result
    let classify_start = Instant::now();
    let classification = match classify(&table, thresholds) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let classify_ms = classify_start.elapsed().as_millis();

    // Build and run the report pipeline
    let view_start = Instant::now();
    let pipeline = AbcReportPipeline::with_options(Arc::clone(&classification), top, export);

    let query = ReportQuery {
        query_id: "report-001".into(),
        category,
        class: class_filter,
    };

    let result = pipeline.execute(query).await;
    let view_ms = view_start.elapsed().as_millis();

    if json_output {
        let report = build_json(
            &classification,
            &result,
            rows_processed,
            thresholds,
            top,
            TimingsJson {
                load_ms,
                classify_ms,
                view_ms,
            },
        );
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
    } else {
        print_human(
            &classification,
            &result,
            rows_processed,
            thresholds,
            top,
            load_ms,
            classify_ms,
            view_ms,
        );
    }

    // A failed side effect exits nonzero, after the report has printed.
    if !result.side_effect_failures.is_empty() {
        for failure in &result.side_effect_failures {
            eprintln!("Error: {}", failure);
        }
        process::exit(1);
    }
}
