use staff_clusters::config::{self, RuntimeConfig};
use staff_clusters::diagnostics::ClusteringReport;
use staff_clusters::io::write_json_file;
use staff_clusters::{ClustersRetriever, FilamentStore, Retrieval};
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = config::load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;

    let sheet = config::load_sheet(&config.input_path).map_err(|e| e.to_string())?;
    let scale = sheet.scale;
    let mut store = sheet.into_store().map_err(|e| e.to_string())?;

    let retriever = ClustersRetriever::new(config.params.clone());
    let mut retrieval = retriever.retrieve(&mut store, &scale);
    attach_samples(&config, &store, &mut retrieval);

    print_text_summary(&retrieval.report);

    if let Some(path) = &config.output.json_out {
        write_json_file(path, &retrieval.report).map_err(|e| e.to_string())?;
        println!("\nJSON report written to {}", path.display());
    } else {
        let json = serde_json::to_string_pretty(&retrieval.report)
            .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
        println!("\nJSON report:\n{json}");
    }

    Ok(())
}

fn usage() -> String {
    "Usage: cluster_demo <config.json>".to_string()
}

fn attach_samples(config: &RuntimeConfig, store: &FilamentStore, retrieval: &mut Retrieval) {
    let Some(sampling) = &config.sampling else {
        return;
    };
    for (summary, &id) in retrieval.report.staves.iter_mut().zip(&retrieval.staves) {
        let cluster = retrieval.forest.get(id);
        summary.samples = Some(cluster.points_at(
            store,
            sampling.x,
            sampling.x_margin,
            cluster.interline(),
            sampling.global_slope,
        ));
    }
}

fn print_text_summary(report: &ClusteringReport) {
    println!("Retrieval summary");
    println!("  filaments: {}", report.filaments);
    println!("  combs: {}", report.combs);
    println!(
        "  clusters: created={} merged={} discarded={}",
        report.clusters_created, report.clusters_merged, report.clusters_discarded
    );

    println!("\nStaves ({}), longest first", report.staves.len());
    for staff in &report.staves {
        let bounds = staff
            .bounds
            .map(|b| format!("x={} y={} w={} h={}", b.x, b.y, b.width, b.height))
            .unwrap_or_else(|| "none".to_string());
        println!(
            "  #{} interline={} lines={} true_length={} bounds=[{}]{}",
            staff.id,
            staff.interline,
            staff.lines.len(),
            staff.true_length,
            bounds,
            if staff.vip { " vip" } else { "" }
        );
        for (pos, members) in staff.positions.iter().zip(&staff.lines) {
            println!("    line {pos}: filaments {members:?}");
        }
        if let Some(samples) = &staff.samples {
            let rendered: Vec<String> = samples
                .iter()
                .map(|p| match p {
                    Some(p) => format!("({:.1}, {:.1})", p.x, p.y),
                    None => "-".to_string(),
                })
                .collect();
            println!("    samples: {}", rendered.join(" "));
        }
    }

    let timing = &report.timing;
    let stages: Vec<String> = timing
        .stages
        .iter()
        .map(|s| format!("{}={:.3}", s.label, s.elapsed_ms))
        .collect();
    println!("\nTimings (ms): {} total={:.3}", stages.join(" "), timing.total_ms);
}
