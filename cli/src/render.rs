//! Console rendering of a `Snapshot` and the event log. Deliberately
//! plain text: spec.md leaves rendering entirely to the front end, so no
//! attempt is made to reproduce any particular original UI.

use pagesim_core::{Event, FrameSummary, Snapshot};

pub fn render_tick_summary(tick: u64, outcome: &pagesim_core::TickOutcome) {
    let mut parts = Vec::new();
    if let Some(pid) = outcome.admitted {
        parts.push(format!("admitted pid {pid}"));
    }
    if let Some(pid) = outcome.promoted {
        parts.push(format!("promoted pid {pid}"));
    }
    if let Some((pid, page, result)) = outcome.accessed {
        parts.push(format!("pid {pid} accessed page {page} -> {result:?}"));
    }
    if let Some(pid) = outcome.completed {
        parts.push(format!("pid {pid} completed"));
    }
    if parts.is_empty() {
        parts.push("idle".to_string());
    }
    println!("tick {tick:>5}: {}", parts.join(", "));
}

pub fn render_snapshot(snap: &Snapshot) {
    println!();
    println!("=== frames ({} used / {} total) ===", snap.frames_used(), snap.frames.len());
    for (i, f) in snap.frames.iter().enumerate() {
        match f {
            FrameSummary::Empty => println!("  [{i:>3}] empty"),
            FrameSummary::Occupied { pid, page } => println!("  [{i:>3}] pid {pid} page {page}"),
        }
    }

    println!("=== processes ===");
    for p in &snap.processes {
        println!(
            "  pid {:>3} {:<10} {:?} pages={} resident={} swapped={} instr_left={}",
            p.pid, p.name, p.state, p.page_count, p.resident_pages, p.swapped_pages, p.remaining_instructions
        );
    }

    println!("=== metrics ===");
    println!(
        "  accesses={} faults={} (rate {:.3}) swap_ins={} swap_outs={} ticks={}",
        snap.metrics.total_accesses,
        snap.metrics.total_faults,
        snap.metrics.page_fault_rate(),
        snap.metrics.swap_ins,
        snap.metrics.swap_outs,
        snap.metrics.ticks,
    );
    println!("  ram utilization: {:.1}%", snap.ram_utilization() * 100.0);
}

pub fn render_event_log(events: &[Event]) {
    println!();
    println!("=== event log ({} entries) ===", events.len());
    for event in events {
        println!("  {event}");
    }
}
