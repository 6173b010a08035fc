//! # Takeoff CLI
//!
//! Terminal front end for the rebar takeoff engine. This is the thin
//! "caller" layer: it collects a few numbers, stores the requirements, and
//! prints what the engine computes - all pricing and geometry lives in
//! `takeoff_core`.

use std::io::{self, BufRead, Write};

use takeoff_core::calculations::{
    BarItem, HookType, StirrupInput, StirrupLayout, StraightBarInput,
};
use takeoff_core::materials::{standard_table, BarSize, LapSelection};
use takeoff_core::takeoff::Takeoff;
use takeoff_core::units::{Centimeters, Meters};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn main() {
    println!("Rebar Takeoff - Quantity & Cutting-List Calculator");
    println!("==================================================");
    println!();

    let clear_length_cm = prompt_f64("Beam clear length (cm) [600.0]: ", 600.0);
    let span_cm = prompt_f64("Stirrup span (cm) [400.0]: ", 400.0);
    let stock_m = prompt_f64("Stock bar length (m) [12.0]: ", 12.0);

    let mut takeoff = Takeoff::new("Demo project", "Site office", "Beam B1");
    takeoff.settings.stock_length_cm = Centimeters::from(Meters(stock_m)).value();
    let cover = takeoff.settings.default_cover_cm;

    takeoff.add_item(BarItem::Straight(StraightBarInput {
        label: "B1 bottom".to_string(),
        size: BarSize::No6,
        clear_length_cm,
        cover_cm: cover,
        hook_left: HookType::Deg90,
        hook_right: HookType::Deg90,
        lap: LapSelection::tension(false),
        count: 4,
    }));
    takeoff.add_item(BarItem::Straight(StraightBarInput {
        label: "B1 top".to_string(),
        size: BarSize::No6,
        clear_length_cm,
        cover_cm: cover,
        hook_left: HookType::Deg90,
        hook_right: HookType::Deg90,
        lap: LapSelection::tension(true),
        count: 2,
    }));
    takeoff.add_item(BarItem::Stirrup(StirrupInput {
        label: "B1 ties".to_string(),
        size: BarSize::No3,
        width_cm: 30.0,
        height_cm: 50.0,
        cover_cm: cover,
        layout: StirrupLayout::Zoned {
            span_cm,
            confined_spacing_cm: 10.0,
            ordinary_spacing_cm: 15.0,
        },
    }));

    let table = standard_table();
    match takeoff.lines(table) {
        Ok(lines) => {
            println!();
            println!("═══════════════════════════════════════════════════════════════");
            println!("  TAKEOFF DETAIL");
            println!("═══════════════════════════════════════════════════════════════");
            println!(
                "{:<4} {:<12} {:>9} {:>6} {:>11} {:>9}  {}",
                "Size", "Shape", "Unit(cm)", "Qty", "Total(cm)", "Wt(kg)", "Note"
            );
            for line in &lines {
                println!(
                    "{:<4} {:<12} {:>9.1} {:>6} {:>11.1} {:>9.2}  {}",
                    line.size.designation(),
                    line.shape,
                    line.unit_length_cm,
                    line.count,
                    line.total_length_cm,
                    line.total_weight_kg,
                    line.note
                );
            }

            let summary = takeoff
                .summary(table)
                .expect("summary follows from computed lines");
            println!();
            println!("  SUMMARY (unit price {:.0}/t)", takeoff.settings.unit_price_per_tonne);
            for row in &summary.rows {
                println!(
                    "  {:<4} {:>10.2} kg  {:>8.3} t  $ {:>10.0}",
                    row.size.designation(),
                    row.total_weight.value(),
                    row.tonnage.value(),
                    row.cost
                );
            }
            println!("═══════════════════════════════════════════════════════════════");
            println!(
                "  TOTAL: {:.2} kg = {:.3} t, $ {:.0}",
                summary.total_weight.value(),
                summary.total_tonnage.value(),
                summary.total_cost
            );
            println!("═══════════════════════════════════════════════════════════════");

            println!();
            println!("JSON Output (for API use):");
            if let Ok(json) = serde_json::to_string_pretty(&lines) {
                println!("{}", json);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
    }
}
