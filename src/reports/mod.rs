use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use vowelforge::acoustics::{bark, effective_f2};
use vowelforge::game::RunSummary;
use vowelforge::vowel::Vowel;

pub fn print_run_summaries(summaries: &[RunSummary]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Run").add_attribute(Attribute::Bold),
        Cell::new("Games"),
        Cell::new("Success").fg(Color::Green),
        Cell::new("Vowels"),
        Cell::new("Min"),
        Cell::new("Max"),
        Cell::new("Rand+"),
        Cell::new("Self+"),
        Cell::new("Disc").fg(Color::Red),
        Cell::new("Merge"),
    ]);

    for i in 1..=9 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for s in summaries {
        let min = s.inventory_sizes.iter().min().copied().unwrap_or(0);
        let max = s.inventory_sizes.iter().max().copied().unwrap_or(0);
        table.add_row(vec![
            Cell::new(s.run).add_attribute(Attribute::Bold),
            Cell::new(s.rounds),
            Cell::new(format!("{:.3}", s.success_rate())).fg(Color::Green),
            Cell::new(format!("{:.2}", s.mean_inventory_size())),
            Cell::new(min),
            Cell::new(max),
            Cell::new(s.events.random_additions),
            Cell::new(s.events.derived_additions),
            Cell::new(s.events.discards).fg(Color::Red),
            Cell::new(s.events.merges),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_formant_table(rows: &[(String, Vowel)]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Vowel").add_attribute(Attribute::Bold),
        Cell::new("Height"),
        Cell::new("Back"),
        Cell::new("Round"),
        Cell::new("F1").fg(Color::Cyan),
        Cell::new("F2").fg(Color::Cyan),
        Cell::new("F3"),
        Cell::new("F4"),
        Cell::new("F1 (bark)"),
        Cell::new("F2' (bark)").fg(Color::Green),
    ]);

    for i in 1..=9 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (name, v) in rows {
        let a = v.articulation();
        let f = v.formants();
        let [f1, f2, f3, f4] = f.as_hz();
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.4}", a.height)),
            Cell::new(format!("{:.4}", a.backness)),
            Cell::new(format!("{:.4}", a.rounding)),
            Cell::new(f1).fg(Color::Cyan),
            Cell::new(f2).fg(Color::Cyan),
            Cell::new(f3),
            Cell::new(f4),
            Cell::new(format!("{:.3}", bark(f.f1()))),
            Cell::new(format!("{:.3}", effective_f2(f))).fg(Color::Green),
        ]);
    }
    println!("\n{}", table);
}
