use std::io::{self, Write};

use chrono::NaiveTime;
use polars::prelude::DataFrame;
use timetable_tool::clock;
use timetable_tool::export::{
    DEFAULT_CSV_FILENAME, save_timetable_to_csv, save_timetable_to_json,
};
use timetable_tool::plan::parse_subject_list;
use timetable_tool::{PlanMetadata, StudyPlan, Timetable};

fn render_df_as_text_table(df: &DataFrame) -> String {
    // Compute column widths
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let mut row = Vec::with_capacity(columns.len());
        for (ci, col) in columns.iter().enumerate() {
            let s = col
                .str()
                .ok()
                .and_then(|ca| ca.get(row_idx))
                .unwrap_or("")
                .to_string();
            if s.len() > widths[ci] {
                widths[ci] = s.len();
            }
            row.push(s);
        }
        rows.push(row);
    }

    // Build horizontal separator
    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    // Build output
    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');

    // Header
    out.push('|');
    for (i, name) in col_names.iter().enumerate() {
        out.push(' ');
        out.push_str(name);
        let pad = widths[i] - name.len();
        if pad > 0 {
            out.push_str(&" ".repeat(pad));
        }
        out.push(' ');
        out.push('|');
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');

    // Rows
    for row in &rows {
        out.push('|');
        for (ci, s) in row.iter().enumerate() {
            out.push(' ');
            out.push_str(s);
            let pad = widths[ci].saturating_sub(s.len());
            if pad > 0 {
                out.push_str(&" ".repeat(pad));
            }
            out.push(' ');
            out.push('|');
        }
        out.push('\n');
    }

    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show the current plan\n  subjects <comma,separated,names>   Replace the subject list\n  time <subject> <HH:MM>             Set a subject's start time\n  days <n>                           Set how many days to plan for (1-30)\n  hours <n>                          Set study duration per subject (1-6)\n  name <text...>                     Set the plan name\n  generate                           Generate the timetable\n  table                              Show the last generated timetable\n  export [path]                      Export the timetable as CSV\n  json <path>                        Export the timetable as a JSON snapshot\n  quit|exit                          Exit"
    );
}

fn print_plan(metadata: &PlanMetadata, plan: &StudyPlan) {
    println!(
        "{}: {} subject(s), {} day(s), {} hour(s) each",
        metadata.plan_name,
        plan.subjects.len(),
        plan.day_count,
        plan.duration_hours
    );
    for subject in &plan.subjects {
        match plan.start_times.get(subject) {
            Some(time) => println!("  {} starts at {}", subject, clock::format_clock(*time)),
            None => println!("  {} has no start time set", subject),
        }
    }
}

fn main() {
    let mut metadata = PlanMetadata::default();
    let mut plan = StudyPlan::default();
    let mut timetable: Option<Timetable> = None;

    println!("Timetable Tool (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => {
                print_help();
            }
            "quit" | "exit" => break,
            "show" => {
                print_plan(&metadata, &plan);
            }
            "subjects" => {
                let rest: Vec<&str> = parts.collect();
                if rest.is_empty() {
                    println!("Usage: subjects <comma,separated,names>");
                    continue;
                }
                let names = parse_subject_list(&rest.join(" "));
                if names.is_empty() {
                    println!("Please enter at least one subject.");
                    continue;
                }
                for name in &names {
                    plan.start_times
                        .entry(name.clone())
                        .or_insert(metadata.default_start_time);
                }
                plan.start_times.retain(|name, _| names.contains(name));
                plan.subjects = names;
                print_plan(&metadata, &plan);
            }
            "time" => {
                let subject_s = parts.next();
                let time_s = parts.next();
                match (subject_s, time_s) {
                    (Some(subject), Some(time_s)) => {
                        let time = match NaiveTime::parse_from_str(time_s, "%H:%M") {
                            Ok(t) => t,
                            Err(_) => {
                                println!("Invalid time (HH:MM)");
                                continue;
                            }
                        };
                        if !plan.subjects.iter().any(|s| s == subject) {
                            println!("Unknown subject '{}'", subject);
                            continue;
                        }
                        plan.set_start_time(subject, time);
                        println!("{} starts at {}.", subject, clock::format_clock(time));
                    }
                    _ => println!("Usage: time <subject> <HH:MM>"),
                }
            }
            "days" => match parts.next().map(str::parse::<u32>) {
                Some(Ok(n)) => {
                    plan.day_count = n;
                    println!("Planning for {} day(s).", n);
                }
                _ => println!("Usage: days <n>"),
            },
            "hours" => match parts.next().map(str::parse::<i64>) {
                Some(Ok(n)) => {
                    plan.duration_hours = n;
                    println!("Studying {} hour(s) per subject.", n);
                }
                _ => println!("Usage: hours <n>"),
            },
            "name" => {
                let rest: Vec<&str> = parts.collect();
                if rest.is_empty() {
                    println!("Usage: name <text...>");
                    continue;
                }
                metadata.plan_name = rest.join(" ");
                println!("Plan renamed to '{}'.", metadata.plan_name);
            }
            "generate" => {
                if plan.subjects.is_empty() {
                    println!("Please enter at least one subject.");
                    continue;
                }
                match Timetable::generate_with_metadata(&plan, metadata.clone()) {
                    Ok(t) => {
                        println!(
                            "Timetable created successfully!\n{}",
                            render_df_as_text_table(t.dataframe())
                        );
                        timetable = Some(t);
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "table" => match &timetable {
                Some(t) => println!("{}", render_df_as_text_table(t.dataframe())),
                None => println!("No timetable generated yet. Run 'generate'."),
            },
            "export" => {
                let path = parts.next().unwrap_or(DEFAULT_CSV_FILENAME);
                match &timetable {
                    Some(t) => match save_timetable_to_csv(t, path) {
                        Ok(_) => println!("Timetable exported to {}.", path),
                        Err(e) => println!("Export error: {}", e),
                    },
                    None => println!("No timetable generated yet. Run 'generate'."),
                }
            }
            "json" => {
                let path = match parts.next() {
                    Some(p) => p,
                    None => {
                        println!("Usage: json <path>");
                        continue;
                    }
                };
                match &timetable {
                    Some(t) => match save_timetable_to_json(t, path) {
                        Ok(_) => println!("Timetable snapshot written to {}.", path),
                        Err(e) => println!("Export error: {}", e),
                    },
                    None => println!("No timetable generated yet. Run 'generate'."),
                }
            }
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
