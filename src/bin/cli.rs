#![cfg(not(tarpaulin_include))]

use algoviz::catalog::{self, TraceInput};
use algoviz::sorting::{self, MAX_ELEMENTS, SortAlgorithm, SortOptions};
use algoviz::structures::{self, StructureKind};
use std::env;

fn usage(program: &str) {
    eprintln!("Usage:");
    eprintln!("  {} sort <bubble|quick|selection> <n1,n2,...> [--json] [--verbose]", program);
    eprintln!("  {} structure <array|stack|queue> \"<op1>;<op2>;...\" [--json]", program);
    eprintln!("  {} catalog <id> <n1,n2,...> [--json]", program);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("cli");

    let json = args.iter().any(|a| a == "--json");
    let verbose = args.iter().any(|a| a == "--verbose");
    let positional: Vec<&str> = args
        .iter()
        .skip(1)
        .filter(|a| !a.starts_with("--"))
        .map(String::as_str)
        .collect();

    let &[command, kind, input] = positional.as_slice() else {
        usage(program);
        return Ok(());
    };

    match command {
        "sort" => {
            let kind: SortAlgorithm = kind.parse()?;
            // strict here: a typo should be reported, not replaced
            let array = sorting::parse_array(input)?;
            let options = if verbose {
                SortOptions::verbose()
            } else {
                SortOptions::default()
            };
            let result = sorting::generate_checked(kind, &array, &options, MAX_ELEMENTS)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "{} ({}, {} space)",
                    result.name, result.time_complexity, result.space_complexity
                );
                for step in &result.steps {
                    println!(
                        "{:>4}  {:<13} {:<24} {}",
                        step.id,
                        step.action.as_str(),
                        format!("{:?}", step.array),
                        step.description
                    );
                }
            }
        }
        "structure" => {
            let kind: StructureKind = kind.parse()?;
            let script: Vec<&str> = input.split(';').map(str::trim).collect();
            let result = structures::simulate(kind, script.as_slice());

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}: {}", result.name, result.description);
                for step in &result.steps {
                    println!(
                        "{:>4}  {:<8} {:<8} {:<24} {}",
                        step.id,
                        step.operation,
                        format!("{:?}", step.status).to_lowercase(),
                        format!("{:?}", step.data),
                        step.message.as_deref().unwrap_or(&step.description)
                    );
                }
                let skipped = script.iter().filter(|l| !l.is_empty()).count() - result.steps.len();
                if skipped > 0 {
                    println!("({} unrecognized line(s) skipped)", skipped);
                }
            }
        }
        "catalog" => {
            let id: u32 = kind.parse()?;
            let input = TraceInput::Text(input.to_string());
            let trace = catalog::generate_trace(id, &input, MAX_ELEMENTS)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&trace)?);
            } else {
                for step in &trace {
                    println!("{:>4}  {:<13} {}", step.step_number, step.action, step.description);
                }
            }
        }
        _ => usage(program),
    }

    Ok(())
}
