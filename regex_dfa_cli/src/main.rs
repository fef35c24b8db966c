use regex_dfa::Regex;
use serde::Deserialize;
use std::process::exit;
use std::{env, fs};

#[derive(Debug, Deserialize)]
struct TestRecord {
    name: String,
    regex: String,
    test_strings: Vec<TestString>,
}

#[derive(Debug, Deserialize)]
struct TestString {
    input: String,
    expected: bool,
}

fn run_record(record: &TestRecord) -> bool {
    println!("\nTesting {}: '{}'", record.name, record.regex);

    let compiled = match Regex::new(&record.regex) {
        Ok(compiled) => compiled,
        Err(e) => {
            println!("  - cannot compile '{}': {}", record.regex, e);
            return false;
        }
    };

    let mut all_passed = true;
    for case in &record.test_strings {
        let result = compiled.is_exact_match(&case.input);
        let passed = result == case.expected;
        let status = if passed { "+" } else { "-" };
        println!(
            "  {} '{}': {} (expected: {})",
            status,
            case.input,
            if result { "matched" } else { "not matched" },
            case.expected
        );
        if !passed {
            all_passed = false;
        }
    }

    if all_passed {
        println!("All cases passed!");
    } else {
        println!("Some cases failed!");
    }
    all_passed
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 1 {
        eprintln!("The program takes exactly one argument - the test fixture .json file location");
        exit(1);
    }

    let data = match fs::read_to_string(&args[0]) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("Can't read the file: {err}");
            exit(1);
        }
    };

    let records: Vec<TestRecord> = match serde_json::from_str(&data) {
        Ok(records) => records,
        Err(err) => {
            eprintln!("Invalid test fixture: {err}");
            exit(1);
        }
    };

    println!("Loaded {} test cases from {}", records.len(), &args[0]);
    let failed = records.iter().filter(|record| !run_record(record)).count();

    if failed == 0 {
        println!("\nEverything is fine!");
    } else {
        println!("\n{failed} test(s) failed.");
        exit(1);
    }
}
