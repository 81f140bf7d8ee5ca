/// Simple example demonstrating how to use the top_errors library

use anyhow::Result;
use top_errors::analyze_log_file;
use top_errors::utils::output_formatter;

fn main() -> Result<()> {
    let dir = std::env::temp_dir().join("top_errors_demo");
    std::fs::create_dir_all(&dir)?;
    let file_path = dir.join("sample.log");

    std::fs::write(
        &file_path,
        "PASS,FAIL_err1,FAIL_err9\nPASS FAIL_err1\nflaky-retry\n",
    )?;

    println!("Analyzing file: {}", file_path.display());

    let report = analyze_log_file(&file_path)?;

    println!("{}", output_formatter::to_pretty_json(&report)?);

    for (code, count) in report.ranked_errors() {
        println!("  - {}: {}", code, count);
    }

    Ok(())
}
