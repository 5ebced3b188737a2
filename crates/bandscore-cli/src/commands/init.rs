//! The `bandscore init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("bandscore.toml").exists() {
        println!("bandscore.toml already exists, skipping.");
    } else {
        std::fs::write("bandscore.toml", SAMPLE_CONFIG)?;
        println!("Created bandscore.toml");
    }

    std::fs::create_dir_all("answer-keys")?;
    let example_path = std::path::Path::new("answer-keys/example.toml");
    if example_path.exists() {
        println!("answer-keys/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_ANSWER_KEY)?;
        println!("Created answer-keys/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: bandscore validate --key answer-keys/example.toml");
    println!("  2. Write an answer sheet as JSON, e.g. {{\"answers\": {{\"1\": \"timber\"}}}}");
    println!("  3. Run: bandscore grade --key answer-keys/example.toml --answers sheet.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# bandscore configuration

answer_keys_dir = "./answer-keys"
results_dir = "./bandscore-results"
"#;

const EXAMPLE_ANSWER_KEY: &str = r#"[test]
book = 1
module = "reading"
test_number = 1
duplicate_policy = "first-wins"

[test.literal_policy]
ignore_articles = true

[[questions]]
key = "1"
literal = "timber/wood"

[[questions]]
key = "2"
choice = "C"

[[questions]]
key = "3"
verdict = "NOT GIVEN"

[[questions]]
key = "4&5"
either_order = ["B", "D"]
siblings = ["4", "5"]

[[questions]]
key = "6-7"
multi_select = ["A", "E"]
choose = 2
"#;
