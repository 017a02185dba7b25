use ocrify_types::AnalyticsResult;

/// Print the finished analytics to stdout, either as JSON or as the
/// human-readable summary.
pub fn print_result(result: &AnalyticsResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!(
        "Words: {}  Characters: {}  Lines: {}",
        result.word_count, result.char_count, result.line_count
    );

    if result.top_words.is_empty() {
        println!("No recognizable words found.");
        return Ok(());
    }

    println!();
    println!("Top words:");
    for (rank, entry) in result.top_words.iter().enumerate() {
        let percentage = (entry.count as f64 / result.word_count as f64) * 100.0;
        println!(
            "{:>3}. {:<20} {:>5}  {:>5.1}%",
            rank + 1,
            entry.word,
            entry.count,
            percentage
        );
    }

    match &result.rarest_word {
        Some(word) => {
            println!();
            println!("Rarest word: {word}");
            match &result.definition {
                Some(definition) => println!("Definition: {definition}"),
                None => println!("Definition: not available"),
            }
        }
        None => {
            println!();
            println!("No unique word found.");
        }
    }

    Ok(())
}
