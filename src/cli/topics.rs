use crewline_core::{all_topics, categories};

/// Print the topic catalogue, or one category of it
pub fn run(category: Option<&str>) -> anyhow::Result<()> {
    let selected: Vec<&str> = match category {
        Some(category) => {
            if !categories().contains(&category) {
                anyhow::bail!(
                    "unknown category '{category}' (known: {})",
                    categories().join(", ")
                );
            }
            vec![category]
        }
        None => categories(),
    };

    for category in selected {
        println!("{category}:");
        for (index, topic) in all_topics(Some(category)).iter().enumerate() {
            println!("  {index}. {topic}");
        }
    }
    Ok(())
}
