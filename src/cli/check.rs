use crate::app::{credential_status, AppConfig};

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("Crewline check\n");

    let mut all_ok = true;

    print!("Configuration... ");
    match config.validate() {
        Ok(()) => println!(
            "✓ provider {}, model {}",
            config.llm.provider,
            config.llm.effective_model()?
        ),
        Err(e) => {
            println!("✗ {e}");
            all_ok = false;
        }
    }

    if let Ok(provider) = config.llm.provider_kind() {
        for (var, present) in credential_status(provider, |var| std::env::var(var).ok()) {
            if present {
                println!("{var}... ✓ set");
            } else {
                println!("{var}... ✗ missing");
                all_ok = false;
            }
        }
    }

    println!();
    if all_ok {
        println!("✓ Ready to run crews.");
    } else {
        println!("✗ Some checks failed. Set the missing values in the environment or .env.");
        std::process::exit(1);
    }

    Ok(())
}
