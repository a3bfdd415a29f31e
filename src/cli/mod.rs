//! CLI module for Crewline
//!
//! Provides the workflow commands:
//! - `content`: plan, write and edit an article on a catalogue topic
//! - `support`: answer a customer inquiry and review the answer
//! - `travel`: run the sample travel planning crew, or the full one with `--full`
//! - `topics`: list the topic catalogue
//! - `check`: validate configuration and credentials

use crate::app::AppConfig;
use clap::{Parser, Subcommand};
use crewline_core::topics::DEFAULT_CATEGORY;

pub mod check;
pub mod crew;
pub mod topics;

/// Crewline CLI
#[derive(Parser, Debug)]
#[command(name = "crewline")]
#[command(about = "Multi-agent workflows for content, support and travel")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Plan, write and edit an article
    Content {
        /// Topic category
        #[arg(long, default_value = DEFAULT_CATEGORY)]
        category: String,
        /// Position within the category
        #[arg(long, default_value_t = 0)]
        index: usize,
        /// Free-form topic, overrides the catalogue
        #[arg(long)]
        topic: Option<String>,
    },
    /// Answer a customer inquiry
    Support {
        /// Customer company
        #[arg(long)]
        customer: Option<String>,
        /// Person who reached out
        #[arg(long)]
        person: Option<String>,
        /// The question
        #[arg(long)]
        inquiry: Option<String>,
    },
    /// Run the travel planning crew
    Travel {
        /// Gather details, search tickets and build a guide instead of using the sample traveler
        #[arg(long)]
        full: bool,
    },
    /// List catalogue topics
    Topics {
        /// Only this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Validate configuration and credentials
    Check,
}

/// Run the CLI command
pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Content {
            category,
            index,
            topic,
        }) => crew::content(&config, &category, index, topic).await,
        Some(Commands::Support {
            customer,
            person,
            inquiry,
        }) => crew::support(&config, customer, person, inquiry).await,
        Some(Commands::Travel { full }) => crew::travel(&config, full).await,
        Some(Commands::Topics { category }) => topics::run(category.as_deref()),
        Some(Commands::Check) => check::run(&config),
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_defaults() {
        let cli = Cli::try_parse_from(["crewline", "content"]).unwrap();
        match cli.command {
            Some(Commands::Content {
                category,
                index,
                topic,
            }) => {
                assert_eq!(category, "technology");
                assert_eq!(index, 0);
                assert!(topic.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_support_overrides() {
        let cli = Cli::try_parse_from(["crewline", "support", "--customer", "Acme"]).unwrap();
        match cli.command {
            Some(Commands::Support {
                customer, person, ..
            }) => {
                assert_eq!(customer.as_deref(), Some("Acme"));
                assert!(person.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_travel_modes() {
        let cli = Cli::try_parse_from(["crewline", "travel"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Travel { full: false })));

        let cli = Cli::try_parse_from(["crewline", "travel", "--full"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Travel { full: true })));
    }

    #[test]
    fn test_no_command() {
        let cli = Cli::try_parse_from(["crewline"]).unwrap();
        assert!(cli.command.is_none());
    }
}
