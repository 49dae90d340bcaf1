use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use rs_markov_core::model::generator::DEFAULT_MAX_WORDS;
use rs_markov_core::model::{Session, SessionConfig};

/// Trains a Markov word model on text files and prints generated sentences.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Text files to train on, in order
    #[arg(required = true)]
    sources: Vec<PathBuf>,

    /// Number of words in a prefix
    #[arg(short = 'n', long, default_value_t = 3)]
    prefix_length: usize,

    /// Number of sentences to generate
    #[arg(short, long, default_value_t = 1)]
    sentences: usize,

    /// Upper bound on the number of words of one sentence
    #[arg(long, default_value_t = DEFAULT_MAX_WORDS)]
    max_words: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Retrain every source with this prefix length, then generate again
    #[arg(long)]
    retrain_to: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    // Invalid values are rejected before anything is trained
    let mut session = Session::new(SessionConfig {
        prefix_length: cli.prefix_length,
        sentence_count: cli.sentences,
        max_words: cli.max_words,
    })?;

    // Unreadable or empty files are reported and skipped
    for (source, result) in cli.sources.iter().zip(session.train_all(&cli.sources)) {
        match result {
            Ok(tokens) => println!("Trained on '{}' ({} tokens)", source.display(), tokens),
            Err(e) => {
                warn!(source = %source.display(), error = %e, "source skipped");
                println!("Skipped: {e}");
            }
        }
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    print_sentences(&session, &mut rng);

    if let Some(prefix_length) = cli.retrain_to {
        session.set_prefix_length(prefix_length)?;
        println!("All texts re-trained with {prefix_length} words per prefix");
        print_sentences(&session, &mut rng);
    }

    Ok(())
}

fn print_sentences(session: &Session, rng: &mut StdRng) {
    match session.generate(rng) {
        Ok(sentences) => {
            println!("\nDynamically Generated Text\n");
            for sentence in sentences {
                println!("{sentence}\n");
            }
        }
        Err(e) => println!("{e}"),
    }
}
