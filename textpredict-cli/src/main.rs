use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use textpredict_core::predictor::TextPredictor;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "textpredict")]
#[command(about = "Interactive next-word prediction shell")]
struct Args {
    /// Path of the model file to load, or to create if it does not exist
    model: PathBuf,

    /// N-gram order used when creating a new model (ignored when loading)
    #[arg(short = 'n', long, default_value_t = 3)]
    order: usize,

    /// Newline-separated sample corpus for cold-start pretraining
    #[arg(short, long)]
    samples: Option<PathBuf>,

    /// Number of suggestions per query
    #[arg(short = 'k', long, default_value_t = 3)]
    count: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Sample texts are only used when the model file does not exist yet
    let samples: Vec<String> = match &args.samples {
        Some(path) => fs::read_to_string(path)?
            .lines()
            .map(str::to_owned)
            .collect(),
        None => Vec::new(),
    };

    let mut predictor = TextPredictor::new(&args.model, args.order, &samples)?;

    println!("Type some text to get next-word suggestions.");
    println!("Commands: :train  :clear  :info  :quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();

        match line {
            "" => continue,
            ":quit" => break,
            ":train" => {
                if predictor.force_training() {
                    println!("Model retrained and saved.");
                } else {
                    println!("Nothing trained (history empty or save failed).");
                }
            }
            ":clear" => {
                predictor.clear_history();
                println!("History cleared.");
            }
            ":info" => {
                println!("{}", serde_json::to_string_pretty(&predictor.model_info())?);
            }
            text => {
                let predictions = predictor.predict(text, args.count);
                if predictions.is_empty() {
                    println!("  (no suggestions yet, keep typing to train the model)");
                }
                for prediction in predictions {
                    println!("  {:<20} {:.4}", prediction.word, prediction.probability);
                }
                predictor.add_to_history(text);
            }
        }
    }

    Ok(())
}
