//! Command line tool for classifying reviews with a trained model

use anyhow::anyhow;
use bilstm_sentiment::{
    cli::Device,
    datasets::imdb::{self, WordIndex},
    pipelines::sentiment_classification::{config::artifact_dir, infer},
    utils::{classes::sentiment_label, files::read_lines},
};
use burn::backend::{Autodiff, LibTorch};
use pico_args::Arguments;

const HELP: &str = "\
Usage: infer [OPTIONS]

Options:
  -h, --help           Print help
  -d, --data-dir       The path to the top-level data directory (defaults to 'data')
  -i, --input          A file with one review per line (defaults to random test reviews)
  --device             'auto', 'cpu', 'cuda' or 'cuda:N' (defaults to 'auto')
";

/// Number of test reviews to sample when no input file is given
const SAMPLES: usize = 10;

#[derive(Debug)]
struct Args {
    data_dir: String,
    input: Option<String>,
    device: Device,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let device: Option<String> = pargs.opt_value_from_str("--device")?;

        let args = Args {
            data_dir: pargs
                .opt_value_from_str(["-d", "--data-dir"])?
                .unwrap_or_else(|| "data".to_string()),
            input: pargs.opt_value_from_str(["-i", "--input"])?,
            device: device
                .map(|device| Device::try_from(device.as_str()))
                .transpose()?
                .unwrap_or_default(),
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            return Err(anyhow!("Unexpected arguments: {:?}", remaining));
        }

        Ok(Some(args))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let word_index = WordIndex::load(&args.data_dir).await?;

    // Reviews as text and token indices, with the expected label when known
    let samples: Vec<(String, Vec<usize>, Option<usize>)> = match &args.input {
        Some(input) => read_lines(input)
            .await
            .map_err(|e| anyhow!("Unable to read {}: {}", input, e))?
            .into_iter()
            .map(|text| {
                let tokens = word_index.encode_item(&text, 0).tokens;

                (text, tokens, None)
            })
            .collect(),
        None => {
            let test = imdb::Dataset::load(&args.data_dir, "test").await?;

            test.get_samples(&mut rand::thread_rng(), SAMPLES)
                .into_iter()
                .map(|item| (word_index.decode(&item.tokens), item.tokens, Some(item.label)))
                .collect()
        }
    };

    let input = samples.iter().map(|(_, tokens, _)| tokens.clone()).collect();

    // Get model predictions
    let predictions = infer::<Autodiff<LibTorch>>(
        args.device.resolve(),
        &artifact_dir(&args.data_dir),
        input,
    )?;

    // Print out predictions for each sample
    for (i, ((text, _, expected), prediction)) in
        samples.into_iter().zip(predictions).enumerate()
    {
        let class = prediction.label();
        let confidence = 100.0 * prediction.confidence();
        let expected = expected.map(sentiment_label).unwrap_or("-");

        println!(
            "\n=== Item {i} ===\
             \n- Text: {text}\
             \n- Class: {class} ({confidence:.1}%)\
             \n- Expected: {expected}\
             \n================"
        );
    }

    Ok(())
}
