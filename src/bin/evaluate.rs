//! Command line tool for scoring a trained model on the IMDB test split

use anyhow::anyhow;
use bilstm_sentiment::{
    cli::{parse_batch_size, Device},
    datasets::imdb,
    pipelines::sentiment_classification::{config::Testing, evaluate},
};
use burn::backend::{Autodiff, LibTorch};
use pico_args::Arguments;

const HELP: &str = "\
Usage: evaluate [OPTIONS]

Options:
  -h, --help           Print help
  -d, --data-dir       The path to the top-level data directory (defaults to 'data')
  -b, --batch-size     Batch size (defaults to 256)
  --device             'auto', 'cpu', 'cuda' or 'cuda:N' (defaults to 'auto')
";

#[derive(Debug)]
struct Args {
    data_dir: Option<String>,
    batch_size: Option<usize>,
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
            data_dir: pargs.opt_value_from_str(["-d", "--data-dir"])?,
            batch_size: pargs.opt_value_from_fn(["-b", "--batch-size"], parse_batch_size)?,
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

    let mut config = Testing::new();

    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }

    if let Some(data_dir) = &args.data_dir {
        config.data_dir = data_dir.to_string();
    }

    let train = imdb::Dataset::load(&config.data_dir, "train").await?;
    let test = imdb::Dataset::load(&config.data_dir, "test").await?;

    let (train_rows, train_len) = train.shape();
    let (test_rows, test_len) = test.shape();
    println!("({}, {}) ({}, {})", train_rows, train_len, test_rows, test_len);

    let device = args.device.resolve();
    log::info!("Evaluating on {:?}", device);

    let evaluation = evaluate::<Autodiff<LibTorch>>(device, test, config)?;

    println!("\n{}", evaluation);
    println!("acc is: {:.4}", evaluation.accuracy());

    Ok(())
}
