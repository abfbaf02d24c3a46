//! Command line tool to train the classifier on the IMDB train split

use anyhow::anyhow;
use bilstm_sentiment::{
    cli::{parse_batch_size, Device},
    datasets::imdb,
    models::bilstm,
    pipelines::sentiment_classification::{self, training::Config},
};
use burn::backend::{Autodiff, LibTorch};
use pico_args::Arguments;

const HELP: &str = "\
Usage: train [OPTIONS]

Options:
  -h, --help           Print help
  -d, --data-dir       The path to the top-level data directory (defaults to 'data')
  -n, --num-epochs     Number of epochs to train for
  -b, --batch-size     Batch size
  --device             'auto', 'cpu', 'cuda' or 'cuda:N' (defaults to 'auto')
  --no-tui             Disable TUI
";

#[derive(Debug)]
struct Args {
    num_epochs: Option<usize>,
    batch_size: Option<usize>,
    data_dir: Option<String>,
    device: Device,
    use_tui: bool,
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
            num_epochs: pargs.opt_value_from_str(["-n", "--num-epochs"])?,
            batch_size: pargs.opt_value_from_fn(["-b", "--batch-size"], parse_batch_size)?,
            data_dir: pargs.opt_value_from_str(["-d", "--data-dir"])?,
            device: device
                .map(|device| Device::try_from(device.as_str()))
                .transpose()?
                .unwrap_or_default(),
            use_tui: !(pargs.contains("--no-tui")),
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

    let mut config = Config::new(bilstm::Config::new());

    if let Some(num_epochs) = args.num_epochs {
        config.num_epochs = num_epochs;
    }

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
    log::info!("Training on {:?}", device);

    sentiment_classification::train::<Autodiff<LibTorch>>(
        vec![device],
        train,
        test,
        config,
        args.use_tui,
    )?;

    Ok(())
}
