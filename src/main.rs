use clap::Parser;
use kobert_emotion::cli::Args;
use kobert_emotion::context::{AppContext, Settings};
use kobert_emotion::repl;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    let context = AppContext::initialize(&Settings::from(args), &mut stdout)?;
    tracing::info!(
        device = ?context.device(),
        memory_fraction = context.memory_fraction,
        "classifier ready"
    );

    repl::run(&context.classifier, stdin.lock(), stdout)?;
    Ok(())
}
