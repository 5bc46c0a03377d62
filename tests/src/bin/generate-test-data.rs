use anyhow::Context;

/// Print a JSON array of generated comments, for use as a mock server
/// `--fixture`
#[derive(structopt::StructOpt)]
struct Opt {
    /// Number of comments
    #[structopt(long, default_value = "500")]
    count: usize,

    #[structopt(long, default_value = "0")]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let opt = <Opt as structopt::StructOpt>::from_args();
    let comments = comments_mock_server::generate_comments(opt.count, opt.seed);
    let out = serde_json::to_string_pretty(&comments).context("serializing comments")?;
    println!("{}", out);
    Ok(())
}
