#[macro_use]
extern crate log;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use structopt::StructOpt;

use grib2_sections::grib::templates::Template;
use grib2_sections::{config, grib, report};

#[derive(Debug, StructOpt)]
#[structopt(name = "grib2-dump", about = "Dump the sections and values of GRIB2 messages")]
struct Cli {
    /// GRIB2 file
    #[structopt(parse(from_os_str))]
    file: Option<PathBuf>,

    /// config file
    #[structopt(long = "config", short = "c", default_value = "grib2-dump.yaml", parse(from_os_str))]
    config_file: PathBuf,

    /// skip the code table lookup
    #[structopt(long)]
    raw: bool,

    /// print the registered templates and exit
    #[structopt(long)]
    list_templates: bool,
}

fn main() -> anyhow::Result<()> {

  std::env::var("RUST_LOG").map_err(|_| {
      std::env::set_var("RUST_LOG", "error,grib2_sections=info,grib2_dump=info");
  }).unwrap_or_default();
  env_logger::init();

  let args = Cli::from_args();

  if args.list_templates {
    for template in Template::REGISTERED {
      println!("{}\t{}", template.key(), template.name());
    }
    return Ok(());
  }

  let path = args.file.context("no GRIB2 file given")?;

  let config = config::load(&args.config_file)
    .with_context(|| format!("cannot load config `{}`", args.config_file.display()))?;

  let file = File::open(&path).with_context(|| format!("cannot open `{}`", path.display()))?;
  let grib = match grib::from_reader(BufReader::new(file)) {
    Ok(grib) => grib,
    Err(e) => {
      error!("`{}` : {}", path.display(), e);
      return Err(e).context("cannot read GRIB2 messages");
    }
  };
  info!("`{}` : {} message(s)", path.display(), grib.messages.len());

  println!("{}", report::render(&grib, &config, args.raw)?);

  Ok(())
}
