use {
    anyhow::{Context as _, Result},
    render_check::{
        image::load_image,
        validate::{validate, Probe, DEFAULT_IMAGE_PATH},
        Config,
    },
    std::{env, path::PathBuf, process},
};

fn run() -> Result<bool> {
    let mut args = env::args().skip(1);
    let path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_IMAGE_PATH.to_owned()));
    let probes = args
        .map(|a| a.parse::<Probe>())
        .collect::<Result<Vec<_>, _>>()?;
    let probes = if probes.is_empty() {
        Probe::defaults()
    } else {
        probes
    };

    let config = Config::from_env()?;
    let image =
        load_image(&path).with_context(|| format!("failed to load {}", path.display()))?;
    log::info!(
        "checking {} probe(s) in {} ({}x{})",
        probes.len(),
        path.display(),
        image.width(),
        image.height()
    );

    let report = validate(&image, &probes, config.threshold)?;
    println!("{}", report);
    Ok(report.passed())
}

fn main() {
    env_logger::init();

    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}
