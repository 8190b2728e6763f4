use {
    anyhow::{Context as _, Result},
    render_check::{encode::Converter, Config, Error},
    std::{env, path::Path, process},
};

fn run(input: &Path, output: &Path) -> Result<()> {
    let config = Config::from_env()?;
    let conversion = Converter::from_config(&config)
        .convert(input, output)
        .with_context(|| format!("failed to convert {}", input.display()))?;

    if conversion.valid_png {
        println!(
            "Converted {} to {} (using {})",
            input.display(),
            output.display(),
            conversion.encoder
        );
    } else {
        println!(
            "Copied {} to {} (raw PPM renamed to PNG)",
            input.display(),
            output.display()
        );
        eprintln!(
            "warning: {} holds raw PPM bytes and is NOT a valid PNG",
            output.display()
        );
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let args = env::args().skip(1).collect::<Vec<_>>();
    let (input, output) = match &args[..] {
        [input, output] => (Path::new(input), Path::new(output)),
        _ => {
            eprintln!(
                "{}",
                Error::Usage("convert <input.ppm> <output.png>".to_owned())
            );
            process::exit(1);
        }
    };

    if let Err(e) = run(input, output) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}
