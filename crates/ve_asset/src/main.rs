mod utils;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::{fs, io, path::Path};
use structopt::StructOpt;
use ve_asset::obj::{self, ObjMeta};
use walkdir::WalkDir;

// Cli arguments
#[derive(StructOpt, Debug)]
#[structopt(name = "ve_asset")]
struct CliArgs {
    /// Specify the input folder
    input: String,
    /// Output directory, to place the converted `.vem` files in
    #[structopt(short = "o", long = "output")]
    output: String,
    /// Read malformed numbers as zero instead of failing, unless a meta file says otherwise
    #[structopt(long = "lenient")]
    lenient: bool,
    /// Output debug info
    #[structopt(short = "v", long = "verbose")]
    verbose: bool,
}

/// Happens during setup
#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("Input folder does not exist: {0}")]
    InputFolderNonExistant(String),
    #[error("Output folder structure could not be created: {0}")]
    ErrorCreatingOutputStructure(#[from] io::Error),
}

fn main() -> Result<()> {
    let args = CliArgs::from_args();

    if !args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    } else {
        env_logger::Builder::new()
            .filter(None, log::LevelFilter::Debug)
            .init();
    }

    prepare(args)
}

fn prepare(args: CliArgs) -> Result<()> {
    let output_path = Path::new(&args.output);

    let input_path = Path::new(&args.input);
    if !input_path.is_dir() {
        return Err(CliError::InputFolderNonExistant(input_path.display().to_string()).into());
    }

    let mut converted = 0usize;
    for entry in WalkDir::new(input_path) {
        let path = match &entry {
            Err(err) => {
                warn!("Error parsing path: {}", err);
                continue;
            }
            Ok(entry) => entry.path(),
        };

        if path.is_dir() {
            continue;
        }

        if !utils::has_extension(path, "obj") {
            if utils::has_extension(path, "toml") {
                debug!("Ignored meta file: {}", path.display());
            } else {
                warn!("Could not handle path: {}", path.display());
            }
            continue;
        }

        // mirror the input folder structure in the output folder
        let relative = path
            .strip_prefix(input_path)
            .context("Error handling output path: stripping prefix")?;
        let local_output_folder = output_path.join(relative.parent().unwrap_or_else(|| Path::new("")));
        if !local_output_folder.exists() {
            fs::create_dir_all(&local_output_folder).map_err(CliError::ErrorCreatingOutputStructure)?;
        }

        process(path, &local_output_folder, args.lenient)?;
        converted += 1;
    }

    info!("Converted {} mesh(es) into {}", converted, output_path.display());
    Ok(())
}

fn process(path: &Path, output_dir: &Path, lenient: bool) -> Result<()> {
    info!("Processing Wavefront `.obj`-file: `{}`", path.display());

    let fallback = if lenient { ObjMeta::lenient() } else { ObjMeta::default() };
    let meta = ObjMeta::resolve_or(path, fallback)?;
    let mesh = obj::load_with(path, meta)?;

    for (material, buffer) in mesh.iter() {
        debug!(
            "  {}: {} vertices",
            material,
            buffer.len() / ve_format::vertex::FLOATS_PER_VERTEX
        );
    }

    let target = utils::combine_path(output_dir, utils::file_name(path)?, "vem");
    mesh.to_file(&target)
        .with_context(|| format!("Could not write mesh buffers to file: {}", target.display()))
}
