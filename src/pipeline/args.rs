use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;

const DIM_FLAG: &str = "-dim";
const INPUT_FLAG: &str = "-in";
const OUTPUT_FLAG: &str = "-out";
const FLAGS: [&str; 3] = [DIM_FLAG, INPUT_FLAG, OUTPUT_FLAG];

/// Error raised by an invalid command line.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ArgsError {
    /// The flag is not recognized.
    #[error("unknown flag `{0}`")]
    UnknownFlag(String),
    /// The flag was given more than once.
    #[error("the flag `{0}` is given more than once")]
    DuplicateFlag(String),
    /// The flag is the last argument and has no value.
    #[error("missing value after `{0}`")]
    MissingValue(String),
    /// A mandatory flag is absent.
    #[error("missing required flag `{0}`")]
    MissingFlag(&'static str),
    /// The grid resolution is not a positive integer.
    #[error("invalid resolution `{0}`: expected a positive integer")]
    InvalidResolution(String),
    /// A flag is not valid unicode.
    #[error("the argument `{0}` is not valid unicode")]
    NonUnicode(String),
}

/// The arguments of a voxelization run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliArgs {
    /// The number of cells along each axis.
    pub resolution: u32,
    /// The mesh file to voxelize.
    pub input: PathBuf,
    /// The voxel set file to write.
    pub output: PathBuf,
}

/// What the command line asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Voxelize a mesh.
    Run(CliArgs),
    /// Print the usage.
    Help,
}

/// The usage text of the command-line tool.
pub fn usage() -> &'static str {
    "Usage: meshvox -dim <resolution> -in <mesh.obj|mesh.ply> -out <voxels.txt>\n\
     \n\
     Voxelizes the surface of a triangle mesh into a cubic grid and writes the\n\
     normalized positions of the occupied cells.\n\
     \n\
     Example: meshvox -dim 64 -in bunny.obj -out bunny.vox\n\
     \n\
     Set RUST_LOG to control the verbosity (default: info)."
}

/// Parses the command line arguments, without the program name.
///
/// The flags can be given in any order. `-h` or `--help` anywhere requests the usage.
pub fn parse_args<I>(args: I) -> Result<Command, ArgsError>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        return Ok(Command::Help);
    }

    // Flag values are paths and may hold any bytes, flags themselves must be unicode.
    let mut flags: HashMap<&'static str, OsString> = HashMap::new();
    let mut it = args.into_iter();

    while let Some(arg) = it.next() {
        let arg = arg
            .into_string()
            .map_err(|a| ArgsError::NonUnicode(a.to_string_lossy().into_owned()))?;
        let flag = FLAGS
            .iter()
            .copied()
            .find(|f| *f == arg)
            .ok_or_else(|| ArgsError::UnknownFlag(arg.clone()))?;
        let value = it.next().ok_or_else(|| ArgsError::MissingValue(arg.clone()))?;

        if flags.insert(flag, value).is_some() {
            return Err(ArgsError::DuplicateFlag(arg));
        }
    }

    let mut required = |flag: &'static str| flags.remove(flag).ok_or(ArgsError::MissingFlag(flag));
    let dim = required(DIM_FLAG)?;
    let input = required(INPUT_FLAG)?;
    let output = required(OUTPUT_FLAG)?;

    let resolution = match dim.to_str().map(str::parse::<u32>) {
        Some(Ok(r)) if r > 0 => r,
        _ => {
            return Err(ArgsError::InvalidResolution(
                dim.to_string_lossy().into_owned(),
            ))
        }
    };

    Ok(Command::Run(CliArgs {
        resolution,
        input: input.into(),
        output: output.into(),
    }))
}
