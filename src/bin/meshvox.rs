use meshvox::pipeline::{self, Command, Mode, Pipeline};
use meshvox::transformation::voxelization::VoxelizationParameters;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match pipeline::parse_args(std::env::args_os().skip(1)) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            println!("{}", pipeline::usage());
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {}\n\n{}", err, pipeline::usage());
            return ExitCode::from(2);
        }
    };

    let params = VoxelizationParameters {
        resolution: args.resolution,
        ..Default::default()
    };

    match Pipeline::new(params).run(&args.input, Mode::Batch { output: args.output }) {
        Ok(output) => {
            log::info!("n_size = {}", output.voxels.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
