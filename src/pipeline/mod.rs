//! The end-to-end voxelization pipeline.
//!
//! A mesh file is loaded, normalized into the unit cube, rasterized into an occupancy
//! grid, and the occupied cells are either written to a file ([`Mode::Batch`]) or kept in
//! memory together with the data needed to draw them ([`Mode::Interactive`]).

pub use self::args::{parse_args, usage, ArgsError, CliArgs, Command};

use crate::io::{self, MeshLoadError};
use crate::shape::Mesh;
use crate::transformation::voxelization::{
    self, RenderInstances, VoxelSet, VoxelSetFormatError, VoxelizationError,
    VoxelizationParameters,
};
use crate::transformation::{self as transform, NormalizeError, NormalizedMesh};
use std::path::{Path, PathBuf};

mod args;

/// Error raised by one of the pipeline stages.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// The input mesh could not be loaded.
    #[error("failed to load the mesh: {0}")]
    Load(#[from] MeshLoadError),
    /// The input mesh could not be rescaled into the unit cube.
    #[error("failed to normalize the mesh: {0}")]
    Normalize(#[from] NormalizeError),
    /// The occupancy grid could not be built.
    #[error("failed to voxelize the mesh: {0}")]
    Voxelize(#[from] VoxelizationError),
    /// The voxel set could not be written.
    #[error("failed to write the voxel set: {0}")]
    Output(#[from] VoxelSetFormatError),
}

/// What to do with the computed voxel set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Write the voxel set to the file at `output`.
    Batch {
        /// The path of the output file.
        output: PathBuf,
    },
    /// Keep the voxel set in memory and prepare its render instances.
    Interactive,
}

/// The result of a pipeline run.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    /// The occupied cells.
    pub voxels: VoxelSet,
    /// The mesh after normalization, with the transform mapping it back to its original frame.
    pub mesh: NormalizedMesh,
    /// The instances to draw, only computed in interactive mode.
    pub instances: Option<RenderInstances>,
}

/// A configured voxelization pipeline.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Pipeline {
    params: VoxelizationParameters,
}

impl Pipeline {
    /// A pipeline using the given parameters.
    pub fn new(params: VoxelizationParameters) -> Self {
        Self { params }
    }

    /// The parameters of this pipeline.
    pub fn params(&self) -> &VoxelizationParameters {
        &self.params
    }

    /// Voxelizes the mesh stored in the file at `input`.
    ///
    /// The parameters are validated before the file is opened.
    pub fn run(&self, input: impl AsRef<Path>, mode: Mode) -> Result<PipelineOutput, PipelineError> {
        self.params.validate()?;
        let mesh = io::load_mesh(input)?;
        self.run_mesh(mesh, mode)
    }

    /// Voxelizes a mesh already in memory.
    pub fn run_mesh(&self, mesh: Mesh, mode: Mode) -> Result<PipelineOutput, PipelineError> {
        self.params.validate()?;
        let mesh = transform::normalize(mesh, self.params.padding)?;
        let voxels = voxelization::voxelize(&mesh, &self.params)?;

        let instances = match mode {
            Mode::Batch { output } => {
                voxelization::save_voxel_set(&voxels, output)?;
                None
            }
            Mode::Interactive => Some(voxels.render_instances()),
        };

        Ok(PipelineOutput {
            voxels,
            mesh,
            instances,
        })
    }
}
