mod compression;
mod hdf5;
mod node;
mod slurm;
