pub mod draw_map;

use std::{fs, path::{Path, PathBuf}};
use log::{info, error};

use crate::errors::Result;


/// A pipeline stage writing its results as files into an output directory.
pub trait Etl {
    type Input;
    type Output;

    fn etl_name(&self) -> &str;

    /// Files produced by `load`. A stage whose outputs all exist is skipped.
    fn output_paths(&self, dir: &Path) -> Vec<PathBuf>;

    fn extract(&mut self, dir: &Path) -> Result<Self::Input>;
    fn transform(&mut self, input: Self::Input) -> Result<Self::Output>;
    fn load(&mut self, dir: &Path, output: Self::Output) -> Result<()>;

    fn is_cached(&self, dir: &Path) -> Result<bool> {
        for path in self.output_paths(dir) {
            if !path.try_exists()? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn clean(&self, dir: &Path) -> Result<()> {
        for path in self.output_paths(dir) {
            if path.try_exists()? {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    fn process(&mut self, dir: &Path) -> Result<()> {
        info!(etl_name = self.etl_name(); "Starting ETL process");
        if self.is_cached(dir)? {
            info!(etl_name = self.etl_name(); "Using cached value");
            return Ok(());
        }

        info!(etl_name = self.etl_name(); "Extracting");
        let input = match self.extract(dir) {
            Ok(input) => input,
            Err(err) => {
                error!(etl_name = self.etl_name(), err = err.message.as_str(); "Extraction failed with error");
                return Err(err);
            },
        };

        info!(etl_name = self.etl_name(); "Transforming");
        let output = match self.transform(input) {
            Ok(output) => output,
            Err(err) => {
                error!(etl_name = self.etl_name(), err = err.message.as_str(); "Transformation failed with error");
                return Err(err);
            },
        };

        info!(etl_name = self.etl_name(); "Loading");
        if let Err(err) = self.load(dir, output) {
            error!(etl_name = self.etl_name(), err = err.message.as_str(); "Loading failed with error");
            return Err(err);
        }
        info!(etl_name = self.etl_name(); "Process finished");
        Ok(())
    }
}
