//! Mapping artifact generation.

pub mod cpp;

pub use cpp::{SENTINEL, render_mapping_source};

use crate::config::{GenerateConfig, IncludeStyle};
use crate::error::{ReflectError, Result};
use crate::types::EnumDeclaration;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Suffix shared by every artifact file stem.
pub const ARTIFACT_SUFFIX: &str = "_EnumMappings";

const HEADER_EXTENSIONS: &[&str] = &["h", "hh", "hpp", "hxx", "inl"];

/// Information about a written artifact.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// The path where the file was written.
    pub path: PathBuf,
    /// The number of bytes written.
    pub bytes_written: usize,
    /// The enumeration the artifact maps.
    pub enum_name: String,
    /// The source file the declaration came from, relative to the source root.
    pub source: PathBuf,
}

/// Writes mapping artifacts into one output directory.
#[derive(Debug, Clone)]
pub struct MappingGenerator {
    output_root: PathBuf,
    extension: String,
    include: IncludeStyle,
}

impl MappingGenerator {
    pub fn new(output_root: impl Into<PathBuf>, config: &GenerateConfig) -> Self {
        Self {
            output_root: output_root.into(),
            extension: config.artifact_extension.trim_start_matches('.').to_string(),
            include: config.include,
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// `<name>_EnumMappings.<ext>`
    pub fn artifact_file_name(&self, enum_name: &str) -> String {
        format!("{}{}.{}", enum_name, ARTIFACT_SUFFIX, self.extension)
    }

    pub fn artifact_path(&self, enum_name: &str) -> PathBuf {
        self.output_root.join(self.artifact_file_name(enum_name))
    }

    /// Whether `file_name` looks like something this generator writes.
    pub fn is_artifact_name(&self, file_name: &str) -> bool {
        file_name
            .strip_suffix(&format!(".{}", self.extension))
            .is_some_and(|stem| stem.len() > ARTIFACT_SUFFIX.len() && stem.ends_with(ARTIFACT_SUFFIX))
    }

    /// The header the artifact includes to get the enum definition.
    pub fn include_for(&self, decl: &EnumDeclaration, source: &Path) -> String {
        let fallback = format!("{}.h", decl.name);
        match self.include {
            IncludeStyle::EnumName => fallback,
            IncludeStyle::Source => {
                let is_header = source
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| HEADER_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
                if is_header {
                    source
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/")
                } else {
                    fallback
                }
            }
        }
    }

    /// Renders the artifact text for `decl` found in `source`.
    pub fn render(&self, decl: &EnumDeclaration, source: &Path) -> String {
        render_mapping_source(decl, &self.include_for(decl, source))
    }

    /// Creates the output directory if needed.
    pub fn ensure_output_root(&self) -> Result<()> {
        fs::create_dir_all(&self.output_root)
            .map_err(|e| ReflectError::unwritable_output(&self.output_root, e))?;
        debug!("Output directory ready: {:?}", self.output_root);
        Ok(())
    }

    /// Writes the artifact for `decl`, replacing any previous file.
    pub fn write(&self, decl: &EnumDeclaration, source: &Path) -> Result<GeneratedFile> {
        let content = self.render(decl, source);
        let path = self.artifact_path(&decl.name);

        fs::write(&path, &content).map_err(|e| ReflectError::unwritable_output(&path, e))?;
        info!("Wrote {} mappings for {} to {:?}", decl.enumerators.len(), decl.name, path);

        Ok(GeneratedFile {
            path,
            bytes_written: content.len(),
            enum_name: decl.name.clone(),
            source: source.to_path_buf(),
        })
    }
}
