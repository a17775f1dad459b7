use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use rand::Rng;
use rand::distr::Alphanumeric;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// Length of the random part of output file names
const SUFFIX_LEN: usize = 6;

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Split text into lines, keeping each line's terminator
    pub fn split_lines(text: &str) -> Vec<String> {
        text.split_inclusive('\n').map(str::to_string).collect()
    }

    /// Read a file as lines, keeping each line's terminator
    pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))?;
        Ok(Self::split_lines(&content))
    }

    // @generates: Output file name, e.g. `pl_en_2024-05-01_12-30-00_k3x9qa.txt`
    // @params: stem (directory mode only), source and target language, time, suffix
    pub fn output_file_name(
        stem: Option<&str>,
        source_language: &str,
        target_language: &str,
        timestamp: DateTime<Local>,
        suffix: &str,
    ) -> String {
        let mut name = String::new();
        if let Some(stem) = stem {
            name.push_str(stem);
            name.push('_');
        }
        name.push_str(&format!(
            "{}_{}_{}_{}.txt",
            source_language,
            target_language,
            timestamp.format("%Y-%m-%d_%H-%M-%S"),
            suffix
        ));
        name
    }

    /// Random lowercase alphanumeric suffix
    pub fn random_suffix() -> String {
        let mut rng = rand::rng();
        (0..SUFFIX_LEN)
            .map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_lowercase())
            .collect()
    }

    // @generates: Fresh output path in `output_dir`
    pub fn generate_output_path<P: AsRef<Path>>(
        output_dir: P,
        stem: Option<&str>,
        source_language: &str,
        target_language: &str,
    ) -> PathBuf {
        let name = Self::output_file_name(
            stem,
            source_language,
            target_language,
            Local::now(),
            &Self::random_suffix(),
        );
        output_dir.as_ref().join(name)
    }

    /// Write lines to a new file; fails rather than overwrite an existing one
    pub fn write_new_file<P, I, S>(path: P, lines: I) -> Result<()>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .with_context(|| format!("Failed to create output file: {:?}", path))?;

        for line in lines {
            file.write_all(line.as_ref().as_bytes())
                .with_context(|| format!("Failed to write to file: {:?}", path))?;
        }
        file.flush()
            .with_context(|| format!("Failed to write to file: {:?}", path))?;

        Ok(())
    }

    /// Find files with one of the given extensions in a directory, sorted by path
    pub fn find_files<P: AsRef<Path>>(dir: P, extensions: &[String]) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }
            let Some(ext) = path.extension() else {
                continue;
            };
            let ext = ext.to_string_lossy();
            if extensions
                .iter()
                .any(|wanted| ext.eq_ignore_ascii_case(wanted.trim_start_matches('.')))
            {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }
}
