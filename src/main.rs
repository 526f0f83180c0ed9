use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use bffi::{bytecode::Compiler, vm::Vm};
use clap::Parser;
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bffi", version, about = "Compile and run brainfuck programs")]
struct Cli {
    /// Source files, run one after another
    files: Vec<PathBuf>,

    /// Number of cells on the tape
    #[arg(long, default_value_t = bffi::vm::DEFAULT_TAPE_SIZE)]
    tape_size: NonZeroUsize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "bffi=warn".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());

    run_files(&cli.files, cli.tape_size, stdin, stdout)
}

/// Run every file in order, sharing the program input and output.
/// Stops at the first file that fails.
fn run_files(
    paths: &[PathBuf],
    tape_size: NonZeroUsize,
    mut input: impl io::Read,
    mut output: impl io::Write,
) -> Result<()> {
    for path in paths {
        run_file(path, tape_size, &mut input, &mut output)?;
    }

    Ok(())
}

fn run_file(
    path: &Path,
    tape_size: NonZeroUsize,
    input: impl io::Read,
    output: impl io::Write,
) -> Result<()> {
    let file = File::open(path)
        .with_context(|| format!("failed to open file '{}'", path.display()))?;

    info!("compiling {}", path.display());
    let bytecode = Compiler::new(BufReader::new(file))
        .compile()
        .with_context(|| format!("failed to compile '{}'", path.display()))?;

    let mut vm = Vm::with_tape_size(bytecode, input, output, tape_size);
    vm.run()
        .with_context(|| format!("failed to run '{}'", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, io::empty};

    fn source_file(name: &str, program: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("bffi-{}-{}.bf", std::process::id(), name));
        fs::write(&path, program).unwrap();
        path
    }

    #[test]
    fn run_source_file() {
        let path = source_file("run", "# two\n++.");
        let mut output = Vec::new();
        run_file(&path, bffi::vm::DEFAULT_TAPE_SIZE, empty(), &mut output).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(output, vec![2]);
    }

    #[test]
    fn missing_file() {
        let path = std::env::temp_dir().join("bffi-does-not-exist.bf");
        let err = run_file(&path, bffi::vm::DEFAULT_TAPE_SIZE, empty(), Vec::new()).unwrap_err();
        assert!(err.to_string().starts_with("failed to open file"));
    }

    #[test]
    fn run_in_order_until_failure() {
        let paths = vec![
            source_file("first", "+++."),
            source_file("broken", "+.]"),
            source_file("last", "++++."),
        ];
        let mut output = Vec::new();
        let result = run_files(&paths, bffi::vm::DEFAULT_TAPE_SIZE, empty(), &mut output);
        for path in &paths {
            fs::remove_file(path).unwrap();
        }

        assert!(result.is_err());
        // the broken file never runs and the last one is not attempted
        assert_eq!(output, vec![3]);
    }

    #[test]
    fn run_all_files() {
        let paths = vec![source_file("one", ",+."), source_file("two", ",.")];
        let mut output = Vec::new();
        run_files(&paths, bffi::vm::DEFAULT_TAPE_SIZE, &b"ab"[..], &mut output).unwrap();
        for path in &paths {
            fs::remove_file(path).unwrap();
        }

        assert_eq!(output, b"bb");
    }

    #[test]
    fn unbalanced_file() {
        let path = source_file("unbalanced", "+[");
        let err = run_file(&path, bffi::vm::DEFAULT_TAPE_SIZE, empty(), Vec::new()).unwrap_err();
        fs::remove_file(&path).unwrap();
        let err = err.downcast::<bffi::Error>().unwrap();
        assert!(err.is_unbalanced());
    }
}
