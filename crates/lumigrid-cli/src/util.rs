use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;

/// JSON sink for command results: stdout by default, a file when `--output`
/// is given.
#[derive(Debug)]
enum Output {
    Stdout(StdoutLock<'static>),
    File(BufWriter<File>),
}

/// Serializes `value` as pretty JSON, newline-terminated, to the given path
/// or to stdout.
pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let (mut output, target) = match output_path {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            (Output::File(BufWriter::new(file)), path.display().to_string())
        }
        None => (Output::Stdout(io::stdout().lock()), "stdout".to_owned()),
    };
    serde_json::to_writer_pretty(&mut output, value)
        .with_context(|| format!("Failed to write JSON to {target}"))?;
    writeln!(&mut output)
        .and_then(|()| output.flush())
        .with_context(|| format!("Failed to flush output to {target}"))
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(writer) => writer.write(buf),
            Output::File(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(writer) => writer.flush(),
            Output::File(writer) => writer.flush(),
        }
    }
}

/// Reads and parses a JSON file, naming the file kind in error messages.
pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;
    serde_json::from_reader(io::BufReader::new(file)).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })
}

#[cfg(test)]
mod tests {
    use lumigrid_engine::Instance;

    use super::*;

    #[test]
    fn test_save_and_read_json_file() {
        let instance = Instance::generate("5eed".parse().unwrap());
        let path = std::env::temp_dir().join(format!("lumigrid-util-{}.json", std::process::id()));

        save_json(&instance, Some(path.clone())).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with('\n'));
        let back: Instance = read_json_file("instance", &path).unwrap();
        assert_eq!(back, instance);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_json_file_names_the_kind() {
        let missing = std::env::temp_dir().join("lumigrid-util-missing.json");
        let err = read_json_file::<Instance, _>("instance", &missing).unwrap_err();
        assert!(err.to_string().contains("instance file"));
    }
}
