//! yamlite command-line tool for inspecting, checking, and transcoding
//! documents in the yamlite YAML subset.
//!
//! Usage: yamlite [OPTIONS] [FILE|DIR]
//!
//! Options:
//!   -t, --to <FORMAT>      Output format (paths, json, yaml, toml, cbor) [default: paths]
//!   -w, --write            Write output to file with inferred name
//!   -o, --output <FILE>    Write output to specified file
//!   --check                Check if file is valid (exit 0 if valid, 1 if invalid)
//!   --strict               Fail on unrecognized lines instead of warning
//!   --tabs <N>             Expand each indentation tab to N spaces
//!   -v, --verbose          Log pipeline details to stderr
//!   -h, --help             Print help
//!   -V, --version          Print version

use libyamlite::{encode, parse_with_filename, Document, Format, Options, TabPolicy};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

mod transcode;

/// Output format selected with -t.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Paths,
    Json,
    Yaml,
    Toml,
    Cbor,
}

fn parse_target(s: &str) -> Option<Target> {
    match s {
        "paths" => Some(Target::Paths),
        "json" => Some(Target::Json),
        "yaml" | "yml" => Some(Target::Yaml),
        "toml" => Some(Target::Toml),
        "cbor" => Some(Target::Cbor),
        _ => None,
    }
}

fn format_extension(target: Target) -> &'static str {
    match target {
        Target::Paths => "paths",
        Target::Json => "json",
        Target::Yaml => "yaml",
        Target::Toml => "toml",
        Target::Cbor => "cbor",
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut target = Target::Paths;
    let mut write_back = false;
    let mut output_file: Option<&str> = None;
    let mut check_only = false;
    let mut verbose = false;
    let mut options = Options::default();
    let mut input_path: Option<&str> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-V" | "--version" => {
                println!("yamlite {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "-t" | "--to" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: -t requires a format argument");
                    process::exit(1);
                }
                target = match parse_target(&args[i]) {
                    Some(t) => t,
                    None => {
                        eprintln!("Error: Unknown format: {}", args[i]);
                        process::exit(1);
                    }
                };
            }
            "-w" | "--write" => {
                write_back = true;
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires an argument");
                    process::exit(1);
                }
                output_file = Some(&args[i]);
            }
            "--check" => {
                check_only = true;
            }
            "--strict" => {
                options.strict_grammar = true;
            }
            "--tabs" => {
                i += 1;
                let width = args.get(i).and_then(|s| s.parse::<usize>().ok());
                match width {
                    Some(n) if n > 0 => options.tabs = TabPolicy::Expand(n),
                    _ => {
                        eprintln!("Error: --tabs requires a positive width");
                        process::exit(1);
                    }
                }
            }
            "-v" | "--verbose" => {
                verbose = true;
            }
            "-" => {
                // Explicit stdin
                // input_path stays None, which means stdin
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                process::exit(1);
            }
            _ => {
                if input_path.is_some() {
                    eprintln!("Error: Multiple input paths not supported");
                    process::exit(1);
                }
                input_path = Some(&args[i]);
            }
        }
        i += 1;
    }

    init_logging(verbose);

    // Validate options
    if write_back && output_file.is_some() {
        eprintln!("Error: --write and --output are mutually exclusive");
        process::exit(1);
    }

    // Check if input is a directory
    if let Some(path) = input_path {
        if Path::new(path).is_dir() {
            // Directory mode: process all .yaml/.yml files
            if output_file.is_some() {
                eprintln!("Error: --output cannot be used with directory input");
                process::exit(1);
            }
            let code = process_directory(path, &options, target, write_back, check_only);
            process::exit(code);
        }
    }

    let input: String = match input_path {
        Some(path) => match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error reading {}: {}", path, e);
                process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading stdin: {}", e);
                process::exit(1);
            }
            buffer
        }
    };

    let exit_code = process_input(
        &input,
        input_path,
        &options,
        target,
        output_file,
        write_back,
        check_only,
    );
    process::exit(exit_code);
}

/// Install the stderr logger. `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// List the yamlite sources of a directory, sorted by name.
fn yaml_files(dir_path: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir_path)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|e| e == "yaml" || e == "yml")
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

fn process_directory(
    dir_path: &str,
    options: &Options,
    target: Target,
    write_back: bool,
    check_only: bool,
) -> i32 {
    let files = match yaml_files(Path::new(dir_path)) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error reading directory {}: {}", dir_path, e);
            return 1;
        }
    };

    let mut had_errors = false;

    for path in &files {
        let path_str = path.to_string_lossy();
        let input = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading {}: {}", path_str, e);
                had_errors = true;
                continue;
            }
        };

        let exit_code = process_input(
            &input,
            Some(&*path_str),
            options,
            target,
            None,
            write_back,
            check_only,
        );

        if exit_code != 0 {
            had_errors = true;
        }
    }

    tracing::debug!(files = files.len(), had_errors, "processed {}", dir_path);
    if had_errors {
        1
    } else {
        0
    }
}

fn process_input(
    input: &str,
    input_file: Option<&str>,
    options: &Options,
    target: Target,
    output_file: Option<&str>,
    write_back: bool,
    check_only: bool,
) -> i32 {
    let filename = input_file.map(|p| {
        Path::new(p)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| p.to_string())
    });

    let doc = match parse_with_filename(input, filename.as_deref(), options) {
        Ok(doc) => doc,
        Err(e) => {
            if let Some(path) = input_file {
                eprintln!("{}: {}", path, e);
            } else {
                eprintln!("Parse error: {}", e);
            }
            return 1;
        }
    };

    // Check-only mode: skipped lines count as failures
    if check_only {
        let label = input_file.unwrap_or("<stdin>");
        if doc.warnings().is_empty() {
            println!("{}: ok", label);
            return 0;
        }
        for warning in doc.warnings() {
            eprintln!("{}: {}", label, warning);
        }
        return 1;
    }

    let output = match render(&doc, target) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    match write_output(&output, output_file, write_back, input_file, target) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// Encode a document in the requested output format.
fn render(doc: &Document, target: Target) -> Result<Vec<u8>, String> {
    match target {
        Target::Paths => Ok(encode(doc, Format::Paths).into_bytes()),
        Target::Json => Ok(encode(doc, Format::Json).into_bytes()),
        Target::Yaml => transcode::yaml::encode(&doc.to_value())
            .map(String::into_bytes)
            .map_err(|e| format!("Cannot convert to YAML: {}", e)),
        Target::Toml => transcode::toml::encode(&doc.to_value())
            .map(String::into_bytes)
            .map_err(|e| format!("Cannot convert to TOML: {}", e)),
        Target::Cbor => transcode::cbor::encode(&doc.to_value())
            .map_err(|e| format!("Cannot convert to CBOR: {}", e)),
    }
}

/// Path written by --write: the input with the format's extension.
fn write_back_path(input_file: &str, target: Target) -> Result<PathBuf, String> {
    let input = Path::new(input_file);
    let output = input.with_extension(format_extension(target));
    if output == input {
        return Err(format!("--write would overwrite {}", input_file));
    }
    Ok(output)
}

fn write_output(
    output: &[u8],
    output_file: Option<&str>,
    write_back: bool,
    input_file: Option<&str>,
    target: Target,
) -> Result<(), String> {
    let path = match (output_file, write_back, input_file) {
        (Some(path), _, _) => PathBuf::from(path),
        (None, true, Some(input)) => write_back_path(input, target)?,
        (None, true, None) => return Err("--write requires an input file".to_string()),
        (None, false, _) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(output)
                .map_err(|e| format!("Error writing to stdout: {}", e))?;
            // Ensure text output ends with newline
            if target != Target::Cbor && !output.ends_with(b"\n") {
                handle
                    .write_all(b"\n")
                    .map_err(|e| format!("Error writing to stdout: {}", e))?;
            }
            return Ok(());
        }
    };

    fs::write(&path, output).map_err(|e| format!("Error writing {}: {}", path.display(), e))?;
    tracing::debug!(bytes = output.len(), "wrote {}", path.display());
    Ok(())
}

fn print_help() {
    println!(
        "yamlite - inspect, check and transcode YAML subset documents

USAGE:
    yamlite [OPTIONS] [FILE|DIR]

ARGS:
    [FILE|DIR]    Input file or directory (reads from stdin if not provided)
                  When a directory is given, processes all .yaml and .yml files in it

OPTIONS:
    -t, --to <FORMAT>      Output format [default: paths]
                           Supported: paths, json, yaml, toml, cbor

                           'paths' prints one dotted path per resolved entry,
                           which is how the document will be bound to a model.

    -w, --write            Write output to file with inferred extension

    -o, --output <FILE>    Write output to specified file (not valid with directory input)

    --check                Check if input is valid (exit 0 if valid, 1 if invalid)
                           Lines the parser would skip count as invalid

    --strict               Fail on unrecognized lines instead of skipping them

    --tabs <N>             Expand each tab in indentation to N spaces
                           (tabs are rejected by default)

    -v, --verbose          Log pipeline details to stderr (RUST_LOG overrides)

    -h, --help             Print help

    -V, --version          Print version

EXAMPLES:
    # Show the resolved paths of a file
    yamlite config.yaml

    # Validate a file
    yamlite --check config.yaml

    # Validate all files in a directory, rejecting stray lines
    yamlite --check --strict ./configs/

    # Convert to JSON
    yamlite -t json config.yaml

    # Convert to TOML next to the input (config.toml)
    yamlite -t toml -w config.yaml

    # Convert to CBOR (binary)
    yamlite -t cbor config.yaml -o config.cbor

    # Read a tab-indented file from stdin
    cat legacy.yaml | yamlite --tabs 4 -t json
"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(source: &str) -> Document {
        parse_with_filename(source, None, &Options::default()).unwrap()
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("paths"), Some(Target::Paths));
        assert_eq!(parse_target("yml"), Some(Target::Yaml));
        assert_eq!(parse_target("cbor"), Some(Target::Cbor));
        assert_eq!(parse_target("xml"), None);
    }

    #[test]
    fn test_render_paths() {
        let out = render(&doc("app:\n  name: demo"), Target::Paths).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "app.name = \"demo\"\n");
    }

    #[test]
    fn test_render_every_target() {
        let d = doc("app:\n  name: demo\n  tags: [a, b]\nnotes: |\n  hi\n");
        for target in [
            Target::Paths,
            Target::Json,
            Target::Yaml,
            Target::Toml,
            Target::Cbor,
        ] {
            assert!(!render(&d, target).unwrap().is_empty(), "{:?}", target);
        }
    }

    #[test]
    fn test_write_back_path() {
        assert_eq!(
            write_back_path("conf/app.yaml", Target::Json).unwrap(),
            PathBuf::from("conf/app.json")
        );
        assert!(write_back_path("conf/app.yaml", Target::Yaml).is_err());
    }

    #[test]
    fn test_yaml_files_filters_and_sorts() {
        let dir = std::env::temp_dir().join(format!("yamlite-cli-{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        for name in ["b.yml", "a.yaml", "notes.txt"] {
            fs::write(dir.join(name), "k: v\n").unwrap();
        }
        let names: Vec<String> = yaml_files(&dir)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        fs::remove_dir_all(&dir).unwrap();
        assert_eq!(names, vec!["a.yaml", "b.yml"]);
    }
}
