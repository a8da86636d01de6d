//! brainzip - Archive files as Brainfuck programs
//!
//! # Usage
//!
//! ```bash
//! # Pack files and directories into an archive
//! brainzip compress archive.bfz path1 [path2 ...]
//!
//! # Unpack an archive into the current directory (or --dest)
//! brainzip decompress archive.bfz --dest out/
//!
//! # Show the manifest without extracting
//! brainzip list archive.bfz
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Operation failed (I/O error, malformed archive, bad program)
//! - 2: Invalid arguments

use brainzip::archive::{create_archive, extract_archive, list_archive};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let default_filter = "brainzip=info";
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut verbose = false;
    let mut dest: Option<PathBuf> = None;
    let mut positional: Vec<String> = Vec::new();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            "--dest" | "-d" => match iter.next() {
                Some(p) => dest = Some(PathBuf::from(p)),
                None => {
                    eprintln!("Error: --dest requires a directory\n");
                    print_help();
                    return ExitCode::from(2);
                }
            },
            "-h" | "--help" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            _ if arg.starts_with('-') => {
                eprintln!("Unknown option: {}\n", arg);
                print_help();
                return ExitCode::from(2);
            }
            _ => positional.push(arg.clone()),
        }
    }

    let (command, rest) = match positional.split_first() {
        Some((c, rest)) => (c.as_str(), rest),
        None => {
            eprintln!("Error: No command specified\n");
            print_help();
            return ExitCode::from(2);
        }
    };

    let result = match command {
        "compress" => cmd_compress(rest),
        "decompress" => cmd_decompress(rest, dest),
        "list" => cmd_list(rest, verbose),
        _ => {
            eprintln!("Unknown command: {}\n", command);
            print_help();
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_compress(args: &[String]) -> anyhow::Result<ExitCode> {
    let (archive, inputs) = match args.split_first() {
        Some((a, rest)) if !rest.is_empty() => (PathBuf::from(a), rest),
        _ => {
            eprintln!("Error: compress needs an archive name and at least one input path\n");
            print_help();
            return Ok(ExitCode::from(2));
        }
    };

    let inputs: Vec<PathBuf> = inputs.iter().map(PathBuf::from).collect();
    let stats = create_archive(&archive, &inputs)?;

    println!(
        "Packed {} files, {} dirs into {} ({} bytes -> {} program bytes)",
        stats.files,
        stats.dirs,
        archive.display(),
        stats.input_bytes,
        stats.program_bytes
    );
    Ok(ExitCode::SUCCESS)
}

fn cmd_decompress(args: &[String], dest: Option<PathBuf>) -> anyhow::Result<ExitCode> {
    let archive = match args {
        [a] => PathBuf::from(a),
        _ => {
            eprintln!("Error: decompress needs exactly one archive\n");
            print_help();
            return Ok(ExitCode::from(2));
        }
    };

    let dest = dest.unwrap_or_else(|| PathBuf::from("."));
    let stats = extract_archive(&archive, &dest)?;

    println!(
        "Extracted {} files, {} dirs ({} bytes) into {}",
        stats.files,
        stats.dirs,
        stats.output_bytes,
        dest.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn cmd_list(args: &[String], verbose: bool) -> anyhow::Result<ExitCode> {
    let archive = match args {
        [a] => PathBuf::from(a),
        _ => {
            eprintln!("Error: list needs exactly one archive\n");
            print_help();
            return Ok(ExitCode::from(2));
        }
    };

    let entries = list_archive(&archive)?;
    for entry in &entries {
        if verbose {
            println!("{:4} {}", entry.kind.name(), entry.path);
        } else {
            println!("{}", entry.path);
        }
    }
    println!("{} entries", entries.len());
    Ok(ExitCode::SUCCESS)
}

fn print_help() {
    eprintln!("brainzip - Archive files as Brainfuck programs");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    brainzip compress <ARCHIVE> <PATH>...");
    eprintln!("    brainzip decompress <ARCHIVE> [--dest <DIR>]");
    eprintln!("    brainzip list [-v] <ARCHIVE>");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -d, --dest <DIR>    Extraction destination (default: current directory)");
    eprintln!("    -v, --verbose       Show entry kinds in list output");
    eprintln!("    -h, --help          Print this help message");
    eprintln!();
    eprintln!("EXIT CODES:");
    eprintln!("    0    Success");
    eprintln!("    1    Operation failed");
    eprintln!("    2    Invalid arguments");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("    brainzip compress out.bfz src/ README.md");
    eprintln!("    brainzip decompress out.bfz --dest restored/");
    eprintln!("    brainzip list -v out.bfz");
}
