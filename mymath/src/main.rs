// SPDX-FileCopyrightText: 2025 Contributors to the mymath loader project.
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mymath::{Library, Loader, MymathModule};

const DEFAULT_RUNTIME: &str = "libpython3.12.so";
const DEFAULT_MODULE: &str = "./mymath.cpython-312-x86_64-linux-gnu.so";

#[derive(Debug, Parser)]
#[command(version, about = "Load a compiled mymath extension module and call its C API")]
struct Args {
    /// Runtime library the module links against, opened first with global
    /// visibility. Must match the interpreter the module was built for.
    #[arg(long, env = "MYMATH_RUNTIME", default_value = DEFAULT_RUNTIME)]
    runtime: String,

    /// Do not open a runtime library first.
    #[arg(long)]
    no_runtime: bool,

    /// Path to the compiled extension module.
    #[arg(long, env = "MYMATH_MODULE", default_value = DEFAULT_MODULE)]
    module: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> mymath::Result<()> {
    // The module binds immediately, so a missing dependency is a load error
    // here instead of a linker abort on the first call.
    let loader = Loader::new();

    if !args.no_runtime {
        let runtime = loader.open_prerequisite(&args.runtime)?;
        info!(runtime = runtime.name(), "runtime is globally visible");
    }

    let library = loader.open_module(&args.module)?;
    // On error the library is released when it goes out of scope.
    report(&library)?;
    library.close()
}

fn report(library: &Library) -> mymath::Result<()> {
    let module = MymathModule::resolve(library)?;

    println!("C_add_int(2, 3) = {}", module.add_int(2, 3));
    println!("C_add_double(1.5, 2.5) = {}", module.add_double(1.5, 2.5));

    let x = [1.0, 2.0, 3.0];
    let y = [4.0, 5.0, 6.0];
    match module.dot(&x, &y)? {
        Some(value) => println!(
            "C_dot({}, {}) = {value}",
            format_buffer(&x),
            format_buffer(&y)
        ),
        None => info!(library = library.name(), "C_dot not exported, skipping"),
    }
    Ok(())
}

fn format_buffer(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(f64::to_string).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_cpython_312_build() {
        let args = Args::try_parse_from(["call-mymath"]).unwrap();
        assert_eq!(args.runtime, DEFAULT_RUNTIME);
        assert_eq!(args.module, PathBuf::from(DEFAULT_MODULE));
        assert!(!args.no_runtime);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "call-mymath",
            "--no-runtime",
            "--module",
            "/tmp/libother.so",
        ])
        .unwrap();
        assert!(args.no_runtime);
        assert_eq!(args.module, PathBuf::from("/tmp/libother.so"));
    }

    #[test]
    fn module_binding_is_not_configurable() {
        assert!(Args::try_parse_from(["call-mymath", "--binding", "lazy"]).is_err());
    }

    #[test]
    fn buffers_print_like_integers_when_whole() {
        assert_eq!(format_buffer(&[1.0, 2.0, 3.0]), "[1, 2, 3]");
        assert_eq!(format_buffer(&[0.5]), "[0.5]");
        assert_eq!(format_buffer(&[]), "[]");
    }
}
