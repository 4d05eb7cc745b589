//! Little Script Compiler Driver
//!
//! Command-line entry point. The parser front end is developed
//! separately, so the driver runs built-in demo classes through the
//! full pipeline: connect, CIL lowering, basic-block construction, and
//! backend emission.

use clap::{Parser, Subcommand};
use lsc_ast::{compile_class, samples, ClassNode};
use lsc_codegen::emit_module;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lsc")]
#[command(about = "Little Script Language Compiler")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a built-in demo class and print the result
    Demo {
        /// Which demo to compile
        #[arg(short, long, default_value = "add")]
        name: String,

        /// Output file for the emitted target module
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the CIL stream before emission
        #[arg(long)]
        print_cil: bool,

        /// Dump the target module as JSON
        #[arg(long)]
        emit_json: bool,
    },

    /// List the available demo programs
    List,
}

const DEMO_NAMES: &[&str] = &["add", "max", "sum", "clamp", "greet", "math"];

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo {
            name,
            output,
            print_cil,
            emit_json,
        } => {
            if let Err(e) = run_demo(&name, output.as_deref(), print_cil, emit_json) {
                eprintln!("Error compiling demo: {}", e);
                std::process::exit(1);
            }
        }
        Commands::List => {
            for name in DEMO_NAMES {
                println!("{}", name);
            }
        }
    }
}

fn demo_class(name: &str) -> Option<ClassNode> {
    let mut class = ClassNode::new("Math");
    match name {
        "add" => class.add_function(samples::create_add_function()),
        "max" => class.add_function(samples::create_max_function()),
        "sum" => class.add_function(samples::create_sum_to_function()),
        "clamp" => {
            // clamp_low calls max, so ship both
            class.add_function(samples::create_max_function());
            class.add_function(samples::create_clamp_function());
        }
        "greet" => class.add_function(samples::create_greet_function()),
        "math" => class = samples::create_math_class(),
        _ => return None,
    }
    Some(class)
}

fn run_demo(
    name: &str,
    output: Option<&std::path::Path>,
    print_cil: bool,
    emit_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut class = demo_class(name).ok_or_else(|| format!("Unknown demo: {}", name))?;
    println!("Compiling demo: {}", name);

    let (cil, module) = compile_class(&mut class)?;

    if print_cil {
        println!("\nCIL stream:");
        print!("{}", cil);
    }

    let text = emit_module(&module);
    println!("\nTarget module:");
    print!("{}", text);

    if emit_json {
        println!("{}", serde_json::to_string_pretty(&module)?);
    }

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("Module written to: {}", path.display());
    }

    Ok(())
}
