use anyhow::{bail, Context, Result};
use argon_ast::ast::Decl;
use argon_diag::Diagnostics;
use argon_parse::{lex, Parser as AstParser};
use argon_types::Binder;
use clap::{Parser, ValueEnum};

/// Maximum source file size in bytes (1MB)
const MAX_SOURCE_SIZE: usize = 1_000_000;

#[derive(Parser, Debug)]
#[command(name = "argonc")]
#[command(about = "Argon programming language compiler front end")]
#[command(version = Box::leak(version_string().into_boxed_str()) as &'static str)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// The name of the output files
    #[arg(short, long, default_value = "a.out")]
    output: String,

    /// Only compile files and produce object files, do not link them
    #[arg(short = 'c', long, group = "stage")]
    compile: bool,

    /// Only compile files to assembly
    #[arg(short = 'S', long = "asm", group = "stage")]
    asm: bool,

    /// Optimization level
    #[arg(short = 'O', long = "opt-level", value_enum, default_value_t = OptLevel::O0)]
    opt_level: OptLevel,

    /// Output the intermediate representation
    #[arg(short = 'B', long, group = "stage")]
    bitcode: bool,

    /// Check that the code is well-formed; produces nothing
    #[arg(short = 'C', long, group = "stage")]
    check: bool,

    /// Source files to compile
    #[arg(required = true)]
    files: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OptLevel {
    #[value(name = "0")]
    O0,
    #[value(name = "1")]
    O1,
    #[value(name = "2")]
    O2,
    #[value(name = "3")]
    O3,
    #[value(name = "s")]
    Os,
}

impl std::fmt::Display for OptLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self {
            OptLevel::O0 => "0",
            OptLevel::O1 => "1",
            OptLevel::O2 => "2",
            OptLevel::O3 => "3",
            OptLevel::Os => "s",
        };
        f.write_str(level)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let diag = Diagnostics::new();

    // files are processed strictly sequentially; the sink accumulates
    // across all of them and decides the exit status at the end
    for file in &cli.files {
        process_file(file, &cli, &diag)?;
    }

    if cli.compile || cli.asm || cli.bitcode {
        diag.info(&format!(
            "skipping emission of '{}' at -O{}: code generation is not part of this build",
            cli.output, cli.opt_level
        ));
    }

    if diag.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

fn process_file(path: &str, cli: &Cli, diag: &Diagnostics) -> Result<()> {
    // failure to obtain source text is the one fatal condition
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("unable to read source file '{path}'"))?;

    if src.len() > MAX_SOURCE_SIZE {
        bail!(
            "source file '{}' exceeds {}MB limit ({} bytes)",
            path,
            MAX_SOURCE_SIZE / 1_000_000,
            src.len()
        );
    }

    let tokens = lex(&src, path, diag);
    for tok in &tokens {
        println!("{tok}");
    }

    if cli.check {
        let program = AstParser::new(&tokens, &src, diag).parse();
        Binder::new(diag).bind(&program);

        let has_main = program
            .declarations
            .iter()
            .any(|d| matches!(d, Decl::Function(f) if f.name == "main"));
        if !has_main {
            diag.warn(&format!("'{path}' does not define a 'main' function"));
        }

        println!("{}", serde_json::to_string_pretty(&program)?);
    }
    Ok(())
}

fn version_string() -> String {
    let mut version = format!("{} {}", env!("CARGO_PKG_VERSION"), std::env::consts::OS);
    if let Some(name) = os_release_name() {
        version.push_str(&format!(" ({name})"));
    }
    version.push(' ');
    version.push_str(std::env::consts::ARCH);
    version
}

/// Pretty distribution name on Linux; other platforms have no
/// os-release file and fall back to the bare OS string.
fn os_release_name() -> Option<String> {
    let contents = std::fs::read_to_string("/etc/os-release").ok()?;
    for line in contents.lines() {
        if let Some(rest) = line.strip_prefix("NAME=") {
            return Some(rest.trim().trim_matches(['"', '\'']).to_string());
        }
    }
    None
}
