use color_print::cprintln;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use vmasm::{
    config::{Config, Redefinition, Unresolved},
    emit,
    error::Error,
    listing::{self, SymbolMap},
    translate::{read_source, Translator},
};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

const DEFAULT_SOURCE: &str = "testfile.txt";
const DEFAULT_TARGET: &str = "bin_code.txt";
const DEFAULT_VM: &str = "VirtualMachine9";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Source file [default: testfile.txt next to the executable]
    source: Option<String>,

    /// Output file [default: bin_code.txt next to the source]
    #[clap(short, long)]
    output: Option<String>,

    /// Virtual machine executable [default: VirtualMachine9 next to the executable]
    #[clap(long)]
    vm: Option<String>,

    /// Translate only, do not start the virtual machine
    #[clap(long)]
    no_run: bool,

    /// Dump the translation listing
    #[clap(short, long)]
    dump: bool,

    /// Write the symbol map as YAML
    #[clap(short, long)]
    symbols: Option<String>,

    /// YAML config file
    #[clap(short, long)]
    config: Option<String>,

    /// Fail on re-defined and undefined symbols
    #[clap(long)]
    strict: bool,

    /// Print debug logs
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    std::process::exit(run(args));
}

fn run(args: Args) -> i32 {
    println!("VM09 Assembler");
    let mut files: IndexMap<String, Vec<String>> = IndexMap::new();

    let mut config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(err) => return fail(err, &files),
        },
        None => Config::default(),
    };
    if args.strict {
        config.redefinition = Redefinition::Error;
        config.unresolved = Unresolved::Error;
    }

    let exe_dir = exe_dir();
    let source = args
        .source
        .clone()
        .unwrap_or_else(|| path_str(&exe_dir.join(DEFAULT_SOURCE)));
    let target = args.output.clone().unwrap_or_else(|| {
        let dir = Path::new(&source).parent().unwrap_or(Path::new(""));
        path_str(&dir.join(DEFAULT_TARGET))
    });

    println!("1. Read Source");
    println!("  < {}", source);
    match read_source(&source) {
        Ok(lines) => files.insert(source.clone(), lines),
        Err(err) => return fail(err, &files),
    };

    println!("2. Translate");
    let output = match Translator::new(config.clone()).translate(&source, &files[&source]) {
        Ok(output) => output,
        Err(err) => return fail(err, &files),
    };
    for diag in &output.program.diags {
        diag.print(&files);
    }
    println!(
        "  - {} lines, {} symbols",
        output.code.len(),
        output.program.symbols.len()
    );

    println!("3. Write Target");
    println!("  > {}", target);
    if let Err(err) = emit::write(&target, &output.code) {
        return fail(err, &files);
    }
    if let Some(path) = &args.symbols {
        println!("  > {}", path);
        if let Err(err) = SymbolMap::generate(&output.program).write(path) {
            return fail(err, &files);
        }
    }

    if args.dump {
        listing::print_dump(&files[&source], &output);
    }

    if args.no_run {
        return 0;
    }

    let vm = args
        .vm
        .or(config.vm)
        .unwrap_or_else(|| path_str(&exe_dir.join(DEFAULT_VM)));
    println!("4. Run {}", vm);
    match Command::new(&vm).arg(&target).status() {
        Ok(status) => status.code().unwrap_or(1),
        Err(e) => fail(Error::VmLaunch(vm, e), &files),
    }
}

fn fail(err: Error, files: &IndexMap<String, Vec<String>>) -> i32 {
    err.print_diag(files);
    cprintln!("<red,bold>aborted</>");
    1
}

fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_default()
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
