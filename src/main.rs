//! Main entry point for the doczip CLI application.
//!
//! Prints library metadata, the list of documented classes, or the
//! documentation of a single class from a Javadoc ZIP archive.

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use doczip::{ClassInfo, Cli, LibraryArchive, MethodInfo};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let library = LibraryArchive::open(&cli.archive)
        .with_context(|| format!("Failed to open {}", cli.archive.display()))?;

    if cli.list {
        return list_classes(&library);
    }

    match &cli.class {
        Some(class) => show_class(&library, class),
        None => {
            show_library(&library);
            Ok(())
        }
    }
}

/// Initialize logging to stderr.
///
/// `RUST_LOG` wins over the `--verbose` default when it is set.
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn show_library(library: &LibraryArchive) {
    let field = |value: Option<&str>| value.unwrap_or("-").to_string();

    println!("{:<12} {}", "Archive:", library.path().display());
    println!("{:<12} {}", "Name:", field(library.name()));
    println!("{:<12} {}", "Version:", field(library.version()));
    println!("{:<12} {}", "Javadocs:", field(library.base_url()));
    println!("{:<12} {}", "Project:", field(library.project_url()));
}

/// Print every class name, sorted
fn list_classes(library: &LibraryArchive) -> Result<()> {
    let mut classes = library
        .classes()?
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to list classes")?;
    classes.sort();

    for class in &classes {
        println!("{class}");
    }
    eprintln!("{} classes", classes.len());

    Ok(())
}

fn show_class(library: &LibraryArchive, class: &str) -> Result<()> {
    let Some(info) = library
        .class_info(class)
        .with_context(|| format!("Failed to read documentation for {class}"))?
    else {
        bail!("Class not found: {class}");
    };

    print_class(&info);
    Ok(())
}

fn print_class(info: &ClassInfo) {
    let mut header = info.modifiers.join(" ");
    if !header.is_empty() {
        header.push(' ');
    }
    println!("{header}{} {}", info.kind, info.name);

    if let Some(super_class) = &info.super_class {
        println!("  extends {super_class}");
    }
    if !info.interfaces.is_empty() {
        let interfaces: Vec<_> = info.interfaces.iter().map(|i| i.full()).collect();
        println!("  implements {}", interfaces.join(", "));
    }
    if let Some(since) = &info.since {
        println!("  since {since}");
    }
    if info.deprecated {
        println!("  @Deprecated");
    }
    if let Some(url) = &info.url {
        println!("  {url}");
    }

    if let Some(description) = &info.description {
        println!();
        println!("{description}");
    }

    if !info.constructors.is_empty() {
        println!();
        println!("Constructors:");
        for constructor in &info.constructors {
            print_method(constructor);
        }
    }

    if !info.methods.is_empty() {
        println!();
        println!("Methods:");
        for method in &info.methods {
            print_method(method);
        }
    }
}

fn print_method(method: &MethodInfo) {
    let mut line = String::from("  ");
    for modifier in &method.modifiers {
        line.push_str(modifier);
        line.push(' ');
    }
    if let Some(return_type) = &method.return_type {
        line.push_str(return_type);
        line.push(' ');
    }
    line.push_str(&method.signature());
    if method.deprecated {
        line.push_str(" (deprecated)");
    }
    println!("{line}");
}
