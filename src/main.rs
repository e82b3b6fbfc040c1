//! TreeCode CLI
//!
//! Builds the DID list sample template, fills in a few instances and prints
//! them as trees.
//!
//! Usage:
//!   treecode [OPTIONS]
//!
//! Options:
//!   -n, --instances <N>   Number of template instances to print [default: 2]
//!   -g, --group <NAME>    Print one instantiated prototype group instead
//!   -s, --style <FILE>    Tree style file (TOML format)
//!   -c, --choices         List the allowed values of constrained items
//!   -h, --help            Print help

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info};

use treecode::{render_tree, Group, Result, Template, TreeStyle};

#[derive(Parser)]
#[command(name = "treecode")]
#[command(about = "Instantiate and print the DID list sample template")]
struct Cli {
    /// Number of template instances to print
    #[arg(short = 'n', long, default_value_t = 2)]
    instances: usize,

    /// Print one instantiated prototype group instead of whole instances
    #[arg(short, long)]
    group: Option<String>,

    /// Tree style file (TOML format)
    #[arg(short, long)]
    style: Option<PathBuf>,

    /// List the allowed values of constrained items
    #[arg(short, long)]
    choices: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let style = match &cli.style {
        Some(path) => match TreeStyle::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading tree style '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => TreeStyle::default(),
    };
    let style = if cli.choices {
        style.with_choices(true)
    } else {
        style
    };

    let (did, elements) = match sample_templates() {
        Ok(templates) => templates,
        Err(e) => {
            eprintln!("Error building templates: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(name) = &cli.group {
        let template = if did.group(name).is_some() { &did } else { &elements };
        match template.instantiate_group(name) {
            Ok(group) => print!("{}", render_tree(&group, &style)),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    for index in 0..cli.instances {
        match build_instance(&did, &elements, index) {
            Ok(instance) => print!("{}", render_tree(&instance, &style)),
            Err(e) => {
                eprintln!("Error building instance {}: {}", index + 1, e);
                std::process::exit(1);
            }
        }
    }
}

/// The DID list template and the template its ELEMENT rows come from
fn sample_templates() -> Result<(Template, Template)> {
    let mut did = Group::new("DID");
    did.items_mut().add_empty::<String>("ID")?;
    did.items_mut()
        .add_choices("TYPE", vec!["NORMAL".to_string(), "EXTENDED".to_string()])?;

    let mut element = Group::new("ELEMENT");
    element.items_mut().add_empty::<String>("NAME")?.set_required();
    element
        .items_mut()
        .add_choices("TYPE", vec!["uint8".to_string(), "uint16".to_string()])?;

    let mut did_template = Template::new("DID LIST");
    did_template.add_group(did);
    let mut element_template = Template::new("ELEMENT LIST");
    element_template.add_group(element);

    debug!("built sample templates");
    Ok((did_template, element_template))
}

/// Instantiate the DID list and attach two ELEMENT rows
fn build_instance(did: &Template, elements: &Template, index: usize) -> Result<Group> {
    let mut instance = did.instantiate_group("DID")?;
    instance
        .items_mut()
        .set("ID", format!("FD{:02X}", index + 1))?;
    if index % 2 == 1 {
        instance.items_mut().set("TYPE", "EXTENDED".to_string())?;
    }

    for row in 0..2 {
        let mut element = elements.instantiate_group("ELEMENT")?;
        element
            .items_mut()
            .set("NAME", format!("Interface{}", index * 2 + row + 1))?;
        if row == 1 {
            element.items_mut().set("TYPE", "uint16".to_string())?;
        }
        instance.add_group(element);
    }

    info!("built instance {} of '{}'", index + 1, did.name());
    Ok(instance)
}
