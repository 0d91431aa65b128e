use bpmn_latex::{Converter, Diagram, ProcessMetadata, ProcessTable};

extern crate pretty_env_logger;

// cargo run --example convert -- demos/approval.bpmn [metadata.json]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "demos/approval.bpmn".into());
    let metadata: Option<ProcessMetadata> = match args.next() {
        Some(json) => Some(serde_json::from_str(&std::fs::read_to_string(json)?)?),
        None => None,
    };

    // Show what was found before rendering
    let diagram = Diagram::new(&path)?;
    let table = ProcessTable::build(&diagram);
    eprintln!("Process: {}", table.process_name());
    for row in table.rows() {
        eprintln!("  {} {} ({})", row.step_seq, row.task, row.role);
    }

    let file_name = std::path::Path::new(&path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut converter = Converter::new();
    if let Some(metadata) = metadata {
        converter = converter.metadata(metadata);
    }
    let conversion = converter.convert(&std::fs::read_to_string(&path)?, &file_name);
    for warning in &conversion.warnings {
        eprintln!("Warning: {warning}");
    }
    println!("{}", conversion.document);
    Ok(())
}
