use std::{env, process};

use anyhow::Result;
use wikiref_engine::{ReferenceTypeCodec as _, default_registry};

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} [--type TOKEN] [--roundtrip] REFERENCE");
    eprintln!();
    eprintln!("Parses REFERENCE with the codec registered under TOKEN (default: doc)");
    eprintln!("and prints the structured reference as JSON.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --type TOKEN   reference type token (doc, unc, url, mailto)");
    eprintln!("  --roundtrip    also print the re-serialized canonical wire string");
    process::exit(1);
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut token = String::from("doc");
    let mut roundtrip = false;
    let mut reference_text: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--type" => {
                i += 1;
                match args.get(i) {
                    Some(value) => token = value.clone(),
                    None => {
                        eprintln!("Error: --type requires a token argument");
                        usage(&args[0]);
                    }
                }
            }
            "--roundtrip" => roundtrip = true,
            arg if arg.starts_with("--") => usage(&args[0]),
            arg if reference_text.is_none() => reference_text = Some(arg.to_string()),
            _ => usage(&args[0]),
        }
        i += 1;
    }

    let Some(reference_text) = reference_text else {
        usage(&args[0]);
    };

    let codec = default_registry().get(&token)?;

    log::debug!("parsing {reference_text:?} as type '{token}'");
    let reference = codec.parse(&reference_text);
    println!("{}", serde_json::to_string_pretty(&reference)?);

    if roundtrip {
        let wire = codec.serialize(&reference);
        log::debug!("re-serialized {} characters", wire.len());
        println!("{wire}");
    }

    Ok(())
}
