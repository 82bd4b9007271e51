use modelframe_core::{parse_viewer_query, validate_url, Allowlist, ViewerElementState};
use std::env;
use std::fs;
use std::process;
use url::Url;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let mut allowlist = Allowlist::unrestricted();
    let mut urls: Vec<String> = Vec::new();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("--config requires a file argument");
                    process::exit(1);
                }
                match load_allowlist(&args[i]) {
                    Ok(loaded) => allowlist = loaded,
                    Err(e) => {
                        eprintln!("✗ failed to load config {}:", args[i]);
                        eprintln!("  {}", e);
                        process::exit(1);
                    }
                }
            }
            other => urls.push(other.to_string()),
        }
        i += 1;
    }

    if urls.is_empty() {
        print_usage();
        process::exit(1);
    }

    let mut exit_code = 0;

    for raw in urls {
        match check_url(&raw, &allowlist) {
            Ok(params) => {
                println!("✓ {}", raw);
                print_resolved(&params);
            }
            Err(message) => {
                eprintln!("✗ {}:", raw);
                eprintln!("  {}", message);
                exit_code = 1;
            }
        }
    }

    process::exit(exit_code);
}

fn print_usage() {
    eprintln!("Usage: modelframe-check [--config <allowlist.json>] <viewer-url>...");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  modelframe-check 'https://host/viewer.html?model=https://cdn.example.com/chair.glb'");
    eprintln!("  modelframe-check --config allowlist.json 'https://host/viewer.html?model=...'");
}

fn load_allowlist(path: &str) -> Result<Allowlist, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    Allowlist::from_json(&content).map_err(|e| e.to_string())
}

/// Run one viewer URL through the same pipeline the viewer page uses,
/// plus the builder's allowlist check for the URL-valued fields.
fn check_url(raw: &str, allowlist: &Allowlist) -> Result<modelframe_core::ViewerParameters, String> {
    let url = Url::parse(raw).map_err(|_| format!("not a valid URL: {}", raw))?;
    let params = parse_viewer_query(url.query().unwrap_or("")).map_err(|e| e.to_string())?;

    let model = validate_url(&params.model_url, "model", allowlist);
    if let Some(message) = model.message() {
        return Err(message.to_string());
    }
    if let Some(usdz) = &params.usdz_url {
        let usdz = validate_url(usdz, "USDZ", allowlist);
        if let Some(message) = usdz.message() {
            return Err(message.to_string());
        }
    }

    Ok(params)
}

fn print_resolved(params: &modelframe_core::ViewerParameters) {
    match serde_json::to_string_pretty(params) {
        Ok(json) => {
            for line in json.lines() {
                println!("  {}", line);
            }
        }
        Err(e) => eprintln!("  failed to render parameters: {}", e),
    }

    let state = ViewerElementState::derive(params);
    println!("  attributes:");
    for (name, value) in &state.attributes {
        if value.is_empty() {
            println!("    {}", name);
        } else {
            println!("    {}=\"{}\"", name, value);
        }
    }
}
