use clap::Parser;
use doel::attributes::{FixedZone, OptionTable, TrackerZone, ZoneChecker};
use doel::context::{Context, DEFAULT_MAX_DEPTH};
use doel::{Attributes, Evaluator};
use tracing::Level;

/// Simple runner: pass display options and an attribute snapshot via CLI.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Display option expression, e.g. "zone_name[name, street_number, street], city"
    expression: String,
    /// Attribute snapshot as a JSON object, or @path to a JSON file
    #[arg(short, long, default_value = "{}")]
    attrs: String,
    /// Treat the subject as inside a zone
    #[arg(long, conflicts_with = "not_in_zone")]
    in_zone: bool,
    /// Treat the subject as outside every zone
    #[arg(long)]
    not_in_zone: bool,
    /// The tracker's reported zone is passive
    #[arg(long)]
    passive_zone: bool,
    /// Maximum fallback nesting
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Always join fragments with ", "
    #[arg(long)]
    no_street_spacing: bool,
    /// Print the parse tree instead of the label
    #[arg(long)]
    tree: bool,
    /// Log resolution steps to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn load_attributes(arg: &str) -> Result<Attributes, String> {
    let json = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?,
        None => arg.to_string(),
    };
    Attributes::from_json(&json).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    // Parse CLI arguments.
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    // Load the attribute snapshot.
    let attrs = match load_attributes(&args.attrs) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Invalid attributes: {e}");
            std::process::exit(1);
        }
    };

    // Zone membership comes from the flags, else from the snapshot.
    let zone: Box<dyn ZoneChecker> = if args.in_zone {
        Box::new(FixedZone(true))
    } else if args.not_in_zone {
        Box::new(FixedZone(false))
    } else {
        Box::new(TrackerZone::from_store(&attrs).with_passive(args.passive_zone))
    };

    let ctx = Context::default()
        .with_max_depth(args.max_depth)
        .with_street_spacing(!args.no_street_spacing);
    let options = OptionTable::with_builtins();
    let evaluator = Evaluator::new(&attrs, &*zone, &options).with_context(ctx);

    if args.tree {
        match evaluator.parse(&args.expression) {
            Ok(ast) => println!("{ast:#?}"),
            Err(e) => {
                eprintln!("Invalid display options: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("{}", evaluator.eval(&args.expression).await);
}
