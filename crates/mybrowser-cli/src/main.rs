use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use mybrowser_parser::{Node, StyleRule};
use mybrowser_style::StyledNode;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Stylesheet applied when `--css` is not given.
const DEFAULT_STYLESHEET: &str = "div {\n\tdisplay: block;\n\tcolor: red;\n}\n";

#[derive(Parser)]
#[command(name = "mybrowser")]
#[command(about = "mybrowser — parse HTML and CSS and resolve element styles")]
#[command(version)]
struct Cli {
    /// Log more (-v debug, -vv trace). MYBROWSER_LOG or RUST_LOG take precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse HTML, apply a stylesheet and print the styled tree
    Style {
        /// Input HTML file (stdin if omitted or `-`)
        input: Option<String>,

        /// Stylesheet file (a built-in `div` stylesheet if omitted)
        #[arg(long)]
        css: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Outline)]
        format: Format,
    },

    /// Parse HTML and print it normalized
    Html {
        /// Input HTML file (stdin if omitted or `-`)
        input: Option<String>,

        /// Print the parsed tree instead of HTML
        #[arg(long)]
        debug: bool,
    },

    /// Parse CSS and print it normalized
    Css {
        /// Input CSS file (stdin if omitted or `-`)
        input: Option<String>,

        /// Print the parsed rules instead of CSS
        #[arg(long)]
        debug: bool,
    },

    /// Check HTML (and optionally CSS) for errors without printing output
    Check {
        /// Input HTML file (stdin if omitted or `-`)
        input: Option<String>,

        /// Stylesheet file to check as well
        #[arg(long)]
        css: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Indented tree of elements with their resolved properties
    Outline,
    /// Rust debug representation of the styled tree
    Debug,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Style { input, css, format } => cmd_style(input.as_deref(), css.as_deref(), format),
        Command::Html { input, debug } => cmd_html(input.as_deref(), debug),
        Command::Css { input, debug } => cmd_css(input.as_deref(), debug),
        Command::Check { input, css } => cmd_check(input.as_deref(), css.as_deref()),
    }
}

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("MYBROWSER_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    // stdout carries program output; logs go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_source(path: Option<&str>) -> String {
    let Some(path) = path.filter(|p| *p != "-") else {
        debug!("reading from stdin");
        let mut source = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut source) {
            eprintln!("Error reading stdin: {e}");
            std::process::exit(1);
        }
        return source;
    };

    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => {
            debug!(path, bytes = source.len(), "read input");
            source
        }
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn load_html(path: Option<&str>) -> Node {
    let source = read_source(path);
    match mybrowser_parser::parse_html(&source) {
        Ok(dom) => dom,
        Err(e) => {
            eprintln!("HTML {e}");
            std::process::exit(1);
        }
    }
}

fn load_css(path: Option<&str>) -> Vec<StyleRule> {
    let source = match path {
        Some(path) => read_source(Some(path)),
        None => {
            info!("no --css given, using the built-in stylesheet");
            DEFAULT_STYLESHEET.to_string()
        }
    };
    match mybrowser_parser::parse_css(&source) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("CSS {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_style(input: Option<&str>, css: Option<&str>, format: Format) {
    let dom = load_html(input);
    let rules = load_css(css);
    let styled = mybrowser_style::resolve_style(&dom, &rules);

    match format {
        Format::Outline => {
            let mut out = String::new();
            write_outline(&styled, 0, &mut out);
            print!("{out}");
        }
        Format::Debug => println!("{styled:#?}"),
    }
}

fn cmd_html(input: Option<&str>, debug: bool) {
    let dom = load_html(input);
    if debug {
        println!("{dom:#?}");
        return;
    }
    match mybrowser_serialize::html::serialize(&dom) {
        Ok(html) => println!("{html}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn cmd_css(input: Option<&str>, debug: bool) {
    let source = read_source(input);
    let rules = match mybrowser_parser::parse_css(&source) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("CSS {e}");
            std::process::exit(1);
        }
    };
    if debug {
        println!("{rules:#?}");
        return;
    }
    match mybrowser_serialize::css::serialize(&rules) {
        Ok(css) => print!("{css}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn cmd_check(input: Option<&str>, css: Option<&str>) {
    load_html(input);
    if css.is_some() {
        load_css(css);
    }
    eprintln!("OK: {}", input.unwrap_or("<stdin>"));
}

/// Render one line per node: elements as their start tag followed by the
/// resolved properties, text as a quoted string.
fn write_outline(styled: &StyledNode<'_>, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);

    match styled.node {
        Node::Text(text) => out.push_str(&format!("{text:?}")),
        Node::Element(el) => {
            out.push('<');
            out.push_str(&el.tag_name);
            for (name, value) in &el.attributes {
                out.push_str(&format!(" {name}=\"{value}\""));
            }
            out.push('>');

            if !styled.properties.is_empty() {
                let properties: Vec<String> = styled
                    .properties
                    .iter()
                    .map(|(key, values)| format!("{key}: {};", values.join(" ")))
                    .collect();
                out.push_str(&format!(" {{ {} }}", properties.join(" ")));
            }
        }
    }
    out.push('\n');

    for child in &styled.children {
        write_outline(child, depth + 1, out);
    }
}
